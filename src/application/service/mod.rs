mod group_service;
mod user_service;

pub use group_service::{AdminView, GroupService, MemberView};
pub use user_service::UserService;
