mod article;
mod group;
mod ids;
mod user;

pub use article::{Article, ArticleDraft};
pub use group::{
    AdminEntry, ArticleEntry, ArticleState, Group, MemberEntry, MembershipState, NewGroup,
};
pub use ids::{ArticleId, GroupId, UserId};
pub use user::{User, UserSummary};
