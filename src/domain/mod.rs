pub mod administration;
pub mod error;
pub mod event;
pub mod membership;
pub mod model;
pub mod moderation;
pub mod permission;
pub mod repository;
