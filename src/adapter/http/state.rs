use crate::application::eventbus::SharedEventBus;
use crate::application::service::{GroupService, UserService};
use crate::infrastructure::persistence::Repositories;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub group_service: Arc<GroupService>,
    pub user_service: Arc<UserService>,
    pub event_bus: SharedEventBus,
}

impl AppState {
    pub fn new(repos: Repositories, event_bus: SharedEventBus) -> Self {
        let group_service = GroupService::new(
            repos.groups,
            repos.articles,
            repos.users.clone(),
            repos.unit_of_work,
            event_bus.clone(),
        );

        Self {
            group_service: Arc::new(group_service),
            user_service: Arc::new(UserService::new(repos.users)),
            event_bus,
        }
    }
}
