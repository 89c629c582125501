use crate::scheduler::SchedulerService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub scheduler: Arc<SchedulerService>,
}

impl AppState {
    pub fn new(scheduler: Arc<SchedulerService>) -> Self {
        Self { scheduler }
    }
}
