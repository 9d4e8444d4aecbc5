use crate::service::WorkoutService;
use crate::store::WorkoutStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub workouts: WorkoutService,
}

impl AppState {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self {
            workouts: WorkoutService::new(store),
        }
    }
}
