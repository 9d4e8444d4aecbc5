pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod service;
pub mod state;
pub mod store;
pub mod transform;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use store::open_store;
