pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod habits;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod summary;

pub use app::router;
pub use config::Config;
pub use state::AppState;
