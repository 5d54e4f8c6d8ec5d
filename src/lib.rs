pub mod api;
pub mod app;
pub mod config;
pub mod errors;
pub mod habits;
pub mod handlers;
pub mod join;
pub mod models;
pub mod records;
pub mod state;
pub mod storefront;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
