pub mod config;
pub mod controllers;
pub mod errors;
pub mod scrapers;
pub mod services;
pub mod types;

pub use controllers::build_router;
pub use types::AppState;
