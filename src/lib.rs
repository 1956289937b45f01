pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;

pub use error::{AppError, AppResult};
pub use state::AppState;
