mod config;
pub mod environment;
mod error;

pub use config::BrowserConfig;
pub use environment::Environment;
pub use error::{AppError, ViewError};
