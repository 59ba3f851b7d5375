//! Core module - Configuration, errors, and common types

mod config;
mod error;
mod types;

pub use config::{Config, GeneralConfig, PageConfig, TranslationsConfig};
pub(crate) use config::APP_DIR;
pub use error::{Error, Result};
pub use types::{Direction, Language};
