pub mod aggregator;
pub mod api;
pub mod config;
pub mod decode;
pub mod error;
pub mod join;
pub mod models;
pub mod teams;
pub mod utils;

pub use aggregator::{Aggregator, Providers, Seasons};
pub use config::Config;
pub use error::{Error, Result};
pub use models::*;
