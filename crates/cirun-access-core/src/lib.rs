pub mod cleanup;
pub mod config;
pub mod error;
mod exec;
pub mod github;
pub mod manifest;
pub mod paths;
pub mod process;
pub mod registry;
pub mod requests;
pub mod smithy;

pub use config::Config;
pub use error::{AccessError, Result};
