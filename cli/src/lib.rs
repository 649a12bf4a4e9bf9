//! CLI utilities for giztoy.
//!
//! This crate provides the configuration, request loading and output
//! helpers shared by the command line tools.

pub mod config;
pub mod output;
pub mod request;

pub use config::{load_config, mask_api_key, save_config, Config, Context};
pub use output::{guess_extension, print_verbose, Output, OutputFormat};
pub use request::{load_request, parse_request, RequestError};
