//! Configuration for the Hunyuan chat adapter
//!
//! Credentials and sampling defaults are read from a TOML file (with
//! `{{ env.VAR }}` placeholders) or straight from the process environment.

#![allow(clippy::must_use_candidate)]

mod env;
pub mod hunyuan;
mod loader;

use serde::Deserialize;

pub use hunyuan::*;

/// Top-level adapter configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Hunyuan credentials and request defaults
    pub hunyuan: HunyuanConfig,
}
