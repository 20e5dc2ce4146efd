//! PURIS Client - REST access to the PURIS backend
//!
//! Provides:
//! - [`BackendClient`]: typed calls for records, reference data, stocks and EDC monitoring
//! - [`HttpGateway`]: the form layer's persistence seam over HTTP
//! - [`Settings`]: TOML settings with environment overrides

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;

pub use client::{error_message, BackendClient, API_KEY_HEADER};
pub use config::{ClientConfig, Endpoints, Settings, ENV_API_KEY, ENV_BASE_URL};
pub use error::ClientError;
pub use gateway::HttpGateway;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
