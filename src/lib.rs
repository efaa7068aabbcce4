pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{rpc::JsonRpcClient, storage::LocalStorage};
pub use crate::config::{CliConfig, Settings};
pub use crate::core::{engine::DeployEngine, verify::VerificationCommand};
pub use crate::utils::error::{DeployError, Result};
