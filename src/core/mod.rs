pub mod abi;
pub mod artifact;
pub mod deployer;
pub mod engine;
pub mod report;
pub mod units;
pub mod verify;

pub use crate::domain::model::{ConstructorArg, Deployment, DeploymentPlan};
pub use crate::domain::ports::{ChainClient, Storage};
pub use crate::utils::error::Result;
