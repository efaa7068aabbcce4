// Domain layer: deployment models and the ports the deployer talks through.

pub mod model;
pub mod ports;
