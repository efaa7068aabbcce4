// Adapters layer: concrete implementations for external systems (node RPC, filesystem).

pub mod rpc;
pub mod storage;
