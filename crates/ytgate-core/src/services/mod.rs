//! Core services - the gateway's orchestration layer.
//!
//! Services sit between the ports and the adapters. They never touch
//! processes or the filesystem directly.

mod gateway;

pub use gateway::GatewayService;
