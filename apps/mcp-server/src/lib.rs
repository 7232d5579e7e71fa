//! MutaDoc MCP Server
//!
//! A Model Context Protocol server that exposes document mutation testing
//! to MCP-compliant AI agents.

pub mod error;
pub mod mcp;
pub mod transport;

pub use error::ServerError;
pub use mcp::server::MutaDocServer;
pub use mutation_engine::{MutateRequest, MutationEngine, MutationReport};
