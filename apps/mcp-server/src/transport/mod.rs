//! Transports for the MCP server

pub mod stdio;
