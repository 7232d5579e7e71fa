//! MCP Server core implementation

use mutation_engine::MutationEngine;

/// Default deadline for a single `mutate` call
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// The MutaDoc MCP Server
#[derive(Debug, Clone)]
pub struct MutaDocServer {
    /// Server name
    name: String,
    /// Server version
    version: String,
    /// Analysis timeout in milliseconds
    timeout_ms: u64,
    engine: MutationEngine,
}

impl MutaDocServer {
    /// Create a server around an engine
    pub fn new(engine: MutationEngine) -> Self {
        Self {
            name: "mutadoc-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            engine,
        }
    }

    /// Create with custom timeout
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn engine(&self) -> &MutationEngine {
        &self.engine
    }
}

impl Default for MutaDocServer {
    fn default() -> Self {
        Self::new(MutationEngine::new())
    }
}
