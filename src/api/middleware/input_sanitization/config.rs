use crate::domain::filtering::injection::DEFAULT_MAX_DEPTH;

/// Injection guard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSanitizationConfig {
    /// Maximum nesting depth before a structure is rejected
    pub max_depth: usize,
    /// Largest JSON body buffered for inspection
    pub max_body_bytes: usize,
    /// Whether JSON request bodies are inspected
    pub inspect_bodies: bool,
}

impl Default for InputSanitizationConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_body_bytes: 64 * 1024,
            inspect_bodies: true,
        }
    }
}

impl InputSanitizationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set maximum buffered body size
    pub fn with_max_body_bytes(mut self, bytes: usize) -> Self {
        self.max_body_bytes = bytes;
        self
    }

    /// Enable/disable body inspection
    pub fn with_body_inspection(mut self, enabled: bool) -> Self {
        self.inspect_bodies = enabled;
        self
    }
}
