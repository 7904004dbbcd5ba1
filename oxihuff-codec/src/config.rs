//! Compression configuration.

use std::fmt;

/// How the code tree is recorded at the start of a compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Pre-order serialized tree (the only mode with a codec).
    #[default]
    Tree,
    /// Raw frequency counts. Recognised but not implemented.
    Counts,
}

impl HeaderMode {
    /// Short human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tree => "tree header",
            Self::Counts => "count header",
        }
    }

    /// Whether this mode has an encoder and decoder.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Tree)
    }
}

impl fmt::Display for HeaderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration passed into a compress call.
///
/// There is no process-wide state: every call receives its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HuffConfig {
    /// Header layout to emit.
    pub header: HeaderMode,
}

impl HuffConfig {
    /// Standard configuration: tree header.
    pub const TREE: Self = Self {
        header: HeaderMode::Tree,
    };

    /// Create a configuration with the given header mode.
    pub fn new(header: HeaderMode) -> Self {
        Self { header }
    }
}
