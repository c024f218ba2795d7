/// Errors raised while constructing pipeline components.
///
/// Every variant is a configuration problem detected up front; nothing in the
/// per-frame path returns an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid grid dimensions: {width}x{height} with {components} components")]
    InvalidDimensions {
        width: usize,
        height: usize,
        components: usize,
    },
    #[error("grid buffer length mismatch: expected {expected}, got {actual}")]
    BufferLength { expected: usize, actual: usize },
    #[error("invalid viewport: {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ConfigError {
    pub fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
