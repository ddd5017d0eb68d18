/* src/config.rs */

use std::time::Duration;

/// Library name sent in the default `User-Agent` header.
pub const DEFAULT_NAME: &str = "myip-foo";

/// Library version sent in the default `User-Agent` header.
pub const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for single-endpoint calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default per-branch timeout for dual-stack resolution.
pub const DEFAULT_DUAL_STACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Construction-time configuration shared by both client flavours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Name half of the `User-Agent` header.
    pub name: String,
    /// Version half of the `User-Agent` header.
    pub version: String,
    /// Timeout applied to single-endpoint calls unless overridden per call.
    pub timeout: Duration,
    /// Timeout applied to each dual-stack branch unless overridden per call.
    pub dual_stack_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            dual_stack_timeout: DEFAULT_DUAL_STACK_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name and version advertised in the `User-Agent` header.
    pub fn with_user_agent(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.name = name.into();
        self.version = version.into();
        self
    }

    /// Set the default timeout for single-endpoint calls.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the default per-branch timeout for dual-stack resolution.
    pub fn with_dual_stack_timeout(mut self, timeout: Duration) -> Self {
        self.dual_stack_timeout = timeout;
        self
    }

    /// The rendered `User-Agent` header value, `<name>/<version>`.
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}
