//! Configuration types for the client

use serde::{Deserialize, Serialize};

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Name the manager knows this client by
    pub name: String,

    /// Reporting interval in seconds until the manager sends one (0 = no
    /// periodic reports)
    pub initial_stats_period: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            name: client_name(),
            initial_stats_period: 0,
        }
    }
}

impl ClientConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Client name must not be empty");
        }
        Ok(())
    }
}

/// Generate a client name from the hostname (or fallback to PID).
fn client_name() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| format!("client-{}", std::process::id()))
}
