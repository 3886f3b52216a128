//! Sending configure messages to clients

use crate::config::ManagerConfig;
use mgrlink_shared::{FeatureSet, Frame, MessageError, Messenger, MgrConfigure};
use tracing::{debug, info};

/// Manager-side view of the clients it configures.
///
/// Holds the current policy and the messenger frames are handed to. Each send
/// builds a fresh message; nothing is kept once the messenger owns the bytes.
#[derive(Debug)]
pub struct ManagerSession<M> {
    config: ManagerConfig,
    messenger: M,
}

impl<M: Messenger> ManagerSession<M> {
    pub fn new(config: ManagerConfig, messenger: M) -> Self {
        Self { config, messenger }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Configure message `client` should receive under the current policy.
    pub fn configure_message(&self, client: &str) -> MgrConfigure {
        MgrConfigure::new(self.config.stats_period_for(client))
    }

    /// Send `client` its stats period, encoded for the configured peer features.
    pub fn configure_client(&self, client: &str) -> Result<MgrConfigure, MessageError> {
        self.configure_client_with_features(client, self.config.target_features)
    }

    /// Send `client` its stats period, encoded for a peer advertising `features`.
    pub fn configure_client_with_features(
        &self,
        client: &str,
        features: FeatureSet,
    ) -> Result<MgrConfigure, MessageError> {
        let msg = self.configure_message(client);
        let frame = Frame::encode(&msg.into(), features)?;
        debug!(
            "encoded {} for {} ({} bytes, features {})",
            msg,
            client,
            frame.bytes.len(),
            features
        );
        self.messenger.send(frame)?;
        info!(
            "Sent {} to {} (stats_period={}s)",
            msg,
            client,
            msg.stats_period()
        );
        Ok(msg)
    }

    /// Change the default period and push it to `clients`.
    ///
    /// Clients with an override keep their own period. Returns how many
    /// frames were sent; stops at the first send error.
    pub fn set_stats_period(
        &mut self,
        stats_period: u32,
        clients: &[&str],
    ) -> Result<usize, MessageError> {
        info!(
            "Default stats period {}s -> {}s",
            self.config.stats_period, stats_period
        );
        self.config.stats_period = stats_period;
        for client in clients {
            self.configure_client(client)?;
        }
        Ok(clients.len())
    }

    /// Set a per-client period and push it to that client.
    pub fn set_client_period(
        &mut self,
        client: &str,
        stats_period: u32,
    ) -> Result<MgrConfigure, MessageError> {
        self.config.clients.insert(client.to_string(), stats_period);
        self.configure_client(client)
    }
}
