//! Client side of mgrlink
//!
//! Receives frames from the manager, decodes them against the message
//! registry and applies configure messages to the stats reporter.

pub mod config;
pub mod reporter;

pub use config::ClientConfig;
pub use reporter::StatsReporter;

use mgrlink_shared::{
    deliver, Dispatcher, EnvelopeHeader, Message, MessageError, MessageRegistry, MgrConfigure,
};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Connection to the manager as seen by a client.
#[derive(Debug)]
pub struct MgrClient {
    config: ClientConfig,
    registry: Arc<MessageRegistry>,
    reporter: Arc<StatsReporter>,
    last_configure: Mutex<Option<(EnvelopeHeader, MgrConfigure)>>,
}

impl MgrClient {
    pub fn new(config: ClientConfig, registry: Arc<MessageRegistry>) -> anyhow::Result<Self> {
        config.validate()?;
        let reporter = Arc::new(StatsReporter::new(config.initial_stats_period));
        Ok(Self {
            config,
            registry,
            reporter,
            last_configure: Mutex::new(None),
        })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Reporter whose cadence follows the manager's configure messages.
    pub fn reporter(&self) -> &Arc<StatsReporter> {
        &self.reporter
    }

    /// Most recent configure message applied, with the header it arrived in.
    pub fn last_configure(&self) -> Option<(EnvelopeHeader, MgrConfigure)> {
        self.last_configure.lock().ok().and_then(|last| *last)
    }

    /// Transport delivery callback: decode `raw` and dispatch it.
    ///
    /// Decode failures are logged and returned to the transport.
    pub fn handle_frame(&self, type_id: u16, raw: &[u8]) -> Result<EnvelopeHeader, MessageError> {
        deliver(&self.registry, self, type_id, raw).map_err(|e| {
            warn!("{}: rejected frame {:#06x} from manager: {}", self.config.name, type_id, e);
            e
        })
    }

    fn handle_mgr_configure(&self, header: EnvelopeHeader, msg: MgrConfigure) {
        info!(
            "{}: got {} v{} stats_period={}s",
            self.config.name,
            msg,
            header.version,
            msg.stats_period()
        );
        self.reporter.apply(&msg);
        if let Ok(mut last) = self.last_configure.lock() {
            *last = Some((header, msg));
        }
    }
}

impl Dispatcher for MgrClient {
    fn ms_dispatch(&self, header: EnvelopeHeader, message: Message) {
        match message {
            Message::MgrConfigure(msg) => self.handle_mgr_configure(header, msg),
        }
    }
}
