//! Seam between the protocol layer and whatever transport moves the bytes.
//!
//! The transport itself (connections, ordering, retransmission) lives
//! elsewhere. This module only fixes what it is handed on send and what it
//! calls on delivery.

use super::error::MessageError;
use super::features::FeatureSet;
use super::messages::Message;
use super::registry::MessageRegistry;
use super::wire::{self, EnvelopeHeader};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// An encoded message ready for the transport, tagged with its type id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub type_id: u16,
    pub bytes: Vec<u8>,
}

impl Frame {
    /// Encode `message` for a peer advertising `features`.
    pub fn encode(message: &Message, features: FeatureSet) -> Result<Self, MessageError> {
        Ok(Self {
            type_id: message.type_id(),
            bytes: wire::encode(message, features)?,
        })
    }
}

/// Outbound half of the transport. Takes ownership of each frame.
pub trait Messenger: Send + Sync {
    fn send(&self, frame: Frame) -> Result<(), MessageError>;
}

impl<T: Messenger + ?Sized> Messenger for Arc<T> {
    fn send(&self, frame: Frame) -> Result<(), MessageError> {
        (**self).send(frame)
    }
}

/// Receiving application logic, called with each successfully decoded message.
pub trait Dispatcher: Send + Sync {
    fn ms_dispatch(&self, header: EnvelopeHeader, message: Message);
}

/// Delivery callback body: decode `raw` and hand the result to `dispatcher`.
///
/// Decode errors go back to the transport; nothing reaches the dispatcher
/// unless the message decoded completely.
pub fn deliver(
    registry: &MessageRegistry,
    dispatcher: &dyn Dispatcher,
    type_id: u16,
    raw: &[u8],
) -> Result<EnvelopeHeader, MessageError> {
    let (header, message) = registry.decode_tagged(type_id, raw)?;
    debug!("dispatching {}", message);
    dispatcher.ms_dispatch(header, message);
    Ok(header)
}

/// In-process messenger that queues frames in memory.
///
/// Useful for wiring a manager and a client together in one process.
#[derive(Debug, Default)]
pub struct MemoryMessenger {
    queue: Mutex<VecDeque<Frame>>,
}

impl MemoryMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every queued frame in send order.
    pub fn drain(&self) -> Vec<Frame> {
        match self.queue.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Messenger for MemoryMessenger {
    fn send(&self, frame: Frame) -> Result<(), MessageError> {
        let mut queue = self
            .queue
            .lock()
            .map_err(|e| MessageError::transport(e.to_string()))?;
        queue.push_back(frame);
        Ok(())
    }
}
