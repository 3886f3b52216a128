use anyhow::Result;
use mgrlink_client::{ClientConfig, MgrClient};
use mgrlink_manager::{ManagerConfig, ManagerSession};
use mgrlink_shared::protocol::wire::HEADER_LEN;
use mgrlink_shared::{EnvelopeHeader, MemoryMessenger, MessageError, MessageRegistry};
use std::sync::Arc;

fn pair(config: ManagerConfig) -> Result<(ManagerSession<Arc<MemoryMessenger>>, Arc<MemoryMessenger>, MgrClient)> {
    let messenger = Arc::new(MemoryMessenger::new());
    let session = ManagerSession::new(config, messenger.clone());
    let registry = Arc::new(MessageRegistry::default_set());
    let client = MgrClient::new(ClientConfig::new("client-a"), registry)?;
    Ok((session, messenger, client))
}

fn pump(messenger: &MemoryMessenger, client: &MgrClient) -> Vec<Result<EnvelopeHeader, MessageError>> {
    messenger
        .drain()
        .into_iter()
        .map(|frame| client.handle_frame(frame.type_id, &frame.bytes))
        .collect()
}

#[test]
fn test_manager_configures_client() -> Result<()> {
    let mut config = ManagerConfig::default();
    config.clients.insert("client-a".to_string(), 30);
    let (session, messenger, client) = pair(config)?;

    session.configure_client(client.name())?;
    for result in pump(&messenger, &client) {
        result?;
    }

    assert_eq!(client.reporter().period(), 30);
    Ok(())
}

#[test]
fn test_zero_period_reaches_client_unchanged() -> Result<()> {
    let (mut session, messenger, client) = pair(ManagerConfig::default())?;

    session.configure_client(client.name())?;
    pump(&messenger, &client);
    assert_eq!(client.reporter().period(), 5);

    session.set_stats_period(0, &[client.name()])?;
    pump(&messenger, &client);
    assert_eq!(client.reporter().period(), 0);
    assert_eq!(client.last_configure().map(|(_, m)| m.stats_period()), Some(0));
    Ok(())
}

#[test]
fn test_bad_frames_are_reported_to_transport() -> Result<()> {
    let (session, messenger, client) = pair(ManagerConfig::default())?;
    session.configure_client(client.name())?;
    let frame = messenger.drain().remove(0);

    // Header cut short.
    let err = client.handle_frame(frame.type_id, &frame.bytes[..HEADER_LEN - 2]);
    assert!(matches!(err, Err(MessageError::MalformedHeader { .. })));

    // Unregistered type.
    let mut unknown = frame.bytes.clone();
    unknown[0] = 0x99;
    let err = client.handle_frame(0x0799, &unknown);
    assert_eq!(err, Err(MessageError::UnknownMessageType { type_id: 0x0799 }));

    // Sender dropped compatibility with v1.
    let mut future = frame.bytes.clone();
    future[2] = 3;
    future[4] = 2;
    let err = client.handle_frame(frame.type_id, &future);
    assert!(matches!(err, Err(MessageError::IncompatibleVersion { .. })));

    assert_eq!(client.reporter().period(), 0);
    Ok(())
}

#[test]
fn test_newer_sender_with_extra_fields() -> Result<()> {
    let (session, messenger, client) = pair(ManagerConfig::default())?;
    session.configure_client(client.name())?;
    let frame = messenger.drain().remove(0);

    let mut newer = frame.bytes.clone();
    newer[2] = 2;
    newer.extend_from_slice(&[0xAA, 0xBB]);
    let header = client.handle_frame(frame.type_id, &newer)?;

    assert_eq!(header.version, 2);
    assert_eq!(header.compat_version, 1);
    assert_eq!(client.reporter().period(), 5);
    Ok(())
}
