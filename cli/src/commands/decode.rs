//! Decode command implementation

use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use mgrlink_shared::utils::hex_to_bytes;
use mgrlink_shared::{EnvelopeHeader, Message, MessageRegistry};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame bytes as hex (header and body)
    pub frame: String,

    /// Print the decoded frame as JSON
    #[arg(long)]
    pub json: bool,
}

/// A decoded frame as printed by `--json`.
#[derive(Debug, Serialize)]
pub struct DecodedFrame {
    pub header: EnvelopeHeader,
    pub rendered: String,
    pub message: Message,
}

pub fn run(args: DecodeArgs) -> Result<()> {
    let decoded = decode(&args.frame)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&decoded)?);
        return Ok(());
    }

    output::success(&format!("Decoded {}", decoded.rendered));
    output::field(
        "type",
        format!("{} ({:#06x})", decoded.message.type_name(), decoded.header.type_id),
    );
    output::field("version", decoded.header.version);
    output::field("compat_version", decoded.header.compat_version);
    match &decoded.message {
        Message::MgrConfigure(m) => output::field("stats_period", format!("{}s", m.stats_period())),
    }
    Ok(())
}

/// Decode a hex frame with every message kind this build knows.
pub fn decode(hex: &str) -> Result<DecodedFrame> {
    let bytes = hex_to_bytes(hex).context("Frame is not valid hex")?;
    let registry = MessageRegistry::default_set();
    let (header, message) = registry
        .decode_frame(&bytes)
        .context("Failed to decode frame")?;
    Ok(DecodedFrame {
        header,
        rendered: message.render(),
        message,
    })
}
