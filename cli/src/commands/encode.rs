//! Encode command implementation

use anyhow::{Context, Result};
use clap::Args;
use mgrlink_manager::ManagerConfig;
use mgrlink_shared::utils::{bytes_to_hex, parse_stats_period};
use mgrlink_shared::{FeatureSet, Frame, MgrConfigure};
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Stats period to send (e.g., "30", "30s", "5m"); overrides the config
    #[arg(short, long)]
    pub period: Option<String>,

    /// Manager config file (TOML) to take the period from
    #[arg(short, long, env = "MGRLINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Client name, used to pick a per-client period from the config
    #[arg(long, default_value = "")]
    pub client: String,

    /// Peer feature bits (decimal or 0x-prefixed hex)
    #[arg(short, long)]
    pub features: Option<String>,
}

pub fn run(args: EncodeArgs) -> Result<()> {
    println!("{}", encode(&args)?);
    Ok(())
}

/// Build the frame described by `args` and return it as hex.
pub fn encode(args: &EncodeArgs) -> Result<String> {
    let config = ManagerConfig::load(args.config.as_deref())?;

    let stats_period = match &args.period {
        Some(period) => parse_stats_period(period).context("Failed to parse period")?,
        None => config.stats_period_for(&args.client),
    };
    let features = match &args.features {
        Some(bits) => parse_features(bits)?,
        None => config.target_features,
    };

    let msg = MgrConfigure::new(stats_period);
    let frame = Frame::encode(&msg.into(), features).context("Failed to encode frame")?;
    debug!(
        "{} stats_period={}s features={} -> {} bytes",
        msg,
        stats_period,
        features,
        frame.bytes.len()
    );
    Ok(bytes_to_hex(&frame.bytes))
}

fn parse_features(s: &str) -> Result<FeatureSet> {
    let s = s.trim();
    let bits = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    }
    .with_context(|| format!("Invalid feature bits: {}", s))?;
    Ok(FeatureSet::from_bits(bits))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(period: Option<&str>) -> EncodeArgs {
        EncodeArgs {
            period: period.map(str::to_string),
            config: None,
            client: String::new(),
            features: None,
        }
    }

    #[test]
    fn test_encode_period() {
        assert_eq!(encode(&args(Some("30s"))).unwrap(), "0107010001001e000000");
    }

    #[test]
    fn test_encode_zero_period() {
        assert_eq!(encode(&args(Some("0"))).unwrap(), "01070100010000000000");
    }

    #[test]
    fn test_encode_rejects_oversized_period() {
        assert!(encode(&args(Some("4294967296"))).is_err());
    }

    #[test]
    fn test_parse_features() {
        assert_eq!(parse_features("0x10").unwrap().bits(), 16);
        assert_eq!(parse_features("0X1f").unwrap().bits(), 31);
        assert_eq!(parse_features("7").unwrap().bits(), 7);
        assert!(parse_features("lots").is_err());
    }
}
