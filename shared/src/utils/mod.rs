//! Utility functions and helpers

use anyhow::{Context, Result};
use std::time::Duration;

/// Convert bytes to a hexadecimal string
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Parse a hexadecimal string (whitespace and `0x` prefix allowed) back into bytes
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>> {
    let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(&digits);
    hex::decode(digits).context("Invalid hex input")
}

/// Parse a duration string (e.g., "30s", "5m", "1h")
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    if let Some(num_str) = s.strip_suffix('s') {
        let secs: u64 = num_str.parse()?;
        Ok(Duration::from_secs(secs))
    } else if let Some(num_str) = s.strip_suffix('m') {
        let mins: u64 = num_str.parse()?;
        let secs = mins.checked_mul(60).context("Duration overflows")?;
        Ok(Duration::from_secs(secs))
    } else if let Some(num_str) = s.strip_suffix('h') {
        let hours: u64 = num_str.parse()?;
        let secs = hours.checked_mul(3600).context("Duration overflows")?;
        Ok(Duration::from_secs(secs))
    } else {
        // Default to seconds if no suffix
        let secs: u64 = s.parse()?;
        Ok(Duration::from_secs(secs))
    }
}

/// Parse a duration string into a whole-second stats period that fits the wire
pub fn parse_stats_period(s: &str) -> Result<u32> {
    let duration = parse_duration(s)?;
    u32::try_from(duration.as_secs())
        .with_context(|| format!("Stats period too large: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("30s").unwrap().as_secs(), 30);
        assert_eq!(parse_duration("5m").unwrap().as_secs(), 300);
        assert_eq!(parse_duration("1h").unwrap().as_secs(), 3600);
        assert_eq!(parse_duration("60").unwrap().as_secs(), 60);
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn test_parse_stats_period() {
        assert_eq!(parse_stats_period("0").unwrap(), 0);
        assert_eq!(parse_stats_period("2m").unwrap(), 120);
        assert_eq!(parse_stats_period("4294967295").unwrap(), u32::MAX);
        assert!(parse_stats_period("4294967296").is_err());
    }

    #[test]
    fn test_huge_minutes_and_hours_fail() {
        // Both multiply past u64::MAX; the wrapped value would fit in a u32.
        assert!(parse_duration("307445734561825861m").is_err());
        assert!(parse_stats_period("307445734561825861m").is_err());
        assert!(parse_stats_period("5124095576030432h").is_err());
        // Fits in u64 seconds but not in a u32 period.
        assert!(parse_stats_period("71583m").is_err());
        assert_eq!(parse_stats_period("71582m").unwrap(), 71582 * 60);
    }

    #[test]
    fn test_bytes_to_hex() {
        assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
    }

    #[test]
    fn test_hex_to_bytes() {
        assert_eq!(hex_to_bytes("deadbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(hex_to_bytes("0x01 07").unwrap(), vec![0x01, 0x07]);
        assert_eq!(hex_to_bytes("0X0aFF").unwrap(), vec![0x0a, 0xff]);
        assert!(hex_to_bytes("ée").is_err());
        assert!(hex_to_bytes("abc").is_err());
        assert!(hex_to_bytes("zz").is_err());
    }
}
