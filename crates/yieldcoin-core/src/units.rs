//! Integer-only conversion between human decimal strings and base units.
//!
//! All token amounts travel as `U256` base units. Parsing rejects input
//! with more fractional digits than the token carries instead of rounding;
//! formatting is exact, with a separate truncating display helper for UI
//! summaries.

use alloy_primitives::U256;

use crate::errors::{Error, ProtocolError, Result};

/// Parse a human decimal string ("12.5") into base units for a token with
/// `decimals` decimal places.
pub fn parse_units(input: &str, decimals: u8) -> Result<U256> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty amount"));
    }
    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("no digits"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("amount must be an unsigned decimal number"));
    }
    if frac.len() > decimals as usize {
        return Err(invalid(&format!(
            "at most {decimals} decimal places supported, got {}",
            frac.len()
        )));
    }

    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole_part = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10).map_err(|e| invalid(&format!("whole part: {e}")))?
    };
    let frac_scaled = if frac.is_empty() {
        U256::ZERO
    } else {
        let frac_value =
            U256::from_str_radix(frac, 10).map_err(|e| invalid(&format!("fraction: {e}")))?;
        let pad = U256::from(10u64).pow(U256::from(decimals as usize - frac.len()));
        frac_value * pad
    };

    whole_part
        .checked_mul(scale)
        .and_then(|w| w.checked_add(frac_scaled))
        .ok_or_else(|| invalid("amount overflows"))
}

/// Format base units as an exact decimal string (trailing fractional zeros
/// stripped).
pub fn format_units(amount: U256, decimals: u8) -> String {
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / scale;
    let frac = amount % scale;
    if frac.is_zero() {
        return whole.to_string();
    }
    let frac_str = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    let trimmed = frac_str.trim_end_matches('0');
    format!("{whole}.{trimmed}")
}

/// Format truncated to `display_decimals` fractional digits, for summary
/// displays. Truncates, never rounds up.
pub fn format_units_truncated(amount: U256, decimals: u8, display_decimals: u8) -> String {
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / scale;
    if display_decimals == 0 {
        return whole.to_string();
    }
    let frac = amount % scale;
    let frac_str = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    let keep = (display_decimals as usize).min(frac_str.len());
    format!("{whole}.{}", &frac_str[..keep])
}

fn invalid(message: &str) -> Error {
    Error::Protocol(ProtocolError::InvalidAmount {
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fraction() {
        assert_eq!(parse_units("50", 6).unwrap(), U256::from(50_000_000u64));
        assert_eq!(parse_units("12.5", 6).unwrap(), U256::from(12_500_000u64));
        assert_eq!(parse_units("0.000001", 6).unwrap(), U256::from(1u64));
        assert_eq!(parse_units(".5", 6).unwrap(), U256::from(500_000u64));
    }

    #[test]
    fn test_parse_rejects_excess_precision() {
        assert!(parse_units("0.0000001", 6).is_err());
        assert!(parse_units("1.1234567890123456789", 18).is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_units("", 6).is_err());
        assert!(parse_units("-1", 6).is_err());
        assert!(parse_units("1e6", 6).is_err());
        assert!(parse_units(".", 6).is_err());
    }

    #[test]
    fn test_format_exact() {
        assert_eq!(format_units(U256::from(50_000_000u64), 6), "50");
        assert_eq!(format_units(U256::from(12_500_000u64), 6), "12.5");
        assert_eq!(format_units(U256::from(1u64), 18), "0.000000000000000001");
    }

    #[test]
    fn test_format_truncates_not_rounds() {
        // 1.999999 at 2 display digits stays 1.99
        assert_eq!(format_units_truncated(U256::from(1_999_999u64), 6, 2), "1.99");
        assert_eq!(format_units_truncated(U256::from(1_999_999u64), 6, 0), "1");
    }

    #[test]
    fn test_round_trip() {
        for s in ["0", "1", "200.000001", "987654321.123456"] {
            let parsed = parse_units(s, 6).unwrap();
            assert_eq!(format_units(parsed, 6), s);
        }
    }
}
