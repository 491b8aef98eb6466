//! Withdrawal preview math
//!
//! Pure functions, no I/O. Replicates the vault's own integer arithmetic
//! so the preview matches what the contract will pay out: every division
//! truncates, nothing is rounded up.
//!
//! # Units
//!
//! - `total_value`: USDC base units (6 decimals), from `getTotalValue()`
//! - `total_shares`: share-token base units (18 decimals), from the
//!   ParentPeer's `getTotalShares()`
//! - `share_amount`: share-token base units the user will burn

use alloy_primitives::U256;
use yieldcoin_core::{Error, ProtocolError, Result};

/// Share-scaling constant used by the vault (1e12 bridges the 6-decimal
/// asset to the 18-decimal share)
pub const INITIAL_SHARE_PRECISION: u64 = 1_000_000_000_000;

/// Result of a withdrawal preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalPreview {
    /// USDC base units the burn will release
    pub asset_amount: U256,
    /// Shares to be burned (echoed input)
    pub share_amount: U256,
}

/// Compute the USDC a share burn releases:
///
/// `assets = (total_value * PRECISION * share_amount / total_shares) / PRECISION`
///
/// Both divisions truncate, matching the contract. `total_shares == 0`
/// means the vault is empty and no preview exists.
pub fn preview_withdrawal(
    total_value: U256,
    total_shares: U256,
    share_amount: U256,
) -> Result<WithdrawalPreview> {
    if total_shares.is_zero() {
        return Err(Error::Protocol(ProtocolError::NoShares));
    }
    let precision = U256::from(INITIAL_SHARE_PRECISION);
    let scaled = total_value
        .checked_mul(precision)
        .and_then(|v| v.checked_mul(share_amount))
        .ok_or_else(|| {
            Error::Protocol(ProtocolError::InvalidAmount {
                message: "withdrawal preview overflows".into(),
            })
        })?
        / total_shares;
    Ok(WithdrawalPreview {
        asset_amount: scaled / precision,
        share_amount,
    })
}
