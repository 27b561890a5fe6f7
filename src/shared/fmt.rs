//! Human-readable formatting for wei amounts.

use super::U256;
use rust_decimal::Decimal;

const ETHER_DECIMALS: u32 = 18;

/// Format a wei amount as ether with trailing zeros trimmed (`"0.002331"`).
///
/// Amounts too large for `Decimal`'s 96-bit mantissa fall back to the raw wei
/// value suffixed with `wei`.
pub fn format_ether(wei: U256) -> String {
    let scaled = (wei.bits() < 128)
        .then(|| wei.low_u128() as i128)
        .and_then(|w| Decimal::try_from_i128_with_scale(w, ETHER_DECIMALS).ok());
    match scaled {
        Some(d) => d.normalize().to_string(),
        None => format!("{} wei", wei),
    }
}
