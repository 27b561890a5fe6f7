//! Domain modules organized as vertical slices.
//!
//! - `mint` — mint requests and their validation
//! - `premint` — creation requests, premint configs, EIP-712 typed data and
//!   the registry client
//! - `transaction` — the values passed between pipeline stages

pub mod mint;
pub mod premint;
pub mod transaction;
