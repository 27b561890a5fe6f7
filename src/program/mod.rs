//! Zora contract interaction: addresses, fees and calldata builders.

pub mod calls;
pub mod constants;

pub use calls::*;
pub use constants::*;
