//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies
//! (`serde`, `bs58`, `ripemd`). Keep it lean: no I/O, networking, or heavy
//! logic—just data, parsing, and the chain's naming rules.

pub mod config;
pub mod constants;
pub mod key;
pub mod name;
pub mod registry;

pub use key::{KeyError, PublicKey};
pub use name::{AccountName, NameError};
