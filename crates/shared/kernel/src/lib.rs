//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it provides layered config loading and, with
//! the `server` feature, the shared API state and system routes.
//!
//! ## Config loading
//! ```rust,ignore
//! use faucet_kernel::config::load_config;
//! let cfg: faucet_kernel::domain::config::FaucetConfig =
//!     load_config(Some("faucet")).unwrap();
//! ```

pub mod config;
#[cfg(feature = "server")]
pub mod server;

pub use faucet_domain as domain;
