//! Facade crate for the faucet's features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement
//! business logic.
//!
//! ## Usage
//! - Add `faucet` with the `server` feature.
//! - Call [`init`] to register feature slices; extend as new slices appear.

pub use faucet_domain as domain;
#[cfg(feature = "server")]
use faucet_domain::config::FaucetConfig;
pub use faucet_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use faucet_kernel::server::router::system_router;
        pub use faucet_registration::router as registration_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use faucet_registration as registration;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "registration",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled features for server mode.
///
/// # Errors
/// Returns an error if any feature initialization fails.
#[cfg(feature = "server")]
pub fn init(
    config: &FaucetConfig,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error>> {
    let mut slices = Vec::new();

    // Registration
    slices.push(features::registration::init(config)?);

    Ok(slices)
}
