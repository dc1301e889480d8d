//! Shared API constants.

/// OpenAPI tag for system endpoints (health, docs).
pub const SYSTEM_TAG: &str = "system";
/// OpenAPI tag for the registration endpoints.
pub const REGISTRATION_TAG: &str = "registration";

/// Body returned when a registration is accepted by the chain.
pub const REGISTERED_BODY: &str = "OK";
