//! Authentication module
//!
//! Stateless bearer-JWT authentication:
//! - [`JwtService`] — token validation (and generation, for tests/tooling)
//! - [`CurrentUser`] — the authenticated owner
//! - [`require_auth`] — router-level middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
