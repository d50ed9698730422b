//! Authentication
//!
//! JWT + argon2 authentication: token service, password hashing, request
//! middleware, and the permission catalog.

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{AuthToken, require_admin, require_auth};
