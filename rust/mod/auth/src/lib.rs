//! Auth module: bearer-token authentication of actors.
//!
//! Tokens are HS256 JWTs whose claims carry the account id, display name,
//! role and (for facility accounts) the facility id. [`JwtService`]
//! implements [`medsched_core::Authenticator`], so it plugs straight into
//! the route table's gates.
//!
//! # Usage
//!
//! ```ignore
//! let jwt = Arc::new(auth::JwtService::new(&config.jwt.secret, 3600));
//! let router = table.into_router(jwt);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::JwtService;
