pub mod auth;
pub mod config;
pub mod error;
pub mod module;
pub mod route;
pub mod types;

pub use auth::{Actor, Authenticator, DenyAll, FixedActor, Gate, UserType};
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use module::Module;
pub use route::{RouteBinding, RouteError, RouteGroup, RouteNames, RouteResolver, RouteTable};
pub use types::{DEFAULT_LIMIT, ListParams, ListResult, default_limit, new_id};
