//! Server-composed pages.
//!
//! The server owns page logic; the browser only renders the page object it
//! receives (`{component, props, url}`). Shared page state is never read
//! from ambient globals: callers build a [`SharedProps`] for the request
//! and pass it in explicitly.

pub mod breadcrumb;
pub mod props;
pub mod settings;

use medsched_core::{RouteError, ServiceError};
use thiserror::Error;

pub use breadcrumb::{Breadcrumb, appearance_breadcrumb};
pub use props::{Appearance, AuthProps, SharedProps, UserProps};
pub use settings::{AppearancePage, AppearanceProps, Page};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// Shared state has no `auth` entry, so the viewer's role is unknown.
    #[error("page state has no auth entry")]
    MissingAuth,

    /// Shared state could not be decoded.
    #[error("malformed page state: {0}")]
    Malformed(String),

    #[error(transparent)]
    Route(#[from] RouteError),
}

impl From<PageError> for ServiceError {
    fn from(err: PageError) -> Self {
        ServiceError::Internal(format!("page configuration error: {}", err))
    }
}
