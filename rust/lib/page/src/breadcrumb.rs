use medsched_core::{RouteResolver, UserType};
use serde::{Deserialize, Serialize};

use crate::PageError;

pub const APPEARANCE_TITLE: &str = "Appearance settings";

/// Patients have their own settings area outside the named staff routes.
pub const PATIENT_APPEARANCE_PATH: &str = "/patient/settings/appearance";

/// Route name of the staff appearance settings page.
pub const APPEARANCE_ROUTE: &str = "appearance.edit";

/// One entry of the navigation trail shown in the page chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub title: String,
    pub href: String,
}

/// Breadcrumb of the appearance settings page for a viewer of `user_type`.
///
/// Pure: depends only on the role and the (immutable) route names.
pub fn appearance_breadcrumb(
    user_type: UserType,
    routes: &dyn RouteResolver,
) -> Result<Breadcrumb, PageError> {
    let href = match user_type {
        UserType::Patient => PATIENT_APPEARANCE_PATH.to_string(),
        UserType::Facility | UserType::Doctor | UserType::Admin => {
            routes.url(APPEARANCE_ROUTE, &[])?
        }
    };

    Ok(Breadcrumb {
        title: APPEARANCE_TITLE.to_string(),
        href,
    })
}
