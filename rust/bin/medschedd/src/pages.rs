//! Server-composed settings pages.

use axum::http::HeaderMap;
use axum::{Extension, Json};
use medsched_core::{Actor, Gate, RouteGroup, RouteNames, ServiceError};
use medsched_page::{Appearance, AppearancePage, AppearanceProps, Page, SharedProps};
use tracing::error;

/// Page bindings. Staff and patients reach the same page through their
/// own paths; the breadcrumb follows the viewer's role.
pub fn routes() -> Vec<RouteGroup> {
    vec![
        RouteGroup::new("/settings", Gate::Staff)
            .get("/appearance", "appearance.edit", appearance_edit)
            .with_state(()),
        RouteGroup::new("/patient/settings", Gate::Patient)
            .get("/appearance", "patient.appearance.edit", appearance_edit)
            .with_state(()),
    ]
}

async fn appearance_edit(
    Extension(names): Extension<RouteNames>,
    Extension(actor): Extension<Actor>,
    headers: HeaderMap,
) -> Result<Json<Page<AppearanceProps>>, ServiceError> {
    let props = SharedProps::for_actor(&actor, Appearance::from_headers(&headers));
    AppearancePage::render(&props, &names).map(Json).map_err(|e| {
        error!(actor = %actor.id, error = %e, "appearance page failed to render");
        ServiceError::from(e)
    })
}
