//! Route registration: collects all module routes + system endpoints.

use std::sync::Arc;

use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use medsched_core::{Authenticator, Gate, RouteBinding, RouteGroup, RouteNames, RouteTable};

use crate::pages;

/// Merge system, page and module bindings into one table.
pub fn build_table(module_routes: Vec<RouteGroup>) -> anyhow::Result<RouteTable> {
    let system = RouteGroup::new("", Gate::Public)
        .get("/health", "health", health)
        .get("/version", "version", version)
        .get("/meta/routes", "meta.routes", route_list)
        .with_state(());

    let mut table = RouteTable::new().group(system)?;
    for group in pages::routes().into_iter().chain(module_routes) {
        table = table.group(group)?;
    }
    Ok(table)
}

/// Build the complete router. Every handler can read the route names
/// through `Extension<RouteNames>`.
pub fn build_router(table: RouteTable, authenticator: Arc<dyn Authenticator>) -> Router {
    let names = table.names();
    table.into_router(authenticator).layer(Extension(names))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "medschedd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Every binding with its gate, for client-side link generation.
async fn route_list(Extension(names): Extension<RouteNames>) -> Json<Vec<RouteBinding>> {
    Json(names.list().to_vec())
}
