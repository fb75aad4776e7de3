use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use medsched_core::{Actor, Gate, ListParams, ListResult, RouteGroup, ServiceError};

use crate::model::{AvailabilityRule, AvailabilitySlot, Doctor, RuleQuery, SlotQuery};
use crate::service::AvailabilityService;

/// Shared application state.
pub type AppState = Arc<AvailabilityService>;

pub const FACILITY_API_PREFIX: &str = "/api/facility";

/// The facility API. Every binding sits behind the facility gate.
pub fn routes(state: AppState) -> RouteGroup {
    RouteGroup::new(FACILITY_API_PREFIX, Gate::Facility)
        .get("/availability/slots", "api.facility.availability.slots", list_slots)
        .get("/availability/rules", "api.facility.availability.rules", list_rules)
        .get("/doctors", "api.facility.doctors", list_doctors)
        .get("/doctors/{id}", "api.facility.doctors.show", show_doctor)
        .with_state(state)
}

async fn list_slots(
    State(svc): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<ListResult<AvailabilitySlot>>, ServiceError> {
    svc.list_slots(actor.facility_scope()?, &query).map(Json)
}

async fn list_rules(
    State(svc): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<RuleQuery>,
) -> Result<Json<ListResult<AvailabilityRule>>, ServiceError> {
    svc.list_rules(actor.facility_scope()?, &query).map(Json)
}

async fn list_doctors(
    State(svc): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResult<Doctor>>, ServiceError> {
    svc.list_doctors(actor.facility_scope()?, &params).map(Json)
}

async fn show_doctor(
    State(svc): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<Doctor>, ServiceError> {
    svc.get_doctor(actor.facility_scope()?, &id).map(Json)
}
