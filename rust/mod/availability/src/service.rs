use std::sync::Arc;

use medsched_core::{ListParams, ListResult, ServiceError};
use tracing::{debug, info};

use crate::model::{AvailabilityRule, AvailabilitySlot, Doctor, RuleQuery, SlotQuery};
use crate::seed::{Seed, SeedSummary};
use crate::store::AvailabilityStore;

/// Upper bound on one page of any collection.
pub const MAX_LIMIT: usize = 500;

/// Availability service: every read is scoped to one facility.
pub struct AvailabilityService {
    store: Arc<AvailabilityStore>,
}

impl AvailabilityService {
    pub fn new(store: Arc<AvailabilityStore>) -> Self {
        Self { store }
    }

    pub fn list_doctors(
        &self,
        facility_id: &str,
        params: &ListParams,
    ) -> Result<ListResult<Doctor>, ServiceError> {
        let mut doctors: Vec<Doctor> = self.store.scan(facility_id)?;
        doctors.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(ListResult::paginate(doctors, &capped(params)))
    }

    /// One doctor of the facility. Doctors of other facilities are
    /// indistinguishable from missing ones.
    pub fn get_doctor(&self, facility_id: &str, id: &str) -> Result<Doctor, ServiceError> {
        debug!(facility = facility_id, doctor = id, "doctor lookup");
        self.store
            .get(facility_id, id)?
            .ok_or_else(|| ServiceError::NotFound(format!("doctor '{}' not found", id)))
    }

    pub fn list_rules(
        &self,
        facility_id: &str,
        query: &RuleQuery,
    ) -> Result<ListResult<AvailabilityRule>, ServiceError> {
        let mut rules: Vec<AvailabilityRule> = self.store.scan(facility_id)?;
        if let Some(doctor) = &query.doctor {
            rules.retain(|r| &r.doctor_id == doctor);
        }
        rules.sort_by(|a, b| {
            a.doctor_id
                .cmp(&b.doctor_id)
                .then_with(|| {
                    a.weekday
                        .num_days_from_monday()
                        .cmp(&b.weekday.num_days_from_monday())
                })
                .then_with(|| a.start_time.cmp(&b.start_time))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(ListResult::paginate(rules, &capped(&query.page())))
    }

    pub fn list_slots(
        &self,
        facility_id: &str,
        query: &SlotQuery,
    ) -> Result<ListResult<AvailabilitySlot>, ServiceError> {
        let mut slots: Vec<AvailabilitySlot> = self.store.scan(facility_id)?;
        slots.retain(|s| {
            query.doctor.as_ref().is_none_or(|d| &s.doctor_id == d)
                && query.status.is_none_or(|st| s.status == st)
        });
        slots.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then_with(|| a.id.cmp(&b.id)));
        Ok(ListResult::paginate(slots, &capped(&query.page())))
    }

    /// Validate and write a seed. Nothing is written if validation fails.
    pub fn import(&self, seed: &Seed) -> Result<SeedSummary, ServiceError> {
        seed.validate(|facility, doctor| {
            Ok(self.store.get::<Doctor>(facility, doctor)?.is_some())
        })?;

        self.store.put_all(&seed.doctors)?;
        self.store.put_all(&seed.rules)?;
        self.store.put_all(&seed.slots)?;

        let summary = SeedSummary {
            doctors: seed.doctors.len(),
            rules: seed.rules.len(),
            slots: seed.slots.len(),
        };
        info!(
            doctors = summary.doctors,
            rules = summary.rules,
            slots = summary.slots,
            "seed imported"
        );
        Ok(summary)
    }
}

fn capped(params: &ListParams) -> ListParams {
    ListParams {
        limit: params.limit.min(MAX_LIMIT),
        offset: params.offset,
    }
}
