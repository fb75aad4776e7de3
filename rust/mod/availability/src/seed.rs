//! Seed data loaded at startup.
//!
//! A TOML file with three optional arrays:
//!
//! ```toml
//! [[doctors]]
//! id = "d-ada"
//! facilityId = "fac-north"
//! name = "Dr. Ada Park"
//! specialty = "cardiology"
//!
//! [[rules]]
//! id = "r-1"
//! facilityId = "fac-north"
//! doctorId = "d-ada"
//! weekday = "Mon"
//! startTime = "09:00:00"
//! endTime = "12:00:00"
//! slotMinutes = 30
//!
//! [[slots]]
//! id = "s-1"
//! facilityId = "fac-north"
//! doctorId = "d-ada"
//! startsAt = "2026-03-02T09:00:00Z"
//! endsAt = "2026-03-02T09:30:00Z"
//! status = "open"
//! ```

use std::collections::HashSet;
use std::path::Path;

use medsched_core::ServiceError;
use serde::Deserialize;

use crate::model::{AvailabilityRule, AvailabilitySlot, Doctor};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub rules: Vec<AvailabilityRule>,
    #[serde(default)]
    pub slots: Vec<AvailabilitySlot>,
}

/// Counts of records written by an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub doctors: usize,
    pub rules: usize,
    pub slots: usize,
}

impl Seed {
    pub fn load(path: &Path) -> Result<Self, ServiceError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ServiceError::Internal(format!("failed to read seed file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ServiceError> {
        toml::from_str(content).map_err(|e| ServiceError::Validation(format!("invalid seed: {}", e)))
    }

    /// Check the seed on its own and against doctors that already exist.
    ///
    /// `known_doctor(facility_id, doctor_id)` reports doctors outside the
    /// seed (i.e. already stored).
    pub fn validate<F>(&self, known_doctor: F) -> Result<(), ServiceError>
    where
        F: Fn(&str, &str) -> Result<bool, ServiceError>,
    {
        let mut doctors: HashSet<(&str, &str)> = HashSet::new();
        for d in &self.doctors {
            check_ids("doctor", &d.facility_id, &d.id)?;
            if !doctors.insert((d.facility_id.as_str(), d.id.as_str())) {
                return Err(invalid("doctor", &d.id, "duplicate id"));
            }
        }

        let doctor_exists = |facility: &str, id: &str| -> Result<bool, ServiceError> {
            if doctors.iter().any(|&(f, d)| f == facility && d == id) {
                return Ok(true);
            }
            known_doctor(facility, id)
        };

        let mut rules: HashSet<(&str, &str)> = HashSet::new();
        for r in &self.rules {
            check_ids("rule", &r.facility_id, &r.id)?;
            if !rules.insert((r.facility_id.as_str(), r.id.as_str())) {
                return Err(invalid("rule", &r.id, "duplicate id"));
            }
            if r.start_time >= r.end_time {
                return Err(invalid("rule", &r.id, "start time must be before end time"));
            }
            let window = (r.end_time - r.start_time).num_minutes();
            if r.slot_minutes == 0 || i64::from(r.slot_minutes) > window {
                return Err(invalid("rule", &r.id, "slot length must fit inside the window"));
            }
            if let (Some(from), Some(until)) = (r.effective_from, r.effective_until) {
                if from > until {
                    return Err(invalid("rule", &r.id, "effective range is inverted"));
                }
            }
            if !doctor_exists(&r.facility_id, &r.doctor_id)? {
                return Err(invalid("rule", &r.id, "unknown doctor in facility"));
            }
        }

        let mut slots: HashSet<(&str, &str)> = HashSet::new();
        for s in &self.slots {
            check_ids("slot", &s.facility_id, &s.id)?;
            if !slots.insert((s.facility_id.as_str(), s.id.as_str())) {
                return Err(invalid("slot", &s.id, "duplicate id"));
            }
            if s.starts_at >= s.ends_at {
                return Err(invalid("slot", &s.id, "start must be before end"));
            }
            if !doctor_exists(&s.facility_id, &s.doctor_id)? {
                return Err(invalid("slot", &s.id, "unknown doctor in facility"));
            }
        }

        Ok(())
    }
}

fn invalid(kind: &str, id: &str, reason: &str) -> ServiceError {
    ServiceError::Validation(format!("{} '{}': {}", kind, id, reason))
}

/// Ids become key segments, so they must be non-empty and slash-free.
fn check_ids(kind: &str, facility_id: &str, id: &str) -> Result<(), ServiceError> {
    for value in [facility_id, id] {
        if value.is_empty() || value.contains('/') {
            return Err(invalid(kind, id, "ids must be non-empty and must not contain '/'"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"
[[doctors]]
id = "d-ada"
facilityId = "fac-north"
name = "Dr. Ada Park"
specialty = "cardiology"

[[rules]]
id = "r-1"
facilityId = "fac-north"
doctorId = "d-ada"
weekday = "Mon"
startTime = "09:00:00"
endTime = "12:00:00"
slotMinutes = 30

[[slots]]
id = "s-1"
facilityId = "fac-north"
doctorId = "d-ada"
startsAt = "2026-03-02T09:00:00Z"
endsAt = "2026-03-02T09:30:00Z"
status = "open"
"#;

    fn none_known(_: &str, _: &str) -> Result<bool, ServiceError> {
        Ok(false)
    }

    #[test]
    fn parse_and_validate() {
        let seed = Seed::parse(SEED).unwrap();
        assert_eq!(seed.doctors.len(), 1);
        assert_eq!(seed.rules[0].slot_minutes, 30);
        assert_eq!(seed.slots[0].starts_at.to_rfc3339(), "2026-03-02T09:00:00+00:00");
        seed.validate(none_known).unwrap();
    }

    #[test]
    fn empty_seed_is_fine() {
        let seed = Seed::parse("").unwrap();
        seed.validate(none_known).unwrap();
    }

    #[test]
    fn inverted_rule_window_rejected() {
        let mut seed = Seed::parse(SEED).unwrap();
        seed.rules[0].end_time = seed.rules[0].start_time;
        assert!(matches!(seed.validate(none_known), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn slot_longer_than_window_rejected() {
        let mut seed = Seed::parse(SEED).unwrap();
        seed.rules[0].slot_minutes = 240;
        assert!(seed.validate(none_known).is_err());
    }

    #[test]
    fn doctor_from_other_facility_rejected() {
        let mut seed = Seed::parse(SEED).unwrap();
        seed.slots[0].facility_id = "fac-south".into();
        let err = seed.validate(none_known).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Validation("slot 's-1': unknown doctor in facility".into())
        );
    }

    #[test]
    fn stored_doctor_satisfies_reference() {
        let mut seed = Seed::parse(SEED).unwrap();
        seed.doctors.clear();
        seed.validate(|f, d| Ok(f == "fac-north" && d == "d-ada")).unwrap();
    }

    #[test]
    fn slash_in_id_rejected() {
        let mut seed = Seed::parse(SEED).unwrap();
        seed.doctors[0].id = "a/b".into();
        assert!(seed.validate(none_known).is_err());
    }

    #[test]
    fn duplicate_doctor_rejected() {
        let mut seed = Seed::parse(SEED).unwrap();
        let dup = seed.doctors[0].clone();
        seed.doctors.push(dup);
        assert!(seed.validate(none_known).is_err());
    }

    #[test]
    fn unknown_field_type_is_validation_error() {
        let err = Seed::parse("[[slots]]\nid = 3\n").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
