//! Facility-scoped records.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use medsched_core::{ListParams, default_limit};

use crate::store::Record;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub facility_id: String,
    pub name: String,
    pub specialty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Weekly recurring window in which a doctor takes appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRule {
    pub id: String,
    pub facility_id: String,
    pub doctor_id: String,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Length of one bookable slot inside the window.
    pub slot_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_until: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Open,
    Booked,
    Blocked,
}

/// A concrete bookable interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub id: String,
    pub facility_id: String,
    pub doctor_id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: SlotStatus,
}

impl Record for Doctor {
    const TABLE: &'static str = "doctors";
    fn facility_id(&self) -> &str {
        &self.facility_id
    }
    fn key_value(&self) -> &str {
        &self.id
    }
}

impl Record for AvailabilityRule {
    const TABLE: &'static str = "availability_rules";
    fn facility_id(&self) -> &str {
        &self.facility_id
    }
    fn key_value(&self) -> &str {
        &self.id
    }
}

impl Record for AvailabilitySlot {
    const TABLE: &'static str = "availability_slots";
    fn facility_id(&self) -> &str {
        &self.facility_id
    }
    fn key_value(&self) -> &str {
        &self.id
    }
}

// ── Query parameters ──

/// Query string of the rules collection.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    /// Only rules of this doctor.
    #[serde(default)]
    pub doctor: Option<String>,
}

impl Default for RuleQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
            doctor: None,
        }
    }
}

impl RuleQuery {
    pub fn page(&self) -> ListParams {
        ListParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Query string of the slots collection.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub status: Option<SlotStatus>,
}

impl Default for SlotQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
            doctor: None,
            status: None,
        }
    }
}

impl SlotQuery {
    pub fn page(&self) -> ListParams {
        ListParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}
