//! Availability module: the facility-facing scheduling API.
//!
//! # Resources
//!
//! - **Doctor**: practitioner attached to one facility
//! - **AvailabilityRule**: weekly recurring window with a slot length
//! - **AvailabilitySlot**: concrete interval with an open/booked/blocked status
//!
//! All records are owned by a facility and only ever served to actors of
//! that facility.
//!
//! # Usage
//!
//! ```ignore
//! let store = Arc::new(AvailabilityStore::open(&db_path)?);
//! let module = AvailabilityModule::new(store);
//! let table = RouteTable::new().group(module.routes().remove(0))?;
//! ```

pub mod api;
pub mod model;
pub mod seed;
pub mod service;
pub mod store;

use std::sync::Arc;

use medsched_core::{Module, RouteGroup};

pub use model::{AvailabilityRule, AvailabilitySlot, Doctor, SlotStatus};
pub use seed::{Seed, SeedSummary};
pub use service::AvailabilityService;
pub use store::AvailabilityStore;

pub struct AvailabilityModule {
    service: Arc<AvailabilityService>,
}

impl AvailabilityModule {
    pub fn new(store: Arc<AvailabilityStore>) -> Self {
        Self {
            service: Arc::new(AvailabilityService::new(store)),
        }
    }

    pub fn service(&self) -> &Arc<AvailabilityService> {
        &self.service
    }
}

impl Module for AvailabilityModule {
    fn name(&self) -> &str {
        "availability"
    }

    fn routes(&self) -> Vec<RouteGroup> {
        vec![api::routes(self.service.clone())]
    }
}
