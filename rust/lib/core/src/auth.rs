//! Actors, roles and the authenticator seam.
//!
//! The route table does NOT depend on any specific auth module.
//! It only knows the [`Authenticator`] trait; the concrete implementation
//! is injected at startup time.

use std::fmt;
use std::str::FromStr;

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// Role discriminant of an authenticated principal.
///
/// Closed set: adding a role forces every `match` on it to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Patient,
    Facility,
    Doctor,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Patient => "patient",
            UserType::Facility => "facility",
            UserType::Doctor => "doctor",
            UserType::Admin => "admin",
        }
    }

    pub fn is_patient(&self) -> bool {
        matches!(self, UserType::Patient)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(UserType::Patient),
            "facility" => Ok(UserType::Facility),
            "doctor" => Ok(UserType::Doctor),
            "admin" => Ok(UserType::Admin),
            other => Err(ServiceError::Validation(format!("unknown user type '{}'", other))),
        }
    }
}

/// The authenticated principal behind a request.
///
/// Established by the gate for every non-public route and stored in the
/// request extensions; handlers read it with `Extension<Actor>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub user_type: UserType,
    /// Facility the actor acts for. Only facility accounts carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<String>,
}

impl Actor {
    /// Facility scope of this actor, or `Unauthorized` if it has none.
    pub fn facility_scope(&self) -> Result<&str, ServiceError> {
        self.facility_id.as_deref().ok_or_else(|| {
            ServiceError::Unauthorized(format!("actor {} is not bound to a facility", self.id))
        })
    }
}

/// Pluggable authenticator. The gate calls this for every non-public
/// route before the handler runs.
pub trait Authenticator: Send + Sync + 'static {
    /// Establish the actor behind a request.
    ///
    /// - `headers`: the HTTP request headers (for extracting tokens)
    /// - Returns the actor, or `ServiceError::Unauthorized` on missing or
    ///   invalid credentials.
    fn authenticate(&self, headers: &HeaderMap) -> Result<Actor, ServiceError>;
}

/// Authenticator that always yields the same actor. Used in tests.
pub struct FixedActor(pub Actor);

impl Authenticator for FixedActor {
    fn authenticate(&self, _headers: &HeaderMap) -> Result<Actor, ServiceError> {
        Ok(self.0.clone())
    }
}

/// An authenticator that rejects everything.
pub struct DenyAll;

impl Authenticator for DenyAll {
    fn authenticate(&self, _headers: &HeaderMap) -> Result<Actor, ServiceError> {
        Err(ServiceError::Unauthorized("access denied".into()))
    }
}

/// Authorization predicate attached to a route binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gate {
    /// No authentication at all.
    Public,
    /// Any authenticated actor.
    Authenticated,
    /// Patients only.
    Patient,
    /// Any non-patient actor.
    Staff,
    /// Facility accounts bound to a facility.
    Facility,
}

impl Gate {
    /// Whether an authenticated actor passes this gate.
    pub fn admits(&self, actor: &Actor) -> bool {
        match self {
            Gate::Public | Gate::Authenticated => true,
            Gate::Patient => actor.user_type.is_patient(),
            Gate::Staff => !actor.user_type.is_patient(),
            Gate::Facility => {
                actor.user_type == UserType::Facility && actor.facility_id.is_some()
            }
        }
    }

    pub fn requires_actor(&self) -> bool {
        !matches!(self, Gate::Public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(user_type: UserType, facility: Option<&str>) -> Actor {
        Actor {
            id: "u1".into(),
            name: "User".into(),
            user_type,
            facility_id: facility.map(String::from),
        }
    }

    #[test]
    fn user_type_wire_format() {
        assert_eq!(serde_json::to_value(UserType::Patient).unwrap(), "patient");
        assert_eq!(
            serde_json::from_value::<UserType>(serde_json::json!("facility")).unwrap(),
            UserType::Facility
        );
        assert!(serde_json::from_value::<UserType>(serde_json::json!("nurse")).is_err());
        assert!("nurse".parse::<UserType>().is_err());
        assert_eq!("admin".parse::<UserType>().unwrap(), UserType::Admin);
    }

    #[test]
    fn facility_gate_requires_facility_role_and_scope() {
        assert!(Gate::Facility.admits(&actor(UserType::Facility, Some("f1"))));
        assert!(!Gate::Facility.admits(&actor(UserType::Facility, None)));
        assert!(!Gate::Facility.admits(&actor(UserType::Patient, Some("f1"))));
        assert!(!Gate::Facility.admits(&actor(UserType::Doctor, Some("f1"))));
    }

    #[test]
    fn patient_and_staff_gates_partition_roles() {
        for ut in [UserType::Patient, UserType::Facility, UserType::Doctor, UserType::Admin] {
            let a = actor(ut, None);
            assert_ne!(Gate::Patient.admits(&a), Gate::Staff.admits(&a), "{}", ut);
            assert!(Gate::Authenticated.admits(&a));
        }
    }

    #[test]
    fn facility_scope_of_unbound_actor_is_unauthorized() {
        let err = actor(UserType::Admin, None).facility_scope().unwrap_err();
        assert_eq!(err.error_code(), "UNAUTHENTICATED");
        assert_eq!(actor(UserType::Facility, Some("f9")).facility_scope().unwrap(), "f9");
    }
}
