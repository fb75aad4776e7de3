use medsched_core::{Actor, UserType};
use serde::{Deserialize, Serialize};

/// JWT claims payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: account id.
    pub sub: String,
    /// Display name.
    pub name: String,
    /// Role of the account. Unknown roles fail token decoding.
    pub user_type: UserType,
    /// Facility the account acts for (facility accounts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility: Option<String>,
    /// Session id.
    pub sid: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

impl From<Claims> for Actor {
    fn from(claims: Claims) -> Self {
        Actor {
            id: claims.sub,
            name: claims.name,
            user_type: claims.user_type,
            facility_id: claims.facility,
        }
    }
}
