//! Shared page props: the per-request state every page receives.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use medsched_core::{Actor, UserType};
use serde::{Deserialize, Serialize};

use crate::PageError;

/// Name of the cookie the browser keeps the appearance choice in.
pub const APPEARANCE_COOKIE: &str = "appearance";

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
    #[default]
    System,
}

impl Appearance {
    pub const ALL: [Appearance; 3] = [Appearance::Light, Appearance::Dark, Appearance::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            Appearance::Light => "light",
            Appearance::Dark => "dark",
            Appearance::System => "system",
        }
    }

    /// Parse a stored value. Anything unrecognised means `System`.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "light" => Appearance::Light,
            "dark" => Appearance::Dark,
            _ => Appearance::System,
        }
    }

    /// Read the `appearance` cookie from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(k, _)| *k == APPEARANCE_COOKIE)
            .map(|(_, v)| Appearance::parse(v))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProps {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthProps {
    pub user: UserProps,
    pub user_type: UserType,
}

/// Props shared by every page of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedProps {
    #[serde(default)]
    pub auth: Option<AuthProps>,
    #[serde(default)]
    pub appearance: Appearance,
}

impl SharedProps {
    pub fn for_actor(actor: &Actor, appearance: Appearance) -> Self {
        Self {
            auth: Some(AuthProps {
                user: UserProps {
                    id: actor.id.clone(),
                    name: actor.name.clone(),
                },
                user_type: actor.user_type,
            }),
            appearance,
        }
    }

    /// Decode props received as JSON (e.g. a hydration payload).
    pub fn from_json(value: &serde_json::Value) -> Result<Self, PageError> {
        serde_json::from_value(value.clone()).map_err(|e| PageError::Malformed(e.to_string()))
    }

    /// Role of the viewer. Fails closed when `auth` is absent.
    pub fn user_type(&self) -> Result<UserType, PageError> {
        self.auth
            .as_ref()
            .map(|a| a.user_type)
            .ok_or(PageError::MissingAuth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        h
    }

    #[test]
    fn appearance_from_cookie() {
        assert_eq!(Appearance::from_headers(&headers("appearance=dark")), Appearance::Dark);
        assert_eq!(
            Appearance::from_headers(&headers("sidebar_state=true; appearance=light")),
            Appearance::Light
        );
        assert_eq!(Appearance::from_headers(&headers("appearance=neon")), Appearance::System);
        assert_eq!(Appearance::from_headers(&HeaderMap::new()), Appearance::System);
    }

    #[test]
    fn for_actor_carries_role() {
        let actor = Actor {
            id: "p1".into(),
            name: "Pat".into(),
            user_type: UserType::Patient,
            facility_id: None,
        };
        let props = SharedProps::for_actor(&actor, Appearance::Dark);
        assert_eq!(props.user_type().unwrap(), UserType::Patient);

        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["auth"]["userType"], "patient");
        assert_eq!(json["auth"]["user"]["name"], "Pat");
        assert_eq!(json["appearance"], "dark");
    }

    #[test]
    fn missing_auth_fails_closed() {
        let props = SharedProps::from_json(&serde_json::json!({})).unwrap();
        assert_eq!(props.user_type().unwrap_err(), PageError::MissingAuth);
        assert_eq!(props.appearance, Appearance::System);
    }

    #[test]
    fn unknown_user_type_is_malformed() {
        let err = SharedProps::from_json(&serde_json::json!({
            "auth": {"user": {"id": "x", "name": "X"}, "userType": "nurse"}
        }))
        .unwrap_err();
        assert!(matches!(err, PageError::Malformed(_)));
    }
}
