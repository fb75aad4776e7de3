//! Route table: named HTTP bindings, each carrying its own gate.
//!
//! Modules declare [`RouteGroup`]s; the binary merges them into one
//! [`RouteTable`]. Building the axum router wraps every binding's handler
//! in the gate of its group, so there is no way to register a handler
//! that skips authentication other than declaring it [`Gate::Public`].
//!
//! The table also keeps the name → path mapping ([`RouteNames`]) used for
//! reverse URL generation.

use std::collections::HashSet;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::handler::Handler;
use axum::http::Method;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::MethodRouter;
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::{Authenticator, Gate};
use crate::ServiceError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("route name '{0}' is already registered")]
    DuplicateName(String),

    #[error("{method} {path} is already bound")]
    DuplicatePath { method: Method, path: String },

    #[error("no route named '{0}'")]
    UnknownRoute(String),

    #[error("route '{route}' requires parameter '{param}'")]
    MissingParameter { route: String, param: String },

    #[error("route '{route}' has no parameter '{param}'")]
    UnusedParameter { route: String, param: String },

    #[error("invalid value for parameter '{param}' of route '{route}'")]
    InvalidParameter { route: String, param: String },
}

impl From<RouteError> for ServiceError {
    fn from(err: RouteError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

/// One declared binding: method + full path + stable name + gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteBinding {
    pub name: String,
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    pub path: String,
    pub gate: Gate,
}

fn serialize_method<S: Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(method.as_str())
}

struct Entry<S> {
    binding: RouteBinding,
    handler: MethodRouter<S>,
}

/// Bindings sharing a path prefix and a gate.
///
/// `S` is the handler state; call [`RouteGroup::with_state`] to turn it into
/// a stateless group before handing it to the table.
pub struct RouteGroup<S = ()> {
    prefix: String,
    gate: Gate,
    entries: Vec<Entry<S>>,
}

impl<S> RouteGroup<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(prefix: &str, gate: Gate) -> Self {
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
            gate,
            entries: Vec::new(),
        }
    }

    /// Bind `GET {prefix}{path}` under `name`.
    pub fn get<H, T>(self, path: &str, name: &str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.bind(Method::GET, path, name, axum::routing::get(handler))
    }

    fn bind(mut self, method: Method, path: &str, name: &str, handler: MethodRouter<S>) -> Self {
        let binding = RouteBinding {
            name: name.to_string(),
            method,
            path: format!("{}{}", self.prefix, path),
            gate: self.gate,
        };
        self.entries.push(Entry { binding, handler });
        self
    }

    /// Provide the handler state, yielding a group the table accepts.
    pub fn with_state(self, state: S) -> RouteGroup {
        RouteGroup {
            prefix: self.prefix,
            gate: self.gate,
            entries: self
                .entries
                .into_iter()
                .map(|e| Entry {
                    binding: e.binding,
                    handler: e.handler.with_state(state.clone()),
                })
                .collect(),
        }
    }

    pub fn gate(&self) -> Gate {
        self.gate
    }

    pub fn bindings(&self) -> impl Iterator<Item = &RouteBinding> {
        self.entries.iter().map(|e| &e.binding)
    }
}

/// The application's complete set of bindings.
#[derive(Default)]
pub struct RouteTable {
    groups: Vec<RouteGroup>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group. Names must be unique across the whole table, and a
    /// method + path pair may only be bound once.
    pub fn group(mut self, group: RouteGroup) -> Result<Self, RouteError> {
        let mut names: HashSet<&str> = self.bindings().map(|b| b.name.as_str()).collect();
        let mut paths: HashSet<(&Method, &str)> =
            self.bindings().map(|b| (&b.method, b.path.as_str())).collect();

        for b in group.bindings() {
            if !names.insert(b.name.as_str()) {
                return Err(RouteError::DuplicateName(b.name.clone()));
            }
            if !paths.insert((&b.method, b.path.as_str())) {
                return Err(RouteError::DuplicatePath {
                    method: b.method.clone(),
                    path: b.path.clone(),
                });
            }
        }

        self.groups.push(group);
        Ok(self)
    }

    pub fn bindings(&self) -> impl Iterator<Item = &RouteBinding> {
        self.groups.iter().flat_map(|g| g.bindings())
    }

    /// Snapshot of name → path used for reverse URL generation.
    pub fn names(&self) -> RouteNames {
        RouteNames {
            bindings: Arc::new(self.bindings().cloned().collect()),
        }
    }

    /// Build the axum router. Every non-public binding runs its gate first.
    pub fn into_router(self, authenticator: Arc<dyn Authenticator>) -> Router {
        let mut router = Router::new();
        for group in self.groups {
            for entry in group.entries {
                let Entry { binding, handler } = entry;
                let handler = if binding.gate.requires_actor() {
                    let guard = GateGuard {
                        gate: binding.gate,
                        route: Arc::from(binding.name.as_str()),
                        authenticator: Arc::clone(&authenticator),
                    };
                    handler.route_layer(middleware::from_fn_with_state(guard, enforce_gate))
                } else {
                    handler
                };
                router = router.route(&binding.path, handler);
            }
        }
        router
    }
}

#[derive(Clone)]
struct GateGuard {
    gate: Gate,
    route: Arc<str>,
    authenticator: Arc<dyn Authenticator>,
}

/// Authenticate, check the gate, and hand the actor to the handler via
/// request extensions. Rejections never reach the handler.
async fn enforce_gate(
    State(guard): State<GateGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let actor = match guard.authenticator.authenticate(request.headers()) {
        Ok(actor) => actor,
        Err(e) => {
            warn!(route = %guard.route, error = %e, "authentication failed");
            return Err(e);
        }
    };

    if !guard.gate.admits(&actor) {
        warn!(
            route = %guard.route,
            actor = %actor.id,
            user_type = %actor.user_type,
            "actor not admitted by gate"
        );
        return Err(ServiceError::Unauthorized(format!(
            "{} accounts cannot access this route",
            actor.user_type
        )));
    }

    debug!(route = %guard.route, actor = %actor.id, "gate passed");
    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

/// Reverse URL generation by route name.
pub trait RouteResolver: Send + Sync {
    /// Resolve `name` to a concrete path, substituting `{param}` segments.
    fn url(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouteError>;
}

/// Immutable name → binding registry, cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct RouteNames {
    bindings: Arc<Vec<RouteBinding>>,
}

impl RouteNames {
    pub fn get(&self, name: &str) -> Option<&RouteBinding> {
        self.bindings.iter().find(|b| b.name == name)
    }

    /// All bindings in registration order.
    pub fn list(&self) -> &[RouteBinding] {
        &self.bindings
    }
}

impl RouteResolver for RouteNames {
    fn url(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let binding = self
            .get(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

        let mut used = 0;
        let mut out = String::with_capacity(binding.path.len());
        for (i, segment) in binding.path.split('/').enumerate() {
            if i > 0 {
                out.push('/');
            }
            let Some(param) = segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) else {
                out.push_str(segment);
                continue;
            };
            let value = params
                .iter()
                .find(|(k, _)| *k == param)
                .map(|(_, v)| *v)
                .ok_or_else(|| RouteError::MissingParameter {
                    route: name.to_string(),
                    param: param.to_string(),
                })?;
            if value.is_empty() || value.contains(['/', '?', '#']) {
                return Err(RouteError::InvalidParameter {
                    route: name.to_string(),
                    param: param.to_string(),
                });
            }
            out.push_str(value);
            used += 1;
        }

        if used < params.len() {
            let placeholder = |k: &str| binding.path.contains(&format!("{{{}}}", k));
            if let Some((k, _)) = params.iter().find(|(k, _)| !placeholder(k)) {
                return Err(RouteError::UnusedParameter {
                    route: name.to_string(),
                    param: k.to_string(),
                });
            }
        }

        Ok(out)
    }
}
