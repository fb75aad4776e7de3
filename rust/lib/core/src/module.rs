use crate::route::RouteGroup;

/// A service module that contributes HTTP routes.
///
/// Each business module implements this trait to declare its bindings.
/// The binary collects every module's groups into one [`RouteTable`],
/// which enforces name uniqueness and attaches the gates.
///
/// [`RouteTable`]: crate::RouteTable
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Route groups this module contributes.
    fn routes(&self) -> Vec<RouteGroup>;
}
