//! Appearance settings page.

use medsched_core::RouteResolver;
use serde::Serialize;
use tracing::debug;

use crate::PageError;
use crate::breadcrumb::{APPEARANCE_TITLE, Breadcrumb, appearance_breadcrumb};
use crate::props::{Appearance, SharedProps};

pub const SETTINGS_TITLE: &str = "Settings";
pub const SETTINGS_DESCRIPTION: &str = "Manage your profile and account settings";
pub const APPEARANCE_DESCRIPTION: &str = "Update your account's appearance settings";

/// Page object handed to the client renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<P> {
    pub component: &'static str,
    pub props: P,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Head {
    pub title: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsLayout {
    pub heading: Heading,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabOption {
    pub value: Appearance,
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

/// The light / dark / system switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppearanceTabs {
    pub options: Vec<TabOption>,
}

impl AppearanceTabs {
    pub fn new(current: Appearance) -> Self {
        let options = Appearance::ALL
            .into_iter()
            .map(|value| {
                let (label, icon) = match value {
                    Appearance::Light => ("Light", "sun"),
                    Appearance::Dark => ("Dark", "moon"),
                    Appearance::System => ("System", "monitor"),
                };
                TabOption {
                    value,
                    label,
                    icon,
                    active: value == current,
                }
            })
            .collect();
        Self { options }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceProps {
    #[serde(flatten)]
    pub shared: SharedProps,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub head: Head,
    pub layout: SettingsLayout,
    pub heading: Heading,
    pub tabs: AppearanceTabs,
}

pub struct AppearancePage;

impl AppearancePage {
    pub const COMPONENT: &'static str = "settings/appearance";

    /// Compose the page for the viewer described by `props`.
    ///
    /// The breadcrumb is computed before anything else; a missing `auth`
    /// entry aborts rendering with [`PageError::MissingAuth`].
    pub fn render(
        props: &SharedProps,
        routes: &dyn RouteResolver,
    ) -> Result<Page<AppearanceProps>, PageError> {
        let user_type = props.user_type()?;
        let crumb = appearance_breadcrumb(user_type, routes)?;
        debug!(user_type = %user_type, href = %crumb.href, "rendering appearance settings");

        let url = crumb.href.clone();
        Ok(Page {
            component: Self::COMPONENT,
            props: AppearanceProps {
                shared: props.clone(),
                breadcrumbs: vec![crumb],
                head: Head {
                    title: APPEARANCE_TITLE,
                },
                layout: SettingsLayout {
                    heading: Heading {
                        title: SETTINGS_TITLE,
                        description: SETTINGS_DESCRIPTION,
                    },
                },
                heading: Heading {
                    title: APPEARANCE_TITLE,
                    description: APPEARANCE_DESCRIPTION,
                },
                tabs: AppearanceTabs::new(props.appearance),
            },
            url,
        })
    }
}
