//! What to do when the user interacts with a shown notification
//!
//! Both steps are pure so they can be tested without a host. `route`
//! advances the per-notification state machine and `plan_navigation`
//! picks a window once the host has listed them.

use serde::Serialize;

use super::origin::OriginPolicy;
use super::payload::NotificationData;
use super::presenter::{ACTION_CLOSE, ACTION_OPEN};
use super::windows::{WindowId, WindowInfo};

/// A user interaction reported by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
    /// `action` is the id of the pressed action button, `None` for a click
    /// on the notification body.
    Click { action: Option<String> },
    /// Dismissed without a click.
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickAction {
    Open,
    Close,
    None,
}

impl ClickAction {
    /// Unknown action ids behave like a click on the body.
    pub fn from_action(action: Option<&str>) -> Self {
        match action {
            Some(ACTION_CLOSE) => Self::Close,
            Some(ACTION_OPEN) => Self::Open,
            // Browsers report a body click as an empty action
            Some("") | None => Self::None,
            Some(other) => {
                tracing::debug!("Unknown notification action \"{}\", treating as a click", other);
                Self::None
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationState {
    Shown,
    Clicked(ClickAction),
    Dismissed,
}

impl NotificationState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Shown)
    }
}

/// A notification the host is currently displaying.
#[derive(Clone, Debug, PartialEq)]
pub struct ShownNotification {
    pub tag: String,
    pub data: NotificationData,
    pub state: NotificationState,
}

impl ShownNotification {
    pub fn new(tag: &str, data: NotificationData) -> Self {
        Self {
            tag: tag.to_string(),
            data,
            state: NotificationState::Shown,
        }
    }

    /// Rebuild a notification from what the host kept of it. Data the host
    /// mangled falls back to `default_url`.
    pub fn restore(tag: &str, data: Option<serde_json::Value>, default_url: &str) -> Self {
        let data = data
            .and_then(|value| match serde_json::from_value::<NotificationData>(value) {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::warn!("Notification {} has unreadable data: {}", tag, e);
                    None
                }
            })
            .unwrap_or_else(|| NotificationData::new(default_url));
        Self::new(tag, data)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Close the notification and stop.
    Dismiss,
    /// Close the notification and bring the application up at `url`.
    Focus(String),
    /// Nothing to do besides logging.
    Ignore,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: NotificationState,
    pub intent: Intent,
}

/// Final effect of an interaction on the host's windows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Navigate { window: WindowId, url: String },
    OpenWindow { url: String },
    Close,
    Noop,
}

/// Where the host should bring the application up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationPlan {
    /// Navigate and focus an existing window.
    Reuse { window: WindowId, url: String },
    Open { url: String },
    /// Nothing matched and the host cannot open windows.
    Unavailable,
}

impl From<NavigationPlan> for Action {
    fn from(plan: NavigationPlan) -> Self {
        match plan {
            NavigationPlan::Reuse { window, url } => Action::Navigate { window, url },
            NavigationPlan::Open { url } => Action::OpenWindow { url },
            NavigationPlan::Unavailable => Action::Noop,
        }
    }
}

/// Advance `state` for `event`. Terminal states swallow every event.
pub fn route(
    event: &InteractionEvent,
    state: NotificationState,
    data: &NotificationData,
    default_url: &str,
) -> Transition {
    if state.is_terminal() {
        return Transition {
            state,
            intent: Intent::Ignore,
        };
    }

    match event {
        InteractionEvent::Close => Transition {
            state: NotificationState::Dismissed,
            intent: Intent::Ignore,
        },
        InteractionEvent::Click { action } => {
            let click = ClickAction::from_action(action.as_deref());
            let intent = match click {
                ClickAction::Close => Intent::Dismiss,
                ClickAction::Open | ClickAction::None => {
                    Intent::Focus(resolve_url(data, default_url))
                }
            };
            Transition {
                state: NotificationState::Clicked(click),
                intent,
            }
        }
    }
}

fn resolve_url(data: &NotificationData, default_url: &str) -> String {
    if data.url.is_empty() {
        default_url.to_string()
    } else {
        data.url.clone()
    }
}

/// Reuse the first window that belongs to `origin`, otherwise open a new
/// one when the host allows it.
pub fn plan_navigation(
    url: &str,
    windows: &[WindowInfo],
    origin: &str,
    policy: OriginPolicy,
    can_open_windows: bool,
) -> NavigationPlan {
    if let Some(window) = windows.iter().find(|w| policy.matches(&w.url, origin)) {
        return NavigationPlan::Reuse {
            window: window.id.clone(),
            url: url.to_string(),
        };
    }

    if can_open_windows {
        NavigationPlan::Open {
            url: url.to_string(),
        }
    } else {
        NavigationPlan::Unavailable
    }
}
