//! Requests that the host render a notification

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use super::HostBound;
use super::payload::{DisplayModel, NotificationData};

pub const VIBRATE_PATTERN: [u32; 3] = [200, 100, 200];
pub const ACTION_OPEN: &str = "open";
pub const ACTION_CLOSE: &str = "close";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}

impl NotificationAction {
    fn new(action: &str, title: &str) -> Self {
        Self {
            action: action.to_string(),
            title: title.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOptions {
    pub body: String,
    pub icon: String,
    pub badge: String,
    // Notifications sharing a tag replace each other on the host
    pub tag: String,
    pub data: NotificationData,
    pub vibrate: Vec<u32>,
    pub require_interaction: bool,
    pub actions: Vec<NotificationAction>,
}

/// Arguments of the host's `show(title, options)` call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NotificationRequest {
    pub title: String,
    pub options: NotificationOptions,
}

impl NotificationRequest {
    pub fn from_model(model: DisplayModel) -> Self {
        let DisplayModel {
            title,
            body,
            icon,
            badge,
            tag,
            data,
        } = model;

        Self {
            title,
            options: NotificationOptions {
                body,
                icon,
                badge,
                tag,
                data,
                vibrate: VIBRATE_PATTERN.to_vec(),
                require_interaction: true,
                actions: vec![
                    NotificationAction::new(ACTION_OPEN, "Open"),
                    NotificationAction::new(ACTION_CLOSE, "Close"),
                ],
            },
        }
    }
}

/// The host's notification registry.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait NotificationPresenter: HostBound {
    /// Resolves once the host has rendered the notification.
    async fn show(&self, request: &NotificationRequest) -> Result<()>;

    /// Remove the shown notification with `tag` from the host UI.
    async fn close(&self, tag: &str) -> Result<()>;
}

/// Ask the host to show `model`. Host failures are returned as is, there
/// is no retry.
pub async fn present<P>(presenter: &P, model: DisplayModel) -> Result<NotificationRequest>
where
    P: NotificationPresenter + ?Sized,
{
    let request = NotificationRequest::from_model(model);
    presenter.show(&request).await?;
    tracing::debug!(
        "Notification shown title={} tag={}",
        request.title,
        request.options.tag
    );
    Ok(request)
}
