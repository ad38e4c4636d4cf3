//! Binds the notification flow to a host's capabilities
//!
//! Every handler returns a future. The host keeps the triggering event
//! alive until that future settles, which is how `waitUntil` maps here.

use anyhow::Result;

use super::normalize::normalize;
use super::origin::OriginPolicy;
use super::payload::PushData;
use super::presenter::{NotificationPresenter, NotificationRequest, present};
use super::router::{
    Action, InteractionEvent, Intent, NavigationPlan, ShownNotification, plan_navigation, route,
};
use super::windows::WindowBroker;
use crate::core::{AppConfig, NotificationDefaults};

pub struct ServiceWorker<P, B> {
    presenter: P,
    broker: B,
    origin: String,
    origin_policy: OriginPolicy,
    defaults: NotificationDefaults,
}

impl<P, B> ServiceWorker<P, B>
where
    P: NotificationPresenter,
    B: WindowBroker,
{
    pub fn new(presenter: P, broker: B, origin: &str) -> Self {
        Self {
            presenter,
            broker,
            origin: origin.to_string(),
            origin_policy: OriginPolicy::default(),
            defaults: NotificationDefaults::default(),
        }
    }

    pub fn from_config(presenter: P, broker: B, config: &AppConfig) -> Self {
        Self::new(presenter, broker, &config.app_origin)
            .origin_policy(config.origin_policy)
            .defaults(config.notification_defaults.clone())
    }

    pub fn origin_policy(mut self, policy: OriginPolicy) -> Self {
        self.origin_policy = policy;
        self
    }

    pub fn defaults(mut self, defaults: NotificationDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn broker(&self) -> &B {
        &self.broker
    }

    /// Handle a push event. Resolves once the host has shown the
    /// notification, errors from the host are returned unretried.
    pub async fn on_push(&self, data: Option<PushData>) -> Result<ShownNotification> {
        let model = normalize(data.as_ref(), &self.defaults);
        let NotificationRequest { options, .. } = present(&self.presenter, model).await?;
        Ok(ShownNotification::new(&options.tag, options.data))
    }

    /// Rebuild a shown notification from the tag and data the host hands
    /// back with a click or close event.
    pub fn restore_notification(
        &self,
        tag: &str,
        data: Option<serde_json::Value>,
    ) -> ShownNotification {
        ShownNotification::restore(tag, data, &self.defaults.url)
    }

    pub async fn on_notification_click(
        &self,
        notification: &mut ShownNotification,
        action: Option<&str>,
    ) -> Result<Action> {
        let event = InteractionEvent::Click {
            action: action.map(|a| a.to_string()),
        };
        self.interact(notification, &event).await
    }

    pub async fn on_notification_close(
        &self,
        notification: &mut ShownNotification,
    ) -> Result<Action> {
        self.interact(notification, &InteractionEvent::Close).await
    }

    async fn interact(
        &self,
        notification: &mut ShownNotification,
        event: &InteractionEvent,
    ) -> Result<Action> {
        let transition = route(
            event,
            notification.state,
            &notification.data,
            &self.defaults.url,
        );
        notification.state = transition.state;

        match transition.intent {
            Intent::Ignore => {
                tracing::info!(
                    "Notification {} interaction ignored, now {:?}",
                    notification.tag,
                    notification.state
                );
                Ok(Action::Noop)
            }
            Intent::Dismiss => {
                self.presenter.close(&notification.tag).await?;
                Ok(Action::Close)
            }
            Intent::Focus(url) => {
                self.presenter.close(&notification.tag).await?;
                self.focus_or_open(&url).await
            }
        }
    }

    async fn focus_or_open(&self, url: &str) -> Result<Action> {
        let windows = self.broker.list_windows(true).await?;
        let plan = plan_navigation(
            url,
            &windows,
            &self.origin,
            self.origin_policy,
            self.broker.can_open_windows(),
        );

        match &plan {
            NavigationPlan::Reuse { window, url } => {
                self.broker.navigate(window, url).await?;
                self.broker.focus(window).await?;
                tracing::debug!("Focused window {} at {}", window, url);
            }
            NavigationPlan::Open { url } => {
                self.broker.open_window(url).await?;
                tracing::debug!("Opened new window at {}", url);
            }
            NavigationPlan::Unavailable => {
                tracing::warn!("No open window and host cannot open one, dropping {}", url);
            }
        }

        Ok(plan.into())
    }
}
