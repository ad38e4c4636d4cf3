//! Service worker binding for browsers
//!
//! Built with `--features browser` for `wasm32`. The worker script loads
//! the module and `start` registers the push and notification listeners.

use std::future::Future;
use std::rc::Rc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use gloo_events::EventListener;
use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Array, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, future_to_promise};
use web_sys::{
    Client, ClientQueryOptions, ClientType, ExtendableEvent, GetNotificationOptions,
    Notification, NotificationEvent, NotificationOptions, PushEvent, ServiceWorkerGlobalScope,
    WindowClient, console,
};

use super::host::ServiceWorker;
use super::payload::PushData;
use super::presenter::{NotificationPresenter, NotificationRequest};
use super::windows::{WindowBroker, WindowId, WindowInfo};

fn js_error(context: &str, e: JsValue) -> anyhow::Error {
    let detail = e.as_string().unwrap_or_else(|| format!("{:?}", e));
    anyhow!("{}: {}", context, detail)
}

/// The service worker global scope seen through both capability traits.
#[derive(Clone)]
pub struct BrowserHost {
    scope: ServiceWorkerGlobalScope,
}

impl BrowserHost {
    pub fn new(scope: ServiceWorkerGlobalScope) -> Self {
        Self { scope }
    }

    pub fn origin(&self) -> String {
        self.scope.location().origin()
    }

    async fn window_client(&self, window: &WindowId) -> Result<WindowClient> {
        let client = JsFuture::from(self.scope.clients().get(&window.0))
            .await
            .map_err(|e| js_error("Error looking up client", e))?;
        client
            .dyn_into::<WindowClient>()
            .map_err(|_| anyhow!("Client {} is not a window", window))
    }
}

#[async_trait(?Send)]
impl NotificationPresenter for BrowserHost {
    async fn show(&self, request: &NotificationRequest) -> Result<()> {
        let options = <JsValue as JsValueSerdeExt>::from_serde(&request.options)?;
        let promise = self
            .scope
            .registration()
            .show_notification_with_options(&request.title, options.unchecked_ref::<NotificationOptions>())
            .map_err(|e| js_error("Error showing notification", e))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| js_error("Error showing notification", e))?;
        Ok(())
    }

    async fn close(&self, tag: &str) -> Result<()> {
        let filter = GetNotificationOptions::new();
        filter.set_tag(tag);
        let promise = self
            .scope
            .registration()
            .get_notifications_with_filter(&filter)
            .map_err(|e| js_error("Error listing notifications", e))?;
        let shown = JsFuture::from(promise)
            .await
            .map_err(|e| js_error("Error listing notifications", e))?;
        for notification in Array::from(&shown) {
            notification.unchecked_into::<Notification>().close();
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl WindowBroker for BrowserHost {
    async fn list_windows(&self, include_uncontrolled: bool) -> Result<Vec<WindowInfo>> {
        let query = ClientQueryOptions::new();
        query.set_include_uncontrolled(include_uncontrolled);
        query.set_type(ClientType::Window);
        let clients = JsFuture::from(self.scope.clients().match_all_with_options(&query))
            .await
            .map_err(|e| js_error("Error listing clients", e))?;

        Ok(Array::from(&clients)
            .iter()
            .map(|client| {
                let client = client.unchecked_into::<Client>();
                WindowInfo {
                    id: WindowId(client.id()),
                    url: client.url(),
                }
            })
            .collect())
    }

    async fn navigate(&self, window: &WindowId, url: &str) -> Result<()> {
        let client = self.window_client(window).await?;
        let promise = client
            .navigate(url)
            .map_err(|e| js_error("Error navigating window", e))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| js_error("Error navigating window", e))?;
        Ok(())
    }

    async fn focus(&self, window: &WindowId) -> Result<()> {
        let client = self.window_client(window).await?;
        let promise = client
            .focus()
            .map_err(|e| js_error("Error focusing window", e))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| js_error("Error focusing window", e))?;
        Ok(())
    }

    async fn open_window(&self, url: &str) -> Result<()> {
        JsFuture::from(self.scope.clients().open_window(url))
            .await
            .map_err(|e| js_error("Error opening window", e))?;
        Ok(())
    }

    fn can_open_windows(&self) -> bool {
        Reflect::has(&self.scope.clients(), &JsValue::from_str("openWindow")).unwrap_or(false)
    }
}

type BrowserWorker = ServiceWorker<BrowserHost, BrowserHost>;

// Keep the event alive until `fut` settles
fn wait_until<F>(event: &ExtendableEvent, name: &'static str, fut: F)
where
    F: Future<Output = Result<()>> + 'static,
{
    let promise = future_to_promise(async move {
        match fut.await {
            Ok(()) => Ok(JsValue::UNDEFINED),
            Err(e) => {
                let message = JsValue::from_str(&format!("{} handler failed: {:#}", name, e));
                console::error_1(&message);
                Err(message)
            }
        }
    });
    if let Err(e) = event.wait_until(&promise) {
        console::error_2(&JsValue::from_str("Error extending event lifetime"), &e);
    }
}

fn push_data(event: &PushEvent) -> Option<PushData> {
    event
        .data()
        .map(|data| PushData::new(Uint8Array::new(&data.array_buffer()).to_vec()))
}

fn notification_data(notification: &Notification) -> Option<serde_json::Value> {
    let data = notification.data();
    if data.is_undefined() || data.is_null() {
        return None;
    }
    data.into_serde().ok()
}

fn listen(scope: &ServiceWorkerGlobalScope, worker: Rc<BrowserWorker>) {
    EventListener::new(scope, "push", {
        let worker = worker.clone();
        move |ev| {
            let Some(ev) = ev.dyn_ref::<PushEvent>() else {
                return;
            };
            let data = push_data(ev);
            let worker = worker.clone();
            wait_until(ev, "push", async move {
                worker.on_push(data).await?;
                Ok(())
            });
        }
    })
    .forget();

    EventListener::new(scope, "notificationclick", {
        let worker = worker.clone();
        move |ev| {
            let Some(ev) = ev.dyn_ref::<NotificationEvent>() else {
                return;
            };
            let notification = ev.notification();
            let action = ev.action();
            let worker = worker.clone();
            wait_until(ev, "notificationclick", async move {
                let mut shown = worker
                    .restore_notification(&notification.tag(), notification_data(&notification));
                worker.on_notification_click(&mut shown, Some(&action)).await?;
                Ok(())
            });
        }
    })
    .forget();

    EventListener::new(scope, "notificationclose", move |ev| {
        let Some(ev) = ev.dyn_ref::<NotificationEvent>() else {
            return;
        };
        let notification = ev.notification();
        let worker = worker.clone();
        wait_until(ev, "notificationclose", async move {
            let mut shown =
                worker.restore_notification(&notification.tag(), notification_data(&notification));
            worker.on_notification_close(&mut shown).await?;
            Ok(())
        });
    })
    .forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let scope = js_sys::global().dyn_into::<ServiceWorkerGlobalScope>()?;
    let host = BrowserHost::new(scope.clone());
    let origin = host.origin();
    let worker = Rc::new(ServiceWorker::new(host.clone(), host, &origin));
    listen(&scope, worker);
    Ok(())
}
