//! In-memory host that records every capability call

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Serialize;

use super::origin::resolve_url;
use super::presenter::{NotificationPresenter, NotificationRequest};
use super::windows::{WindowBroker, WindowId, WindowInfo};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "call", content = "args", rename_all = "snake_case")]
pub enum HostCall {
    Show(NotificationRequest),
    CloseNotification(String),
    ListWindows { include_uncontrolled: bool },
    Navigate(WindowId, String),
    Focus(WindowId),
    OpenWindow(String),
}

#[derive(Default)]
struct Inner {
    // Relative targets are resolved against this, like a browser would
    origin: Option<String>,
    windows: Vec<WindowInfo>,
    calls: Vec<HostCall>,
    fail_show: Option<String>,
    fail_list_windows: Option<String>,
    fail_open_window: Option<String>,
}

impl Inner {
    fn location(&self, url: &str) -> String {
        match &self.origin {
            Some(origin) => resolve_url(origin, url),
            None => url.to_string(),
        }
    }
}

/// A host whose windows live in a `Vec`. Clones share state so the same
/// host can back both capability traits.
#[derive(Clone)]
pub struct MemoryHost {
    inner: Arc<Mutex<Inner>>,
    can_open_windows: bool,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            can_open_windows: true,
        }
    }

    pub fn with_origin(self, origin: &str) -> Self {
        self.lock().origin = Some(origin.to_string());
        self
    }

    pub fn with_window(self, id: &str, url: &str) -> Self {
        self.lock().windows.push(WindowInfo {
            id: WindowId(id.to_string()),
            url: url.to_string(),
        });
        self
    }

    pub fn without_open_window(mut self) -> Self {
        self.can_open_windows = false;
        self
    }

    pub fn fail_show(self, reason: &str) -> Self {
        self.lock().fail_show = Some(reason.to_string());
        self
    }

    pub fn fail_list_windows(self, reason: &str) -> Self {
        self.lock().fail_list_windows = Some(reason.to_string());
        self
    }

    pub fn fail_open_window(self, reason: &str) -> Self {
        self.lock().fail_open_window = Some(reason.to_string());
        self
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.lock().calls.clone()
    }

    pub fn windows(&self) -> Vec<WindowInfo> {
        self.lock().windows.clone()
    }

    pub fn navigations(&self) -> Vec<(WindowId, String)> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Navigate(id, url) => Some((id.clone(), url.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn focused(&self) -> Vec<WindowId> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Focus(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn opened(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                HostCall::OpenWindow(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: HostCall) {
        self.lock().calls.push(call);
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl NotificationPresenter for MemoryHost {
    async fn show(&self, request: &NotificationRequest) -> Result<()> {
        self.record(HostCall::Show(request.clone()));
        match &self.lock().fail_show {
            Some(reason) => Err(anyhow!("Failed to show notification: {}", reason)),
            None => Ok(()),
        }
    }

    async fn close(&self, tag: &str) -> Result<()> {
        self.record(HostCall::CloseNotification(tag.to_string()));
        Ok(())
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl WindowBroker for MemoryHost {
    async fn list_windows(&self, include_uncontrolled: bool) -> Result<Vec<WindowInfo>> {
        self.record(HostCall::ListWindows {
            include_uncontrolled,
        });
        let inner = self.lock();
        match &inner.fail_list_windows {
            Some(reason) => Err(anyhow!("Failed to list windows: {}", reason)),
            None => Ok(inner.windows.clone()),
        }
    }

    async fn navigate(&self, window: &WindowId, url: &str) -> Result<()> {
        self.record(HostCall::Navigate(window.clone(), url.to_string()));
        let mut inner = self.lock();
        let location = inner.location(url);
        let Some(target) = inner.windows.iter_mut().find(|w| &w.id == window) else {
            return Err(anyhow!("No window with id {}", window));
        };
        target.url = location;
        Ok(())
    }

    async fn focus(&self, window: &WindowId) -> Result<()> {
        self.record(HostCall::Focus(window.clone()));
        Ok(())
    }

    async fn open_window(&self, url: &str) -> Result<()> {
        self.record(HostCall::OpenWindow(url.to_string()));
        let mut inner = self.lock();
        if let Some(reason) = &inner.fail_open_window {
            return Err(anyhow!("Failed to open window: {}", reason));
        }
        let id = WindowId(format!("window-{}", inner.windows.len() + 1));
        let location = inner.location(url);
        inner.windows.push(WindowInfo { id, url: location });
        Ok(())
    }

    fn can_open_windows(&self) -> bool {
        self.can_open_windows
    }
}
