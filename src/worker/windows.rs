//! The host's list of open application windows

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::HostBound;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct WindowId(pub String);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct WindowInfo {
    pub id: WindowId,
    pub url: String,
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait WindowBroker: HostBound {
    /// Open windows in host order. `include_uncontrolled` also returns
    /// windows this worker does not control yet.
    async fn list_windows(&self, include_uncontrolled: bool) -> Result<Vec<WindowInfo>>;

    async fn navigate(&self, window: &WindowId, url: &str) -> Result<()>;

    async fn focus(&self, window: &WindowId) -> Result<()>;

    async fn open_window(&self, url: &str) -> Result<()>;

    /// Whether `open_window` is available on this host.
    fn can_open_windows(&self) -> bool {
        true
    }
}
