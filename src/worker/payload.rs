//! Inbound push payload and the display model derived from it

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw bytes delivered with a push event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PushData(Vec<u8>);

impl PushData {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_slice(&self.0)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl From<&str> for PushData {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

/// The push payload as sent by the server. Every field is optional and
/// values of the wrong JSON type are dropped rather than rejected.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct NotificationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    // Sibling of `data`, wins over `data.url`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NotificationPayload {
    /// Pull the known fields out of an arbitrary JSON value. Anything that
    /// is not an object yields an empty payload.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        let text = |key: &str| {
            obj.get(key)
                .and_then(Value::as_str)
                .map(|s| s.to_string())
        };

        Self {
            title: text("title"),
            body: text("body"),
            icon: text("icon"),
            badge: text("badge"),
            tag: text("tag"),
            data: obj.get("data").and_then(Value::as_object).cloned(),
            url: text("url"),
        }
    }
}

/// Application data attached to a shown notification.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NotificationData {
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NotificationData {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            extra: Map::new(),
        }
    }
}

/// Fully resolved fields for one platform notification.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DisplayModel {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub data: NotificationData,
}
