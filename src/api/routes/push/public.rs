//! Public types for the push API
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct PushSubscriptionRequest {
    pub endpoint: String,
    pub keys: HashMap<String, String>,
}

#[derive(Deserialize)]
pub struct PushUnsubscribeRequest {
    pub endpoint: String,
}

#[derive(Serialize)]
pub struct PushUnsubscribeResponse {
    pub success: bool,
    pub removed: bool,
}

#[derive(Deserialize)]
pub struct NotificationRequest {
    pub title: Option<String>,
    pub body: String,
    pub url: Option<String>,
    pub tag: Option<String>,
}

#[derive(Serialize)]
pub struct NotificationResponse {
    pub success: bool,
    pub delivered: usize,
    pub failed: usize,
}
