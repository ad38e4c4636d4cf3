use std::env;

use crate::worker::OriginPolicy;

pub const DEFAULT_TITLE: &str = "CobraFácil";
pub const DEFAULT_BODY: &str = "Você tem uma nova notificação";
pub const DEFAULT_ICON: &str = "/pwa-192x192.png";
pub const DEFAULT_BADGE: &str = "/pwa-192x192.png";
pub const DEFAULT_TAG: &str = "cobrafacil-notification";
pub const DEFAULT_URL: &str = "/dashboard";

/// Fallback values used for every field a push payload leaves out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationDefaults {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    // Navigation target when neither `data.url` nor `url` is supplied
    pub url: String,
}

impl Default for NotificationDefaults {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            body: DEFAULT_BODY.to_string(),
            icon: DEFAULT_ICON.to_string(),
            badge: DEFAULT_BADGE.to_string(),
            tag: DEFAULT_TAG.to_string(),
            url: DEFAULT_URL.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: String,
    pub db_path: String,
    pub vapid_key_path: String,
    pub app_origin: String,
    pub origin_policy: OriginPolicy,
    pub notification_defaults: NotificationDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        let host = "127.0.0.1";
        let port = "2222";
        let storage_path = env::var("COBRAFACIL_STORAGE_PATH").unwrap_or("./".to_string());
        let db_path = format!("{}/db", storage_path);
        let vapid_key_path = env::var("COBRAFACIL_VAPID_KEY_PATH")
            .unwrap_or_else(|_| format!("{}/vapid_private.pem", storage_path));
        let app_origin =
            env::var("COBRAFACIL_APP_ORIGIN").unwrap_or(format!("http://{}:{}", host, port));
        let origin_policy = match env::var("COBRAFACIL_ORIGIN_MATCH") {
            Ok(value) => value.parse().unwrap_or_else(|err| {
                tracing::warn!("{}, falling back to exact origin matching", err);
                OriginPolicy::Exact
            }),
            Err(_) => OriginPolicy::Exact,
        };

        let mut notification_defaults = NotificationDefaults::default();
        if let Ok(url) = env::var("COBRAFACIL_DEFAULT_URL") {
            if !url.is_empty() {
                notification_defaults.url = url;
            }
        }

        Self {
            storage_path,
            db_path,
            vapid_key_path,
            app_origin,
            origin_policy,
            notification_defaults,
        }
    }
}
