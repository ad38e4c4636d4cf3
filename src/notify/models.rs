use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PushSubscription {
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}

#[derive(Serialize, Clone, Debug)]
/// Application data read back by the client when the notification is
/// clicked. Extra fields added here end up in `data` of the shown
/// notification.
struct PushNotificationData {
    // The URL to open when the notification is clicked
    url: String,
}

/// Payload sent through Web Push. Serializes to the same shape the
/// client's push handler parses.
#[derive(Serialize, Clone, Debug)]
pub struct PushNotificationPayload {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    // When a tag is set, sending new notifications with the same tag
    // will update the user's notification if they have not interacted
    // with it yet.
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<PushNotificationData>,
}

impl PushNotificationPayload {
    pub fn new(title: &str, body: &str, url: Option<&str>, tag: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            tag: tag.map(|s| s.to_string()),
            data: url.map(|u| PushNotificationData { url: u.to_string() }),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NotificationDefaults;
    use crate::worker::{PushData, normalize};

    #[test]
    fn test_payload_is_read_back_by_the_worker() {
        let payload = PushNotificationPayload::new(
            "Parcela vencida",
            "Maria está com 2 parcelas em atraso",
            Some("/clients/7"),
            Some("overdue-7"),
        );
        let json = payload.to_json().unwrap();

        let model = normalize(
            Some(&PushData::from(json.as_str())),
            &NotificationDefaults::default(),
        );
        assert_eq!(model.title, "Parcela vencida");
        assert_eq!(model.body, "Maria está com 2 parcelas em atraso");
        assert_eq!(model.tag, "overdue-7");
        assert_eq!(model.data.url, "/clients/7");
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let payload = PushNotificationPayload::new("Oi", "Tudo certo", None, None);
        let value: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();

        assert_eq!(value, serde_json::json!({"title": "Oi", "body": "Tudo certo"}));
    }
}
