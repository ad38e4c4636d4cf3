//! Turns whatever arrived with a push event into a complete display model

use serde_json::Value;

use super::payload::{DisplayModel, NotificationData, NotificationPayload, PushData};
use crate::core::NotificationDefaults;

/// The model used when a push event carries no payload at all.
pub fn default_model(defaults: &NotificationDefaults) -> DisplayModel {
    DisplayModel {
        title: defaults.title.clone(),
        body: defaults.body.clone(),
        icon: defaults.icon.clone(),
        badge: defaults.badge.clone(),
        tag: defaults.tag.clone(),
        data: NotificationData::new(&defaults.url),
    }
}

/// Build the display model for a push event. Never fails: a payload that
/// is not JSON becomes the notification body and everything else keeps
/// its default.
pub fn normalize(data: Option<&PushData>, defaults: &NotificationDefaults) -> DisplayModel {
    let mut model = default_model(defaults);

    // Zero bytes count as no payload so the default body is kept rather
    // than shown blank
    let Some(data) = data.filter(|d| !d.is_empty()) else {
        return model;
    };

    match data.json() {
        Ok(value) => apply_payload(&mut model, NotificationPayload::from_value(&value)),
        Err(err) => {
            tracing::warn!("Push payload is not JSON, using it as the body: {}", err);
            model.body = data.text();
        }
    }

    model
}

fn apply_payload(model: &mut DisplayModel, payload: NotificationPayload) {
    let NotificationPayload {
        title,
        body,
        icon,
        badge,
        tag,
        data,
        url,
    } = payload;

    let present = |field: Option<String>| field.filter(|s| !s.is_empty());

    if let Some(title) = present(title) {
        model.title = title;
    }
    if let Some(body) = present(body) {
        model.body = body;
    }
    if let Some(icon) = present(icon) {
        model.icon = icon;
    }
    if let Some(badge) = present(badge) {
        model.badge = badge;
    }
    if let Some(tag) = present(tag) {
        model.tag = tag;
    }

    if let Some(mut extra) = data {
        // A non-string or empty `data.url` leaves the default target
        // in place
        if let Some(Value::String(url)) = extra.remove("url") {
            if !url.is_empty() {
                model.data.url = url;
            }
        }
        model.data.extra = extra;
    }

    if let Some(url) = present(url) {
        model.data.url = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> NotificationDefaults {
        NotificationDefaults::default()
    }

    fn normalize_str(raw: &str) -> DisplayModel {
        normalize(Some(&PushData::from(raw)), &defaults())
    }

    #[test]
    fn test_missing_payload_uses_defaults() {
        let model = normalize(None, &defaults());
        assert_eq!(model, default_model(&defaults()));
        assert_eq!(model.data.url, "/dashboard");
    }

    #[test]
    fn test_empty_payload_uses_defaults() {
        let model = normalize(Some(&PushData::new(Vec::new())), &defaults());
        assert_eq!(model, default_model(&defaults()));
    }

    #[test]
    fn test_partial_payload_overrides_supplied_fields() {
        let model = normalize_str(r#"{"tag":"loan-7","body":"Parcela vence hoje"}"#);

        assert_eq!(model.title, defaults().title);
        assert_eq!(model.body, "Parcela vence hoje");
        assert_eq!(model.icon, defaults().icon);
        assert_eq!(model.badge, defaults().badge);
        assert_eq!(model.tag, "loan-7");
        assert_eq!(model.data.url, "/dashboard");
    }

    #[test]
    fn test_field_order_does_not_matter() {
        let a = normalize_str(r#"{"title":"A","icon":"/a.png","body":"B"}"#);
        let b = normalize_str(r#"{"body":"B","title":"A","icon":"/a.png"}"#);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_strings_keep_defaults() {
        let model = normalize_str(r#"{"title":"","body":"","url":""}"#);
        assert_eq!(model, default_model(&defaults()));
    }

    #[test]
    fn test_top_level_url_overrides_data_url() {
        let model = normalize_str(r#"{"data":{"url":"/loans/1"},"url":"/clients/9"}"#);
        assert_eq!(model.data.url, "/clients/9");
    }

    #[test]
    fn test_data_url_used_without_top_level_url() {
        let model = normalize_str(r#"{"data":{"url":"/loans/1"}}"#);
        assert_eq!(model.data.url, "/loans/1");
    }

    #[test]
    fn test_top_level_url_without_data() {
        let model = normalize_str(r#"{"url":"/clients/9"}"#);
        assert_eq!(model.data.url, "/clients/9");
    }

    #[test]
    fn test_data_without_url_keeps_default_target_and_extras() {
        let model = normalize_str(r#"{"data":{"loan_id":42,"url":7}}"#);

        assert_eq!(model.data.url, "/dashboard");
        assert_eq!(model.data.extra.get("loan_id"), Some(&json!(42)));
        assert!(!model.data.extra.contains_key("url"));
    }

    #[test]
    fn test_plain_text_becomes_body() {
        let model = normalize_str("Pagamento de R$150 recebido");

        let expected = DisplayModel {
            body: "Pagamento de R$150 recebido".to_string(),
            ..default_model(&defaults())
        };
        assert_eq!(model, expected);
    }

    #[test]
    fn test_truncated_json_becomes_body() {
        let model = normalize_str(r#"{"title":"Pagamento"#);
        assert_eq!(model.title, defaults().title);
        assert_eq!(model.body, r#"{"title":"Pagamento"#);
    }

    #[test]
    fn test_json_scalar_uses_defaults() {
        assert_eq!(normalize_str("42"), default_model(&defaults()));
        assert_eq!(normalize_str(r#""hello""#), default_model(&defaults()));
    }

    #[test]
    fn test_configured_defaults_are_used() {
        let custom = NotificationDefaults {
            title: "Outro".to_string(),
            url: "/home".to_string(),
            ..NotificationDefaults::default()
        };
        let model = normalize(None, &custom);
        assert_eq!(model.title, "Outro");
        assert_eq!(model.data.url, "/home");
    }

    #[test]
    fn test_payment_received_payload() {
        let model = normalize_str(
            r#"{"title":"Pagamento recebido","body":"R$150 pago","data":{"url":"/loans/42"}}"#,
        );

        assert_eq!(
            model,
            DisplayModel {
                title: "Pagamento recebido".to_string(),
                body: "R$150 pago".to_string(),
                icon: defaults().icon,
                badge: defaults().badge,
                tag: defaults().tag,
                data: NotificationData::new("/loans/42"),
            }
        );
    }
}
