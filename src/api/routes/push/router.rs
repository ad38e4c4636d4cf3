//! Router for the push API

use std::sync::Arc;

use axum::{Json, Router, body::Bytes, extract::State};
use serde_json::Value;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::notify::{
    PushNotificationPayload, PushSubscription, broadcast_push_notification, delete_subscription,
    find_all_notification_subscriptions, upsert_subscription,
};
use crate::worker::{DisplayModel, PushData, normalize};

type SharedState = Arc<AppState>;

// Register a client for push notifications
async fn push_subscription(
    State(state): State<SharedState>,
    Json(subscription): Json<public::PushSubscriptionRequest>,
) -> Result<Json<Value>, ApiError> {
    let Some(p256dh) = subscription.keys.get("p256dh").cloned() else {
        return Err(ApiError::bad_request("Missing p256dh key"));
    };
    let Some(auth) = subscription.keys.get("auth").cloned() else {
        return Err(ApiError::bad_request("Missing auth key"));
    };

    upsert_subscription(
        &state.db,
        PushSubscription {
            endpoint: subscription.endpoint,
            p256dh,
            auth,
        },
    )
    .await?;

    Ok(Json(serde_json::json!({"success": true})))
}

async fn push_unsubscribe(
    State(state): State<SharedState>,
    Json(request): Json<public::PushUnsubscribeRequest>,
) -> Result<Json<public::PushUnsubscribeResponse>, ApiError> {
    let removed = delete_subscription(&state.db, &request.endpoint).await?;
    Ok(Json(public::PushUnsubscribeResponse {
        success: true,
        removed,
    }))
}

// Endpoint to send push notification to all subscriptions
async fn send_notification(
    State(state): State<SharedState>,
    Json(payload): Json<public::NotificationRequest>,
) -> Result<Json<public::NotificationResponse>, ApiError> {
    let vapid_key_path = state.config.vapid_key_path.clone();
    let subscriptions = find_all_notification_subscriptions(&state.db).await?;

    let title = payload
        .title
        .unwrap_or_else(|| state.config.notification_defaults.title.clone());
    let notification_payload = PushNotificationPayload::new(
        &title,
        &payload.body,
        payload.url.as_deref(),
        payload.tag.as_deref(),
    );
    let report =
        broadcast_push_notification(subscriptions, vapid_key_path, notification_payload).await;

    Ok(Json(public::NotificationResponse {
        success: true,
        delivered: report.delivered,
        failed: report.failed,
    }))
}

// Show what the client would display for a raw push payload
async fn preview_notification(State(state): State<SharedState>, body: Bytes) -> Json<DisplayModel> {
    let data = PushData::new(body.to_vec());
    Json(normalize(Some(&data), &state.config.notification_defaults))
}

/// Create the push router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/subscribe",
            axum::routing::post(push_subscription).delete(push_unsubscribe),
        )
        .route("/notification", axum::routing::post(send_notification))
        .route("/preview", axum::routing::post(preview_notification))
}
