//! Sending push notifications to subscribed clients

pub mod db;
pub mod models;
pub use db::*;
pub use models::*;

use anyhow::{Error, Result};
use web_push::{
    ContentEncoding, HyperWebPushClient, SubscriptionInfo, VapidSignatureBuilder, WebPushClient,
    WebPushMessageBuilder,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub failed: usize,
}

pub async fn send_push_notification(
    vapid_private_pem_path: String,
    subscription: PushSubscription,
    payload: PushNotificationPayload,
) -> Result<(), Error> {
    let PushSubscription {
        endpoint,
        p256dh,
        auth,
    } = subscription;
    let subscription_info = SubscriptionInfo::new(endpoint, p256dh, auth);

    // Read the VAPID signing material from the PEM file
    let file = std::fs::File::open(vapid_private_pem_path)?;
    let sig_builder = VapidSignatureBuilder::from_pem(file, &subscription_info)?.build()?;

    let mut builder = WebPushMessageBuilder::new(&subscription_info);
    let content = payload.to_json()?;
    builder.set_payload(ContentEncoding::Aes128Gcm, content.as_bytes());
    builder.set_vapid_signature(sig_builder);
    let message = builder.build()?;

    let client = HyperWebPushClient::new();
    client.send(message).await?;

    Ok(())
}

/// Send `payload` to every subscription concurrently. Individual failures
/// are logged and counted, never returned.
pub async fn broadcast_push_notification(
    subscriptions: Vec<PushSubscription>,
    vapid_key_path: String,
    payload: PushNotificationPayload,
) -> BroadcastReport {
    let mut tasks = tokio::task::JoinSet::new();
    for sub in subscriptions {
        let vapid = vapid_key_path.clone();
        let endpoint = sub.endpoint.clone();
        let payload = payload.clone();
        tasks.spawn(async move { (endpoint, send_push_notification(vapid, sub, payload).await) });
    }

    let mut report = BroadcastReport::default();
    while let Some(res) = tasks.join_next().await {
        match res {
            Ok((_, Ok(()))) => report.delivered += 1,
            Ok((endpoint, Err(e))) => {
                tracing::error!("Failed to send push notification to {}: {}", endpoint, e);
                report.failed += 1;
            }
            Err(e) => {
                tracing::error!("Push notification task failed: {}", e);
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        "Broadcast finished delivered={} failed={}",
        report.delivered,
        report.failed
    );
    report
}
