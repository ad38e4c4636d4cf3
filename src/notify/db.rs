use anyhow::{Error, Result};
use tokio_rusqlite::Connection;

use super::models::PushSubscription;

pub async fn find_all_notification_subscriptions(
    db: &Connection,
) -> Result<Vec<PushSubscription>, Error> {
    let subscriptions = db.call(|conn| {
        let mut stmt = conn.prepare("SELECT endpoint, p256dh, auth FROM push_subscription")?;
        let rows = stmt
            .query_map([], |i| {
                Ok(PushSubscription {
                    endpoint: i.get(0)?,
                    p256dh: i.get(1)?,
                    auth: i.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<PushSubscription>>>()?;
        Ok(rows)
    });
    Ok(subscriptions.await?)
}

/// Insert or refresh the keys for a subscription endpoint.
pub async fn upsert_subscription(db: &Connection, subscription: PushSubscription) -> Result<()> {
    db.call(move |conn| {
        conn.execute(
            "REPLACE INTO push_subscription(endpoint, p256dh, auth) VALUES (?, ?, ?)",
            tokio_rusqlite::params![
                subscription.endpoint,
                subscription.p256dh,
                subscription.auth,
            ],
        )?;
        Ok(())
    })
    .await?;
    Ok(())
}

/// Returns true if a subscription was removed.
pub async fn delete_subscription(db: &Connection, endpoint: &str) -> Result<bool> {
    let endpoint = endpoint.to_string();
    let removed = db
        .call(move |conn| {
            let count = conn.execute(
                "DELETE FROM push_subscription WHERE endpoint = ?",
                tokio_rusqlite::params![endpoint],
            )?;
            Ok(count > 0)
        })
        .await?;
    Ok(removed)
}
