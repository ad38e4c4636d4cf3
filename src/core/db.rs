use anyhow::Result;
use rusqlite::Connection as SyncConnection;
use tokio_rusqlite::Connection;

const DB_FILE_NAME: &str = "cobrafacil.db";

/// Open the async sqlite connection stored under `db_path`.
pub async fn async_db(db_path: &str) -> Result<Connection> {
    let db = Connection::open(format!("{}/{}", db_path, DB_FILE_NAME)).await?;
    Ok(db)
}

pub fn initialize_db(conn: &SyncConnection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS push_subscription (
            endpoint TEXT PRIMARY KEY,
            p256dh TEXT NOT NULL,
            auth TEXT NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
}
