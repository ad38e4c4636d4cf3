use crate::core::db::{async_db, initialize_db};
use anyhow::{Result, anyhow};
use std::fs;

pub async fn run(db: bool, db_path: &str) -> Result<()> {
    if !db {
        return Err(anyhow!("Missing value for init \"--db\""));
    }

    println!("Initializing db...");
    fs::create_dir_all(db_path)?;

    let db = async_db(db_path).await?;
    db.call(|conn| {
        initialize_db(conn)?;
        Ok(())
    })
    .await?;
    println!("Finished initializing db");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::find_all_notification_subscriptions;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_requires_flag() {
        let result = run(false, "/unused").await;
        assert!(result.unwrap_err().to_string().contains("--db"));
    }

    #[tokio::test]
    async fn test_init_creates_schema() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("nested").join("db");
        let db_path = db_path.to_str().unwrap();

        run(true, db_path).await?;
        // Running twice is harmless
        run(true, db_path).await?;

        let db = async_db(db_path).await?;
        assert!(find_all_notification_subscriptions(&db).await?.is_empty());
        Ok(())
    }
}
