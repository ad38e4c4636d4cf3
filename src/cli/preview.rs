use anyhow::Result;

use crate::core::AppConfig;
use crate::worker::{PushData, normalize};

pub fn run(payload: Option<&str>, config: &AppConfig) -> Result<()> {
    let data = payload.map(PushData::from);
    let model = normalize(data.as_ref(), &config.notification_defaults);
    println!("{}", serde_json::to_string_pretty(&model)?);
    Ok(())
}
