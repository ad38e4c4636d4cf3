//! Dry run of the client-side notification flow
use anyhow::Result;
use serde::Serialize;

use crate::core::AppConfig;
use crate::worker::{
    Action, HostCall, MemoryHost, NotificationState, PushData, ServiceWorker, WindowInfo,
};

pub enum Interaction {
    Click(Option<String>),
    Dismiss,
}

#[derive(Serialize)]
pub struct SimulationReport {
    pub action: Action,
    pub state: NotificationState,
    pub calls: Vec<HostCall>,
    pub windows: Vec<WindowInfo>,
}

pub async fn simulate(
    payload: Option<&str>,
    interaction: Interaction,
    windows: Vec<String>,
    config: &AppConfig,
) -> Result<SimulationReport> {
    let host = windows
        .iter()
        .enumerate()
        .fold(MemoryHost::new().with_origin(&config.app_origin), |host, (i, url)| {
            host.with_window(&format!("window-{}", i + 1), url)
        });
    let worker = ServiceWorker::from_config(host.clone(), host.clone(), config);

    let mut shown = worker.on_push(payload.map(PushData::from)).await?;
    let action = match interaction {
        Interaction::Click(action) => {
            worker
                .on_notification_click(&mut shown, action.as_deref())
                .await?
        }
        Interaction::Dismiss => worker.on_notification_close(&mut shown).await?,
    };

    Ok(SimulationReport {
        action,
        state: shown.state,
        calls: host.calls(),
        windows: host.windows(),
    })
}

pub async fn run(
    payload: Option<&str>,
    interaction: Interaction,
    windows: Vec<String>,
    config: &AppConfig,
) -> Result<()> {
    let report = simulate(payload, interaction, windows, config).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NotificationDefaults;
    use crate::worker::{ClickAction, OriginPolicy, WindowId};

    fn config() -> AppConfig {
        AppConfig {
            storage_path: "./".to_string(),
            db_path: "./db".to_string(),
            vapid_key_path: "./vapid_private.pem".to_string(),
            app_origin: "https://app.cobrafacil.com.br".to_string(),
            origin_policy: OriginPolicy::Exact,
            notification_defaults: NotificationDefaults::default(),
        }
    }

    #[tokio::test]
    async fn test_simulate_open_with_existing_window() -> Result<()> {
        let report = simulate(
            Some(r#"{"title":"Pagamento recebido","data":{"url":"/loans/42"}}"#),
            Interaction::Click(Some("open".to_string())),
            vec!["https://app.cobrafacil.com.br/dashboard".to_string()],
            &config(),
        )
        .await?;

        assert_eq!(
            report.action,
            Action::Navigate {
                window: WindowId("window-1".to_string()),
                url: "/loans/42".to_string(),
            }
        );
        assert_eq!(report.state, NotificationState::Clicked(ClickAction::Open));
        assert_eq!(
            report.windows[0].url,
            "https://app.cobrafacil.com.br/loans/42"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_simulate_dismiss() -> Result<()> {
        let report = simulate(None, Interaction::Dismiss, vec![], &config()).await?;

        assert_eq!(report.action, Action::Noop);
        assert_eq!(report.state, NotificationState::Dismissed);
        // Only the show call reached the host
        assert_eq!(report.calls.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_report_serializes() -> Result<()> {
        let report = simulate(None, Interaction::Click(None), vec![], &config()).await?;
        let value = serde_json::to_value(&report)?;

        assert_eq!(value["action"]["kind"], "open_window");
        assert_eq!(value["action"]["url"], "/dashboard");
        assert_eq!(value["state"], serde_json::json!({"clicked": "none"}));
        Ok(())
    }
}
