//! Integration tests for the client-side notification flow

mod test_utils;

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use cobrafacil::notify::PushNotificationPayload;
    use cobrafacil::worker::{
        Action, HostCall, MemoryHost, NotificationState, OriginPolicy, PushData, ServiceWorker,
        WindowId,
    };

    use crate::test_utils::{APP_ORIGIN, test_config};

    fn worker(host: &MemoryHost) -> ServiceWorker<MemoryHost, MemoryHost> {
        ServiceWorker::from_config(host.clone(), host.clone(), &test_config())
    }

    /// A payload sent by the server opens the right screen on the client
    #[tokio::test]
    async fn it_routes_server_payload_to_open_window() -> Result<()> {
        let host = MemoryHost::new()
            .with_window("other", "https://bank.example/")
            .with_window("app", "https://app.cobrafacil.com.br/clients");
        let sw = worker(&host);

        let payload = PushNotificationPayload::new(
            "Pagamento recebido",
            "R$150 pago",
            Some("/loans/42"),
            Some("payment-42"),
        );
        let mut shown = sw
            .on_push(Some(PushData::from(payload.to_json()?.as_str())))
            .await?;
        assert_eq!(shown.tag, "payment-42");

        let action = sw.on_notification_click(&mut shown, Some("open")).await?;
        assert_eq!(
            action,
            Action::Navigate {
                window: WindowId("app".to_string()),
                url: "/loans/42".to_string(),
            }
        );
        assert_eq!(
            host.focused(),
            vec![WindowId("app".to_string())]
        );
        assert!(host.opened().is_empty());

        Ok(())
    }

    /// The shown notification always carries the fixed presentation options
    #[tokio::test]
    async fn it_requests_persistent_notification_with_actions() -> Result<()> {
        let host = MemoryHost::new();
        let sw = worker(&host);

        sw.on_push(Some(PushData::from("texto simples"))).await?;

        let calls = host.calls();
        let HostCall::Show(request) = &calls[0] else {
            panic!("Expected a show call, got {:?}", calls[0]);
        };
        assert_eq!(request.options.body, "texto simples");
        assert_eq!(request.options.vibrate, vec![200, 100, 200]);
        assert!(request.options.require_interaction);
        let actions: Vec<&str> = request
            .options
            .actions
            .iter()
            .map(|a| a.action.as_str())
            .collect();
        assert_eq!(actions, vec!["open", "close"]);

        Ok(())
    }

    /// Loose origin matching reuses a window that merely mentions the origin
    #[tokio::test]
    async fn it_supports_substring_origin_matching() -> Result<()> {
        let host = MemoryHost::new().with_window(
            "login",
            &format!("https://auth.example/?redirect={}", APP_ORIGIN),
        );
        let sw = worker(&host).origin_policy(OriginPolicy::Substring);

        let mut shown = sw.on_push(None).await?;
        let action = sw.on_notification_click(&mut shown, None).await?;

        assert!(matches!(action, Action::Navigate { .. }));
        Ok(())
    }

    /// A failed window open is reported for that click only
    #[tokio::test]
    async fn it_reports_open_window_failure() -> Result<()> {
        let host = MemoryHost::new().fail_open_window("popup blocked");
        let sw = worker(&host);

        let mut first = sw.on_push(None).await?;
        let result = sw.on_notification_click(&mut first, None).await;
        assert!(result.is_err());
        assert!(first.state.is_terminal());

        // Later notifications are unaffected
        let mut second = sw.on_push(None).await?;
        assert_eq!(second.state, NotificationState::Shown);
        let action = sw.on_notification_close(&mut second).await?;
        assert_eq!(action, Action::Noop);

        Ok(())
    }
}
