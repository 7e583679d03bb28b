use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info};

use crate::{abstract_trait::NotifierTrait, config::TelegramConfig, model::withdrawal::Withdrawal};

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: String,
    parse_mode: &'static str,
}

#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_url.trim_end_matches('/'),
            self.config.bot_token
        )
    }

    pub fn render(withdrawal: &Withdrawal, submitted_at: Option<&str>) -> String {
        format!(
            "🔔 <b>New withdrawal request!</b>\n\n\
             💰 Amount: <b>{} ₽</b>\n\
             📱 Phone: <code>{}</code>\n\
             🏦 Bank: <b>{}</b>\n\
             🆔 Request: #{}\n\n\
             ⏰ {}",
            withdrawal.amount.normalize(),
            escape_html(&withdrawal.phone_number),
            escape_html(&withdrawal.bank_name),
            withdrawal.id,
            escape_html(submitted_at.unwrap_or("Now")),
        )
    }
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[async_trait]
impl NotifierTrait for TelegramNotifier {
    async fn notify_created(&self, withdrawal: &Withdrawal, submitted_at: Option<&str>) {
        let body = SendMessage {
            chat_id: &self.config.admin_chat_id,
            text: Self::render(withdrawal, submitted_at),
            parse_mode: "HTML",
        };

        let result = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(_) => info!("📨 [Telegram] Notified admin about withdrawal #{}", withdrawal.id),
            Err(e) => error!(
                "❌ [Telegram] Failed to notify admin about withdrawal #{}: {}",
                withdrawal.id,
                e.without_url()
            ),
        }
    }
}

/// Used when no bot token is configured.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

#[async_trait]
impl NotifierTrait for NoopNotifier {
    async fn notify_created(&self, withdrawal: &Withdrawal, _submitted_at: Option<&str>) {
        info!(
            "🔕 [Telegram] Notifications disabled, skipping withdrawal #{}",
            withdrawal.id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn withdrawal() -> Withdrawal {
        Withdrawal {
            id: 42,
            phone_number: "+79990001122".into(),
            bank_name: "Sber <main>".into(),
            amount: Decimal::new(7005, 1),
            status: "pending".into(),
            created_at: Utc::now(),
            processed_at: None,
        }
    }

    fn notifier(api_url: String) -> TelegramNotifier {
        TelegramNotifier::new(TelegramConfig {
            api_url,
            bot_token: "123:abc".into(),
            admin_chat_id: "-100500".into(),
        })
    }

    #[test]
    fn render_escapes_user_input() {
        let text = TelegramNotifier::render(&withdrawal(), Some("01.02.2025, 10:00:00"));

        assert!(text.contains("<b>700.5 ₽</b>"));
        assert!(text.contains("Sber &lt;main&gt;"));
        assert!(text.contains("#42"));
        assert!(text.contains("01.02.2025, 10:00:00"));
    }

    #[tokio::test]
    async fn posts_html_message_to_admin_chat() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(body_partial_json(serde_json::json!({
                "chat_id": "-100500",
                "parse_mode": "HTML"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&mock_server)
            .await;

        notifier(mock_server.uri())
            .notify_created(&withdrawal(), None)
            .await;
    }

    #[tokio::test]
    async fn delivery_failure_is_swallowed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&mock_server)
            .await;

        notifier(mock_server.uri())
            .notify_created(&withdrawal(), Some("now"))
            .await;
    }
}
