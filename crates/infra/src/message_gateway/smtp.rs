//! SMTP メッセージゲートウェイ実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 開発環境では Mailpit（ローカル SMTP サーバー）に接続する。

use async_trait::async_trait;
use henpin_domain::notification::{EmailMessage, MessageRouting, NotificationError};
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Message, header::ContentType},
};

use super::{MessageGateway, sender_or_default};

/// SMTP メッセージゲートウェイ
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
pub struct SmtpMessageGateway {
    transport:    AsyncSmtpTransport<Tokio1Executor>,
    default_from: String,
}

impl SmtpMessageGateway {
    /// 新しい SMTP ゲートウェイを作成
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "localhost"）
    /// - `port`: SMTP サーバーのポート番号（例: 1025 for Mailpit）
    /// - `default_from`: メッセージに送信元がない場合に使うアドレス
    pub fn new(host: &str, port: u16, default_from: String) -> Self {
        // builder_dangerous: TLS なしで接続（Mailpit 等のローカル SMTP 向け）
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self {
            transport,
            default_from,
        }
    }

    fn build_message(&self, email: &EmailMessage) -> Result<Message, NotificationError> {
        let from = sender_or_default(&email.email_from, &self.default_from);

        Message::builder()
            .from(
                from.parse()
                    .map_err(|e| NotificationError::SendFailed(format!("送信元アドレス不正: {e}")))?,
            )
            .to(email
                .email_to
                .parse()
                .map_err(|e| NotificationError::SendFailed(format!("宛先アドレス不正: {e}")))?)
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.message.clone())
            .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
    }
}

#[async_trait]
impl MessageGateway for SmtpMessageGateway {
    async fn send(
        &self,
        messages: &[EmailMessage],
        routing: &MessageRouting,
    ) -> Result<(), NotificationError> {
        for email in messages {
            let message = self.build_message(email)?;

            self.transport
                .send(message)
                .await
                .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

            tracing::debug!(
                to = %email.email_to,
                reseller_id = %routing.reseller_id,
                event = %routing.event,
                "SMTP: メール送信完了"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> SmtpMessageGateway {
        SmtpMessageGateway::new("localhost", 1025, "noreply@henpin.example.com".to_string())
    }

    fn email(from: &str, to: &str) -> EmailMessage {
        EmailMessage {
            email_from: from.to_string(),
            email_to:   to.to_string(),
            subject:    "返品ステータス変更".to_string(),
            message:    "本文".to_string(),
        }
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SmtpMessageGateway>();
    }

    #[test]
    fn 送信元が空なら既定アドレスでメッセージを構築する() {
        let message = gateway()
            .build_message(&email("", "client@example.com"))
            .unwrap();

        let from = message.headers().get_raw("From").unwrap();
        assert!(from.contains("noreply@henpin.example.com"));
    }

    #[test]
    fn 宛先アドレスが不正ならsend_failedを返す() {
        let result = gateway().build_message(&email("shop@example.com", "not-an-address"));

        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
    }
}
