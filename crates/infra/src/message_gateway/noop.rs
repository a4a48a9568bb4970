//! Noop メッセージゲートウェイ実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。

use async_trait::async_trait;
use henpin_domain::notification::{EmailMessage, MessageRouting, NotificationError};

use super::MessageGateway;

/// Noop メッセージゲートウェイ（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopMessageGateway;

#[async_trait]
impl MessageGateway for NoopMessageGateway {
    async fn send(
        &self,
        messages: &[EmailMessage],
        routing: &MessageRouting,
    ) -> Result<(), NotificationError> {
        for message in messages {
            tracing::info!(
                to = %message.email_to,
                subject = %message.subject,
                reseller_id = %routing.reseller_id,
                event = %routing.event,
                "Noop: メール送信をスキップ"
            );
        }
        Ok(())
    }
}
