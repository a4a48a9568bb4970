//! Noop SMS 送信実装
//!
//! SMS を送信せず、ログ出力のみ行う。結果は常に未送信・エラーなし。

use async_trait::async_trait;

use super::{SmsNotifier, SmsOutcome, SmsRequest};

/// Noop SMS 送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopSmsNotifier;

#[async_trait]
impl SmsNotifier for NoopSmsNotifier {
    async fn send(&self, request: &SmsRequest<'_>) -> SmsOutcome {
        tracing::info!(
            reseller_id = %request.reseller_id,
            client_id = %request.client_id,
            "Noop: SMS 送信をスキップ"
        );
        SmsOutcome::default()
    }
}

#[cfg(test)]
mod tests {
    use henpin_domain::{
        contractor::ContractorId,
        notification::NotificationEvent,
        reseller::ResellerId,
        return_status::NotificationRequest,
    };

    use super::*;

    #[tokio::test]
    async fn 未送信かつエラーなしを返す() {
        let request = NotificationRequest::new(ResellerId::new(1), 2, Default::default());
        let template_data = request.template_data();
        let sms = SmsRequest {
            reseller_id:    ResellerId::new(1),
            client_id:      ContractorId::new(1),
            event:          NotificationEvent::ChangeReturnStatus,
            differences_to: 0,
            template_data:  &template_data,
            to:             "09012345678",
        };

        let outcome = NoopSmsNotifier.send(&sms).await;

        assert_eq!(outcome, SmsOutcome::default());
    }
}
