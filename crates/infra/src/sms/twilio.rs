//! Twilio SMS 送信実装
//!
//! Twilio Programmable Messaging API（`Messages.json`）にフォーム形式で POST する。
//! 認証は Account SID / Auth Token の Basic 認証。

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{SmsNotifier, SmsOutcome, SmsRequest, compose_body};
use crate::error::InfraError;

/// Twilio 接続設定
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// API ベース URL（例: `https://api.twilio.com`）
    pub base_url:    String,
    pub account_sid: String,
    pub auth_token:  String,
    /// 送信元電話番号
    pub from_number: String,
}

/// Twilio のエラーレスポンス（必要なフィールドのみ）
#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    message: Option<String>,
}

/// Twilio SMS 送信
pub struct TwilioSmsNotifier {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioSmsNotifier {
    pub fn new(config: TwilioConfig) -> Result<Self, InfraError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, config })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }
}

#[async_trait]
impl SmsNotifier for TwilioSmsNotifier {
    #[tracing::instrument(skip_all, level = "debug", fields(client_id = %request.client_id))]
    async fn send(&self, request: &SmsRequest<'_>) -> SmsOutcome {
        let body = compose_body(request);
        let form = [
            ("To", request.to),
            ("From", self.config.from_number.as_str()),
            ("Body", body.as_str()),
        ];

        let response = match self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return SmsOutcome::failed(format!("SMS 送信失敗: {e}")),
        };

        let status = response.status();
        if status.is_success() {
            return SmsOutcome::sent();
        }

        let detail = response
            .json::<TwilioErrorBody>()
            .await
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| status.to_string());
        SmsOutcome::failed(format!("SMS 送信失敗: {detail}"))
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
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;

    use super::*;

    const SID: &str = "AC0001";

    fn notifier(base_url: String) -> TwilioSmsNotifier {
        TwilioSmsNotifier::new(TwilioConfig {
            base_url,
            account_sid: SID.to_string(),
            auth_token: "secret".to_string(),
            from_number: "+15005550006".to_string(),
        })
        .unwrap()
    }

    async fn send_to(sut: &TwilioSmsNotifier, to: &str) -> SmsOutcome {
        let request = NotificationRequest::new(ResellerId::new(1), 2, Default::default());
        let template_data = request.template_data();
        let sms = SmsRequest {
            reseller_id:    ResellerId::new(1),
            client_id:      ContractorId::new(1),
            event:          NotificationEvent::ChangeReturnStatus,
            differences_to: 3,
            template_data:  &template_data,
            to,
        };
        sut.send(&sms).await
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TwilioSmsNotifier>();
    }

    #[test]
    fn messages_urlは末尾スラッシュを取り除いて組み立てる() {
        let sut = notifier("https://api.twilio.com/".to_string());

        assert_eq!(
            sut.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC0001/Messages.json"
        );
    }

    #[tokio::test]
    async fn 送信成功時にsentを返す() {
        // Given
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/2010-04-01/Accounts/AC0001/Messages.json")
                    .header_exists("authorization")
                    .x_www_form_urlencoded_tuple("To", "+819012345678")
                    .x_www_form_urlencoded_tuple("From", "+15005550006");
                then.status(201)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!({ "sid": "SM0001", "status": "queued" }));
            })
            .await;
        let sut = notifier(server.base_url());

        // When
        let outcome = send_to(&sut, "+819012345678").await;

        // Then
        api_mock.assert_async().await;
        assert_eq!(outcome, SmsOutcome::sent());
    }

    #[tokio::test]
    async fn エラーレスポンスのmessageを結果に含める() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(400)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!({
                        "code": 21211,
                        "message": "The 'To' number is not a valid phone number.",
                        "status": 400
                    }));
            })
            .await;
        let sut = notifier(server.base_url());

        let outcome = send_to(&sut, "invalid").await;

        assert_eq!(
            outcome,
            SmsOutcome::failed("SMS 送信失敗: The 'To' number is not a valid phone number.")
        );
    }

    #[tokio::test]
    async fn 本文が読めないエラーはステータスを結果に含める() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(503).body("unavailable");
            })
            .await;
        let sut = notifier(server.base_url());

        let outcome = send_to(&sut, "+819012345678").await;

        assert!(!outcome.sent);
        assert_eq!(
            outcome.error.as_deref(),
            Some("SMS 送信失敗: 503 Service Unavailable")
        );
    }

    #[tokio::test]
    async fn 接続できない場合もエラーを返さず未送信とする() {
        // 閉じたポートに送る
        let sut = notifier("http://127.0.0.1:1".to_string());

        let outcome = send_to(&sut, "+819012345678").await;

        assert!(!outcome.sent);
        assert!(outcome.error.is_some());
    }
}
