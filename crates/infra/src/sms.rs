//! # SMS 通知
//!
//! 顧客の携帯電話番号へ SMS を送信するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **失敗は値で返す**: HTTP エラー・通信エラーはすべて [`SmsOutcome`] に畳み込み、
//!   呼び出し側に `Err` を返さない
//! - **2 つの実装**: Twilio（本番用）、Noop（送信無効化時）
//! - **環境変数切替**: `SMS_BACKEND` でランタイム選択

mod noop;
mod twilio;

use async_trait::async_trait;
use henpin_domain::{
    contractor::ContractorId,
    notification::NotificationEvent,
    reseller::ResellerId,
    return_status::TemplateData,
};
pub use noop::NoopSmsNotifier;
pub use twilio::{TwilioConfig, TwilioSmsNotifier};

/// SMS 送信リクエスト
#[derive(Debug, Clone, Copy)]
pub struct SmsRequest<'a> {
    pub reseller_id:    ResellerId,
    pub client_id:      ContractorId,
    pub event:          NotificationEvent,
    pub differences_to: i64,
    pub template_data:  &'a TemplateData,
    /// 宛先の携帯電話番号
    pub to:             &'a str,
}

/// SMS 送信結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmsOutcome {
    /// 送信できたか
    pub sent:  bool,
    /// エラーメッセージ（送信成功時でも付くことがある）
    pub error: Option<String>,
}

impl SmsOutcome {
    pub fn sent() -> Self {
        Self {
            sent:  true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            sent:  false,
            error: Some(error.into()),
        }
    }
}

/// SMS 送信トレイト
#[async_trait]
pub trait SmsNotifier: Send + Sync {
    /// SMS を送信する（失敗しても `Err` を返さない）
    async fn send(&self, request: &SmsRequest<'_>) -> SmsOutcome;
}

/// SMS 本文を組み立てる
fn compose_body(request: &SmsRequest<'_>) -> String {
    format!(
        "返品のステータスが更新されました（ステータス: {}）。詳細はメールまたはマイページをご確認ください。",
        request.differences_to
    )
}
