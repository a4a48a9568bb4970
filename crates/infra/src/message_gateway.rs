//! # メッセージゲートウェイ
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `MessageGateway` trait でメール送信を抽象化
//! - **3 つの実装**: SMTP（Mailpit 開発用）、SES（本番用）、Noop（テスト用）
//! - **環境変数切替**: `MESSAGE_BACKEND` でランタイム選択
//! - **送信元の既定値**: `EmailMessage::email_from` が空の場合は各実装の既定アドレスを使う

mod noop;
mod ses;
mod smtp;

use async_trait::async_trait;
use henpin_domain::notification::{EmailMessage, MessageRouting, NotificationError};
pub use noop::NoopMessageGateway;
pub use ses::SesMessageGateway;
pub use smtp::SmtpMessageGateway;

/// メール送信トレイト
///
/// 1 回の呼び出しで複数のメッセージを受け取り、同じルーティング情報で送信する。
/// 成功応答以上の配送確認は行わない。
#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// メールを送信する
    async fn send(
        &self,
        messages: &[EmailMessage],
        routing: &MessageRouting,
    ) -> Result<(), NotificationError>;
}

/// 送信元アドレスを決定する（空なら既定値）
fn sender_or_default<'a>(email_from: &'a str, default_from: &'a str) -> &'a str {
    if email_from.is_empty() {
        default_from
    } else {
        email_from
    }
}
