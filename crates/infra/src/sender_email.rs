//! # 送信元メールアドレスの解決
//!
//! 通知メールの送信元アドレスを解決する。空文字が返ることもあり、
//! その扱いは呼び出し側（通知ユースケース）が決める。

use async_trait::async_trait;

/// 送信元メールアドレス解決トレイト
#[async_trait]
pub trait SenderEmailResolver: Send + Sync {
    async fn resolve_sender_email(&self) -> String;
}

/// 設定値をそのまま返す解決器
#[derive(Debug, Clone)]
pub struct StaticSenderEmailResolver {
    email: String,
}

impl StaticSenderEmailResolver {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

#[async_trait]
impl SenderEmailResolver for StaticSenderEmailResolver {
    async fn resolve_sender_email(&self) -> String {
        self.email.clone()
    }
}
