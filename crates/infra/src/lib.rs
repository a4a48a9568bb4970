//! # Henpin インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! 通知ユースケースが依存する協調オブジェクトのトレイトと、その具体実装を提供する。
//! ユースケースは `Arc<dyn Trait>` でこれらを受け取り、実装の詳細を知らない。
//!
//! ## 依存関係
//!
//! ```text
//! notify-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プールとマイグレーション
//! - [`error`] - インフラ層エラー定義
//! - [`message_gateway`] - メール送信（SMTP / SES / Noop）
//! - [`sms`] - SMS 送信（Twilio / Noop）
//! - [`repository`] - 通知権限・顧客ディレクトリ
//! - [`sender_email`] - 送信元メールアドレスの解決

pub mod db;
pub mod error;
pub mod message_gateway;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;
pub mod sender_email;
pub mod sms;

pub use error::{InfraError, InfraErrorKind};
