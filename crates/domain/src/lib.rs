//! # Henpin ドメイン層
//!
//! 返品（return）ステータス変更に伴う通知のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **純粋なモデル**: DB・メール・SMS などの I/O には一切依存しない
//! - **入力検証の集約**: 型付けされていないリクエストペイロードの検証と
//!   型変換はこのクレートで完結させる
//! - **ドメインエラー**: 入力契約違反は [`DomainError`] で表現する
//!
//! ## 依存関係の方向
//!
//! ```text
//! notify-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`reseller`] - 販売店（通知のスコープとなるテナント）
//! - [`contractor`] - 通知先の顧客プロファイル
//! - [`notification`] - 通知イベント・メールメッセージ・送信エラー
//! - [`return_status`] - 返品ステータス通知のリクエスト・テンプレートデータ・結果
//!
//! ## 使用例
//!
//! ```rust
//! use henpin_domain::return_status::NotificationRequest;
//! use serde_json::json;
//!
//! let request = NotificationRequest::from_payload(&json!({
//!     "resellerId": 1,
//!     "notificationType": 1,
//!     "differences": { "from": 1, "to": 2 },
//! }))
//! .unwrap();
//!
//! assert_eq!(request.differences_to(), 2);
//! ```

#[macro_use]
mod macros;

pub mod contractor;
pub mod error;
pub mod notification;
pub mod reseller;
pub mod return_status;

pub use error::DomainError;
