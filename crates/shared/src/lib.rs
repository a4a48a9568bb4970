//! # Henpin 共有ユーティリティ
//!
//! Henpin の全クレートで使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, notify-service）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - tracing 関連は `observability` feature で有効化する

pub mod api_response;
#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod event_log;
pub mod health;
pub mod observability;

pub use api_response::ApiResponse;
pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
