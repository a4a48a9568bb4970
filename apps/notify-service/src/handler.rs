//! # HTTP リクエストハンドラ
//!
//! - `health`: ヘルスチェック
//! - `return_status`: 返品ステータス変更通知

pub mod health;
pub mod return_status;

pub use health::{ReadinessState, health_check, readiness_check};
pub use return_status::{ReturnStatusState, notify_return_status};
