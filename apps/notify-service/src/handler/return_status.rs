//! # 返品ステータス通知ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /internal/returns/status-notifications` - 返品ステータス変更を通知する
//!
//! リクエストは `{ "data": { resellerId, notificationType, differences } }`、
//! レスポンスは `{ "data": NotificationResult }`。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use henpin_domain::return_status::{NotificationRequest, NotificationResult};
use henpin_shared::ApiResponse;
use serde_json::Value;

use crate::{error::NotifyError, usecase::notification::ReturnStatusNotifier};

/// 返品ステータス通知ハンドラの共有状態
pub struct ReturnStatusState {
    pub notifier: ReturnStatusNotifier,
}

/// POST /internal/returns/status-notifications
///
/// `data` の型検証はドメイン層で行うため、ボディは型付けせずに受け取る。
/// `data` が欠けている場合は `resellerId` の検証エラーになる。
/// JSON として読めないボディも他のエラーと同じ Problem Details で返す。
pub async fn notify_return_status(
    State(state): State<Arc<ReturnStatusState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<NotificationResult>>, NotifyError> {
    let Json(body) = body?;
    let payload = body.get("data").unwrap_or(&Value::Null);
    let request = NotificationRequest::from_payload(payload)?;

    let result = state.notifier.notify(&request).await?;

    Ok(Json(ApiResponse::new(result)))
}
