//! # Notify Service エラー定義
//!
//! 通知ユースケースで発生するエラーと、HTTP レスポンスへの変換を定義する。

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use henpin_domain::{DomainError, notification::NotificationError};
use henpin_infra::{InfraError, InfraErrorKind};
use henpin_shared::{ErrorResponse, event_log::error as log_error};
use thiserror::Error;

/// Notify Service で発生するエラー
#[derive(Debug, Error)]
pub enum NotifyError {
    /// リクエストボディが JSON として読めない
    #[error("リクエストボディが不正です: {0}")]
    MalformedBody(#[from] JsonRejection),

    /// 入力検証エラー（協調オブジェクトは一切呼ばれていない）
    #[error("入力が不正です: {0}")]
    InvalidArgument(#[from] DomainError),

    /// テンプレートレンダリング・メール送信の失敗
    #[error("通知処理に失敗しました: {0}")]
    Notification(#[from] NotificationError),

    /// ディレクトリ参照の失敗
    #[error("インフラエラー: {0}")]
    Infra(#[from] InfraError),
}

/// インフラエラーをログ用のカテゴリと種別に振り分ける
fn infra_error_context(error: &InfraError) -> (&'static str, &'static str) {
    match error.kind() {
        InfraErrorKind::Database(_) | InfraErrorKind::NotFound { .. } => {
            (log_error::category::INFRASTRUCTURE, log_error::kind::DATABASE)
        }
        InfraErrorKind::Http(_) => (log_error::category::EXTERNAL_SERVICE, log_error::kind::HTTP),
        InfraErrorKind::Unexpected(_) => {
            (log_error::category::INFRASTRUCTURE, log_error::kind::INTERNAL)
        }
    }
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        let body = match &self {
            NotifyError::MalformedBody(rejection) => ErrorResponse::new(
                "malformed-request",
                "Malformed Request",
                rejection.status().as_u16(),
                rejection.body_text(),
            ),
            NotifyError::InvalidArgument(e) => {
                ErrorResponse::validation_error(format!("{} は整数で指定してください", e.field()))
            }
            NotifyError::Infra(e) => match e.as_not_found() {
                Some((entity, id)) => ErrorResponse::new(
                    "contractor-not-found",
                    "Contractor Not Found",
                    404,
                    format!("{entity}(id={id}) が見つかりません"),
                ),
                None => {
                    let (category, kind) = infra_error_context(e);
                    tracing::error!(
                        error.category = category,
                        error.kind = kind,
                        span_trace = %e.span_trace(),
                        "インフラエラー: {}",
                        e
                    );
                    ErrorResponse::internal_error()
                }
            },
            NotifyError::Notification(e) => {
                let kind = match e {
                    NotificationError::TemplateFailed(_) => log_error::kind::TEMPLATE,
                    NotificationError::SendFailed(_) => log_error::kind::MESSAGE_GATEWAY,
                };
                tracing::error!(
                    error.category = log_error::category::EXTERNAL_SERVICE,
                    error.kind = kind,
                    "通知処理エラー: {}",
                    e
                );
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn 入力検証エラーは400で項目名を含む() {
        let response =
            NotifyError::from(DomainError::InvalidArgument("notificationType")).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(
            json["type"],
            "https://henpin.example.com/errors/validation-error"
        );
        assert_eq!(json["detail"], "notificationType は整数で指定してください");
    }

    #[tokio::test]
    async fn 顧客が見つからない場合は404() {
        let response =
            NotifyError::from(InfraError::not_found("Contractor", "7")).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["detail"], "Contractor(id=7) が見つかりません");
    }

    #[tokio::test]
    async fn 送信失敗は内部情報を含まない500() {
        let response = NotifyError::from(NotificationError::SendFailed(
            "SMTP 送信失敗: connection refused".to_string(),
        ))
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["detail"], "内部エラーが発生しました");
    }

    #[rstest]
    #[case::データベース(
        InfraError::from(sqlx::Error::PoolTimedOut),
        log_error::category::INFRASTRUCTURE,
        log_error::kind::DATABASE
    )]
    #[case::予期しないエラー(
        InfraError::unexpected("pool closed"),
        log_error::category::INFRASTRUCTURE,
        log_error::kind::INTERNAL
    )]
    fn インフラエラーは種別ごとにログの分類が決まる(
        #[case] error: InfraError,
        #[case] category: &str,
        #[case] kind: &str,
    ) {
        assert_eq!(infra_error_context(&error), (category, kind));
    }

    #[tokio::test]
    async fn 予期しないインフラエラーは500() {
        let response = NotifyError::from(InfraError::unexpected("pool closed")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
