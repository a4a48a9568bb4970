//! # PermissionDirectory
//!
//! 通知イベントごとの従業員通知権限を `employee_notification_permits` から引く。

use async_trait::async_trait;
use henpin_domain::{notification::NotificationEvent, reseller::ResellerId};
use sqlx::PgPool;

use crate::error::InfraError;

/// 通知権限ディレクトリトレイト
#[async_trait]
pub trait PermissionDirectory: Send + Sync {
    /// 指定イベントの通知権限を持つ従業員のメールアドレスを登録順に返す
    ///
    /// 該当者がいない場合は空の Vec を返す。
    async fn find_emails_by_permit(
        &self,
        reseller_id: ResellerId,
        event: NotificationEvent,
    ) -> Result<Vec<String>, InfraError>;
}

/// PostgreSQL 実装の PermissionDirectory
#[derive(Debug, Clone)]
pub struct PostgresPermissionDirectory {
    pool: PgPool,
}

impl PostgresPermissionDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionDirectory for PostgresPermissionDirectory {
    #[tracing::instrument(skip_all, level = "debug", fields(reseller_id = %reseller_id, event = %event))]
    async fn find_emails_by_permit(
        &self,
        reseller_id: ResellerId,
        event: NotificationEvent,
    ) -> Result<Vec<String>, InfraError> {
        let event_type: &str = event.into();

        let emails = sqlx::query_scalar::<_, String>(
            r#"
            SELECT email
            FROM employee_notification_permits
            WHERE reseller_id = $1 AND event_type = $2
            ORDER BY id
            "#,
        )
        .bind(reseller_id.as_i64())
        .bind(event_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(emails)
    }
}
