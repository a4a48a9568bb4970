//! # ContractorDirectory
//!
//! 顧客プロファイルを `contractors` テーブルから引く。

use async_trait::async_trait;
use henpin_domain::{
    contractor::{Contractor, ContractorId},
    reseller::ResellerId,
};
use sqlx::PgPool;

use crate::error::InfraError;

/// 顧客ディレクトリトレイト
#[async_trait]
pub trait ContractorDirectory: Send + Sync {
    /// 販売店 ID を顧客 ID として顧客プロファイルを取得する
    ///
    /// 存在しない場合は `InfraErrorKind::NotFound`。
    async fn get_by_id(&self, reseller_id: ResellerId) -> Result<Contractor, InfraError>;
}

/// `contractors` テーブルの行
#[derive(Debug, Clone, sqlx::FromRow)]
struct ContractorRow {
    id:     i64,
    name:   String,
    email:  Option<String>,
    mobile: Option<String>,
}

impl From<ContractorRow> for Contractor {
    fn from(row: ContractorRow) -> Self {
        Self {
            id:     ContractorId::new(row.id),
            name:   row.name,
            email:  row.email,
            mobile: row.mobile,
        }
    }
}

/// PostgreSQL 実装の ContractorDirectory
#[derive(Debug, Clone)]
pub struct PostgresContractorDirectory {
    pool: PgPool,
}

impl PostgresContractorDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContractorDirectory for PostgresContractorDirectory {
    #[tracing::instrument(skip_all, level = "debug", fields(reseller_id = %reseller_id))]
    async fn get_by_id(&self, reseller_id: ResellerId) -> Result<Contractor, InfraError> {
        let row = sqlx::query_as::<_, ContractorRow>(
            r#"
            SELECT id, name, email, mobile
            FROM contractors
            WHERE id = $1
            "#,
        )
        .bind(reseller_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Contractor::from)
            .ok_or_else(|| InfraError::not_found("Contractor", reseller_id.to_string()))
    }
}
