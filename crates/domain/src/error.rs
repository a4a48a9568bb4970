//! # ドメイン層エラー定義
//!
//! リクエストの入力契約違反を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **副作用の前に検出**: 検証はすべての外部呼び出しより先に行われ、
//!   失敗時には部分的な結果を返さない
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **HTTP ステータスへのマッピング**: API 層で 400 Bad Request に変換する
//!
//! ## 使用例
//!
//! ```rust
//! use henpin_domain::DomainError;
//!
//! let error = DomainError::InvalidArgument("resellerId");
//! assert_eq!(error.to_string(), "不正な引数です: resellerId");
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 引数が整数として解釈できない
    ///
    /// 保持する値は不正だったフィールド名（`"resellerId"` など）。
    #[error("不正な引数です: {0}")]
    InvalidArgument(&'static str),
}

impl DomainError {
    /// 不正だったフィールド名を返す
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidArgument(field) => field,
        }
    }
}
