//! # ディレクトリ（参照系リポジトリ）
//!
//! 通知先の解決に使う参照専用のリポジトリを提供する。
//! テーブルは他システムが所有しており、このサービスは読み取りのみ行う。
//!
//! - [`PermissionDirectory`]: 通知権限を持つ従業員のメールアドレス
//! - [`ContractorDirectory`]: 顧客プロファイル

pub mod contractor_directory;
pub mod permission_directory;

pub use contractor_directory::{ContractorDirectory, PostgresContractorDirectory};
pub use permission_directory::{PermissionDirectory, PostgresPermissionDirectory};
