/// 整数ベースの ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`i64` をラップ）
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `new()`: 整数から ID を作成
/// - `as_i64()`: 内部の整数値を取得
/// - `From<i64>` impl
///
/// 外部システムが採番した整数 ID をそのまま扱うため、値の範囲は検証しない。
///
/// # 使用例
///
/// ```rust
/// use henpin_domain::reseller::ResellerId;
///
/// let id = ResellerId::new(42);
/// assert_eq!(id.as_i64(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
macro_rules! define_int_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[serde(transparent)]
        #[display("{_0}")]
        $vis struct $Name(i64);

        impl $Name {
            /// 整数値から ID を作成する
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// 内部の整数値を取得する
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $Name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}
