//! # 販売店
//!
//! 通知の権限・テンプレート・送信元アドレスのスコープとなる販売店（reseller）。
//! マルチテナントにおけるテナントに相当する。

define_int_id! {
    /// 販売店 ID
    ///
    /// 通知権限の検索、テンプレートのロケール選択、送信ルーティングに使用する。
    pub struct ResellerId;
}
