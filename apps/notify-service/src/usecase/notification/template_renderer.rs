//! # テンプレートレンダラー
//!
//! 翻訳キーごとのテンプレートを tera で描画し、件名・本文の文字列を返す。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **ロケールは販売店単位**: 上書き設定がなければ既定ロケールを使う
//! - **コンテキストは `TemplateData`**: `resellerId` / `notificationType` / `differences` を参照できる

use std::collections::HashMap;

use henpin_domain::{
    notification::NotificationError,
    reseller::ResellerId,
    return_status::TemplateData,
};
use tera::{Context, Tera};

/// 翻訳キー
pub mod template_key {
    pub const EMPLOYEE_EMAIL_SUBJECT: &str = "complaintEmployeeEmailSubject";
    pub const EMPLOYEE_EMAIL_BODY: &str = "complaintEmployeeEmailBody";
    pub const CLIENT_EMAIL_SUBJECT: &str = "complaintClientEmailSubject";
    pub const CLIENT_EMAIL_BODY: &str = "complaintClientEmailBody";
}

/// テンプレートのロケール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    Ja,
    En,
}

/// テンプレートレンダラートレイト
pub trait TemplateRenderer: Send + Sync {
    /// 翻訳キーに対応するテンプレートを販売店のロケールで描画する
    fn render(
        &self,
        key: &str,
        data: &TemplateData,
        reseller_id: ResellerId,
    ) -> Result<String, NotificationError>;
}

/// tera 実装のテンプレートレンダラー
pub struct TeraTemplateRenderer {
    engine:           Tera,
    default_locale:   Locale,
    reseller_locales: HashMap<ResellerId, Locale>,
}

impl TeraTemplateRenderer {
    /// 埋め込みテンプレートを登録したレンダラーを作成する
    pub fn new(
        default_locale: Locale,
        reseller_locales: HashMap<ResellerId, Locale>,
    ) -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "ja/complaintEmployeeEmailSubject",
                    include_str!("../../../templates/notifications/ja/complaintEmployeeEmailSubject.txt"),
                ),
                (
                    "ja/complaintEmployeeEmailBody",
                    include_str!("../../../templates/notifications/ja/complaintEmployeeEmailBody.txt"),
                ),
                (
                    "ja/complaintClientEmailSubject",
                    include_str!("../../../templates/notifications/ja/complaintClientEmailSubject.txt"),
                ),
                (
                    "ja/complaintClientEmailBody",
                    include_str!("../../../templates/notifications/ja/complaintClientEmailBody.txt"),
                ),
                (
                    "en/complaintEmployeeEmailSubject",
                    include_str!("../../../templates/notifications/en/complaintEmployeeEmailSubject.txt"),
                ),
                (
                    "en/complaintEmployeeEmailBody",
                    include_str!("../../../templates/notifications/en/complaintEmployeeEmailBody.txt"),
                ),
                (
                    "en/complaintClientEmailSubject",
                    include_str!("../../../templates/notifications/en/complaintClientEmailSubject.txt"),
                ),
                (
                    "en/complaintClientEmailBody",
                    include_str!("../../../templates/notifications/en/complaintClientEmailBody.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self {
            engine,
            default_locale,
            reseller_locales,
        })
    }

    fn locale_for(&self, reseller_id: ResellerId) -> Locale {
        self.reseller_locales
            .get(&reseller_id)
            .copied()
            .unwrap_or(self.default_locale)
    }
}

impl TemplateRenderer for TeraTemplateRenderer {
    fn render(
        &self,
        key: &str,
        data: &TemplateData,
        reseller_id: ResellerId,
    ) -> Result<String, NotificationError> {
        let name = format!("{}/{key}", self.locale_for(reseller_id));
        let context = Context::from_serialize(data)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let rendered = self
            .engine
            .render(&name, &context)
            .map_err(|e| NotificationError::TemplateFailed(format!("{name}: {e}")))?;

        Ok(rendered.trim_end().to_string())
    }
}
