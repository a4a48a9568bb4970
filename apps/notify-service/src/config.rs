//! # Notify Service 設定
//!
//! 環境変数から Notify Service の設定を読み込む。
//! 値が不正な場合は [`ConfigError`] を返し、起動時に検出する。

use std::{collections::HashMap, env, str::FromStr};

use henpin_domain::reseller::ResellerId;
use henpin_infra::sms::TwilioConfig;
use thiserror::Error;

use crate::usecase::notification::Locale;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません（.env を確認してください）")]
    Missing(&'static str),

    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// メール送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MessageBackend {
    /// Mailpit（開発）/ SMTP サーバー経由
    Smtp,
    /// Amazon SES v2 経由（本番）
    Ses,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// SMS 送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SmsBackend {
    Twilio,
    Noop,
}

/// Notify Service サーバーの設定
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// バインドアドレス
    pub host:                String,
    /// ポート番号
    pub port:                u16,
    /// データベース接続 URL
    pub database_url:        String,
    /// 販売店メールの送信元アドレス（空文字可）
    pub reseller_email_from: String,
    pub message:             MessageConfig,
    pub sms:                 SmsConfig,
    pub template:            TemplateConfig,
}

/// メール送信の設定
#[derive(Debug, Clone)]
pub struct MessageConfig {
    pub backend:      MessageBackend,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host:    String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port:    u16,
    /// メッセージに送信元がない場合の既定アドレス
    pub default_from: String,
}

/// SMS 送信の設定
#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub backend: SmsBackend,
    pub twilio:  TwilioConfig,
}

/// テンプレートのロケール設定
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    pub default_locale:   Locale,
    /// 販売店ごとのロケール上書き
    pub reseller_locales: HashMap<ResellerId, Locale>,
}

impl NotifyConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let port = lookup("NOTIFY_PORT").ok_or(ConfigError::Missing("NOTIFY_PORT"))?;
        let smtp_port = var_or("SMTP_PORT", "1025");

        Ok(Self {
            host:                var_or("NOTIFY_HOST", "0.0.0.0"),
            port:                parse_value("NOTIFY_PORT", &port)?,
            database_url:        lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            reseller_email_from: var_or("RESELLER_EMAIL_FROM", ""),
            message:             MessageConfig {
                backend:      parse_value("MESSAGE_BACKEND", &var_or("MESSAGE_BACKEND", "noop"))?,
                smtp_host:    var_or("SMTP_HOST", "localhost"),
                smtp_port:    parse_value("SMTP_PORT", &smtp_port)?,
                default_from: var_or("MESSAGE_DEFAULT_FROM", "noreply@henpin.example.com"),
            },
            sms:                 SmsConfig {
                backend: parse_value("SMS_BACKEND", &var_or("SMS_BACKEND", "noop"))?,
                twilio:  TwilioConfig {
                    base_url:    var_or("TWILIO_BASE_URL", "https://api.twilio.com"),
                    account_sid: var_or("TWILIO_ACCOUNT_SID", ""),
                    auth_token:  var_or("TWILIO_AUTH_TOKEN", ""),
                    from_number: var_or("TWILIO_FROM_NUMBER", ""),
                },
            },
            template:            TemplateConfig {
                default_locale:   parse_value(
                    "TEMPLATE_DEFAULT_LOCALE",
                    &var_or("TEMPLATE_DEFAULT_LOCALE", "ja"),
                )?,
                reseller_locales: parse_reseller_locales(&var_or("TEMPLATE_RESELLER_LOCALES", ""))?,
            },
        })
    }
}

fn parse_value<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

/// `"1=en,2=ja"` 形式の販売店別ロケールをパースする
///
/// 空の要素は無視する。
fn parse_reseller_locales(raw: &str) -> Result<HashMap<ResellerId, Locale>, ConfigError> {
    const NAME: &str = "TEMPLATE_RESELLER_LOCALES";

    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (id, locale) = entry.split_once('=').ok_or_else(|| ConfigError::Invalid {
                name:  NAME,
                value: entry.to_string(),
            })?;
            let id: i64 = parse_value(NAME, id)?;
            let locale: Locale = parse_value(NAME, locale)?;
            Ok((ResellerId::new(id), locale))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("NOTIFY_PORT", "13010"),
        ("DATABASE_URL", "postgres://localhost/henpin"),
    ];

    #[test]
    fn 必須項目のみで既定値が使われる() {
        let config = NotifyConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 13010);
        assert_eq!(config.reseller_email_from, "");
        assert_eq!(config.message.backend, MessageBackend::Noop);
        assert_eq!(config.message.smtp_port, 1025);
        assert_eq!(config.message.default_from, "noreply@henpin.example.com");
        assert_eq!(config.sms.backend, SmsBackend::Noop);
        assert_eq!(config.sms.twilio.base_url, "https://api.twilio.com");
        assert_eq!(config.template.default_locale, Locale::Ja);
        assert!(config.template.reseller_locales.is_empty());
    }

    #[test]
    fn バックエンドとロケールを切り替えられる() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("MESSAGE_BACKEND", "ses"),
            ("SMS_BACKEND", "twilio"),
            ("TEMPLATE_DEFAULT_LOCALE", "en"),
            ("TEMPLATE_RESELLER_LOCALES", "1=ja, 2=en"),
        ]);

        let config = NotifyConfig::from_lookup(lookup_from(&vars)).unwrap();

        assert_eq!(config.message.backend, MessageBackend::Ses);
        assert_eq!(config.sms.backend, SmsBackend::Twilio);
        assert_eq!(config.template.default_locale, Locale::En);
        assert_eq!(
            config.template.reseller_locales,
            HashMap::from([
                (ResellerId::new(1), Locale::Ja),
                (ResellerId::new(2), Locale::En),
            ])
        );
    }

    #[rstest]
    #[case::ポート未設定("NOTIFY_PORT", ConfigError::Missing("NOTIFY_PORT"))]
    #[case::db未設定("DATABASE_URL", ConfigError::Missing("DATABASE_URL"))]
    fn 必須項目が欠けているとエラー(#[case] removed: &str, #[case] expected: ConfigError) {
        let vars: Vec<_> = REQUIRED
            .iter()
            .copied()
            .filter(|(k, _)| *k != removed)
            .collect();

        let err = NotifyConfig::from_lookup(lookup_from(&vars)).unwrap_err();

        assert_eq!(err, expected);
    }

    #[rstest]
    #[case::ポートが数値でない("NOTIFY_PORT", "abc")]
    #[case::未知のメールバックエンド("MESSAGE_BACKEND", "sendgrid")]
    #[case::未知のsmsバックエンド("SMS_BACKEND", "sns")]
    #[case::未知のロケール("TEMPLATE_DEFAULT_LOCALE", "fr")]
    #[case::ロケール上書きの形式不正("TEMPLATE_RESELLER_LOCALES", "1:en")]
    fn 不正な値はinvalidになる(#[case] name: &str, #[case] value: &str) {
        let mut vars: Vec<_> = REQUIRED
            .iter()
            .copied()
            .filter(|(k, _)| *k != name)
            .collect();
        vars.push((name, value));

        let err = NotifyConfig::from_lookup(lookup_from(&vars)).unwrap_err();

        assert!(
            matches!(&err, ConfigError::Invalid { name: n, .. } if *n == name),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn ロケール上書きの空要素は無視される() {
        let locales = parse_reseller_locales(" , 5=en ,").unwrap();

        assert_eq!(locales, HashMap::from([(ResellerId::new(5), Locale::En)]));
    }
}
