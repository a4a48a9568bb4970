//! # 返品ステータス通知
//!
//! 返品ステータス変更通知のリクエスト・テンプレートデータ・結果を定義する。
//!
//! ## リクエストの入力契約
//!
//! 呼び出し元から届くペイロードは型付けされていない JSON であるため、
//! [`NotificationRequest::from_payload`] で以下を検証する:
//!
//! | フィールド | 契約 | 違反時 |
//! |-----------|------|--------|
//! | `resellerId` | JSON の整数 | `InvalidArgument("resellerId")` |
//! | `notificationType` | JSON の整数 | `InvalidArgument("notificationType")` |
//! | `differences` | 任意。オブジェクト以外は空マップとして扱う | なし |
//!
//! 文字列の `"1"` や浮動小数点数の `1.0` は整数とみなさない。
//!
//! ## `differences.to` の変換
//!
//! `differences.to` は検証せず、[`coerce_to_int`] で整数に変換する（情報が落ちうる）。
//! 変換規則は関数のドキュメントを参照。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{DomainError, reseller::ResellerId};

/// 通知種別
///
/// 現状、両者の通知内容に違いはない。それ以外のコードはエラーにせず、
/// 何も送信しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationType {
    /// 新規
    New,
    /// 変更
    Change,
}

impl NotificationType {
    /// 通知種別コードから変換する（未対応のコードは `None`）
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::New),
            2 => Some(Self::Change),
            _ => None,
        }
    }
}

/// 返品ステータス通知リクエスト
///
/// 1 回の呼び出しごとに構築され、永続化されない。
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    reseller_id:       ResellerId,
    notification_type: i64,
    differences:       Map<String, Value>,
}

impl NotificationRequest {
    /// 検証済みの値からリクエストを作成する
    pub fn new(
        reseller_id: ResellerId,
        notification_type: i64,
        differences: Map<String, Value>,
    ) -> Self {
        Self {
            reseller_id,
            notification_type,
            differences,
        }
    }

    /// 型付けされていないペイロードを検証してリクエストを作成する
    ///
    /// `resellerId` → `notificationType` の順に検証する。
    /// ペイロードがオブジェクトでない場合は `resellerId` が欠落しているものとして扱う。
    pub fn from_payload(payload: &Value) -> Result<Self, DomainError> {
        let reseller_id = payload
            .get("resellerId")
            .and_then(Value::as_i64)
            .ok_or(DomainError::InvalidArgument("resellerId"))?;

        let notification_type = payload
            .get("notificationType")
            .and_then(Value::as_i64)
            .ok_or(DomainError::InvalidArgument("notificationType"))?;

        let differences = match payload.get("differences") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };

        Ok(Self::new(
            ResellerId::new(reseller_id),
            notification_type,
            differences,
        ))
    }

    pub fn reseller_id(&self) -> ResellerId {
        self.reseller_id
    }

    /// 通知種別コード（未対応の値を含む）
    pub fn notification_type_code(&self) -> i64 {
        self.notification_type
    }

    /// 対応している通知種別であれば返す
    pub fn notification_type(&self) -> Option<NotificationType> {
        NotificationType::from_code(self.notification_type)
    }

    pub fn differences(&self) -> &Map<String, Value> {
        &self.differences
    }

    /// 変更後ステータス（`differences.to`）を整数に変換して返す
    pub fn differences_to(&self) -> i64 {
        coerce_to_int(self.differences.get("to"))
    }

    /// `differences.to` が変換なしで整数として読めるか
    pub fn differences_to_is_integer(&self) -> bool {
        self.differences.get("to").is_some_and(Value::is_i64)
    }

    /// テンプレートに渡すデータを構築する
    pub fn template_data(&self) -> TemplateData {
        TemplateData {
            reseller_id:       self.reseller_id,
            notification_type: self.notification_type,
            differences:       self.differences.clone(),
        }
    }
}

/// テンプレートデータ
///
/// リクエストの読み取り専用の射影。件名・本文のレンダリングと SMS 送信に使う。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateData {
    pub reseller_id:       ResellerId,
    pub notification_type: i64,
    pub differences:       Map<String, Value>,
}

/// SMS 通知の結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsResult {
    pub is_sent: bool,
    pub message: String,
}

/// 返品ステータス通知の結果
///
/// 各チャネルの結果は互いに独立しており、送信が進むにつれて更新される。
/// 途中で失敗しても巻き戻さない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResult {
    pub notification_employee_by_email: bool,
    pub notification_client_by_email:   bool,
    pub notification_client_by_sms:     SmsResult,
}

/// JSON 値を整数に変換する（情報が落ちうる変換）
///
/// | 入力 | 結果 |
/// |------|------|
/// | 整数 | そのまま（`i64` に収まらなければ `i64::MAX`） |
/// | 浮動小数点数 | 0 方向へ切り捨て（非有限値は 0） |
/// | 真偽値 | `true` → 1、`false` → 0 |
/// | `null` / 欠落 | 0 |
/// | 文字列 | 前後の空白を除き、数値全体として読めればその値（小数は切り捨て）。読めなければ先頭の数値部分（符号・小数点・指数を含む、例: `"1.5e3xyz"` → 1500）、それもなければ 0 |
/// | 配列・オブジェクト | 空なら 0、要素があれば 1 |
pub fn coerce_to_int(value: Option<&Value>) -> i64 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(b)) => i64::from(*b),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i
            } else if n.as_u64().is_some() {
                i64::MAX
            } else {
                n.as_f64().map_or(0, truncate_float)
            }
        }
        Some(Value::String(s)) => coerce_str(s),
        Some(Value::Array(items)) => i64::from(!items.is_empty()),
        Some(Value::Object(map)) => i64::from(!map.is_empty()),
    }
}

fn truncate_float(value: f64) -> i64 {
    if value.is_finite() {
        // `as` は範囲外を飽和させる
        value.trunc() as i64
    } else {
        0
    }
}

fn coerce_str(raw: &str) -> i64 {
    let trimmed = raw.trim();

    if let Ok(value) = trimmed.parse::<i64>() {
        return value;
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        return truncate_float(value);
    }

    leading_number(trimmed)
}

/// 先頭の数値部分を読む（`[+-]digits[.digits][e[+-]digits]`）
fn leading_number(s: &str) -> i64 {
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = count_digits(&bytes[sign..]);
    let mut end = sign + int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    let mut is_float = end > sign + int_digits;
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_start = end + 1 + usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = count_digits(&bytes[exp_start..]);
        if exp_digits > 0 {
            end = exp_start + exp_digits;
            is_float = true;
        }
    }

    let prefix = &s[..end];
    if is_float {
        return prefix.parse::<f64>().map_or(0, truncate_float);
    }
    // 数字だけなので失敗するのは桁あふれのみ
    prefix.parse::<i64>().unwrap_or(if bytes[0] == b'-' {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
