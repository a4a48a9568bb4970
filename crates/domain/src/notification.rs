//! # 通知
//!
//! メール・SMS 通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`NotificationEvent`] | 通知イベント種別 | 権限検索と送信ルーティングのスコープ |
//! | [`EmailMessage`] | メールメッセージ | メッセージゲートウェイへの送信単位 |
//! | [`MessageRouting`] | ルーティング情報 | 送信に付随するメタデータ |
//!
//! ## 設計方針
//!
//! - **テンプレート分離**: 件名・本文の生成は `TemplateRenderer`（notify-service）が担う
//! - **送信は fire-and-forget**: ゲートウェイの成功応答以上の配送確認は行わない

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

use crate::{contractor::ContractorId, reseller::ResellerId};

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// 通知イベント種別
///
/// 従業員の通知権限テーブル（`employee_notification_permits.event_type`）に
/// 格納される値。camelCase でシリアライズされる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum NotificationEvent {
    /// 返品ステータス変更
    ChangeReturnStatus,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。`MessageGateway` に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信元メールアドレス（空文字の場合はゲートウェイの既定アドレスを使う）
    pub email_from: String,
    /// 送信先メールアドレス
    pub email_to:   String,
    /// 件名
    pub subject:    String,
    /// プレーンテキスト本文
    pub message:    String,
}

/// 送信ルーティング情報
///
/// 従業員宛ては販売店 ID とイベントのみ、顧客宛ては顧客 ID と
/// 変更後ステータスも付与する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRouting {
    pub reseller_id:    ResellerId,
    pub event:          NotificationEvent,
    pub client_id:      Option<ContractorId>,
    pub differences_to: Option<i64>,
}

impl MessageRouting {
    /// 従業員宛てのルーティング情報
    pub fn for_employee(reseller_id: ResellerId, event: NotificationEvent) -> Self {
        Self {
            reseller_id,
            event,
            client_id: None,
            differences_to: None,
        }
    }

    /// 顧客宛てのルーティング情報
    pub fn for_client(
        reseller_id: ResellerId,
        event: NotificationEvent,
        client_id: ContractorId,
        differences_to: i64,
    ) -> Self {
        Self {
            reseller_id,
            event,
            client_id: Some(client_id),
            differences_to: Some(differences_to),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn notification_eventの文字列変換が正しい() {
        assert_eq!(
            NotificationEvent::ChangeReturnStatus.to_string(),
            "changeReturnStatus"
        );
        let as_str: &str = NotificationEvent::ChangeReturnStatus.into();
        assert_eq!(as_str, "changeReturnStatus");
        assert_eq!(
            NotificationEvent::from_str("changeReturnStatus").unwrap(),
            NotificationEvent::ChangeReturnStatus
        );
        assert_eq!(
            serde_json::to_value(NotificationEvent::ChangeReturnStatus).unwrap(),
            serde_json::json!("changeReturnStatus")
        );
    }

    #[test]
    fn 従業員宛てのルーティングには顧客情報が含まれない() {
        let routing =
            MessageRouting::for_employee(ResellerId::new(1), NotificationEvent::ChangeReturnStatus);

        assert_eq!(routing.client_id, None);
        assert_eq!(routing.differences_to, None);
    }

    #[test]
    fn 顧客宛てのルーティングには顧客idと変更後ステータスが含まれる() {
        let routing = MessageRouting::for_client(
            ResellerId::new(1),
            NotificationEvent::ChangeReturnStatus,
            ContractorId::new(5),
            2,
        );

        assert_eq!(routing.client_id, Some(ContractorId::new(5)));
        assert_eq!(routing.differences_to, Some(2));
    }
}
