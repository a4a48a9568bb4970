//! # 返品ステータス変更通知
//!
//! 返品のステータスが変わったときに、通知権限を持つ従業員へメールを、
//! 顧客へメールと SMS を送る。
//!
//! ## 設計方針
//!
//! - **逐次実行**: 協調オブジェクトの呼び出しは 1 つずつ await する
//! - **部分結果の合成**: 各ステップは自分の結果だけを返し、[`ReturnStatusNotifier::notify`] が
//!   [`NotificationResult`] にまとめる
//! - **チャネルごとの隔離はしない**: ディレクトリ・レンダラー・ゲートウェイのエラーは
//!   そのまま呼び出し元へ伝播する。SMS だけは結果に畳み込む
//! - **送信元の非対称性**: 従業員宛ては送信元が空でも送る。顧客宛てメールは送信元が空なら送らない

use std::sync::Arc;

use henpin_domain::{
    contractor::Contractor,
    notification::{EmailMessage, MessageRouting, NotificationEvent},
    reseller::ResellerId,
    return_status::{NotificationRequest, NotificationResult, SmsResult, TemplateData},
};
use henpin_infra::{
    message_gateway::MessageGateway,
    repository::{ContractorDirectory, PermissionDirectory},
    sender_email::SenderEmailResolver,
    sms::{SmsNotifier, SmsRequest},
};
use henpin_shared::{event_log::event, log_business_event};

use super::{TemplateRenderer, template_key};
use crate::error::NotifyError;

const EVENT: NotificationEvent = NotificationEvent::ChangeReturnStatus;

/// 顧客への通知結果
#[derive(Debug, Default)]
struct ClientNotification {
    by_email: bool,
    by_sms:   SmsResult,
}

/// 返品ステータス変更通知ユースケース
pub struct ReturnStatusNotifier {
    sender_email: Arc<dyn SenderEmailResolver>,
    permissions:  Arc<dyn PermissionDirectory>,
    contractors:  Arc<dyn ContractorDirectory>,
    gateway:      Arc<dyn MessageGateway>,
    sms:          Arc<dyn SmsNotifier>,
    renderer:     Arc<dyn TemplateRenderer>,
}

impl ReturnStatusNotifier {
    pub fn new(
        sender_email: Arc<dyn SenderEmailResolver>,
        permissions: Arc<dyn PermissionDirectory>,
        contractors: Arc<dyn ContractorDirectory>,
        gateway: Arc<dyn MessageGateway>,
        sms: Arc<dyn SmsNotifier>,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Self {
        Self {
            sender_email,
            permissions,
            contractors,
            gateway,
            sms,
            renderer,
        }
    }

    /// 返品ステータス変更を通知する
    ///
    /// 入力検証は [`NotificationRequest::from_payload`] で済んでいる前提。
    /// 未対応の通知種別では何も送らず、既定の結果を返す。
    #[tracing::instrument(
        skip_all,
        fields(
            reseller_id = %request.reseller_id(),
            notification_type = request.notification_type_code(),
        )
    )]
    pub async fn notify(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotificationResult, NotifyError> {
        let reseller_id = request.reseller_id();
        let email_from = self.sender_email.resolve_sender_email().await;
        let template_data = request.template_data();

        let Some(notification_type) = request.notification_type() else {
            tracing::warn!(
                notification_type = request.notification_type_code(),
                "未対応の通知種別のため通知をスキップ"
            );
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::SKIPPED,
                event.reseller_id = %reseller_id,
                event.entity_type = event::entity_type::RETURN,
                event.result = event::result::SUCCESS,
                "返品ステータス通知をスキップ"
            );
            return Ok(NotificationResult::default());
        };
        tracing::debug!(%notification_type, "返品ステータス通知を開始");

        if request.differences().contains_key("to") && !request.differences_to_is_integer() {
            tracing::warn!(
                raw = %request.differences()["to"],
                coerced = request.differences_to(),
                "differences.to が整数でないため変換しました"
            );
        }

        let employee_by_email = self
            .notify_employees(reseller_id, &email_from, &template_data)
            .await?;
        let client = self
            .notify_client(request, &email_from, &template_data)
            .await?;

        Ok(NotificationResult {
            notification_employee_by_email: employee_by_email,
            notification_client_by_email:   client.by_email,
            notification_client_by_sms:     client.by_sms,
        })
    }

    /// 通知権限を持つ従業員 1 人ずつにメールを送る
    ///
    /// 1 通でも送信を試みたら `true`。
    async fn notify_employees(
        &self,
        reseller_id: ResellerId,
        email_from: &str,
        template_data: &TemplateData,
    ) -> Result<bool, NotifyError> {
        let emails = self
            .permissions
            .find_emails_by_permit(reseller_id, EVENT)
            .await?;
        let routing = MessageRouting::for_employee(reseller_id, EVENT);

        for email_to in &emails {
            let message = self.render_email(
                template_key::EMPLOYEE_EMAIL_SUBJECT,
                template_key::EMPLOYEE_EMAIL_BODY,
                template_data,
                reseller_id,
                email_from,
                email_to,
            )?;
            self.gateway.send(&[message], &routing).await?;

            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::EMPLOYEE_EMAIL_SENT,
                event.reseller_id = %reseller_id,
                event.entity_type = event::entity_type::RETURN,
                event.result = event::result::SUCCESS,
                notification.recipient = %email_to,
                "従業員への返品ステータス通知メールを送信"
            );
        }

        Ok(!emails.is_empty())
    }

    /// 顧客にメールと SMS を送る
    async fn notify_client(
        &self,
        request: &NotificationRequest,
        email_from: &str,
        template_data: &TemplateData,
    ) -> Result<ClientNotification, NotifyError> {
        let reseller_id = request.reseller_id();
        let differences_to = request.differences_to();
        let client = self.contractors.get_by_id(reseller_id).await?;

        let by_email = self
            .notify_client_by_email(&client, reseller_id, email_from, differences_to, template_data)
            .await?;
        let by_sms = self
            .notify_client_by_sms(&client, reseller_id, differences_to, template_data)
            .await;

        Ok(ClientNotification { by_email, by_sms })
    }

    async fn notify_client_by_email(
        &self,
        client: &Contractor,
        reseller_id: ResellerId,
        email_from: &str,
        differences_to: i64,
        template_data: &TemplateData,
    ) -> Result<bool, NotifyError> {
        if email_from.is_empty() {
            tracing::debug!("送信元メールアドレスが未設定のため顧客へのメールを送らない");
            return Ok(false);
        }
        let Some(email_to) = client.contact_email() else {
            return Ok(false);
        };

        let message = self.render_email(
            template_key::CLIENT_EMAIL_SUBJECT,
            template_key::CLIENT_EMAIL_BODY,
            template_data,
            reseller_id,
            email_from,
            email_to,
        )?;
        let routing = MessageRouting::for_client(reseller_id, EVENT, client.id, differences_to);
        self.gateway.send(&[message], &routing).await?;

        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::CLIENT_EMAIL_SENT,
            event.reseller_id = %reseller_id,
            event.entity_type = event::entity_type::RETURN,
            event.result = event::result::SUCCESS,
            notification.client_id = %client.id,
            "顧客への返品ステータス通知メールを送信"
        );
        Ok(true)
    }

    /// 携帯電話番号があれば SMS を送る
    ///
    /// 送信結果はそのまま写す。エラーメッセージは空でない場合のみ写す。
    async fn notify_client_by_sms(
        &self,
        client: &Contractor,
        reseller_id: ResellerId,
        differences_to: i64,
        template_data: &TemplateData,
    ) -> SmsResult {
        let mut result = SmsResult::default();
        let Some(mobile) = client.contact_mobile() else {
            return result;
        };

        let outcome = self
            .sms
            .send(&SmsRequest {
                reseller_id,
                client_id: client.id,
                event: EVENT,
                differences_to,
                template_data,
                to: mobile,
            })
            .await;

        result.is_sent = outcome.sent;
        if let Some(message) = outcome.error.filter(|m| !m.is_empty()) {
            result.message = message;
        }

        if result.is_sent {
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::CLIENT_SMS_SENT,
                event.reseller_id = %reseller_id,
                event.entity_type = event::entity_type::RETURN,
                event.result = event::result::SUCCESS,
                notification.client_id = %client.id,
                "顧客への返品ステータス通知 SMS を送信"
            );
        } else {
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::CLIENT_SMS_FAILED,
                event.reseller_id = %reseller_id,
                event.entity_type = event::entity_type::RETURN,
                event.result = event::result::FAILURE,
                notification.client_id = %client.id,
                error = %result.message,
                "顧客への返品ステータス通知 SMS を送信できなかった"
            );
        }

        result
    }

    fn render_email(
        &self,
        subject_key: &str,
        body_key: &str,
        template_data: &TemplateData,
        reseller_id: ResellerId,
        email_from: &str,
        email_to: &str,
    ) -> Result<EmailMessage, NotifyError> {
        let subject = self
            .renderer
            .render(subject_key, template_data, reseller_id)?;
        let message = self.renderer.render(body_key, template_data, reseller_id)?;

        Ok(EmailMessage {
            email_from: email_from.to_string(),
            email_to: email_to.to_string(),
            subject,
            message,
        })
    }
}
