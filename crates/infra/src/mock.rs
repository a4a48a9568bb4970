//! # テスト用モック
//!
//! 通知ユースケースのテストで使用するインメモリモック。
//! 呼び出し内容を `Arc<Mutex<Vec<_>>>` に記録し、テストから検証できる。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! henpin-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use henpin_domain::{
    contractor::{Contractor, ContractorId},
    notification::{EmailMessage, MessageRouting, NotificationError, NotificationEvent},
    reseller::ResellerId,
    return_status::TemplateData,
};

use crate::{
    error::InfraError,
    message_gateway::MessageGateway,
    repository::{ContractorDirectory, PermissionDirectory},
    sender_email::SenderEmailResolver,
    sms::{SmsNotifier, SmsOutcome, SmsRequest},
};

// ===== MockSenderEmailResolver =====

#[derive(Clone, Default)]
pub struct MockSenderEmailResolver {
    email: String,
    calls: Arc<Mutex<usize>>,
}

impl MockSenderEmailResolver {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl SenderEmailResolver for MockSenderEmailResolver {
    async fn resolve_sender_email(&self) -> String {
        *self.calls.lock().unwrap() += 1;
        self.email.clone()
    }
}

// ===== MockPermissionDirectory =====

#[derive(Clone, Default)]
pub struct MockPermissionDirectory {
    emails:  Vec<String>,
    failing: bool,
    calls:   Arc<Mutex<Vec<(ResellerId, NotificationEvent)>>>,
}

impl MockPermissionDirectory {
    pub fn new(emails: Vec<String>) -> Self {
        Self {
            emails,
            ..Default::default()
        }
    }

    /// 常にデータベースエラーを返すモック
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(ResellerId, NotificationEvent)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PermissionDirectory for MockPermissionDirectory {
    async fn find_emails_by_permit(
        &self,
        reseller_id: ResellerId,
        event: NotificationEvent,
    ) -> Result<Vec<String>, InfraError> {
        self.calls.lock().unwrap().push((reseller_id, event));
        if self.failing {
            return Err(InfraError::unexpected("permission directory unavailable"));
        }
        Ok(self.emails.clone())
    }
}

// ===== MockContractorDirectory =====

/// 登録された顧客を返すモック。未登録なら NotFound。
#[derive(Clone, Default)]
pub struct MockContractorDirectory {
    contractor: Option<Contractor>,
    calls:      Arc<Mutex<Vec<ResellerId>>>,
}

impl MockContractorDirectory {
    pub fn new(contractor: Contractor) -> Self {
        Self {
            contractor: Some(contractor),
            ..Default::default()
        }
    }

    /// 顧客が存在しないモック
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ResellerId> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContractorDirectory for MockContractorDirectory {
    async fn get_by_id(&self, reseller_id: ResellerId) -> Result<Contractor, InfraError> {
        self.calls.lock().unwrap().push(reseller_id);
        self.contractor
            .clone()
            .ok_or_else(|| InfraError::not_found("Contractor", reseller_id.to_string()))
    }
}

// ===== MockMessageGateway =====

/// 送信内容を記録するモック
#[derive(Clone, Default)]
pub struct MockMessageGateway {
    failing: bool,
    sent:    Arc<Mutex<Vec<(Vec<EmailMessage>, MessageRouting)>>>,
}

impl MockMessageGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に送信失敗を返すモック（呼び出しは記録する）
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<(Vec<EmailMessage>, MessageRouting)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageGateway for MockMessageGateway {
    async fn send(
        &self,
        messages: &[EmailMessage],
        routing: &MessageRouting,
    ) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .unwrap()
            .push((messages.to_vec(), routing.clone()));
        if self.failing {
            return Err(NotificationError::SendFailed("mock failure".to_string()));
        }
        Ok(())
    }
}

// ===== MockSmsNotifier =====

/// 記録用に所有権を持たせた SMS リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSms {
    pub reseller_id:    ResellerId,
    pub client_id:      ContractorId,
    pub event:          NotificationEvent,
    pub differences_to: i64,
    pub template_data:  TemplateData,
    pub to:             String,
}

/// 指定した結果を返し、リクエストを記録するモック
#[derive(Clone, Default)]
pub struct MockSmsNotifier {
    outcome:  SmsOutcome,
    requests: Arc<Mutex<Vec<RecordedSms>>>,
}

impl MockSmsNotifier {
    pub fn new(outcome: SmsOutcome) -> Self {
        Self {
            outcome,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<RecordedSms> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsNotifier for MockSmsNotifier {
    async fn send(&self, request: &SmsRequest<'_>) -> SmsOutcome {
        self.requests.lock().unwrap().push(RecordedSms {
            reseller_id:    request.reseller_id,
            client_id:      request.client_id,
            event:          request.event,
            differences_to: request.differences_to,
            template_data:  request.template_data.clone(),
            to:             request.to.to_string(),
        });
        self.outcome.clone()
    }
}
