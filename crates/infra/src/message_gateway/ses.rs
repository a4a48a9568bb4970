//! SES メッセージゲートウェイ実装
//!
//! AWS SES v2 API を使用してメールを送信する。本番環境で使用する。
//! ルーティング情報は SES のメッセージタグとして付与する。

use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    types::{Body, Content, Destination, EmailContent, Message, MessageTag},
};
use henpin_domain::notification::{EmailMessage, MessageRouting, NotificationError};

use super::{MessageGateway, sender_or_default};

/// SES メッセージゲートウェイ
///
/// `aws_sdk_sesv2::Client` をラップする。
pub struct SesMessageGateway {
    client:       Client,
    default_from: String,
}

impl SesMessageGateway {
    /// - `client`: AWS SES v2 クライアント
    /// - `default_from`: 既定の送信元メールアドレス（SES で検証済みであること）
    pub fn new(client: Client, default_from: String) -> Self {
        Self {
            client,
            default_from,
        }
    }
}

/// ルーティング情報を SES メッセージタグに変換する
fn routing_tags(routing: &MessageRouting) -> Vec<(&'static str, String)> {
    let mut tags = vec![
        ("reseller_id", routing.reseller_id.to_string()),
        ("event", routing.event.to_string()),
    ];
    if let Some(client_id) = routing.client_id {
        tags.push(("client_id", client_id.to_string()));
    }
    if let Some(differences_to) = routing.differences_to {
        tags.push(("differences_to", differences_to.to_string()));
    }
    tags
}

fn content(data: &str, what: &str) -> Result<Content, NotificationError> {
    Content::builder()
        .data(data)
        .build()
        .map_err(|e| NotificationError::SendFailed(format!("{what}構築失敗: {e}")))
}

#[async_trait]
impl MessageGateway for SesMessageGateway {
    async fn send(
        &self,
        messages: &[EmailMessage],
        routing: &MessageRouting,
    ) -> Result<(), NotificationError> {
        let mut tags = Vec::new();
        for (name, value) in routing_tags(routing) {
            tags.push(
                MessageTag::builder()
                    .name(name)
                    .value(value)
                    .build()
                    .map_err(|e| NotificationError::SendFailed(format!("タグ構築失敗: {e}")))?,
            );
        }

        for email in messages {
            let destination = Destination::builder().to_addresses(&email.email_to).build();
            let email_content = EmailContent::builder()
                .simple(
                    Message::builder()
                        .subject(content(&email.subject, "件名")?)
                        .body(
                            Body::builder()
                                .text(content(&email.message, "本文")?)
                                .build(),
                        )
                        .build(),
                )
                .build();

            self.client
                .send_email()
                .from_email_address(sender_or_default(&email.email_from, &self.default_from))
                .destination(destination)
                .content(email_content)
                .set_email_tags(Some(tags.clone()))
                .send()
                .await
                .map_err(|e| NotificationError::SendFailed(format!("SES 送信失敗: {e}")))?;
        }

        Ok(())
    }
}
