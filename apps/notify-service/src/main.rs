//! # Notify Service サーバー
//!
//! 返品ステータス変更を従業員・顧客へ通知する内部 API サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `NOTIFY_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `NOTIFY_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `RESELLER_EMAIL_FROM` | No | 販売店メールの送信元（空なら顧客へのメールを送らない） |
//! | `MESSAGE_BACKEND` | No | `smtp` / `ses` / `noop`（デフォルト: `noop`） |
//! | `SMTP_HOST` / `SMTP_PORT` | No | SMTP リレー（デフォルト: `localhost:1025`） |
//! | `MESSAGE_DEFAULT_FROM` | No | ゲートウェイの既定送信元 |
//! | `SMS_BACKEND` | No | `twilio` / `noop`（デフォルト: `noop`） |
//! | `TWILIO_*` | No | Twilio の接続情報 |
//! | `TEMPLATE_DEFAULT_LOCALE` | No | `ja` / `en`（デフォルト: `ja`） |
//! | `TEMPLATE_RESELLER_LOCALES` | No | 販売店別ロケール（例: `1=en,2=ja`） |
//!
//! ## 起動方法
//!
//! ```bash
//! NOTIFY_PORT=13010 DATABASE_URL=postgres://... cargo run -p henpin-notify-service
//! ```

mod config;
mod error;
mod handler;
mod usecase;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use config::{MessageBackend, MessageConfig, NotifyConfig, SmsBackend, SmsConfig};
use handler::{
    ReadinessState,
    ReturnStatusState,
    health_check,
    notify_return_status,
    readiness_check,
};
use henpin_infra::{
    db,
    message_gateway::{MessageGateway, NoopMessageGateway, SesMessageGateway, SmtpMessageGateway},
    repository::{PostgresContractorDirectory, PostgresPermissionDirectory},
    sender_email::StaticSenderEmailResolver,
    sms::{NoopSmsNotifier, SmsNotifier, TwilioSmsNotifier},
};
use henpin_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{TracingConfig, make_request_span},
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use usecase::notification::{ReturnStatusNotifier, TeraTemplateRenderer};

/// Notify Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("notify-service");
    henpin_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "notify-service").entered();

    let config = NotifyConfig::from_env()?;

    tracing::info!(
        "Notify Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool).await?;
    tracing::info!("マイグレーションを適用しました");

    // Readiness Check 用 State（pool が move される前に clone）
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    let notifier = ReturnStatusNotifier::new(
        Arc::new(StaticSenderEmailResolver::new(
            config.reseller_email_from.clone(),
        )),
        Arc::new(PostgresPermissionDirectory::new(pool.clone())),
        Arc::new(PostgresContractorDirectory::new(pool)),
        build_message_gateway(&config.message).await,
        build_sms_notifier(&config.sms)?,
        Arc::new(TeraTemplateRenderer::new(
            config.template.default_locale,
            config.template.reseller_locales.clone(),
        )?),
    );
    let return_status_state = Arc::new(ReturnStatusState { notifier });

    let app = Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .route(
            "/internal/returns/status-notifications",
            post(notify_return_status),
        )
        .with_state(return_status_state)
        // 下に書いたものが外側。SetRequestIdLayer で採番した ID をスパンに載せる
        .layer(CanonicalLogLineLayer)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Notify Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// `MESSAGE_BACKEND` に応じたメッセージゲートウェイを構築する
async fn build_message_gateway(config: &MessageConfig) -> Arc<dyn MessageGateway> {
    tracing::info!(backend = %config.backend, "メッセージゲートウェイを初期化します");

    match config.backend {
        MessageBackend::Smtp => Arc::new(SmtpMessageGateway::new(
            &config.smtp_host,
            config.smtp_port,
            config.default_from.clone(),
        )),
        MessageBackend::Ses => {
            let aws_config = aws_config::load_from_env().await;
            Arc::new(SesMessageGateway::new(
                aws_sdk_sesv2::Client::new(&aws_config),
                config.default_from.clone(),
            ))
        }
        MessageBackend::Noop => Arc::new(NoopMessageGateway),
    }
}

/// `SMS_BACKEND` に応じた SMS 送信を構築する
fn build_sms_notifier(config: &SmsConfig) -> anyhow::Result<Arc<dyn SmsNotifier>> {
    tracing::info!(backend = %config.backend, "SMS 送信を初期化します");

    let notifier: Arc<dyn SmsNotifier> = match config.backend {
        SmsBackend::Twilio => Arc::new(TwilioSmsNotifier::new(config.twilio.clone())?),
        SmsBackend::Noop => Arc::new(NoopSmsNotifier),
    };
    Ok(notifier)
}
