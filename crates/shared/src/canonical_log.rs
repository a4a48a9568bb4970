//! # Canonical Log Line ミドルウェア
//!
//! 通知リクエスト 1 件につき 1 行のサマリログを出す tower Layer。
//! 呼び出し元（返品管理システム）との突き合わせには `http.request_id` を使う。
//!
//! ```text
//! SetRequestIdLayer → TraceLayer → PropagateRequestIdLayer → CanonicalLogLineLayer → handler
//! ```

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use http::{Request, Response, StatusCode};
use tower::{Layer, Service};

use crate::observability::REQUEST_ID_HEADER;

/// ヘルスチェックパスかどうかを判定する
fn is_health_check_path(path: &str) -> bool {
    path.starts_with("/health")
}

/// ステータスコードを呼び出し元から見た結果に分類する
///
/// 4xx は呼び出し元の入力の問題、5xx は通知処理側の問題。
fn outcome(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "server_error"
    } else if status.is_client_error() {
        "client_error"
    } else {
        "success"
    }
}

/// Canonical Log Line を出力する Layer
///
/// リクエスト完了時に INFO レベル（Service エラー時は ERROR）で
/// `log.type = "canonical"` マーカー付きのログを出力する。
/// ヘルスチェックパスは出力対象外。
#[derive(Clone, Debug)]
pub struct CanonicalLogLineLayer;

impl<S> Layer<S> for CanonicalLogLineLayer {
    type Service = CanonicalLogLineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CanonicalLogLineService { inner }
    }
}

/// [`CanonicalLogLineLayer`] が生成する Service
#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Display + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // poll_ready 済みの inner を使い、次回用に clone を残す
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let path = req.uri().path().to_owned();
        if is_health_check_path(&path) {
            return Box::pin(async move { inner.call(req).await });
        }

        let method = req.method().to_string();
        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_owned();
        let start = Instant::now();

        Box::pin(async move {
            let result = inner.call(req).await;
            let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(response) => {
                    tracing::info!(
                        log.r#type = "canonical",
                        http.request_id = %request_id,
                        http.method = %method,
                        http.path = %path,
                        http.status_code = response.status().as_u16(),
                        http.outcome = outcome(response.status()),
                        http.latency_ms = latency_ms,
                        "リクエスト完了"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        log.r#type = "canonical",
                        http.request_id = %request_id,
                        http.method = %method,
                        http.path = %path,
                        http.latency_ms = latency_ms,
                        error.message = %err,
                        "リクエスト処理エラー"
                    );
                }
            }

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        convert::Infallible,
        sync::{Arc, Mutex},
    };

    use tracing_subscriber::layer::SubscriberExt;

    use super::*;

    #[derive(Clone)]
    struct StatusService {
        status: http::StatusCode,
    }

    impl Service<Request<()>> for StatusService {
        type Error = Infallible;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
        type Response = Response<()>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _req: Request<()>) -> Self::Future {
            let status = self.status;
            Box::pin(async move { Ok(Response::builder().status(status).body(()).unwrap()) })
        }
    }

    #[derive(Clone)]
    struct FailingService;

    impl Service<Request<()>> for FailingService {
        type Error = String;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
        type Response = Response<()>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _req: Request<()>) -> Self::Future {
            Box::pin(async { Err("gateway unreachable".to_string()) })
        }
    }

    #[derive(Debug, Clone)]
    struct CapturedEvent {
        level:   tracing::Level,
        message: String,
        fields:  Vec<(String, String)>,
    }

    impl CapturedEvent {
        fn field(&self, name: &str) -> Option<&str> {
            self.fields
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        }
    }

    #[derive(Clone)]
    struct CaptureLayer {
        events: Arc<Mutex<Vec<CapturedEvent>>>,
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CaptureLayer {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let mut visitor = FieldVisitor::default();
            event.record(&mut visitor);

            self.events.lock().unwrap().push(CapturedEvent {
                level:   *event.metadata().level(),
                message: visitor.message.unwrap_or_default(),
                fields:  visitor.fields,
            });
        }
    }

    #[derive(Default)]
    struct FieldVisitor {
        message: Option<String>,
        fields:  Vec<(String, String)>,
    }

    impl tracing::field::Visit for FieldVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            let value = format!("{value:?}");
            if field.name() == "message" {
                self.message = Some(value);
            } else {
                self.fields.push((field.name().to_string(), value));
            }
        }

        fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }

        fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
            if field.name() == "message" {
                self.message = Some(value.to_string());
            } else {
                self.fields
                    .push((field.name().to_string(), value.to_string()));
            }
        }
    }

    fn setup_capture() -> (
        tracing::subscriber::DefaultGuard,
        Arc<Mutex<Vec<CapturedEvent>>>,
    ) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(CaptureLayer {
            events: events.clone(),
        });
        let guard = tracing::subscriber::set_default(subscriber);
        (guard, events)
    }

    fn post(path: &str) -> Request<()> {
        Request::builder()
            .method(http::Method::POST)
            .uri(path)
            .body(())
            .unwrap()
    }

    fn post_with_request_id(path: &str, request_id: &str) -> Request<()> {
        Request::builder()
            .method(http::Method::POST)
            .uri(path)
            .header(REQUEST_ID_HEADER, request_id)
            .body(())
            .unwrap()
    }

    #[test]
    fn outcomeはステータスクラスで分類する() {
        assert_eq!(outcome(StatusCode::OK), "success");
        assert_eq!(outcome(StatusCode::BAD_REQUEST), "client_error");
        assert_eq!(outcome(StatusCode::NOT_FOUND), "client_error");
        assert_eq!(outcome(StatusCode::INTERNAL_SERVER_ERROR), "server_error");
    }

    #[test]
    fn is_health_check_pathはhealth配下のみtrue() {
        assert!(is_health_check_path("/health"));
        assert!(is_health_check_path("/health/ready"));
        assert!(!is_health_check_path("/internal/returns/status-notifications"));
    }

    #[tokio::test]
    async fn 正常リクエストでメソッドとパスとステータスが出力される() {
        let (_guard, events) = setup_capture();
        let mut sut = CanonicalLogLineLayer.layer(StatusService {
            status: http::StatusCode::OK,
        });

        let response = sut
            .call(post("/internal/returns/status-notifications"))
            .await
            .unwrap();

        assert_eq!(response.status(), http::StatusCode::OK);
        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].level, tracing::Level::INFO);
        assert_eq!(captured[0].message, "リクエスト完了");
        assert_eq!(captured[0].field("log.type"), Some("canonical"));
        assert_eq!(captured[0].field("http.method"), Some("POST"));
        assert_eq!(
            captured[0].field("http.path"),
            Some("/internal/returns/status-notifications")
        );
        assert_eq!(captured[0].field("http.status_code"), Some("200"));
        assert_eq!(captured[0].field("http.outcome"), Some("success"));
        assert_eq!(captured[0].field("http.request_id"), Some("-"));
        assert!(captured[0].field("http.latency_ms").is_some());
    }

    #[tokio::test]
    async fn request_idヘッダーがあればログに含める() {
        let (_guard, events) = setup_capture();
        let mut sut = CanonicalLogLineLayer.layer(StatusService {
            status: http::StatusCode::NOT_FOUND,
        });

        sut.call(post_with_request_id(
            "/internal/returns/status-notifications",
            "req-42",
        ))
        .await
        .unwrap();

        let captured = events.lock().unwrap();
        assert_eq!(captured[0].field("http.request_id"), Some("req-42"));
        assert_eq!(captured[0].field("http.outcome"), Some("client_error"));
    }

    #[tokio::test]
    async fn ヘルスチェックではログが出力されない() {
        let (_guard, events) = setup_capture();
        let mut sut = CanonicalLogLineLayer.layer(StatusService {
            status: http::StatusCode::OK,
        });

        sut.call(post("/health")).await.unwrap();
        sut.call(post("/health/ready")).await.unwrap();

        assert!(events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn serviceエラー時にerrorレベルで出力される() {
        let (_guard, events) = setup_capture();
        let mut sut = CanonicalLogLineLayer.layer(FailingService);

        let result = sut.call(post("/internal/returns/status-notifications")).await;

        assert!(result.is_err());
        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].level, tracing::Level::ERROR);
        assert_eq!(captured[0].message, "リクエスト処理エラー");
        assert_eq!(
            captured[0].field("error.message"),
            Some("gateway unreachable")
        );
    }

}
