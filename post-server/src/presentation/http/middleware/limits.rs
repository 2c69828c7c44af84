use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::infrastructure::settings::Settings;

pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    router
        .layer(RequestBodyLimitLayer::new(
            settings.http_request_body_limit_bytes,
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(settings.http_request_timeout_secs),
        ))
        .layer(ConcurrencyLimitLayer::new(settings.http_concurrency_limit))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    use super::apply_limits;
    use crate::infrastructure::settings::Settings;

    fn settings() -> Settings {
        Settings {
            database_url: "postgres://unused".to_string(),
            database_max_connections: 1,
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            http_addr: "127.0.0.1:0".to_string(),
            cors_origins: Vec::new(),
            log_level: "info".to_string(),
            http_request_body_limit_bytes: 1024,
            http_concurrency_limit: 4,
            http_request_timeout_secs: 1,
            post_owner_check: false,
        }
    }

    #[tokio::test]
    async fn slow_requests_time_out_with_408() {
        let router = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "done"
            }),
        );
        let app = apply_limits(router, &settings());

        let response = app
            .oneshot(Request::get("/slow").body(Body::empty()).expect("request"))
            .await
            .expect("router is infallible");
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
