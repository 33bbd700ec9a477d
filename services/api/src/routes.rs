use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use unstuck::diagnosis::{diagnosis_router, DiagnosisService, PromptSink, SessionStore};

pub(crate) fn with_diagnosis_routes<S, P>(service: Arc<DiagnosisService<S, P>>) -> axum::Router
where
    S: SessionStore + 'static,
    P: PromptSink + 'static,
{
    diagnosis_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemorySessionStore, PromptBuffer};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;
    use unstuck::diagnosis::{DiagnosisPolicy, Registry};

    fn app(ready: bool) -> (axum::Router, PromptBuffer) {
        let sink = PromptBuffer::default();
        let service = Arc::new(DiagnosisService::new(
            Arc::new(Registry::standard().expect("registry")),
            Arc::new(InMemorySessionStore::default()),
            Arc::new(sink.clone()),
            DiagnosisPolicy::default(),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        state.readiness.store(ready, Ordering::Release);

        (with_diagnosis_routes(service).layer(Extension(state)), sink)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("request")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_follows_the_flag() {
        let (router, _) = app(false);
        let response = router.oneshot(get("/ready")).await.expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["status"], "initializing");

        let (router, _) = app(true);
        let response = router.oneshot(get("/ready")).await.expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_are_served_as_prometheus_text() {
        let (router, _) = app(true);
        let response = router.oneshot(get("/metrics")).await.expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn session_routes_are_mounted() {
        let (router, sink) = app(true);

        let response = router
            .clone()
            .oneshot(
                Request::post("/api/v1/sessions")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = body_json(response).await["session_id"]
            .as_str()
            .expect("session id")
            .to_string();

        let mut actions = vec![
            json!({ "action": "start" }),
            json!({ "action": "select_trouble", "trouble": "FOCUS" }),
            json!({ "action": "select_time", "time": "30" }),
        ];
        actions.extend((0..10).map(|_| json!({ "action": "answer", "choice": "A" })));
        for action in actions {
            let response = router
                .clone()
                .oneshot(
                    Request::post(format!("/api/v1/sessions/{id}/actions"))
                        .header(header::CONTENT_TYPE, "application/json")
                        .body(Body::from(action.to_string()))
                        .expect("request"),
                )
                .await
                .expect("route executes");
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = router
            .clone()
            .oneshot(
                Request::post(format!("/api/v1/sessions/{id}/copy"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["copied"], true);
        assert!(sink
            .latest()
            .expect("prompt buffered")
            .contains("- Main difficulty: Can't focus"));
    }
}
