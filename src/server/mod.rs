//! HTTP surface: axum router, CORS and serve loop.
//!
//! | Route                      | Handler                        |
//! |----------------------------|--------------------------------|
//! | `POST /api/symptom-checker` | [`handlers::check_symptoms`]  |
//! | `GET /health`              | [`handlers::health`]           |

pub mod error;
pub mod handlers;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::ServerConfig;
use crate::pipeline::SymptomPipeline;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SymptomPipeline>,
}

/// CORS layer admitting exactly the configured origins, with credentials.
/// Methods and headers mirror the preflight request.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/api/symptom-checker", post(handlers::check_symptoms))
        .route("/health", get(handlers::health))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, pipeline: Arc<SymptomPipeline>) -> anyhow::Result<()> {
    let app = build_router(AppState { pipeline }, &config.allowed_origins);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    log::info!("Symptom checker listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {e}");
            }
            log::info!("Shutting down");
        })
        .await
        .context("Server error")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use futures_util::{stream, StreamExt};
    use tower::ServiceExt;

    use crate::language::{
        FallbackDetector, FallbackTranslator, LanguageDetector, LanguageError, Translator,
    };
    use crate::llm::{ChunkStream, GenerationError, RetryPolicy, RetryingGenerator, TextGenerator};
    use crate::speech::{FallbackSynthesizer, SpeechError, SpeechSynthesizer};

    struct English;

    #[async_trait]
    impl LanguageDetector for English {
        async fn detect(&self, _text: &str) -> Result<String, LanguageError> {
            Ok("en".into())
        }
    }

    #[async_trait]
    impl Translator for English {
        async fn translate(&self, text: &str, _target: &str) -> Result<String, LanguageError> {
            Ok(text.to_string())
        }
    }

    struct Answer(Option<&'static str>);

    #[async_trait]
    impl TextGenerator for Answer {
        async fn stream(&self, _prompt: &str) -> Result<ChunkStream, GenerationError> {
            match self.0 {
                Some(text) => Ok(stream::iter(vec![Ok(text.to_string())]).boxed()),
                None => Err(GenerationError::Unavailable("503".into())),
            }
        }
    }

    /// Brackets the prompt so surrounding whitespace would show in the result.
    struct Echo;

    #[async_trait]
    impl TextGenerator for Echo {
        async fn stream(&self, prompt: &str) -> Result<ChunkStream, GenerationError> {
            Ok(stream::iter(vec![Ok(format!("[{prompt}]"))]).boxed())
        }
    }

    struct Mp3;

    #[async_trait]
    impl SpeechSynthesizer for Mp3 {
        async fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>, SpeechError> {
            Ok(b"ID3".to_vec())
        }
    }

    fn app(answer: Option<&'static str>) -> Router {
        app_with(Arc::new(Answer(answer)))
    }

    fn app_with(generator: Arc<dyn TextGenerator>) -> Router {
        let pipeline = SymptomPipeline::new(
            FallbackDetector::new(Arc::new(English), "en"),
            FallbackTranslator::new(Arc::new(English)),
            RetryingGenerator::new(
                generator,
                RetryPolicy {
                    max_attempts: 2,
                    delay: Duration::ZERO,
                    retry_all_errors: false,
                },
            ),
            FallbackSynthesizer::new(Arc::new(Mp3)),
        );
        build_router(
            AppState {
                pipeline: Arc::new(pipeline),
            },
            &["http://localhost:3000".to_string()],
        )
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/symptom-checker")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(res: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn symptom_check_returns_result_shape() {
        let res = app(Some(" Possible conditions: migraine. "))
            .oneshot(post_json(r#"{"symptom_description":"I have a headache"}"#))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let json = json_body(res).await;
        assert_eq!(json["result"], "Possible conditions: migraine.");
        assert_eq!(json["language"], "en");
        assert_eq!(json["speech_data"], "data:audio/mpeg;base64,SUQz");
        assert_eq!(json["message"], "Audio generated successfully.");
        assert_eq!(json["isValidbase64"], true);
    }

    #[tokio::test]
    async fn language_code_is_echoed() {
        let res = app(Some("Grippe"))
            .oneshot(post_json(
                r#"{"symptom_description":"J'ai de la fièvre","language_code":"fr"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await["language"], "fr");
    }

    #[tokio::test]
    async fn blank_description_is_400() {
        let res = app(Some("unused"))
            .oneshot(post_json(r#"{"symptom_description":"   "}"#))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(res).await["detail"],
            "Symptom description is required"
        );
    }

    #[tokio::test]
    async fn description_is_trimmed_before_the_pipeline() {
        let res = app_with(Arc::new(Echo))
            .oneshot(post_json(
                r#"{"symptom_description":"  I have a headache \n"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await["result"], "[I have a headache]");
    }

    #[tokio::test]
    async fn missing_description_is_400() {
        let res = app(Some("unused")).oneshot(post_json("{}")).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn generation_failure_is_opaque_500() {
        let res = app(None)
            .oneshot(post_json(r#"{"symptom_description":"chest pain"}"#))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(res).await["detail"], "Internal server error");
    }

    #[tokio::test]
    async fn health_is_ok() {
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let res = app(None).oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await["status"], "ok");
    }

    #[tokio::test]
    async fn cors_preflight_allows_configured_origin() {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/symptom-checker")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let res = app(None).oneshot(req).await.unwrap();

        let headers = res.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "POST"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
            "content-type"
        );
    }

    #[tokio::test]
    async fn cors_ignores_unlisted_origin() {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/symptom-checker")
            .header(header::ORIGIN, "http://evil.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let res = app(None).oneshot(req).await.unwrap();

        assert!(res
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
