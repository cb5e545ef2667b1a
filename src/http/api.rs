//! HTTP API for the avatar generation proxy.

use super::cors;
use crate::ai::ImageGenerationService;
use crate::models::{
    PartOfSpeechAvatarRequest, PartOfSpeechAvatarResponse, SpeechPartAvatarRequest,
    SpeechPartAvatarResponse,
};
use crate::prompts;
use crate::{Error, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::instrument;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API credential is configured; requests then answer
    /// 500 without touching the network.
    pub image: Option<Arc<dyn ImageGenerationService>>,
}

impl AppState {
    pub fn new(image: Option<Arc<dyn ImageGenerationService>>) -> Self {
        Self { image }
    }
}

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/avatars/part-of-speech",
            post(generate_part_of_speech_avatar)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/avatars/speech-part",
            post(generate_speech_part_avatar)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(axum::middleware::map_response(cors::add_cors))
        .with_state(state)
}

/// Preflight support: 200 with an empty body and no content type.
async fn preflight() -> Response {
    cors::add_preflight_headers(StatusCode::OK.into_response())
}

async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}

/// Parse a request body, treating an empty body as an empty JSON object.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T> {
    if body.is_empty() {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}

fn require_prompt(prompt: &str) -> Result<()> {
    if prompt.is_empty() {
        return Err(Error::Validation("Prompt is required".to_string()));
    }
    Ok(())
}

fn image_service(state: &AppState) -> Result<&Arc<dyn ImageGenerationService>> {
    state
        .image
        .as_ref()
        .ok_or_else(|| Error::Configuration("API key not configured".to_string()))
}

/// Generate an avatar for a grammar part of speech.
///
/// Decorates the caller's prompt with the cartoon-character template
/// before forwarding it upstream.
#[instrument(skip_all)]
async fn generate_part_of_speech_avatar(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response> {
    let request: PartOfSpeechAvatarRequest = parse_body(&body)?;
    require_prompt(&request.prompt)?;
    let image = image_service(&state)?;

    let full_prompt = prompts::render(
        prompts::PART_OF_SPEECH_AVATAR,
        &[
            ("part_of_speech", request.part_of_speech.as_str()),
            ("prompt", request.prompt.as_str()),
        ],
    );

    let image_url = image.generate_image(&full_prompt).await?;
    tracing::info!(
        "Generated avatar for part of speech '{}'",
        request.part_of_speech
    );

    Ok(Json(PartOfSpeechAvatarResponse {
        image_url,
        part_of_speech: request.part_of_speech,
    })
    .into_response())
}

/// Generate an avatar for a speech part, forwarding the caller's prompt
/// upstream verbatim.
#[instrument(skip_all)]
async fn generate_speech_part_avatar(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response> {
    let request: SpeechPartAvatarRequest = parse_body(&body)?;
    require_prompt(&request.prompt)?;
    let image = image_service(&state)?;

    let avatar_url = image.generate_image(&request.prompt).await?;
    tracing::info!(
        "Generated avatar for speech part '{}'",
        request.speech_part_id
    );

    Ok(Json(SpeechPartAvatarResponse {
        avatar_url,
        speech_part_id: request.speech_part_id,
    })
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockImageClient;
    use axum::body::Body;
    use axum::http::Request;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tower::ServiceExt;

    fn router_with(client: MockImageClient) -> Router {
        create_router(AppState::new(Some(Arc::new(client))))
    }

    fn unconfigured_router() -> Router {
        create_router(AppState::new(None))
    }

    async fn send(router: Router, method: &str, uri: &str, body: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.to_string()))
            .unwrap();
        router.oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_options_returns_200_with_empty_body() {
        for uri in ["/avatars/part-of-speech", "/avatars/speech-part"] {
            let response = send(router_with(MockImageClient::new()), "OPTIONS", uri, "").await;

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response.headers().get("Access-Control-Allow-Origin").unwrap(),
                "*"
            );
            assert_eq!(
                response
                    .headers()
                    .get("Access-Control-Allow-Methods")
                    .unwrap(),
                "POST, OPTIONS"
            );

            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert!(bytes.is_empty());
        }
    }

    #[tokio::test]
    async fn test_non_post_methods_are_rejected_with_405() {
        for method in ["GET", "PUT", "DELETE", "PATCH"] {
            let response = send(
                router_with(MockImageClient::new()),
                method,
                "/avatars/part-of-speech",
                "",
            )
            .await;

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            let body = body_json(response).await;
            assert_eq!(body["error"], "Method not allowed");
        }
    }

    #[tokio::test]
    async fn test_missing_prompt_is_rejected_with_400() {
        let client = MockImageClient::new();
        let response = send(
            router_with(client.clone()),
            "POST",
            "/avatars/part-of-speech",
            r#"{"partOfSpeech":"noun"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Prompt is required");
        assert_eq!(client.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_body_is_treated_as_missing_prompt() {
        let response = send(
            router_with(MockImageClient::new()),
            "POST",
            "/avatars/speech-part",
            "",
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Prompt is required");
    }

    #[tokio::test]
    async fn test_missing_credential_is_rejected_with_500() {
        let response = send(
            unconfigured_router(),
            "POST",
            "/avatars/part-of-speech",
            r#"{"partOfSpeech":"noun","prompt":"a cat"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "API key not configured");
    }

    #[tokio::test]
    async fn test_part_of_speech_avatar_decorates_prompt_and_echoes_identifier() {
        let client = MockImageClient::new().with_url_response("https://x/img.png".to_string());
        let response = send(
            router_with(client.clone()),
            "POST",
            "/avatars/part-of-speech",
            r#"{"partOfSpeech":"noun","prompt":"a cat"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("content-type")
                .unwrap()
                .to_str()
                .unwrap(),
            "application/json"
        );
        let body = body_json(response).await;
        assert_eq!(body["imageUrl"], "https://x/img.png");
        assert_eq!(body["partOfSpeech"], "noun");

        let prompts = client.recorded_prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("Cute cartoon character representing 'noun'"));
        assert!(prompts[0].contains("a cat"));
        assert!(prompts[0].contains("children's book illustration"));
    }

    #[tokio::test]
    async fn test_speech_part_avatar_forwards_prompt_verbatim() {
        let client = MockImageClient::new().with_url_response("https://x/avatar.png".to_string());
        let response = send(
            router_with(client.clone()),
            "POST",
            "/avatars/speech-part",
            r#"{"speechPartId":"verb","prompt":"bright lightning bolt"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["avatarUrl"], "https://x/avatar.png");
        assert_eq!(body["speechPartId"], "verb");

        assert_eq!(
            client.recorded_prompts(),
            vec!["bright lightning bolt".to_string()]
        );
    }

    #[tokio::test]
    async fn test_upstream_failure_maps_to_fixed_error_message() {
        let client = MockImageClient::new().with_upstream_error("status 503".to_string());
        let response = send(
            router_with(client),
            "POST",
            "/avatars/part-of-speech",
            r#"{"partOfSpeech":"noun","prompt":"a cat"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to generate image");
    }

    #[tokio::test]
    async fn test_invalid_json_body_maps_to_500_with_parse_message() {
        let response = send(
            router_with(MockImageClient::new()),
            "POST",
            "/avatars/part-of-speech",
            "not json",
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Serialization error:"));
    }

    #[tokio::test]
    async fn test_error_responses_carry_cors_header() {
        let response = send(
            unconfigured_router(),
            "POST",
            "/avatars/speech-part",
            r#"{"speechPartId":"verb","prompt":"x"}"#,
        )
        .await;

        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_missing_identifier_defaults_to_empty_echo() {
        let client = MockImageClient::new().with_url_response("https://x/img.png".to_string());
        let response = send(
            router_with(client),
            "POST",
            "/avatars/part-of-speech",
            r#"{"prompt":"a cat"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["partOfSpeech"], "");
    }
}
