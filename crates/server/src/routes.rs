//! HTTP routes: the form page, health probe, and the conversion
//! endpoint.
//!
//! Error surfacing follows a strict split: missing credentials, empty
//! input, extraction failures, and render failures are user-visible;
//! LLM failures never are (the outline pipeline absorbs them and the
//! conversion still produces a file).

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use deckgen_core::DeckStyle;
use deckgen_llm::{request_outline, OutlineParams, OutlineProvider};
use deckgen_pptx::DeckWriter;
use std::sync::Arc;

/// Maximum accepted upload size.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

const DEFAULT_TITLE: &str = "Generated Presentation";
const DOWNLOAD_NAME: &str = "generated_presentation.pptx";
const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Shared request-handling state.
pub struct AppState {
    /// `None` when no API credential was configured at startup; every
    /// conversion then fails with a configuration error before any
    /// network call.
    pub provider: Option<Arc<dyn OutlineProvider>>,
    pub params: OutlineParams,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/convert", post(convert))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn index() -> Html<String> {
    Html(page(None))
}

/// Collected fields of one conversion request.
#[derive(Default)]
struct ConvertForm {
    input_method: Option<String>,
    text_content: String,
    file: Option<(String, Vec<u8>)>,
    title: String,
    style: String,
}

async fn convert(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    // Configuration is checked before anything else, including reading
    // the form; no LLM call is ever attempted without a credential.
    let Some(provider) = state.provider.clone() else {
        return error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "OpenAI API key not configured. Please set the OPENAI_API_KEY environment variable.",
        );
    };

    let mut form = ConvertForm::default();
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().unwrap_or_default().to_string();
                match name.as_str() {
                    "input_method" => {
                        form.input_method = field.text().await.ok();
                    }
                    "text_content" => {
                        form.text_content = field.text().await.unwrap_or_default();
                    }
                    "file" => {
                        let filename = field
                            .file_name()
                            .unwrap_or("upload")
                            .to_string();
                        match field.bytes().await {
                            Ok(data) if !data.is_empty() => {
                                form.file = Some((filename, data.to_vec()));
                            }
                            _ => {}
                        }
                    }
                    "presentation_title" => {
                        form.title = field.text().await.unwrap_or_default();
                    }
                    "presentation_style" => {
                        form.style = field.text().await.unwrap_or_default();
                    }
                    _ => {}
                }
            }
            Ok(None) => break,
            Err(e) => {
                log::debug!("rejecting malformed multipart request: {}", e);
                return error_page(StatusCode::BAD_REQUEST, "Invalid form submission");
            }
        }
    }

    let input_method = form.input_method.as_deref().unwrap_or("text");

    let text_content = if input_method == "text" {
        if form.text_content.trim().is_empty() {
            return error_page(StatusCode::BAD_REQUEST, "Please enter some text content");
        }
        form.text_content
    } else {
        let Some((filename, data)) = form.file else {
            return error_page(StatusCode::BAD_REQUEST, "No file selected");
        };
        match deckgen_extract::extract_text(&data, &filename) {
            Ok(text) => text,
            Err(e) => {
                log::info!("extraction failed for {}: {}", filename, e);
                return error_page(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    &format!("Error processing file: {}", e),
                );
            }
        }
    };

    let title = if form.title.trim().is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        form.title.trim().to_string()
    };
    let style = DeckStyle::from_name(&form.style);

    log::info!(
        "converting {} chars of input (title: {:?}, style: {})",
        text_content.len(),
        title,
        style.name()
    );

    // LLM and parse failures are absorbed here; the outline is always
    // valid and non-empty.
    let slides = request_outline(
        provider.as_ref(),
        &text_content,
        &title,
        style,
        &state.params,
    )
    .await;

    match DeckWriter::new(style).to_bytes(&title, &slides) {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, PPTX_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", DOWNLOAD_NAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            log::error!("deck rendering failed: {}", e);
            error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error generating presentation",
            )
        }
    }
}

fn error_page(status: StatusCode, message: &str) -> Response {
    (status, Html(page(Some(message)))).into_response()
}

/// Render the single-page form, optionally with an error banner.
fn page(error: Option<&str>) -> String {
    let banner = match error {
        Some(message) => format!(
            r#"<p class="error">{}</p>"#,
            html_escape(message)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Text to Presentation</title>
  <style>
    body {{ font-family: sans-serif; max-width: 40em; margin: 2em auto; }}
    .error {{ color: #c00000; }}
    textarea {{ width: 100%; height: 12em; }}
  </style>
</head>
<body>
  <h1>Text to Presentation</h1>
  {banner}
  <form action="/convert" method="post" enctype="multipart/form-data">
    <p>
      <label><input type="radio" name="input_method" value="text" checked> Enter text</label>
      <label><input type="radio" name="input_method" value="file"> Upload file</label>
    </p>
    <p><textarea name="text_content" placeholder="Paste your text here"></textarea></p>
    <p><input type="file" name="file" accept=".txt,.md,.docx,.pptx"></p>
    <p><label>Title <input type="text" name="presentation_title" value="{default_title}"></label></p>
    <p><label>Style
      <select name="presentation_style">
        <option value="professional">Professional</option>
        <option value="creative">Creative</option>
        <option value="minimal">Minimal</option>
      </select>
    </label></p>
    <p><button type="submit">Generate presentation</button></p>
  </form>
</body>
</html>
"#,
        banner = banner,
        default_title = DEFAULT_TITLE,
    )
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use deckgen_llm::{CompletionRequest, LlmError};
    use tower::ServiceExt;

    struct FixedProvider(&'static str);

    #[async_trait]
    impl OutlineProvider for FixedProvider {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl OutlineProvider for FailingProvider {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
            Err(LlmError::Auth("denied".to_string()))
        }
    }

    fn app_with(provider: Option<Arc<dyn OutlineProvider>>) -> Router {
        router(Arc::new(AppState {
            provider,
            params: OutlineParams::default(),
        }))
    }

    const BOUNDARY: &str = "test-boundary";

    fn multipart_request(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Request<Body> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((filename, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/convert")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(Some(Arc::new(FixedProvider("x"))));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ok");
    }

    #[tokio::test]
    async fn test_index_serves_form() {
        let app = app_with(Some(Arc::new(FixedProvider("x"))));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("<form"));
        assert!(!body.contains("class=\"error\""));
    }

    #[tokio::test]
    async fn test_missing_credential_is_a_config_error() {
        let app = app_with(None);
        let request = multipart_request(&[("text_content", "some text")], None);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(response).await.contains("OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn test_empty_text_is_an_input_error() {
        let app = app_with(Some(Arc::new(FixedProvider("x"))));
        let request = multipart_request(&[("text_content", "   ")], None);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response)
            .await
            .contains("Please enter some text content"));
    }

    #[tokio::test]
    async fn test_file_method_without_file_is_an_input_error() {
        let app = app_with(Some(Arc::new(FixedProvider("x"))));
        let request = multipart_request(&[("input_method", "file")], None);
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_string(response).await.contains("No file selected"));
    }

    #[tokio::test]
    async fn test_unsupported_upload_is_an_extraction_error() {
        let app = app_with(Some(Arc::new(FixedProvider("x"))));
        let request = multipart_request(
            &[("input_method", "file")],
            Some(("image.png", &[0x89u8, 0x50, 0x4E, 0x47])),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_string(response).await.contains("Error processing file"));
    }

    #[tokio::test]
    async fn test_successful_conversion_returns_pptx_attachment() {
        let app = app_with(Some(Arc::new(FixedProvider(
            r#"[{"title": "One", "points": ["a"]}]"#,
        ))));
        let request = multipart_request(
            &[
                ("text_content", "discuss the roadmap"),
                ("presentation_title", "Roadmap"),
                ("presentation_style", "minimal"),
            ],
            None,
        );
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            PPTX_CONTENT_TYPE
        );
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains(DOWNLOAD_NAME));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        // PPTX output is a ZIP package.
        assert_eq!(&bytes[..4], &[0x50, 0x4B, 0x03, 0x04]);
    }

    #[tokio::test]
    async fn test_text_file_upload_converts() {
        let app = app_with(Some(Arc::new(FixedProvider("# H\n- p"))));
        let request = multipart_request(
            &[("input_method", "file")],
            Some(("notes.txt", b"the quarterly numbers look good")),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_llm_failure_still_produces_a_file() {
        let app = app_with(Some(Arc::new(FailingProvider)));
        let request = multipart_request(&[("text_content", "some text")], None);
        let response = app.oneshot(request).await.unwrap();

        // Upstream errors are masked: the caller still gets a deck.
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            PPTX_CONTENT_TYPE
        );
    }

    #[tokio::test]
    async fn test_error_message_is_html_escaped() {
        let app = app_with(Some(Arc::new(FixedProvider("x"))));
        let request = multipart_request(
            &[("input_method", "file")],
            Some(("<bad>.bin", b"\x00\x01\x02")),
        );
        let response = app.oneshot(request).await.unwrap();
        let body = body_string(response).await;
        assert!(body.contains("&lt;bad&gt;"));
        assert!(!body.contains("<bad>"));
    }
}
