use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::{to_bytes, Body},
    extract::{Query, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use super::config::InputSanitizationConfig;
use crate::api::errors::ApiError;
use crate::domain::errors::DomainError;
use crate::domain::filtering::{InjectionDetector, InjectionViolation, RawParameters};

/// Reasons the guard refuses a request before routing
#[derive(Debug)]
pub enum InputSanitizationError {
    Injection(InjectionViolation),
    MalformedQuery,
    BodyTooLarge,
}

impl IntoResponse for InputSanitizationError {
    fn into_response(self) -> Response {
        match self {
            InputSanitizationError::Injection(violation) => {
                tracing::warn!(
                    path = %violation.path,
                    kind = %violation.kind,
                    "Rejected request with injection pattern"
                );
                ApiError::bad_request(DomainError::InjectionDetected.to_string()).into_response()
            }
            InputSanitizationError::MalformedQuery => {
                ApiError::bad_request("Malformed query string").into_response()
            }
            InputSanitizationError::BodyTooLarge => {
                ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
                    .into_response()
            }
        }
    }
}

/// Layer that inspects every request's query string and JSON body for
/// injection patterns and answers 400 before the request is routed.
#[derive(Clone)]
pub struct InputSanitizationLayer {
    config: Arc<InputSanitizationConfig>,
}

impl InputSanitizationLayer {
    pub fn new(config: InputSanitizationConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for InputSanitizationLayer
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Service = InputSanitizationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InputSanitizationService {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

#[derive(Clone)]
pub struct InputSanitizationService<S> {
    inner: S,
    config: Arc<InputSanitizationConfig>,
}

impl<S> Service<Request> for InputSanitizationService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        // The clone may not be ready; keep the one that was polled
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            match inspect(request, &config).await {
                Ok(request) => inner.call(request).await,
                Err(rejection) => Ok(rejection.into_response()),
            }
        })
    }
}

/// Run the detector over the query string and, for JSON requests, the body.
/// Returns the request with its body restored.
pub async fn inspect(
    request: Request,
    config: &InputSanitizationConfig,
) -> Result<Request, InputSanitizationError> {
    let detector = InjectionDetector::new(config.max_depth);

    if request.uri().query().is_some() {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(request.uri())
            .map_err(|_| InputSanitizationError::MalformedQuery)?;
        detector
            .inspect_parameters(&RawParameters::from_pairs(pairs))
            .map_err(InputSanitizationError::Injection)?;
    }

    if !config.inspect_bodies || !is_json(&request) {
        return Ok(request);
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, config.max_body_bytes)
        .await
        .map_err(|_| InputSanitizationError::BodyTooLarge)?;

    // Unparseable bodies are left for the handler's extractor to reject
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&bytes) {
        detector
            .inspect_body(&value)
            .map_err(InputSanitizationError::Injection)?;
    }

    Ok(Request::from_parts(parts, Body::from(bytes)))
}

fn is_json(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let mime = value.split(';').next().unwrap_or("").trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}
