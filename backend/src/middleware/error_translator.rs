//! Middleware rewriting every error response into the public JSON shape.
//!
//! Handlers, extractors, and the router may all fail. Whatever produced the
//! failure, the client receives `{code, message, traceId?, details?, stack}`
//! with the status that was already chosen (500 when nothing chose one).
//! `stack` carries a diagnostic string outside production and is `null` in
//! production.

use std::borrow::Cow;
use std::task::{Context, Poll};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_TYPE, HeaderValue};
use actix_web::Error;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::domain::{Error as DomainError, ErrorCode, TraceId};
use crate::inbound::http::error::{REDACTED_MESSAGE, code_for_status, redact_if_internal};

/// Whether error payloads expose diagnostic stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackDisclosure {
    /// Development: `stack` holds the diagnostic string.
    Visible,
    /// Production: `stack` is `null`.
    Hidden,
}

impl StackDisclosure {
    /// Pick the disclosure mode from the production flag.
    pub fn for_production(production: bool) -> Self {
        if production { Self::Hidden } else { Self::Visible }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    code: ErrorCode,
    message: Cow<'a, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
    stack: Option<String>,
}

fn render_domain(error: &DomainError, disclosure: StackDisclosure) -> ErrorBody<'_> {
    let public = redact_if_internal(error);
    ErrorBody {
        code: error.code(),
        message: Cow::Owned(public.message().to_owned()),
        trace_id: error.trace_id().map(str::to_owned),
        details: if matches!(error.code(), ErrorCode::InternalError) {
            None
        } else {
            error.details()
        },
        stack: match disclosure {
            StackDisclosure::Visible => Some(error.diagnostic_stack()),
            StackDisclosure::Hidden => None,
        },
    }
}

fn render_foreign(error: &Error, status: StatusCode, disclosure: StackDisclosure) -> ErrorBody<'_> {
    let code = code_for_status(status);
    let message = if status.is_server_error() {
        Cow::Borrowed(REDACTED_MESSAGE)
    } else {
        Cow::Owned(error.to_string())
    };
    ErrorBody {
        code,
        message,
        trace_id: TraceId::current().map(|id| id.to_string()),
        details: None,
        stack: match disclosure {
            StackDisclosure::Visible => Some(format!("{code}: {error}\n    source: {error:?}")),
            StackDisclosure::Hidden => None,
        },
    }
}

fn render(error: &Error, status: StatusCode, disclosure: StackDisclosure) -> serde_json::Result<Vec<u8>> {
    if status.is_server_error() {
        error!(status = status.as_u16(), error = ?error, "request failed");
    }
    let body = match error.as_error::<DomainError>() {
        Some(domain) => render_domain(domain, disclosure),
        None => render_foreign(error, status, disclosure),
    };
    serde_json::to_vec(&body)
}

/// Error translation middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use support_desk::middleware::{ErrorTranslator, StackDisclosure};
///
/// let app = App::new().wrap(ErrorTranslator::new(StackDisclosure::Hidden));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ErrorTranslator {
    disclosure: StackDisclosure,
}

impl ErrorTranslator {
    /// Build the middleware with the given stack disclosure mode.
    pub fn new(disclosure: StackDisclosure) -> Self {
        Self { disclosure }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorTranslator
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorTranslatorMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorTranslatorMiddleware {
            service,
            disclosure: self.disclosure,
        }))
    }
}

/// Service wrapper produced by [`ErrorTranslator`].
pub struct ErrorTranslatorMiddleware<S> {
    service: S,
    disclosure: StackDisclosure,
}

impl<S, B> Service<ServiceRequest> for ErrorTranslatorMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let disclosure = self.disclosure;
        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            let status = res.status();
            let rendered = res
                .response()
                .error()
                .map(|error| render(error, status, disclosure));
            match rendered {
                None => Ok(res.map_into_boxed_body()),
                Some(Ok(bytes)) => Ok(res.map_body(|head, _| {
                    head.headers_mut()
                        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                    BoxBody::new(bytes)
                })),
                Some(Err(err)) => {
                    error!(error = %err, "failed to serialise error body");
                    Ok(res.map_into_boxed_body())
                }
            }
        })
    }
}
