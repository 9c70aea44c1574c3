//! HTTP mapping for domain errors.
//!
//! The domain error stays transport agnostic; this module picks the status
//! code, echoes the trace id header and redacts internal messages.

use actix_web::error::{QueryPayloadError, UrlencodedError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    error!(message = error.message(), "internal error redacted from response");
    let redacted = Error::internal("Internal server error");
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_if_internal(self))
    }
}

/// Turn malformed form bodies into a JSON `invalid_request` error.
pub fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), error = %err, "rejected form body");
    Error::invalid_request(format!("malformed form body: {err}")).into()
}

/// Turn malformed query strings into a JSON `invalid_request` error.
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), error = %err, "rejected query string");
    Error::invalid_request(format!("malformed query string: {err}")).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn body_json(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        serde_json::from_slice(&bytes).expect("error body is JSON")
    }

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::method_not_allowed("nope"), StatusCode::METHOD_NOT_ALLOWED)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(ResponseError::status_code(&error), expected);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted_but_keep_the_trace_id() {
        let error = Error::internal("connection string leaked")
            .with_trace_id("00000000-0000-0000-0000-000000000000")
            .with_details(json!({ "secret": "x" }));
        let response = ResponseError::error_response(&error);
        assert_eq!(
            response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("00000000-0000-0000-0000-000000000000")
        );
        let body = body_json(response).await;
        assert_eq!(
            body,
            json!({
                "code": "internal_error",
                "message": "Internal server error",
                "traceId": "00000000-0000-0000-0000-000000000000",
            })
        );
    }

    #[actix_web::test]
    async fn client_errors_keep_message_and_details() {
        let error = Error::invalid_request("category 9 does not exist")
            .with_details(json!({ "field": "category" }));
        let body = body_json(ResponseError::error_response(&error)).await;
        assert_eq!(body["message"], json!("category 9 does not exist"));
        assert_eq!(body["details"]["field"], json!("category"));
    }
}
