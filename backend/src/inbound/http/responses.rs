//! Response shapes shared by the form handlers.

use actix_web::HttpResponse;
use actix_web::http::header;
use serde::Serialize;

use crate::domain::{Error, ErrorCode};

use super::views::FieldError;

/// Target of every successful form submission.
pub const HOME: &str = "/";

/// `303 See Other` back to the article list.
pub fn redirect_home() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, HOME))
        .finish()
}

/// `422 Unprocessable Entity` carrying a form view with field errors.
pub fn unprocessable<T: Serialize>(view: &T) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(view)
}

/// Field-level error carried in the details of an `invalid_request` error.
///
/// The service reports store-side rejections of a single field this way, so
/// handlers can show them next to the form input instead of failing the
/// request.
pub fn field_error(error: &Error) -> Option<FieldError> {
    if error.code() != ErrorCode::InvalidRequest {
        return None;
    }
    let details = error.details()?;
    let field = details.get("field")?.as_str()?;
    let code = details.get("code")?.as_str()?;
    Some(FieldError::new(field, code, error.message()))
}
