//! Category creation page.
//!
//! ```text
//! GET  /category/newCat
//! POST /category/newCat
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::CategoryForm;
use crate::inbound::http::responses::{redirect_home, unprocessable};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::CategoryFormView;

/// Empty category form.
#[utoipa::path(
    get,
    path = "/category/newCat",
    responses((status = 200, description = "Category form", body = CategoryFormView)),
    tags = ["categories"],
    operation_id = "newCategoryForm"
)]
#[get("/category/newCat")]
pub async fn new_category_form() -> web::Json<CategoryFormView> {
    web::Json(CategoryFormView::default())
}

/// Create a category and go back to the list.
#[utoipa::path(
    post,
    path = "/category/newCat",
    request_body(content = CategoryForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirect to the list",
            headers(("Location" = String, description = "Always `/`"))),
        (status = 422, description = "Form with field errors", body = CategoryFormView),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/category/newCat")]
pub async fn create_category(
    state: web::Data<HttpState>,
    form: web::Form<CategoryForm>,
) -> ApiResult<HttpResponse> {
    match form.to_draft() {
        Ok(draft) => {
            state.catalogue.create_category(&draft).await?;
            Ok(redirect_home())
        }
        Err(errors) => Ok(unprocessable(&CategoryFormView {
            values: form.values(),
            errors,
            ..CategoryFormView::default()
        })),
    }
}
