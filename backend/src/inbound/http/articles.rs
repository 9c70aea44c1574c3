//! Article pages.
//!
//! ```text
//! GET    /
//! GET    /article/save
//! GET    /article/new
//! POST   /article/new
//! GET    /article/{id}
//! GET    /article/edit/{id}
//! POST   /article/edit/{id}
//! DELETE /article/delete/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use tracing::debug;

use crate::domain::{ArticleFilter, ArticleId, Error, ErrorCode, NameFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{ArticleForm, NameQuery};
use crate::inbound::http::responses::{field_error, redirect_home, unprocessable};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{
    ArticleFormValues, ArticleFormView, ArticleListView, ArticleView, FieldError, MessageView,
};

/// List every article, or those matching the name filter.
///
/// A query string that cannot be decoded lists every article.
#[utoipa::path(
    get,
    path = "/",
    params(NameQuery),
    responses(
        (status = 200, description = "Article list", body = ArticleListView),
        (status = 503, description = "Service unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["articles"],
    operation_id = "listArticles"
)]
#[get("/")]
pub async fn list_articles(
    state: web::Data<HttpState>,
    query: Option<web::Query<NameQuery>>,
) -> ApiResult<web::Json<ArticleListView>> {
    let query = query.map(web::Query::into_inner).unwrap_or_default();
    let outcome = NameFilter::from(query).resolve();
    let found = state.catalogue.search(outcome.search).await?;
    Ok(web::Json(ArticleListView::new(&found.articles, &found.search, outcome.issues)))
}

/// Store the demo article.
#[utoipa::path(
    get,
    path = "/article/save",
    responses(
        (status = 200, description = "Saved article id", body = String, content_type = "text/plain"),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["articles"],
    operation_id = "saveDemoArticle"
)]
#[get("/article/save")]
pub async fn save_demo_article(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let article = state.catalogue.save_demo_article().await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!("Article saved with id {}", article.id())))
}

async fn rejected_creation(
    state: &HttpState,
    values: ArticleFormValues,
    errors: Vec<FieldError>,
) -> ApiResult<HttpResponse> {
    let categories = state.catalogue.categories().await?;
    Ok(unprocessable(
        &ArticleFormView::creation(&categories).with_rejected(values, errors),
    ))
}

/// Empty creation form.
#[utoipa::path(
    get,
    path = "/article/new",
    responses((status = 200, description = "Creation form", body = ArticleFormView)),
    tags = ["articles"],
    operation_id = "newArticleForm"
)]
#[get("/article/new")]
pub async fn new_article_form(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ArticleFormView>> {
    let categories = state.catalogue.categories().await?;
    Ok(web::Json(ArticleFormView::creation(&categories)))
}

/// Create an article and go back to the list.
#[utoipa::path(
    post,
    path = "/article/new",
    request_body(content = ArticleForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirect to the list",
            headers(("Location" = String, description = "Always `/`"))),
        (status = 422, description = "Form with field errors", body = ArticleFormView),
        (status = 400, description = "Malformed form body", body = Error)
    ),
    tags = ["articles"],
    operation_id = "createArticle"
)]
#[post("/article/new")]
pub async fn create_article(
    state: web::Data<HttpState>,
    form: web::Form<ArticleForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let draft = match form.to_draft() {
        Ok(draft) => draft,
        Err(errors) => {
            debug!(count = errors.len(), "article form rejected");
            return rejected_creation(&state, form.values(), errors).await;
        }
    };
    match state.catalogue.create_article(&draft).await {
        Ok(_) => Ok(redirect_home()),
        Err(err) => match field_error(&err) {
            Some(error) => rejected_creation(&state, form.values(), vec![error]).await,
            None => Err(err),
        },
    }
}

/// Show one article.
#[utoipa::path(
    get,
    path = "/article/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article", body = ArticleView),
        (status = 404, description = "No such article", body = Error)
    ),
    tags = ["articles"],
    operation_id = "showArticle"
)]
#[get("/article/{id:\\d+}")]
pub async fn show_article(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ArticleView>> {
    let article = state
        .catalogue
        .article(ArticleId::new(path.into_inner()))
        .await?;
    Ok(web::Json(ArticleView::from(&article)))
}

/// Edit form pre-filled with the stored article.
#[utoipa::path(
    get,
    path = "/article/edit/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Edit form", body = ArticleFormView),
        (status = 404, description = "No such article", body = Error)
    ),
    tags = ["articles"],
    operation_id = "editArticleForm"
)]
#[get("/article/edit/{id:\\d+}")]
pub async fn edit_article_form(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ArticleFormView>> {
    let article = state
        .catalogue
        .article(ArticleId::new(path.into_inner()))
        .await?;
    Ok(web::Json(ArticleFormView::edition(&article)))
}

/// Replace an article's name and price.
#[utoipa::path(
    post,
    path = "/article/edit/{id}",
    params(("id" = i64, Path, description = "Article id")),
    request_body(content = ArticleForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirect to the list",
            headers(("Location" = String, description = "Always `/`"))),
        (status = 422, description = "Form with field errors", body = ArticleFormView),
        (status = 404, description = "No such article", body = Error)
    ),
    tags = ["articles"],
    operation_id = "updateArticle"
)]
#[post("/article/edit/{id:\\d+}")]
pub async fn update_article(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    form: web::Form<ArticleForm>,
) -> ApiResult<HttpResponse> {
    let id = ArticleId::new(path.into_inner());
    let form = form.into_inner();
    match form.to_changes() {
        Ok(changes) => {
            state.catalogue.update_article(id, changes).await?;
            Ok(redirect_home())
        }
        Err(errors) => {
            state.catalogue.article(id).await?;
            Ok(unprocessable(&ArticleFormView::rejected_edition(
                id,
                form.values(),
                errors,
            )))
        }
    }
}

/// Delete an article.
///
/// Registered on a resource whose other verbs answer 405, so it carries no
/// route macro.
#[utoipa::path(
    delete,
    path = "/article/delete/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Deleted", body = MessageView),
        (status = 404, description = "No such article", body = MessageView),
        (status = 405, description = "Verb other than DELETE", body = Error)
    ),
    tags = ["articles"],
    operation_id = "deleteArticle"
)]
pub async fn delete_article(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    match state
        .catalogue
        .delete_article(ArticleId::new(path.into_inner()))
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(MessageView::new("Article deleted successfully"))),
        Err(err) if err.code() == ErrorCode::NotFound => {
            Ok(HttpResponse::NotFound().json(MessageView::new(err.message())))
        }
        Err(err) => Err(err),
    }
}

/// Any verb but DELETE on the delete route.
pub async fn delete_method_not_allowed(req: HttpRequest) -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "DELETE"))
        .json(Error::method_not_allowed(format!(
            "{} is not allowed here; use DELETE",
            req.method()
        )))
}
