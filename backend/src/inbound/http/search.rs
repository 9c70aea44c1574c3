//! Filtered article lists.
//!
//! ```text
//! GET|POST /art_cat/
//! GET|POST /art_prix/
//! ```
//!
//! Criteria arrive in the query string on GET and in the form body on POST.
//! Malformed criteria never fail the request: the full list is returned with
//! `filterErrors` describing what was wrong. Criteria that cannot be decoded
//! at all, such as a body without a form content type, count as absent.

use actix_web::{get, post, web};

use crate::domain::{ArticleFilter, CategoryFilter, Error, PriceRangeFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{CategoryQuery, PriceQuery};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::ArticleListView;

async fn by_category(state: &HttpState, query: CategoryQuery) -> ApiResult<ArticleListView> {
    let outcome = CategoryFilter::from(query).resolve();
    let found = state.catalogue.search(outcome.search).await?;
    let categories = state.catalogue.categories().await?;
    Ok(ArticleListView::new(&found.articles, &found.search, outcome.issues)
        .with_categories(&categories))
}

async fn by_price(state: &HttpState, query: PriceQuery) -> ApiResult<ArticleListView> {
    let outcome = PriceRangeFilter::from(query).resolve();
    let found = state.catalogue.search(outcome.search).await?;
    Ok(ArticleListView::new(&found.articles, &found.search, outcome.issues))
}

/// Articles of one category, criteria in the query string.
#[utoipa::path(
    get,
    path = "/art_cat/",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Filtered list with category options", body = ArticleListView),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["search"],
    operation_id = "searchByCategory"
)]
#[get("/art_cat/")]
pub async fn search_by_category(
    state: web::Data<HttpState>,
    query: Option<web::Query<CategoryQuery>>,
) -> ApiResult<web::Json<ArticleListView>> {
    let criteria = query.map(web::Query::into_inner).unwrap_or_default();
    by_category(&state, criteria).await.map(web::Json)
}

/// Articles of one category, criteria in the form body.
#[utoipa::path(
    post,
    path = "/art_cat/",
    request_body(content = CategoryQuery, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Filtered list with category options", body = ArticleListView),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["search"],
    operation_id = "submitCategorySearch"
)]
#[post("/art_cat/")]
pub async fn submit_category_search(
    state: web::Data<HttpState>,
    form: Option<web::Form<CategoryQuery>>,
) -> ApiResult<web::Json<ArticleListView>> {
    let criteria = form.map(web::Form::into_inner).unwrap_or_default();
    by_category(&state, criteria).await.map(web::Json)
}

/// Articles within a price range, bounds in the query string.
#[utoipa::path(
    get,
    path = "/art_prix/",
    params(PriceQuery),
    responses(
        (status = 200, description = "Filtered list", body = ArticleListView),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["search"],
    operation_id = "searchByPrice"
)]
#[get("/art_prix/")]
pub async fn search_by_price(
    state: web::Data<HttpState>,
    query: Option<web::Query<PriceQuery>>,
) -> ApiResult<web::Json<ArticleListView>> {
    let criteria = query.map(web::Query::into_inner).unwrap_or_default();
    by_price(&state, criteria).await.map(web::Json)
}

/// Articles within a price range, bounds in the form body.
#[utoipa::path(
    post,
    path = "/art_prix/",
    request_body(content = PriceQuery, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Filtered list", body = ArticleListView),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["search"],
    operation_id = "submitPriceSearch"
)]
#[post("/art_prix/")]
pub async fn submit_price_search(
    state: web::Data<HttpState>,
    form: Option<web::Form<PriceQuery>>,
) -> ApiResult<web::Json<ArticleListView>> {
    let criteria = form.map(web::Form::into_inner).unwrap_or_default();
    by_price(&state, criteria).await.map(web::Json)
}
