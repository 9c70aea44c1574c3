//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every catalogue page, the health probes and the
//! schemas they reference. Swagger UI serves it under `/docs` in debug
//! builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, FilterIssue};
use crate::inbound::http::forms::{ArticleForm, CategoryForm, CategoryQuery, PriceQuery};
use crate::inbound::http::views::{
    ArticleFormValues, ArticleFormView, ArticleListView, ArticleView, CategoryFormValues,
    CategoryFormView, CategoryView, FieldError, MessageView, SearchView,
};

/// OpenAPI document for the catalogue.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalogue API",
        description = "Article and category pages rendered as JSON view models, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::articles::list_articles,
        crate::inbound::http::articles::save_demo_article,
        crate::inbound::http::articles::new_article_form,
        crate::inbound::http::articles::create_article,
        crate::inbound::http::articles::show_article,
        crate::inbound::http::articles::edit_article_form,
        crate::inbound::http::articles::update_article,
        crate::inbound::http::articles::delete_article,
        crate::inbound::http::categories::new_category_form,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::search::search_by_category,
        crate::inbound::http::search::submit_category_search,
        crate::inbound::http::search::search_by_price,
        crate::inbound::http::search::submit_price_search,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        FilterIssue,
        ArticleView,
        ArticleListView,
        ArticleFormView,
        ArticleFormValues,
        ArticleForm,
        CategoryView,
        CategoryFormView,
        CategoryFormValues,
        CategoryForm,
        CategoryQuery,
        PriceQuery,
        FieldError,
        MessageView,
        SearchView,
    )),
    tags(
        (name = "articles", description = "Article list, detail and forms"),
        (name = "categories", description = "Category creation"),
        (name = "search", description = "Category and price filters"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
