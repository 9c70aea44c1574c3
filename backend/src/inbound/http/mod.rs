//! HTTP inbound adapter exposing the catalogue pages.
//!
//! Pages are JSON view models; successful form submissions redirect to `/`.

pub mod articles;
pub mod categories;
pub mod error;
pub mod forms;
pub mod health;
pub mod responses;
pub mod search;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

use actix_web::web;

pub use error::ApiResult;

use self::error::{form_error_handler, query_error_handler};

/// Register the catalogue routes and their extractor configuration.
///
/// Expects `web::Data<HttpState>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(form_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(articles::list_articles)
        .service(articles::save_demo_article)
        .service(articles::new_article_form)
        .service(articles::create_article)
        .service(articles::show_article)
        .service(articles::edit_article_form)
        .service(articles::update_article)
        .service(
            web::resource("/article/delete/{id:\\d+}")
                .route(web::delete().to(articles::delete_article))
                .default_service(web::to(articles::delete_method_not_allowed)),
        )
        .service(categories::new_category_form)
        .service(categories::create_category)
        .service(search::search_by_category)
        .service(search::submit_category_search)
        .service(search::search_by_price)
        .service(search::submit_price_search);
}
