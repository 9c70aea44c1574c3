//! Drives the catalogue pages over an in-memory store.
//!
//! Every call builds the app on a fresh Actix system, so step functions stay
//! synchronous and the store is the only state shared between requests.

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{App, test, web};
use serde_json::Value;

use catalog::Trace;
use catalog::inbound::http::configure;
use catalog::inbound::http::state::HttpState;
use catalog::outbound::memory::InMemoryCatalogue;

/// What the client saw.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub status: u16,
    pub location: Option<String>,
    /// JSON body, or the raw text wrapped in a JSON string.
    pub body: Value,
}

impl Recorded {
    /// Names of the listed articles, in list order.
    pub fn article_names(&self) -> Vec<String> {
        self.body["articles"]
            .as_array()
            .map(|articles| {
                articles
                    .iter()
                    .filter_map(|article| article["nom"].as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Send one request to the catalogue pages.
pub fn send(store: &InMemoryCatalogue, request: test::TestRequest) -> Recorded {
    let store = Arc::new(store.clone());
    actix_rt::System::new().block_on(async move {
        let state = web::Data::new(HttpState::new(store.clone(), store));
        let app =
            test::init_service(App::new().app_data(state).wrap(Trace).configure(configure)).await;
        let response = test::call_service(&app, request.to_request()).await;
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = test::read_body(response).await;
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        Recorded {
            status,
            location,
            body,
        }
    })
}

/// Submit the article creation form.
pub fn create_article(
    store: &InMemoryCatalogue,
    nom: &str,
    prix: &str,
    category: Option<&str>,
) -> Recorded {
    let mut fields = vec![("nom", nom), ("prix", prix)];
    fields.extend(category.map(|id| ("category", id)));
    send(
        store,
        test::TestRequest::post().uri("/article/new").set_form(fields),
    )
}

/// Fetch a page with GET.
pub fn get(store: &InMemoryCatalogue, uri: &str) -> Recorded {
    send(store, test::TestRequest::get().uri(uri))
}

/// Strip the quotes Gherkin step arguments carry.
pub fn unquote(raw: &str) -> &str {
    raw.trim().trim_matches('"')
}

/// Split a quoted comma-separated list; an empty string is an empty list.
pub fn names(raw: &str) -> Vec<String> {
    unquote(raw)
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
