//! Behaviour tests for the name, category and price filters.

#[path = "support/catalogue_http.rs"]
mod catalogue_http;

use actix_web::test::TestRequest;
use catalog::outbound::memory::InMemoryCatalogue;
use catalogue_http::{Recorded, create_article, get, names, send, unquote};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

#[derive(Default, ScenarioState)]
struct FilterWorld {
    store: Slot<InMemoryCatalogue>,
    last: Slot<Recorded>,
}

impl FilterWorld {
    fn store(&self) -> InMemoryCatalogue {
        self.store.get().expect("catalogue should be initialised")
    }

    fn last(&self) -> Recorded {
        self.last.get().expect("a request should have been sent")
    }
}

#[fixture]
fn world() -> FilterWorld {
    FilterWorld::default()
}

/// Category 1 "Mobilier" owns the table; the lamp and the armchair are loose.
#[given("a furnished catalogue")]
fn a_furnished_catalogue(world: &FilterWorld) {
    let store = InMemoryCatalogue::new();
    let category = send(
        &store,
        TestRequest::post()
            .uri("/category/newCat")
            .set_form([("nom", "Mobilier")]),
    );
    assert_eq!(category.status, 303, "seeding category failed");
    for (nom, prix, category) in [
        ("Lampe LED", "15.00", None),
        ("Table basse", "100.00", Some("1")),
        ("Fauteuil", "149.99", None),
    ] {
        let created = create_article(&store, nom, prix, category);
        assert_eq!(created.status, 303, "seeding {nom} failed: {:?}", created.body);
    }
    world.store.set(store);
}

#[when("the client opens {uri}")]
fn the_client_opens(world: &FilterWorld, uri: String) {
    world.last.set(get(&world.store(), unquote(&uri)));
}

#[when("the client submits the category search for {category}")]
fn the_client_submits_the_category_search(world: &FilterWorld, category: String) {
    world.last.set(send(
        &world.store(),
        TestRequest::post()
            .uri("/art_cat/")
            .set_form([("category", unquote(&category))]),
    ));
}

#[then("the listed articles are {expected}")]
fn the_listed_articles_are(world: &FilterWorld, expected: String) {
    let last = world.last();
    assert_eq!(last.status, 200);
    assert_eq!(last.article_names(), names(&expected));
}

#[then("the category options include {nom}")]
fn the_category_options_include(world: &FilterWorld, nom: String) {
    let last = world.last();
    let options = last.body["categories"].as_array().cloned().unwrap_or_default();
    assert!(
        options
            .iter()
            .any(|option| option["nom"].as_str() == Some(unquote(&nom))),
        "category options should include {nom}"
    );
}

#[then("the filter reports {field}")]
fn the_filter_reports(world: &FilterWorld, field: String) {
    let last = world.last();
    let reported: Vec<&str> = last.body["filterErrors"]
        .as_array()
        .map(|issues| {
            issues
                .iter()
                .filter_map(|issue| issue["field"].as_str())
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(reported, vec![unquote(&field)]);
}

#[scenario(path = "tests/features/catalogue_filters.feature", name = "Filtering by name")]
fn filtering_by_name(world: FilterWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalogue_filters.feature",
    name = "An empty name filter lists everything"
)]
fn an_empty_name_filter_lists_everything(world: FilterWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalogue_filters.feature",
    name = "Filtering by category"
)]
fn filtering_by_category(world: FilterWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalogue_filters.feature",
    name = "An unknown category lists everything"
)]
fn an_unknown_category_lists_everything(world: FilterWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalogue_filters.feature",
    name = "Filtering by an exact price"
)]
fn filtering_by_an_exact_price(world: FilterWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalogue_filters.feature",
    name = "An inverted price range lists nothing"
)]
fn an_inverted_price_range_lists_nothing(world: FilterWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalogue_filters.feature",
    name = "A malformed price bound lists everything"
)]
fn a_malformed_price_bound_lists_everything(world: FilterWorld) {
    drop(world);
}
