//! Catalogue use cases over the article and category ports.
//!
//! Handlers call this service rather than the ports so that repository
//! failures are mapped to the domain [`Error`] in one place.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, info, warn};

use super::ports::{
    ArticleRepository, ArticleRepositoryError, CategoryRepository, CategoryRepositoryError,
};
use super::{
    Article, ArticleChanges, ArticleDraft, ArticleId, ArticleName, ArticleSearch, Category,
    CategoryDraft, CategoryId, Error, Price,
};

/// Name of the article stored by [`CatalogueService::save_demo_article`].
pub const DEMO_ARTICLE_NAME: &str = "Article 1";
/// Price, in whole units, of the demo article.
pub const DEMO_ARTICLE_PRICE: i64 = 1000;

fn map_article_error(err: ArticleRepositoryError) -> Error {
    match err {
        ArticleRepositoryError::Connection { message } => {
            error!(%message, "article store unreachable");
            Error::service_unavailable("article store unavailable")
        }
        ArticleRepositoryError::Query { message } => {
            error!(%message, "article store query failed");
            Error::internal(message)
        }
        ArticleRepositoryError::NotFound { id } => {
            warn!(article_id = %id, "article not found");
            Error::not_found("Article not found")
        }
        ArticleRepositoryError::UnknownCategory { id } => {
            warn!(category_id = %id, "article filed under unknown category");
            Error::invalid_request(format!("category {id} does not exist")).with_details(json!({
                "field": "category",
                "code": "unknown_category",
            }))
        }
    }
}

fn map_category_error(err: CategoryRepositoryError) -> Error {
    match err {
        CategoryRepositoryError::Connection { message } => {
            error!(%message, "category store unreachable");
            Error::service_unavailable("category store unavailable")
        }
        CategoryRepositoryError::Query { message } => {
            error!(%message, "category store query failed");
            Error::internal(message)
        }
    }
}

/// Articles found by a search, with the search that actually ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub search: ArticleSearch,
    pub articles: Vec<Article>,
}

/// Article and category use cases.
///
/// Cheap to clone; both ports are shared.
#[derive(Clone)]
pub struct CatalogueService {
    articles: Arc<dyn ArticleRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl CatalogueService {
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            articles,
            categories,
        }
    }

    /// Run a resolved search.
    ///
    /// A category search naming an unknown category lists every article;
    /// the returned [`SearchResults::search`] is then [`ArticleSearch::All`].
    pub async fn search(&self, search: ArticleSearch) -> Result<SearchResults, Error> {
        let articles = match &search {
            ArticleSearch::All => self.articles.find_all().await.map_err(map_article_error)?,
            ArticleSearch::ByName(nom) => self
                .articles
                .find_by_name(nom)
                .await
                .map_err(map_article_error)?,
            ArticleSearch::ByCategory(id) => {
                if self.category(*id).await?.is_none() {
                    info!(category_id = %id, "unknown category filter, listing all articles");
                    return Ok(SearchResults {
                        search: ArticleSearch::All,
                        articles: self.articles.find_all().await.map_err(map_article_error)?,
                    });
                }
                self.articles_of_category(*id).await?
            }
            ArticleSearch::ByPriceRange { min, max } => self
                .articles
                .find_by_price_range(*min, *max)
                .await
                .map_err(map_article_error)?,
        };
        Ok(SearchResults { search, articles })
    }

    /// Fetch one article.
    ///
    /// # Errors
    /// [`ErrorCode::NotFound`](super::ErrorCode::NotFound) when the id is unknown.
    pub async fn article(&self, id: ArticleId) -> Result<Article, Error> {
        self.articles
            .find_by_id(id)
            .await
            .map_err(map_article_error)?
            .ok_or_else(|| Error::not_found("Article not found"))
    }

    pub async fn create_article(&self, draft: &ArticleDraft) -> Result<Article, Error> {
        let article = self
            .articles
            .insert(draft)
            .await
            .map_err(map_article_error)?;
        info!(article_id = %article.id(), "article created");
        Ok(article)
    }

    /// Replace the name and price of an existing article.
    pub async fn update_article(
        &self,
        id: ArticleId,
        changes: ArticleChanges,
    ) -> Result<Article, Error> {
        let updated = self.article(id).await?.with_changes(changes);
        self.articles
            .update(&updated)
            .await
            .map_err(map_article_error)?;
        info!(article_id = %id, "article updated");
        Ok(updated)
    }

    pub async fn delete_article(&self, id: ArticleId) -> Result<(), Error> {
        self.articles.delete(id).await.map_err(map_article_error)?;
        info!(article_id = %id, "article deleted");
        Ok(())
    }

    /// Store the fixed demo article and return it.
    pub async fn save_demo_article(&self) -> Result<Article, Error> {
        let nom = ArticleName::new(DEMO_ARTICLE_NAME)
            .map_err(|err| Error::internal(format!("invalid demo article name: {err}")))?;
        let prix = Price::new(DEMO_ARTICLE_PRICE.into())
            .map_err(|err| Error::internal(format!("invalid demo article price: {err}")))?;
        self.create_article(&ArticleDraft::new(nom, prix)).await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, Error> {
        self.categories.find_all().await.map_err(map_category_error)
    }

    pub async fn category(&self, id: CategoryId) -> Result<Option<Category>, Error> {
        self.categories
            .find_by_id(id)
            .await
            .map_err(map_category_error)
    }

    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, Error> {
        let category = self
            .categories
            .insert(draft)
            .await
            .map_err(map_category_error)?;
        info!(category_id = %category.id(), "category created");
        Ok(category)
    }

    pub async fn articles_of_category(&self, id: CategoryId) -> Result<Vec<Article>, Error> {
        self.categories
            .articles_of(id)
            .await
            .map_err(map_category_error)
    }
}

#[cfg(test)]
mod tests {
    //! Service behaviour over mocked ports.
    use super::*;
    use crate::domain::ports::{MockArticleRepository, MockCategoryRepository};
    use crate::domain::{CategoryName, ErrorCode};
    use mockall::predicate::eq;
    use rstest::rstest;

    fn article(id: i64, nom: &str, prix: &str) -> Article {
        Article::new(
            ArticleId::new(id),
            ArticleName::new(nom).expect("valid name"),
            prix.parse().expect("valid price"),
        )
    }

    fn service(
        articles: MockArticleRepository,
        categories: MockCategoryRepository,
    ) -> CatalogueService {
        CatalogueService::new(Arc::new(articles), Arc::new(categories))
    }

    #[tokio::test]
    async fn unknown_category_search_lists_everything() {
        let mut articles = MockArticleRepository::new();
        articles
            .expect_find_all()
            .times(1)
            .return_once(|| Ok(vec![article(1, "Chaise en bois", "49.99")]));
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_by_id()
            .with(eq(CategoryId::new(9)))
            .return_once(|_| Ok(None));
        categories.expect_articles_of().never();

        let found = service(articles, categories)
            .search(ArticleSearch::ByCategory(CategoryId::new(9)))
            .await
            .expect("search succeeds");
        assert_eq!(found.search, ArticleSearch::All);
        assert_eq!(found.articles.len(), 1);
    }

    #[tokio::test]
    async fn known_category_search_lists_its_articles() {
        let mut articles = MockArticleRepository::new();
        articles.expect_find_all().never();
        let mut categories = MockCategoryRepository::new();
        categories.expect_find_by_id().return_once(|id| {
            Ok(Some(Category::new(
                id,
                CategoryName::new("Mobilier").expect("valid name"),
            )))
        });
        categories
            .expect_articles_of()
            .with(eq(CategoryId::new(2)))
            .return_once(|_| Ok(vec![article(4, "Table basse", "120.00")]));

        let found = service(articles, categories)
            .search(ArticleSearch::ByCategory(CategoryId::new(2)))
            .await
            .expect("search succeeds");
        assert_eq!(found.search, ArticleSearch::ByCategory(CategoryId::new(2)));
        assert_eq!(found.articles, vec![article(4, "Table basse", "120.00")]);
    }

    #[rstest]
    #[case(ArticleRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(ArticleRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(ArticleRepositoryError::not_found(ArticleId::new(3)), ErrorCode::NotFound)]
    #[case(
        ArticleRepositoryError::unknown_category(CategoryId::new(5)),
        ErrorCode::InvalidRequest
    )]
    #[tokio::test]
    async fn maps_article_store_failures(
        #[case] failure: ArticleRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut articles = MockArticleRepository::new();
        articles.expect_delete().return_once(move |_| Err(failure));

        let err = service(articles, MockCategoryRepository::new())
            .delete_article(ArticleId::new(3))
            .await
            .expect_err("delete fails");
        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn unknown_category_on_insert_names_the_field() {
        let mut articles = MockArticleRepository::new();
        articles
            .expect_insert()
            .return_once(|_| Err(ArticleRepositoryError::unknown_category(CategoryId::new(5))));

        let draft = ArticleDraft::new(
            ArticleName::new("Chaise en bois").expect("valid name"),
            "49.99".parse().expect("valid price"),
        )
        .in_category(CategoryId::new(5));
        let err = service(articles, MockCategoryRepository::new())
            .create_article(&draft)
            .await
            .expect_err("insert fails");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|details| details.get("field")),
            Some(&json!("category"))
        );
    }

    #[tokio::test]
    async fn missing_article_is_not_found() {
        let mut articles = MockArticleRepository::new();
        articles.expect_find_by_id().return_once(|_| Ok(None));

        let err = service(articles, MockCategoryRepository::new())
            .article(ArticleId::new(42))
            .await
            .expect_err("article is missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Article not found");
    }

    #[tokio::test]
    async fn update_keeps_the_id_and_skips_missing_articles() {
        let mut articles = MockArticleRepository::new();
        articles
            .expect_find_by_id()
            .with(eq(ArticleId::new(1)))
            .return_once(|_| Ok(Some(article(1, "Chaise en bois", "49.99"))));
        articles
            .expect_update()
            .withf(|updated| {
                updated.id() == ArticleId::new(1) && updated.prix().to_string() == "59.99"
            })
            .times(1)
            .return_once(|_| Ok(()));

        let updated = service(articles, MockCategoryRepository::new())
            .update_article(
                ArticleId::new(1),
                ArticleChanges {
                    nom: ArticleName::new("Chaise en bois").expect("valid name"),
                    prix: "59.99".parse().expect("valid price"),
                },
            )
            .await
            .expect("update succeeds");
        assert_eq!(updated.id(), ArticleId::new(1));
    }

    #[tokio::test]
    async fn demo_article_is_article_one_at_a_thousand() {
        let mut articles = MockArticleRepository::new();
        articles
            .expect_insert()
            .withf(|draft| {
                draft.nom.as_ref() == DEMO_ARTICLE_NAME
                    && draft.prix.to_string() == "1000.00"
                    && draft.category.is_none()
            })
            .return_once(|draft| Ok(Article::from_draft(ArticleId::new(1), draft.clone())));

        let saved = service(articles, MockCategoryRepository::new())
            .save_demo_article()
            .await
            .expect("demo article saved");
        assert_eq!(saved.id(), ArticleId::new(1));
    }

    #[tokio::test]
    async fn category_connection_failure_is_unavailable() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_find_all()
            .return_once(|| Err(CategoryRepositoryError::connection("refused")));

        let err = service(MockArticleRepository::new(), categories)
            .categories()
            .await
            .expect_err("listing fails");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
