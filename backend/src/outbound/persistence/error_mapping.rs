//! Translation of pool and Diesel failures into port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{ArticleRepositoryError, CategoryRepositoryError};

use super::pool::PoolError;

fn pool_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Broad failure class shared by both ports.
enum Failure {
    Connection(&'static str),
    Query(&'static str),
}

fn classify(error: &DieselError) -> Failure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            Failure::Connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            Failure::Query("article violates a table constraint")
        }
        DieselError::QueryBuilderError(_) => Failure::Query("database query error"),
        DieselError::DeserializationError(_) => Failure::Query("row conversion failed"),
        _ => Failure::Query("database error"),
    }
}

pub(crate) fn article_pool_error(error: PoolError) -> ArticleRepositoryError {
    ArticleRepositoryError::connection(pool_message(error))
}

pub(crate) fn article_diesel_error(error: DieselError) -> ArticleRepositoryError {
    match classify(&error) {
        Failure::Connection(message) => ArticleRepositoryError::connection(message),
        Failure::Query(message) => ArticleRepositoryError::query(message),
    }
}

pub(crate) fn category_pool_error(error: PoolError) -> CategoryRepositoryError {
    CategoryRepositoryError::connection(pool_message(error))
}

pub(crate) fn category_diesel_error(error: DieselError) -> CategoryRepositoryError {
    match classify(&error) {
        Failure::Connection(message) => CategoryRepositoryError::connection(message),
        Failure::Query(message) => CategoryRepositoryError::query(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_failures_are_connection_errors() {
        let err = article_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, ArticleRepositoryError::connection("timed out"));
        let err = category_pool_error(PoolError::build("bad url"));
        assert_eq!(err, CategoryRepositoryError::connection("bad url"));
    }

    #[rstest]
    fn missing_rows_are_query_errors() {
        assert!(matches!(
            article_diesel_error(DieselError::NotFound),
            ArticleRepositoryError::Query { .. }
        ));
        assert!(matches!(
            category_diesel_error(DieselError::RollbackTransaction),
            CategoryRepositoryError::Query { .. }
        ));
    }
}
