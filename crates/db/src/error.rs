//! Error type returned by repositories.
//!
//! Repositories never log. They classify failures so the HTTP layer can pick a
//! status code and decide how much to expose.

use sqlx::{Postgres, Transaction};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// No project matched the `(project_id, org_id)` key.
    #[error("project not found")]
    ProjectNotFound,

    /// A statement failed and rolling back the transaction failed as well.
    #[error("rollback error: {0}")]
    Rollback(#[source] sqlx::Error),

    /// Any other failure reported by the database or the pool.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Pick the error to surface after attempting a rollback.
///
/// A failed rollback wins over `original`: it means the connection or the
/// transaction is in a worse state than the failed statement suggests.
pub(crate) fn escalate(original: RepoError, rollback: Result<(), sqlx::Error>) -> RepoError {
    match rollback {
        Ok(()) => original,
        Err(rollback_err) => RepoError::Rollback(rollback_err),
    }
}

/// Roll back `tx` because of `original` and return the error to surface.
pub(crate) async fn rollback_with(
    tx: Transaction<'static, Postgres>,
    original: RepoError,
) -> RepoError {
    escalate(original, tx.rollback().await)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn successful_rollback_keeps_original_error() {
        let err = escalate(RepoError::ProjectNotFound, Ok(()));
        assert_matches!(err, RepoError::ProjectNotFound);
    }

    #[test]
    fn successful_rollback_keeps_original_database_error() {
        let err = escalate(RepoError::Database(sqlx::Error::PoolTimedOut), Ok(()));
        assert_matches!(err, RepoError::Database(sqlx::Error::PoolTimedOut));
    }

    #[test]
    fn statement_and_rollback_failure_escalates_to_rollback_error() {
        let original = RepoError::Database(sqlx::Error::Protocol("statement failed".into()));
        let err = escalate(original, Err(sqlx::Error::PoolClosed));

        assert_matches!(err, RepoError::Rollback(sqlx::Error::PoolClosed));
        assert!(err.to_string().starts_with("rollback error: "));
    }

    #[test]
    fn rollback_failure_wins_over_not_found() {
        let err = escalate(RepoError::ProjectNotFound, Err(sqlx::Error::WorkerCrashed));
        assert_matches!(err, RepoError::Rollback(sqlx::Error::WorkerCrashed));
    }

    #[test]
    fn database_errors_display_transparently() {
        let err = RepoError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.to_string(), sqlx::Error::RowNotFound.to_string());
    }
}
