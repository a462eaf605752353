//! Helpers for classifying PostgreSQL constraint violations.

/// Name of the unique constraint on `links.code` (see `migrations/`).
pub const LINKS_CODE_KEY: &str = "links_code_key";

/// Returns true if the error is any unique-constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Returns true if the error is a unique violation on the short code column.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(LINKS_CODE_KEY))
}
