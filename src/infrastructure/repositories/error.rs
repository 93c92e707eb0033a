use crate::domain::errors::DomainError;
use crate::domain::slug::FieldName;

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if db_err.is_unique_violation() {
                return DomainError::Conflict("unique constraint violated".into());
            }
            if db_err.is_foreign_key_violation() {
                return DomainError::NotFound("referenced record not found".into());
            }
            if db_err.is_check_violation() {
                return DomainError::Validation("check constraint violated".into());
            }
            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::RowNotFound => DomainError::NotFound("row not found".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// Like [`map_sqlx`], naming the slug field whose unique index rejected the
/// value so the save path can tell which field lost a race.
pub fn map_slug_write(err: sqlx::Error, field: &FieldName) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            slug_conflict(field)
        }
        _ => map_sqlx(err),
    }
}

pub fn slug_conflict(field: &FieldName) -> DomainError {
    DomainError::Conflict(format!("value of `{field}` already exists"))
}

pub fn map_json(err: serde_json::Error) -> DomainError {
    DomainError::Persistence(format!("malformed document body: {err}"))
}
