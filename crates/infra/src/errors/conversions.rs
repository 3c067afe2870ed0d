//! Conversions from external infrastructure errors into domain errors.

use campuscal_common::StorageError;
use campuscal_domain::CampusCalError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CampusCalError);

impl From<InfraError> for CampusCalError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CampusCalError> for InfraError {
    fn from(value: CampusCalError) -> Self {
        InfraError(value)
    }
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → CampusCalError */
/* -------------------------------------------------------------------------- */

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        let mapped = match value {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        CampusCalError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        CampusCalError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        CampusCalError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        CampusCalError::Database("foreign key constraint violation".into())
                    }
                    _ => CampusCalError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => {
                CampusCalError::NotFound("no rows returned by query".into())
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                CampusCalError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                CampusCalError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                CampusCalError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidParameterName(parameter_name) => {
                CampusCalError::Database(format!("invalid parameter name: {parameter_name}"))
            }
            RE::InvalidPath(path) => CampusCalError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => CampusCalError::Database("invalid SQL query".into()),
            other => CampusCalError::Database(other.to_string()),
        };

        InfraError(mapped)
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → CampusCalError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(CampusCalError::Database(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* StorageError → CampusCalError */
/* -------------------------------------------------------------------------- */

impl From<StorageError> for InfraError {
    fn from(value: StorageError) -> Self {
        let mapped = match value {
            StorageError::InvalidConfig(message) => CampusCalError::Config(message),
            other => CampusCalError::Database(other.to_string()),
        };
        InfraError(mapped)
    }
}
