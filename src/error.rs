use std::error::Error;
use std::fmt;
use std::fmt::Display;
use axum::response::IntoResponse;
use diesel::result::DatabaseErrorKind;

pub type APIResult<T> = std::result::Result<T, APIError>;

#[derive(Debug, Clone)]
#[derive(axum_enum_response::EnumIntoResponse)]
pub enum APIError {
    #[status_code(BAD_REQUEST)]
    Validation(#[key("error")] String),

    #[status_code(BAD_REQUEST)]
    Conflict(#[key("error")] String),

    #[status_code(NOT_FOUND)]
    NotFound(#[key("error")] String),

    #[status_code(UNAUTHORIZED)]
    Unauthenticated(#[key("error")] String),

    #[status_code(FORBIDDEN)]
    Forbidden(#[key("error")] String),

    #[status_code(INTERNAL_SERVER_ERROR)]
    Internal(#[key("error")] String),
}

impl APIError {
    pub fn validation<M: Into<String>>(message: M) -> Self {
        APIError::Validation(message.into())
    }

    pub fn conflict<M: Into<String>>(message: M) -> Self {
        APIError::Conflict(message.into())
    }

    pub fn not_found<M: Into<String>>(message: M) -> Self {
        APIError::NotFound(message.into())
    }

    pub fn unauthenticated<M: Into<String>>(message: M) -> Self {
        APIError::Unauthenticated(message.into())
    }

    pub fn forbidden<M: Into<String>>(message: M) -> Self {
        APIError::Forbidden(message.into())
    }

    /// The upstream message goes to the log, never into the response body.
    pub fn internal<E: Display>(error: E) -> Self {
        tracing::error!("upstream failure: {error}");
        APIError::Internal("internal server error".to_string())
    }

    pub fn db(error: diesel::result::Error) -> Self {
        match error {
            diesel::result::Error::NotFound => APIError::not_found("record not found"),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                APIError::conflict("record already exists")
            }
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                APIError::validation("referenced record does not exist")
            }
            other => APIError::internal(other),
        }
    }
}

impl Display for APIError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for APIError {

}

#[cfg(test)]
mod tests {
    use super::APIError;
    use axum::response::IntoResponse;
    use http::StatusCode;

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        assert_eq!(APIError::validation("x").into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(APIError::conflict("x").into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(APIError::not_found("x").into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(APIError::unauthenticated("x").into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(APIError::forbidden("x").into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn not_found_rows_map_to_404() {
        let error = APIError::db(diesel::result::Error::NotFound);
        assert!(matches!(error, APIError::NotFound(_)));
    }

    #[test]
    fn internal_hides_the_upstream_message() {
        let error = APIError::internal("connection refused (db-host:5432)");
        let APIError::Internal(message) = error else { panic!("expected internal") };
        assert_eq!(message, "internal server error");
    }
}
