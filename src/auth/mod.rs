pub mod remote;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use diesel::{ExpressionMethods, Queryable, QueryDsl, Selectable, SelectableHelper};
use diesel_async::RunQueryDsl;
use http::header::AUTHORIZATION;
use http::HeaderMap;
use http::request::Parts;
use utoipa::ToSchema;
use crate::backend::Backend;
use crate::error::{APIError, APIResult};
use crate::schema::users;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, ToSchema)]
#[derive(diesel_derive_enum::DbEnum)]
#[ExistingTypePath = "crate::schema::sql_types::Userrole"]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Organizer,
    Attendee,
}

#[derive(serde::Serialize, Selectable, Queryable, ToSchema, Clone, Debug)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub auth_id: String,
    pub email: String,
    pub role: UserRole,
}

/// Authenticated caller with the organizer role. The extractor runs the whole
/// gate: bearer header, token exchange with the hosted auth layer, local user
/// lookup, role check.
pub struct Organizer(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for Organizer
    where
        S: Send + Sync,
        Backend: FromRef<S>,
{
    type Rejection = APIError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> APIResult<Self> {
        let backend = Backend::from_ref(state);
        let token = bearer_token(&parts.headers)?;
        let identity = backend.auth.identity_for_token(&token).await?;

        let mut conn = backend.get_connection().await?;
        let user = users::table
            .filter(users::auth_id.eq(&identity.id))
            .select(User::as_select())
            .get_result(&mut conn.0)
            .await
            .map_err(|error| match error {
                diesel::result::Error::NotFound => APIError::forbidden("no account for this identity"),
                other => APIError::internal(other),
            })?;

        if user.role != UserRole::Organizer {
            return Err(APIError::forbidden("organizer role required"));
        }

        Ok(Organizer(user))
    }
}

pub fn bearer_token(headers: &HeaderMap) -> APIResult<String> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| APIError::unauthenticated("missing authorization header"))?
        .to_str()
        .map_err(|_| APIError::unauthenticated("malformed authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| APIError::unauthenticated("malformed authorization header"))?
        .trim();
    if token.is_empty() {
        return Err(APIError::unauthenticated("malformed authorization header"));
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use http::header::AUTHORIZATION;
    use http::HeaderMap;
    use crate::error::APIError;
    use super::bearer_token;

    #[test]
    fn extracts_the_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        let error = bearer_token(&HeaderMap::new()).unwrap_err();
        assert!(matches!(error, APIError::Unauthenticated(_)));
    }

    #[test]
    fn rejects_non_bearer_and_empty_credentials() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic dXNlcjpwdw==".parse().unwrap());
        assert!(bearer_token(&headers).is_err());

        headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
        assert!(bearer_token(&headers).is_err());
    }
}
