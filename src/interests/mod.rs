use std::collections::BTreeSet;
use async_trait::async_trait;
use axum::{Json, Router};
use axum::extract::FromRequestParts;
use axum::routing::get;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use http::request::Parts;
use tower_sessions::Session;
use utoipa::ToSchema;
use uuid::Uuid;
use crate::backend::{Backend, DBConnection};
use crate::error::APIError;
use crate::error::APIResult;
use crate::events::{get_categories, Category};
use crate::schema::user_interests;
use crate::util::{message, MessageResponse};

const ANON_ID_KEY: &str = "anon_id";

/// Opaque per-browser token for interest tracking. Issued once on first
/// contact and carried by the session cookie; never tied to an authenticated
/// identity.
#[derive(Clone, Debug)]
pub struct AnonymousIdentity(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for AnonymousIdentity
    where
        S: Send + Sync,
{
    type Rejection = APIError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> APIResult<Self> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, rejection)| APIError::internal(rejection))?;

        if let Some(id) = session.get::<String>(ANON_ID_KEY).await.map_err(APIError::internal)? {
            return Ok(AnonymousIdentity(id));
        }

        let id = Uuid::new_v4().to_string();
        session.insert(ANON_ID_KEY, id.clone()).await.map_err(APIError::internal)?;
        Ok(AnonymousIdentity(id))
    }
}

#[derive(serde::Serialize, ToSchema, Debug, PartialEq)]
pub struct InterestSet {
    pub categories: Vec<i32>,
}

#[derive(serde::Deserialize, ToSchema, Debug)]
pub struct ReplaceInterests {
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Insertable)]
#[diesel(table_name = user_interests)]
struct InterestRow {
    user_id: String,
    category_id: i32,
}

/// Set semantics: duplicates collapse, order is irrelevant.
fn normalize_category_ids(raw: &[String]) -> APIResult<Vec<i32>> {
    let mut ids = BTreeSet::new();
    for value in raw {
        let id = value
            .trim()
            .parse::<i32>()
            .map_err(|_| APIError::validation(format!("invalid category id: {value}")))?;
        ids.insert(id);
    }

    Ok(ids.into_iter().collect())
}

#[utoipa::path(
    get,
    path = "/interests/me"
)]
pub async fn get_my_interests(
    identity: AnonymousIdentity,
    mut conn: DBConnection,
) -> APIResult<Json<InterestSet>> {
    let categories = user_interests::table
        .filter(user_interests::user_id.eq(&identity.0))
        .order(user_interests::category_id.asc())
        .select(user_interests::category_id)
        .get_results(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    Ok(Json(InterestSet { categories }))
}

#[utoipa::path(
    post,
    path = "/interests/me"
)]
pub async fn post_my_interests(
    identity: AnonymousIdentity,
    mut conn: DBConnection,
    Json(request): Json<ReplaceInterests>,
) -> APIResult<Json<InterestSet>> {
    let ids = normalize_category_ids(&request.categories)?;

    let user_id = identity.0.clone();
    let rows: Vec<InterestRow> = ids
        .iter()
        .map(|&category_id| InterestRow { user_id: user_id.clone(), category_id })
        .collect();

    // Replacement is wholesale, one transaction so a failed insert can not
    // leave the user with an emptied set.
    conn.0
        .transaction::<_, diesel::result::Error, _>(|conn| async move {
            diesel::delete(user_interests::table.filter(user_interests::user_id.eq(&user_id)))
                .execute(conn)
                .await?;

            if !rows.is_empty() {
                diesel::insert_into(user_interests::table)
                    .values(&rows)
                    .execute(conn)
                    .await?;
            }

            Ok(())
        }.scope_boxed())
        .await
        .map_err(APIError::db)?;

    Ok(Json(InterestSet { categories: ids }))
}

#[utoipa::path(
    delete,
    path = "/interests/me"
)]
pub async fn delete_my_interests(
    identity: AnonymousIdentity,
    mut conn: DBConnection,
) -> APIResult<Json<MessageResponse>> {
    diesel::delete(user_interests::table.filter(user_interests::user_id.eq(&identity.0)))
        .execute(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    Ok(message("Interests cleared"))
}

#[utoipa::path(
    get,
    path = "/interests/categories"
)]
pub async fn get_interest_categories(conn: DBConnection) -> APIResult<Json<Vec<Category>>> {
    get_categories(conn).await
}

pub fn add_interest_routes(router: Router<Backend>) -> Router<Backend> {
    router.route("/interests/me", get(get_my_interests).post(post_my_interests).delete(delete_my_interests))
        .route("/interests/categories", get(get_interest_categories))
}

#[cfg(test)]
mod tests {
    use super::normalize_category_ids;

    fn raw(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn deduplicates_with_set_semantics() {
        let ids = normalize_category_ids(&raw(&["2", "2", "3"])).unwrap();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn empty_input_yields_an_empty_set() {
        assert!(normalize_category_ids(&[]).unwrap().is_empty());
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(normalize_category_ids(&raw(&["2", "abc"])).is_err());
    }

    #[test]
    fn trims_before_parsing() {
        assert_eq!(normalize_category_ids(&raw(&[" 4 "])).unwrap(), vec![4]);
    }
}
