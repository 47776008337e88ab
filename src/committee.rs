use axum::{Json, Router};
use axum::extract::Path;
use axum::routing::{get, put};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use http::StatusCode;
use utoipa::ToSchema;
use crate::auth::Organizer;
use crate::backend::{Backend, DBConnection};
use crate::error::APIError;
use crate::error::APIResult;
use crate::schema::committee_members;
use crate::util::{message, required_trimmed, MessageResponse};

#[derive(serde::Serialize, Queryable, Selectable, ToSchema, Debug, PartialEq)]
#[diesel(table_name = committee_members)]
pub struct CommitteeMember {
    pub id: i32,
    pub name: String,
    pub position: String,
    pub email: String,
    pub phone: String,
}

#[derive(serde::Deserialize, Insertable, AsChangeset, ToSchema, Debug)]
#[diesel(table_name = committee_members)]
pub struct NewCommitteeMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[utoipa::path(
    get,
    path = "/api/committee"
)]
pub async fn get_committee(
    _organizer: Organizer,
    mut conn: DBConnection,
) -> APIResult<Json<Vec<CommitteeMember>>> {
    let members = committee_members::table
        .order(committee_members::name.asc())
        .select(CommitteeMember::as_select())
        .get_results(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    Ok(Json(members))
}

#[utoipa::path(
    post,
    path = "/api/committee"
)]
pub async fn post_committee_member(
    _organizer: Organizer,
    mut conn: DBConnection,
    Json(mut new_member): Json<NewCommitteeMember>,
) -> APIResult<(StatusCode, Json<CommitteeMember>)> {
    new_member.name = required_trimmed(&new_member.name, "name")?;

    let created = diesel::insert_into(committee_members::table)
        .values(&new_member)
        .returning(CommitteeMember::as_returning())
        .get_result(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/committee/{member_id}"
)]
pub async fn put_committee_member(
    _organizer: Organizer,
    mut conn: DBConnection,
    Path(member_id): Path<i32>,
    Json(mut changes): Json<NewCommitteeMember>,
) -> APIResult<Json<CommitteeMember>> {
    changes.name = required_trimmed(&changes.name, "name")?;

    let updated = diesel::update(committee_members::table.find(member_id))
        .set(&changes)
        .returning(CommitteeMember::as_returning())
        .get_result(&mut conn.0)
        .await
        .map_err(|_| APIError::not_found("committee member not found"))?;

    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/committee/{member_id}"
)]
pub async fn delete_committee_member(
    _organizer: Organizer,
    mut conn: DBConnection,
    Path(member_id): Path<i32>,
) -> APIResult<Json<MessageResponse>> {
    diesel::delete(committee_members::table.find(member_id))
        .execute(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    Ok(message("Committee member removed"))
}

pub fn add_committee_routes(router: Router<Backend>) -> Router<Backend> {
    router.route("/api/committee", get(get_committee).post(post_committee_member))
        .route("/api/committee/:member_id", put(put_committee_member).delete(delete_committee_member))
}
