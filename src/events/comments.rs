use axum::{Json, Router};
use axum::extract::Path;
use axum::routing::{delete, get};
use chrono::{Local, NaiveDateTime};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use http::StatusCode;
use utoipa::ToSchema;
use crate::backend::{Backend, DBConnection};
use crate::error::APIError;
use crate::error::APIResult;
use crate::schema::comments;
use crate::util::{message, required_trimmed, MessageResponse};

#[derive(serde::Serialize, Queryable, Selectable, ToSchema, Debug, PartialEq)]
#[diesel(table_name = comments)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i32,
    pub event_id: i32,
    pub author_name: String,
    pub comment_text: String,
    pub created_at: NaiveDateTime,
}

#[derive(serde::Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    // Missing fields fall through to the handler validation as empty.
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub comment_text: String,
}

#[derive(serde::Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CommentEdit {
    #[serde(default)]
    pub comment_text: String,
}

#[derive(Insertable)]
#[diesel(table_name = comments)]
struct CommentRow {
    event_id: i32,
    author_name: String,
    comment_text: String,
    created_at: NaiveDateTime,
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/comments"
)]
pub async fn get_event_comments(
    mut conn: DBConnection,
    Path(event_id): Path<i32>,
) -> APIResult<Json<Vec<Comment>>> {
    let result = comments::table
        .filter(comments::event_id.eq(event_id))
        .order(comments::created_at.desc())
        .select(Comment::as_select())
        .get_results(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/comments"
)]
pub async fn post_event_comment(
    mut conn: DBConnection,
    Path(event_id): Path<i32>,
    Json(new_comment): Json<NewComment>,
) -> APIResult<(StatusCode, Json<Comment>)> {
    let author_name = required_trimmed(&new_comment.author_name, "authorName")?;
    let comment_text = required_trimmed(&new_comment.comment_text, "commentText")?;

    let created = diesel::insert_into(comments::table)
        .values(CommentRow {
            event_id,
            author_name,
            comment_text,
            created_at: Local::now().naive_local(),
        })
        .returning(Comment::as_returning())
        .get_result(&mut conn.0)
        .await
        .map_err(APIError::db)?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/comments/{comment_id}"
)]
pub async fn put_comment(
    mut conn: DBConnection,
    Path(comment_id): Path<i32>,
    Json(edit): Json<CommentEdit>,
) -> APIResult<Json<Comment>> {
    let comment_text = required_trimmed(&edit.comment_text, "commentText")?;

    // No author check here, any caller holding the id may edit.
    let updated = diesel::update(comments::table.find(comment_id))
        .set(comments::comment_text.eq(comment_text))
        .returning(Comment::as_returning())
        .get_result(&mut conn.0)
        .await
        .map_err(|_| APIError::not_found("comment not found"))?;

    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{comment_id}"
)]
pub async fn delete_comment(
    mut conn: DBConnection,
    Path(comment_id): Path<i32>,
) -> APIResult<Json<MessageResponse>> {
    // Idempotent, deleting a missing comment still reports success.
    diesel::delete(comments::table.find(comment_id))
        .execute(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    Ok(message("Comment deleted successfully"))
}

pub fn add_comment_routes(router: Router<Backend>) -> Router<Backend> {
    router.route("/api/events/:event_id/comments", get(get_event_comments).post(post_event_comment))
        .route("/api/comments/:comment_id", delete(delete_comment).put(put_comment))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use super::{Comment, NewComment};

    #[test]
    fn request_bodies_use_camel_case_fields() {
        let body: NewComment =
            serde_json::from_str(r#"{"authorName": "Ada", "commentText": "great talk"}"#).unwrap();
        assert_eq!(body.author_name, "Ada");
        assert_eq!(body.comment_text, "great talk");
    }

    #[test]
    fn responses_use_camel_case_fields() {
        let comment = Comment {
            id: 1,
            event_id: 7,
            author_name: "Ada".to_string(),
            comment_text: "great talk".to_string(),
            created_at: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(12, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(&comment).unwrap();
        assert_eq!(value["eventId"], 7);
        assert_eq!(value["authorName"], "Ada");
        assert!(value.get("author_name").is_none());
    }
}
