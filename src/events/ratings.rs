use axum::{Json, Router};
use axum::extract::Path;
use axum::routing::get;
use chrono::{Local, NaiveDateTime};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel_async::RunQueryDsl;
use http::StatusCode;
use utoipa::ToSchema;
use crate::aggregate::average_rating;
use crate::backend::{Backend, DBConnection};
use crate::error::APIError;
use crate::error::APIResult;
use crate::schema::ratings;
use crate::util::required_trimmed;

#[derive(serde::Serialize, Queryable, Selectable, ToSchema, Debug, PartialEq)]
#[diesel(table_name = ratings)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: i32,
    pub event_id: i32,
    pub user_name: String,
    pub rating: i32,
    pub created_at: NaiveDateTime,
}

#[derive(serde::Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRating {
    #[serde(default)]
    pub user_name: String,
    /// Kept as a raw JSON value so a non-integer or missing rating is
    /// rejected by the handler's own validation instead of the body
    /// deserializer.
    #[serde(default)]
    #[schema(value_type = i32)]
    pub rating: serde_json::Value,
}

#[derive(serde::Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub average_rating: f64,
    pub total_ratings: usize,
    pub ratings: Vec<Rating>,
}

#[derive(serde::Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RatingCheck {
    pub has_rated: bool,
    pub user_rating: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = ratings)]
struct RatingRow {
    event_id: i32,
    user_name: String,
    rating: i32,
    created_at: NaiveDateTime,
}

fn parse_rating(value: &serde_json::Value) -> APIResult<i32> {
    let rating = value
        .as_i64()
        .ok_or_else(|| APIError::validation("rating must be an integer between 1 and 5"))?;
    if !(1..=5).contains(&rating) {
        return Err(APIError::validation("rating must be an integer between 1 and 5"));
    }

    Ok(rating as i32)
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/rating"
)]
pub async fn post_rating(
    mut conn: DBConnection,
    Path(event_id): Path<i32>,
    Json(request): Json<SubmitRating>,
) -> APIResult<(StatusCode, Json<Rating>)> {
    let user_name = required_trimmed(&request.user_name, "userName")?;
    let rating = parse_rating(&request.rating)?;

    let created = diesel::insert_into(ratings::table)
        .values(RatingRow {
            event_id,
            user_name,
            rating,
            created_at: Local::now().naive_local(),
        })
        .returning(Rating::as_returning())
        .get_result(&mut conn.0)
        .await
        .map_err(|error| match error {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                APIError::conflict("user has already rated this event")
            }
            other => APIError::db(other),
        })?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/rating"
)]
pub async fn get_event_rating(
    mut conn: DBConnection,
    Path(event_id): Path<i32>,
) -> APIResult<Json<RatingSummary>> {
    let rows = ratings::table
        .filter(ratings::event_id.eq(event_id))
        .order(ratings::created_at.desc())
        .select(Rating::as_select())
        .get_results(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    let values: Vec<i32> = rows.iter().map(|row| row.rating).collect();

    Ok(Json(RatingSummary {
        average_rating: average_rating(&values),
        total_ratings: rows.len(),
        ratings: rows,
    }))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/check-rating/{user_name}"
)]
pub async fn check_rating(
    mut conn: DBConnection,
    Path((event_id, user_name)): Path<(i32, String)>,
) -> APIResult<Json<RatingCheck>> {
    let existing = ratings::table
        .filter(ratings::event_id.eq(event_id))
        .filter(ratings::user_name.eq(user_name.trim()))
        .select(Rating::as_select())
        .first(&mut conn.0)
        .await
        .optional()
        .map_err(APIError::internal)?;

    Ok(Json(RatingCheck {
        has_rated: existing.is_some(),
        user_rating: existing.map(|row| row.rating),
    }))
}

pub fn add_rating_routes(router: Router<Backend>) -> Router<Backend> {
    router.route("/api/events/:event_id/rating", get(get_event_rating).post(post_rating))
        .route("/api/events/:event_id/check-rating/:user_name", get(check_rating))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use super::parse_rating;

    #[test]
    fn accepts_integers_from_one_to_five() {
        assert_eq!(parse_rating(&json!(1)).unwrap(), 1);
        assert_eq!(parse_rating(&json!(5)).unwrap(), 5);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(parse_rating(&json!(0)).is_err());
        assert!(parse_rating(&json!(6)).is_err());
        assert!(parse_rating(&json!(-3)).is_err());
    }

    #[test]
    fn rejects_non_integer_values() {
        assert!(parse_rating(&json!("4")).is_err());
        assert!(parse_rating(&json!(4.5)).is_err());
        assert!(parse_rating(&json!(null)).is_err());
        assert!(parse_rating(&json!([4])).is_err());
    }
}
