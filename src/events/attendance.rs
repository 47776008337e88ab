use axum::{Json, Router};
use axum::extract::Path;
use axum::routing::{get, post};
use chrono::{Local, NaiveDateTime};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel_async::RunQueryDsl;
use http::StatusCode;
use utoipa::ToSchema;
use crate::backend::{Backend, DBConnection};
use crate::error::APIError;
use crate::error::APIResult;
use crate::schema::attendance;
use crate::util::{message, required_trimmed, MessageResponse};

#[derive(serde::Serialize, Queryable, Selectable, ToSchema, Debug, PartialEq)]
#[diesel(table_name = attendance)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: i32,
    pub event_id: i32,
    pub user_name: String,
    pub created_at: NaiveDateTime,
}

#[derive(serde::Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRequest {
    // A missing field reaches the handler as empty and fails validation
    // there, keeping missing-field errors on the 400 path.
    #[serde(default)]
    pub user_name: String,
}

#[derive(serde::Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub count: usize,
    pub attendees: Vec<Attendance>,
}

#[derive(serde::Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceCheck {
    pub is_attending: bool,
}

#[derive(Insertable)]
#[diesel(table_name = attendance)]
struct AttendanceRow {
    event_id: i32,
    user_name: String,
    created_at: NaiveDateTime,
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/attend"
)]
pub async fn post_attend(
    mut conn: DBConnection,
    Path(event_id): Path<i32>,
    Json(request): Json<AttendanceRequest>,
) -> APIResult<(StatusCode, Json<Attendance>)> {
    let user_name = required_trimmed(&request.user_name, "userName")?;

    // Uniqueness per (event, user) is the table constraint, a violation
    // surfaces here as the duplicate-submission conflict.
    let created = diesel::insert_into(attendance::table)
        .values(AttendanceRow {
            event_id,
            user_name,
            created_at: Local::now().naive_local(),
        })
        .returning(Attendance::as_returning())
        .get_result(&mut conn.0)
        .await
        .map_err(|error| match error {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                APIError::conflict("user has already marked attendance for this event")
            }
            other => APIError::db(other),
        })?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/attendance"
)]
pub async fn get_attendance(
    mut conn: DBConnection,
    Path(event_id): Path<i32>,
) -> APIResult<Json<AttendanceSummary>> {
    let attendees = attendance::table
        .filter(attendance::event_id.eq(event_id))
        .order(attendance::created_at.asc())
        .select(Attendance::as_select())
        .get_results(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    Ok(Json(AttendanceSummary { count: attendees.len(), attendees }))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/check-attendance/{user_name}"
)]
pub async fn check_attendance(
    mut conn: DBConnection,
    Path((event_id, user_name)): Path<(i32, String)>,
) -> APIResult<Json<AttendanceCheck>> {
    let is_attending = attendance::table
        .filter(attendance::event_id.eq(event_id))
        .filter(attendance::user_name.eq(user_name.trim()))
        .select(Attendance::as_select())
        .first(&mut conn.0)
        .await
        .optional()
        .map_err(APIError::internal)?
        .is_some();

    Ok(Json(AttendanceCheck { is_attending }))
}

#[utoipa::path(
    delete,
    path = "/api/events/{event_id}/attend"
)]
pub async fn delete_attend(
    mut conn: DBConnection,
    Path(event_id): Path<i32>,
    Json(request): Json<AttendanceRequest>,
) -> APIResult<Json<MessageResponse>> {
    let user_name = required_trimmed(&request.user_name, "userName")?;

    // Removing a pair that was never recorded still reports success.
    diesel::delete(attendance::table)
        .filter(attendance::event_id.eq(event_id))
        .filter(attendance::user_name.eq(user_name))
        .execute(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    Ok(message("Attendance removed"))
}

pub fn add_attendance_routes(router: Router<Backend>) -> Router<Backend> {
    router.route("/api/events/:event_id/attend", post(post_attend).delete(delete_attend))
        .route("/api/events/:event_id/attendance", get(get_attendance))
        .route("/api/events/:event_id/check-attendance/:user_name", get(check_attendance))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use super::{Attendance, AttendanceSummary};

    #[test]
    fn summary_serializes_count_and_attendees() {
        let summary = AttendanceSummary {
            count: 1,
            attendees: vec![Attendance {
                id: 3,
                event_id: 7,
                user_name: "Ada".to_string(),
                created_at: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(9, 30, 0).unwrap(),
            }],
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["attendees"][0]["userName"], "Ada");
    }
}
