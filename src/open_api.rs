use axum::{Json, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::aggregate::EventStatus;
use crate::auth::{User, UserRole};
use crate::backend::Backend;
use crate::committee::*;
use crate::dashboard::*;
use crate::events::*;
use crate::events::attendance::*;
use crate::events::comments::*;
use crate::events::ratings::*;
use crate::expenses::*;
use crate::interests::*;
use crate::util::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        openapi,
        health,
        get_events,
        get_event,
        get_categories,
        get_event_comments,
        post_event_comment,
        put_comment,
        delete_comment,
        post_attend,
        get_attendance,
        check_attendance,
        delete_attend,
        post_rating,
        get_event_rating,
        check_rating,
        get_my_interests,
        post_my_interests,
        delete_my_interests,
        get_interest_categories,
        get_committee,
        post_committee_member,
        put_committee_member,
        delete_committee_member,
        get_expenses,
        post_expense,
        put_expense,
        delete_expense
    ),
    components(schemas(
        Event,
        EventWithCategories,
        EventStatus,
        Category,
        Comment,
        NewComment,
        CommentEdit,
        Attendance,
        AttendanceRequest,
        AttendanceSummary,
        AttendanceCheck,
        Rating,
        SubmitRating,
        RatingSummary,
        RatingCheck,
        InterestSet,
        ReplaceInterests,
        CommitteeMember,
        NewCommitteeMember,
        Expense,
        NewExpense,
        User,
        UserRole,
        MessageResponse,
        HealthResponse,
    )))]
struct ApiDoc;

/// Return JSON version of an OpenAPI schema
#[utoipa::path(
    get,
    path = "/api-docs/openapi.json",
    responses(
        (status = 200, description = "JSON file", body = ())
    )
)]
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn add_swagger_route(router: Router<Backend>) -> Router<Backend> {
    router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
