pub mod attendance;
pub mod comments;
pub mod ratings;

use std::collections::HashMap;
use axum::{Json, Router};
use axum::extract::Path;
use axum::routing::get;
use chrono::{Local, NaiveDateTime};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use utoipa::ToSchema;
use crate::aggregate::{event_status, EventStatus};
use crate::backend::{Backend, DBConnection};
use crate::error::APIError;
use crate::error::APIResult;
use crate::schema::{categories, event_categories, events};

#[derive(serde::Serialize, Queryable, Selectable, ToSchema, Debug, PartialEq)]
#[diesel(table_name = events)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub location: String,
    pub description: String,
    pub photos: Vec<String>,
}

#[derive(serde::Serialize, Queryable, Selectable, ToSchema, Debug, PartialEq, Clone)]
#[diesel(table_name = categories)]
pub struct Category {
    #[serde(rename = "category_id")]
    pub id: i32,
    #[serde(rename = "category_name")]
    pub name: String,
}

#[derive(serde::Serialize, ToSchema, Debug)]
pub struct EventWithCategories {
    #[serde(flatten)]
    pub event: Event,
    pub status: EventStatus,
    pub categories: Vec<Category>,
}

fn with_categories(event: Event, categories: Vec<Category>, now: NaiveDateTime) -> EventWithCategories {
    let status = event_status(event.start_time, event.end_time, now);
    EventWithCategories { event, status, categories }
}

fn group_by_event(pairs: Vec<(i32, Category)>) -> HashMap<i32, Vec<Category>> {
    let mut grouped: HashMap<i32, Vec<Category>> = HashMap::new();
    for (event_id, category) in pairs {
        grouped.entry(event_id).or_default().push(category);
    }
    grouped
}

#[utoipa::path(
    get,
    path = "/api/events"
)]
pub async fn get_events(mut conn: DBConnection) -> APIResult<Json<Vec<EventWithCategories>>> {
    let event_rows = events::table
        .order(events::start_time.asc())
        .select(Event::as_select())
        .get_results(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    let pairs = event_categories::table
        .inner_join(categories::table)
        .select((event_categories::event_id, Category::as_select()))
        .get_results::<(i32, Category)>(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    let mut grouped = group_by_event(pairs);
    let now = Local::now().naive_local();
    let result = event_rows
        .into_iter()
        .map(|event| {
            let event_categories = grouped.remove(&event.id).unwrap_or_default();
            with_categories(event, event_categories, now)
        })
        .collect();

    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}"
)]
pub async fn get_event(
    mut conn: DBConnection,
    Path(event_id): Path<i32>,
) -> APIResult<Json<EventWithCategories>> {
    let event = events::table
        .filter(events::id.eq(event_id))
        .select(Event::as_select())
        .get_result(&mut conn.0)
        .await
        .map_err(|_| APIError::not_found("event not found"))?;

    let event_categories = event_categories::table
        .filter(event_categories::event_id.eq(event_id))
        .inner_join(categories::table)
        .select(Category::as_select())
        .get_results(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    Ok(Json(with_categories(event, event_categories, Local::now().naive_local())))
}

#[utoipa::path(
    get,
    path = "/api/categories"
)]
pub async fn get_categories(mut conn: DBConnection) -> APIResult<Json<Vec<Category>>> {
    let result = categories::table
        .order(categories::name.asc())
        .select(Category::as_select())
        .get_results(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    Ok(Json(result))
}

pub fn add_event_routes(router: Router<Backend>) -> Router<Backend> {
    router.route("/api/events", get(get_events))
        .route("/api/events/:event_id", get(get_event))
        .route("/api/categories", get(get_categories))
}

#[cfg(test)]
mod tests {
    use super::{group_by_event, Category};

    #[test]
    fn categories_serialize_with_store_column_names() {
        let category = Category { id: 2, name: "Workshops".to_string() };
        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value, serde_json::json!({"category_id": 2, "category_name": "Workshops"}));
    }

    #[test]
    fn groups_join_rows_per_event() {
        let tech = Category { id: 1, name: "Tech".to_string() };
        let social = Category { id: 2, name: "Social".to_string() };
        let grouped = group_by_event(vec![
            (10, tech.clone()),
            (11, social.clone()),
            (10, social.clone()),
        ]);

        assert_eq!(grouped[&10], vec![tech, social.clone()]);
        assert_eq!(grouped[&11], vec![social]);
    }
}
