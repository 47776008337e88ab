use axum::{Json, Router};
use axum::extract::Path;
use axum::routing::{get, put};
use chrono::{Local, NaiveDateTime};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use http::StatusCode;
use utoipa::ToSchema;
use crate::auth::Organizer;
use crate::backend::{Backend, DBConnection};
use crate::error::APIError;
use crate::error::APIResult;
use crate::schema::expenses;
use crate::util::{message, required_trimmed, MessageResponse};

#[derive(serde::Serialize, Queryable, Selectable, ToSchema, Debug, PartialEq)]
#[diesel(table_name = expenses)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i32,
    pub event_id: i32,
    pub description: String,
    pub amount: f64,
    pub created_at: NaiveDateTime,
}

#[derive(serde::Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    #[serde(default)]
    pub event_id: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = expenses)]
struct ExpenseChanges {
    event_id: i32,
    description: String,
    amount: f64,
}

impl ExpenseChanges {
    fn validated(new_expense: NewExpense) -> APIResult<Self> {
        let description = required_trimmed(&new_expense.description, "description")?;
        if !new_expense.amount.is_finite() || new_expense.amount < 0.0 {
            return Err(APIError::validation("amount must be a non-negative number"));
        }

        Ok(ExpenseChanges {
            event_id: new_expense.event_id,
            description,
            amount: new_expense.amount,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/expenses"
)]
pub async fn get_expenses(
    _organizer: Organizer,
    mut conn: DBConnection,
) -> APIResult<Json<Vec<Expense>>> {
    let result = expenses::table
        .order(expenses::created_at.desc())
        .select(Expense::as_select())
        .get_results(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/api/expenses"
)]
pub async fn post_expense(
    _organizer: Organizer,
    mut conn: DBConnection,
    Json(new_expense): Json<NewExpense>,
) -> APIResult<(StatusCode, Json<Expense>)> {
    let changes = ExpenseChanges::validated(new_expense)?;

    // A foreign-key violation on event_id comes back as a validation error.
    let created = diesel::insert_into(expenses::table)
        .values((&changes, expenses::created_at.eq(Local::now().naive_local())))
        .returning(Expense::as_returning())
        .get_result(&mut conn.0)
        .await
        .map_err(APIError::db)?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/expenses/{expense_id}"
)]
pub async fn put_expense(
    _organizer: Organizer,
    mut conn: DBConnection,
    Path(expense_id): Path<i32>,
    Json(new_expense): Json<NewExpense>,
) -> APIResult<Json<Expense>> {
    let changes = ExpenseChanges::validated(new_expense)?;

    let updated = diesel::update(expenses::table.find(expense_id))
        .set(&changes)
        .returning(Expense::as_returning())
        .get_result(&mut conn.0)
        .await
        .map_err(|error| match error {
            diesel::result::Error::NotFound => APIError::not_found("expense not found"),
            other => APIError::db(other),
        })?;

    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/expenses/{expense_id}"
)]
pub async fn delete_expense(
    _organizer: Organizer,
    mut conn: DBConnection,
    Path(expense_id): Path<i32>,
) -> APIResult<Json<MessageResponse>> {
    diesel::delete(expenses::table.find(expense_id))
        .execute(&mut conn.0)
        .await
        .map_err(APIError::internal)?;

    Ok(message("Expense removed"))
}

pub fn add_expense_routes(router: Router<Backend>) -> Router<Backend> {
    router.route("/api/expenses", get(get_expenses).post(post_expense))
        .route("/api/expenses/:expense_id", put(put_expense).delete(delete_expense))
}

#[cfg(test)]
mod tests {
    use super::{ExpenseChanges, NewExpense};

    fn body(description: &str, amount: f64) -> NewExpense {
        NewExpense { event_id: 1, description: description.to_string(), amount }
    }

    #[test]
    fn trims_the_description() {
        let changes = ExpenseChanges::validated(body("  venue hire ", 120.0)).unwrap();
        assert_eq!(changes.description, "venue hire");
    }

    #[test]
    fn rejects_blank_descriptions_and_bad_amounts() {
        assert!(ExpenseChanges::validated(body("  ", 10.0)).is_err());
        assert!(ExpenseChanges::validated(body("venue", -1.0)).is_err());
        assert!(ExpenseChanges::validated(body("venue", f64::NAN)).is_err());
    }
}
