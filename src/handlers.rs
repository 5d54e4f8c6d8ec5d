use crate::errors::{AppError, FormError};
use crate::habits::HabitForm;
use crate::models::JoinRow;
use crate::records::RecordForm;
use crate::state::AppState;
use crate::storefront::{delivery_address, OrderSummary, Slideshow};
use crate::ui::{render_checkout, render_dashboard, render_order, render_slideshow, Dashboard};
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Local;
use serde::Deserialize;

const CONNECTION_ERROR: &str = "Connection error with the backend.";
const CREATE_FAILED: &str = "An error occurred while creating the habit.";
const UPDATE_FAILED: &str = "An error occurred while updating the habit.";
const DELETE_FAILED: &str = "An error occurred while deleting the habit.";
const RECORD_FAILED: &str = "Error saving the record. Check the server log for details.";

/// Order id the checkout page links to.
pub const CHECKOUT_ORDER_ID: &str = "123";

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub edit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    pub paid: Option<bool>,
}

pub async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Html<String> {
    let mut view = dashboard(&state).await;
    if let Some(id) = query.edit {
        view.editing = view
            .habits
            .iter()
            .find(|habit| habit.id == id)
            .map(|habit| (id, HabitForm::from(habit)));
    }
    Html(render_dashboard(&view))
}

pub async fn create_habit(State(state): State<AppState>, Form(form): Form<HabitForm>) -> Response {
    let result = {
        let mut habits = state.habits.lock().await;
        habits.create(&state.api, &form).await
    };
    match result {
        Ok(_) => Redirect::to("/").into_response(),
        Err(err) => {
            let mut view = dashboard(&state).await;
            view.habit_error = Some(err.user_message(CREATE_FAILED));
            view.habit_form = form;
            rejected(&err, &view)
        }
    }
}

pub async fn update_habit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<HabitForm>,
) -> Response {
    let result = {
        let mut habits = state.habits.lock().await;
        habits.update(&state.api, id, &form).await
    };
    match result {
        Ok(_) => Redirect::to("/").into_response(),
        Err(err) => {
            let mut view = dashboard(&state).await;
            view.edit_error = Some(err.user_message(UPDATE_FAILED));
            view.editing = Some((id, form));
            rejected(&err, &view)
        }
    }
}

pub async fn delete_habit(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let result = {
        let mut habits = state.habits.lock().await;
        habits.delete(&state.api, id).await
    };
    match result {
        Ok(()) => Redirect::to("/").into_response(),
        Err(err) => {
            let mut view = dashboard(&state).await;
            view.list_error = Some(err.user_message(DELETE_FAILED));
            rejected(&err, &view)
        }
    }
}

pub async fn create_record(State(state): State<AppState>, Form(form): Form<RecordForm>) -> Response {
    let result = {
        let mut records = state.records.lock().await;
        records.create(&state.api, &form).await
    };
    match result {
        Ok(()) => Redirect::to("/").into_response(),
        Err(err) => {
            let mut view = dashboard(&state).await;
            view.record_alert = Some(err.user_message(RECORD_FAILED));
            view.record_form = form;
            rejected(&err, &view)
        }
    }
}

pub async fn refresh_table(State(state): State<AppState>) -> Redirect {
    state.bump_refresh();
    state.load_all().await;
    Redirect::to("/")
}

pub async fn table(State(state): State<AppState>) -> Json<Vec<JoinRow>> {
    let habits = state.habits.lock().await;
    let records = state.records.lock().await;
    let mut table = state.table.lock().await;
    Json(table.rows(&habits, &records, state.refresh_counter()).to_vec())
}

pub async fn checkout(State(state): State<AppState>) -> Html<String> {
    let summary = OrderSummary::from_lines(&state.catalog.cart());
    let address = delivery_address();
    Html(render_checkout(&summary, &address, CHECKOUT_ORDER_ID))
}

pub async fn order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<OrderQuery>,
) -> Html<String> {
    let order = state.catalog.order(&id, query.paid.unwrap_or(true));
    Html(render_order(&order))
}

pub async fn product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let product = state
        .catalog
        .find(&slug)
        .ok_or_else(|| AppError::not_found(format!("no product named {slug}")))?;
    Ok(Html(render_slideshow(&Slideshow::for_product(product))))
}

/// Snapshot of both stores plus the memoized table, with blank forms.
async fn dashboard(state: &AppState) -> Dashboard {
    let habits = state.habits.lock().await;
    let records = state.records.lock().await;
    let mut table = state.table.lock().await;
    let rows = table.rows(&habits, &records, state.refresh_counter()).to_vec();
    let first_habit = habits.habits().first().map_or(0, |habit| habit.id);

    Dashboard {
        theme: state.config.theme,
        habits: habits.habits().to_vec(),
        records: records.records().to_vec(),
        rows,
        habit_form: HabitForm {
            frequency: "Diaria".to_string(),
            ..HabitForm::default()
        },
        record_form: RecordForm::blank(first_habit, Local::now().date_naive()),
        load_error: habits.load_failed().then(|| CONNECTION_ERROR.to_string()),
        ..Dashboard::default()
    }
}

fn rejected(err: &FormError, view: &Dashboard) -> Response {
    (err.status(), Html(render_dashboard(view))).into_response()
}
