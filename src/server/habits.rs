use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};

use crate::server::AppState;
use crate::server::dto::{CreateHabitRequest, ReplaceActivityRequest, UpdateHabitRequest};
use crate::server::extract::ApiJson;
use crate::server::response::{ApiError, MessageResponse};
use crate::server::validation::parse_habit_id;
use crate::types::HabitChanges;

pub fn habit_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/habits", get(list_habits).post(create_habit))
        .route(
            "/habits/{id}",
            get(get_habit).patch(update_habit).delete(delete_habit),
        )
        .route("/habits/{id}/activity", patch(replace_activity_log))
}

pub async fn list_habits(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let habits = state.habits.list_habits()?;

    Ok::<_, ApiError>(Json(habits))
}

pub async fn get_habit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = parse_habit_id(&id)?;
    let habit = state.habits.get_habit(id)?;

    Ok::<_, ApiError>(Json(habit))
}

pub async fn create_habit(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateHabitRequest>,
) -> impl IntoResponse {
    let habit = state.habits.create_habit(req.name, req.color)?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(habit)))
}

pub async fn update_habit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateHabitRequest>,
) -> impl IntoResponse {
    let id = parse_habit_id(&id)?;
    let changes = HabitChanges {
        name: req.name,
        color: req.color,
    };
    let habit = state.habits.update_habit(id, changes)?;

    Ok::<_, ApiError>(Json(habit))
}

pub async fn replace_activity_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ReplaceActivityRequest>,
) -> impl IntoResponse {
    let id = parse_habit_id(&id)?;
    let dates = req
        .activity_data
        .ok_or_else(|| ApiError::bad_request("activityData must be an array of dates"))?;
    let habit = state.habits.replace_activity_log(id, &dates)?;

    Ok::<_, ApiError>(Json(habit))
}

pub async fn delete_habit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = parse_habit_id(&id)?;
    state.habits.delete_habit(id)?;

    Ok::<_, ApiError>(Json(MessageResponse::new("Habit deleted successfully")))
}
