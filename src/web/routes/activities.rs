use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::database::{ActivityDirectory, SharedDirectory};
use crate::services::activity_signup_service;
use crate::web::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn list_activities_handler(
    State(directory): State<SharedDirectory>,
) -> Json<ActivityDirectory> {
    Json(activity_signup_service::list_activities(&directory).await)
}

pub async fn signup_handler(
    Path(activity_name): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
    State(directory): State<SharedDirectory>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(query) = query.map_err(|e| {
        warn!(activity = %activity_name, error = %e, "signup query rejected");
        e
    })?;
    let message = activity_signup_service::signup(&directory, &activity_name, &query.email)
        .await
        .map_err(|e| {
            warn!(activity = %activity_name, email = %query.email, error = %e, "signup rejected");
            e
        })?;
    Ok(Json(MessageResponse { message }))
}

pub async fn unregister_handler(
    Path(activity_name): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
    State(directory): State<SharedDirectory>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(query) = query.map_err(|e| {
        warn!(activity = %activity_name, error = %e, "unregister query rejected");
        e
    })?;
    let message = activity_signup_service::unregister(&directory, &activity_name, &query.email)
        .await
        .map_err(|e| {
            warn!(activity = %activity_name, email = %query.email, error = %e, "unregister rejected");
            e
        })?;
    Ok(Json(MessageResponse { message }))
}
