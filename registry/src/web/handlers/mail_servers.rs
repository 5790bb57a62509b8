//! Mail server CRUD endpoints.
//!
//! Every handler resolves to exactly one envelope: the record (or summary) on
//! success, or a single error code on failure.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, info};

use super::common::{error_response, parse_body, ApiEnvelope, ApiResult};
use crate::constants::messages;
use crate::database::{DeletedServerSummary, MailServerRecord};
use crate::errors::RegistryError;
use crate::services::{normalize_server_id, CreateMailServerRequest, UpdateMailServerRequest};
use crate::web::AppState;

pub async fn add_mail_server(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<MailServerRecord> {
    let req: CreateMailServerRequest = match parse_body(&body) {
        Ok(req) => req,
        Err(e) => return Err(error_response(e, messages::ADD_FAILED)),
    };

    match state.mail_servers.create(req).await {
        Ok(server) => {
            info!("Mail server {} added", server.server_id);
            Ok((
                StatusCode::CREATED,
                Json(ApiEnvelope::success(server).with_message(messages::SERVER_ADDED)),
            ))
        }
        Err(e) => Err(error_response(e, messages::ADD_FAILED)),
    }
}

pub async fn get_all_mail_servers(State(state): State<AppState>) -> ApiResult<Vec<MailServerRecord>> {
    match state.mail_servers.list_all().await {
        Ok(servers) => {
            debug!("Listing {} mail servers", servers.len());
            let count = servers.len();
            Ok((
                StatusCode::OK,
                Json(ApiEnvelope::success(servers).with_count(count)),
            ))
        }
        Err(e) => Err(error_response(e, messages::LIST_FAILED)),
    }
}

pub async fn get_mail_server_by_id(
    Path(server_id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<MailServerRecord> {
    match state.mail_servers.get_by_id(&server_id).await {
        Ok(server) => Ok((StatusCode::OK, Json(ApiEnvelope::success(server)))),
        Err(e) => Err(error_response(e, messages::FETCH_FAILED)),
    }
}

pub async fn update_mail_server_by_id(
    Path(server_id): Path<String>,
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<MailServerRecord> {
    // The id is checked before the body is looked at.
    let server_id = match normalize_server_id(&server_id) {
        Ok(id) => id,
        Err(e) => return Err(error_response(e, messages::UPDATE_FAILED)),
    };
    let req: UpdateMailServerRequest = match parse_body(&body) {
        Ok(req) => req,
        Err(e) => return Err(error_response(e, messages::UPDATE_FAILED)),
    };

    match state.mail_servers.update(&server_id, req).await {
        Ok(server) => Ok((
            StatusCode::OK,
            Json(ApiEnvelope::success(server).with_message(messages::SERVER_UPDATED)),
        )),
        Err(e) => Err(error_response(e, messages::UPDATE_FAILED)),
    }
}

pub async fn delete_mail_server_by_id(
    Path(server_id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<DeletedServerSummary> {
    match state.mail_servers.delete(&server_id).await {
        Ok(summary) => Ok((
            StatusCode::OK,
            Json(ApiEnvelope::success(summary).with_message(messages::SERVER_DELETED)),
        )),
        Err(e) => Err(error_response(e, messages::DELETE_FAILED)),
    }
}

/// Routed at the id-less paths (`/get/server/` and friends).
pub async fn missing_server_id() -> ApiResult<()> {
    Err(error_response(RegistryError::MissingId, messages::FETCH_FAILED))
}
