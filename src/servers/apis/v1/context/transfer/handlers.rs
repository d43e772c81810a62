//! API handlers for the [`transfer`](crate::servers::apis::v1::context::transfer)
//! API context.
use std::str::FromStr;
use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Json, Response};
use torrust_transfer_manager_primitives::{SpeedLimits, TransferId};
use tracing::debug;

use super::forms::{parse_scheduled_start, CreateParams, UpdateTransferForm, DESCRIPTOR_FIELD};
use super::responses::{transfer_list_response, transfer_response};
use crate::core::engine::adapter::CreateOptions;
use crate::core::error::Error;
use crate::core::services::transfer::{get_transfer_info, get_transfers, Info};
use crate::core::{Manager, TransferUpdate};
use crate::servers::apis::v1::responses::{
    error_response, invalid_request_response, invalid_transfer_id_param_response, ok_response,
};
use crate::servers::apis::API_LOG_TARGET;

/// It handles the request to create a transfer from an uploaded descriptor.
///
/// It returns:
///
/// - `200` with the json [`Transfer`](super::resources::Transfer) resource.
/// - `400` if the request is malformed or the descriptor is not valid.
/// - `500` if the engine rejected the transfer or the store is unavailable.
///
/// Refer to the [API endpoint documentation](crate::servers::apis::v1::context::transfer#create-a-transfer)
/// for more information about this endpoint.
pub async fn create_transfer_handler(
    State(manager): State<Arc<Manager>>,
    params: Result<Query<CreateParams>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return invalid_request_response(&rejection.body_text()),
    };

    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => return invalid_request_response(&rejection.body_text()),
    };

    let scheduled_start = match parse_scheduled_start(params.scheduled_start.as_deref()) {
        Ok(scheduled_start) => scheduled_start,
        Err(message) => return invalid_request_response(&message),
    };

    let (file_name, raw) = match read_descriptor(&mut multipart).await {
        Ok(Some(descriptor)) => descriptor,
        Ok(None) => {
            return error_response(&Error::invalid_metadata(format!(
                "missing the multipart field `{DESCRIPTOR_FIELD}`"
            )))
        }
        Err(err) => return invalid_request_response(&err.body_text()),
    };

    debug!(target: API_LOG_TARGET, %file_name, bytes = raw.len(), "create_transfer_handler");

    let options = CreateOptions {
        limits: SpeedLimits::new(params.download_limit, params.upload_limit),
        scheduled_start,
    };

    match manager.create(&file_name, raw, options).await {
        Ok(record) => transfer_response(Info { record, stale: false }).into_response(),
        Err(err) => error_response(&err),
    }
}

/// The name and the content of the first descriptor field.
async fn read_descriptor(multipart: &mut Multipart) -> Result<Option<(String, Vec<u8>)>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(DESCRIPTOR_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_owned();
        let raw = field.bytes().await?;

        return Ok(Some((file_name, raw.to_vec())));
    }

    Ok(None)
}

/// It handles the request to list all the stored transfers.
///
/// It returns a `200` response with a json array of
/// [`Transfer`](super::resources::Transfer) resources, most recently created
/// first.
pub async fn get_transfers_handler(State(manager): State<Arc<Manager>>) -> Response {
    match get_transfers(&manager) {
        Ok(infos) => transfer_list_response(infos).into_response(),
        Err(err) => error_response(&err),
    }
}

/// It handles the request to get one stored transfer.
///
/// It returns `200` with the json [`Transfer`](super::resources::Transfer)
/// resource or `404` if there is no record with that id.
pub async fn get_transfer_handler(State(manager): State<Arc<Manager>>, Path(id): Path<String>) -> Response {
    let Ok(id) = TransferId::from_str(&id) else {
        return invalid_transfer_id_param_response(&id);
    };

    match get_transfer_info(&manager, &id) {
        Ok(info) => transfer_response(info).into_response(),
        Err(err) => error_response(&err),
    }
}

/// It handles the request to pause a transfer.
///
/// It returns `200` with `{"status":"ok"}` or `404` if the transfer is not
/// attached to the engine.
pub async fn pause_transfer_handler(State(manager): State<Arc<Manager>>, Path(id): Path<String>) -> Response {
    let Ok(id) = TransferId::from_str(&id) else {
        return invalid_transfer_id_param_response(&id);
    };

    action_response(manager.pause(&id))
}

/// It handles the request to resume a transfer.
///
/// It returns `200` with `{"status":"ok"}` or `404` if the transfer is not
/// attached to the engine.
pub async fn resume_transfer_handler(State(manager): State<Arc<Manager>>, Path(id): Path<String>) -> Response {
    let Ok(id) = TransferId::from_str(&id) else {
        return invalid_transfer_id_param_response(&id);
    };

    action_response(manager.resume(&id))
}

/// It handles the request to change the speed limits or the scheduled start
/// of a transfer.
///
/// It returns `200` with `{"status":"ok"}`, `400` if the body is malformed or
/// `404` if the transfer is not attached to the engine.
pub async fn update_transfer_handler(
    State(manager): State<Arc<Manager>>,
    Path(id): Path<String>,
    form: Result<Json<UpdateTransferForm>, JsonRejection>,
) -> Response {
    let Ok(id) = TransferId::from_str(&id) else {
        return invalid_transfer_id_param_response(&id);
    };

    let Json(form) = match form {
        Ok(form) => form,
        Err(rejection) => return invalid_request_response(&rejection.body_text()),
    };

    let scheduled_start = match parse_scheduled_start(form.scheduled_start.as_deref()) {
        Ok(scheduled_start) => scheduled_start,
        Err(message) => return invalid_request_response(&message),
    };

    let update = TransferUpdate {
        limits: SpeedLimits::new(form.download_speed_limit, form.upload_speed_limit),
        scheduled_start,
    };

    action_response(manager.update_limits(&id, &update))
}

/// It handles the request to delete a transfer.
///
/// It returns `200` with `{"status":"ok"}`, also when there was nothing to
/// delete.
pub async fn delete_transfer_handler(State(manager): State<Arc<Manager>>, Path(id): Path<String>) -> Response {
    let Ok(id) = TransferId::from_str(&id) else {
        return invalid_transfer_id_param_response(&id);
    };

    action_response(manager.delete(&id).await)
}

fn action_response(result: Result<(), Error>) -> Response {
    match result {
        Ok(()) => ok_response(),
        Err(err) => error_response(&err),
    }
}
