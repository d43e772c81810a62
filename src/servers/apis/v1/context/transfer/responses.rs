//! API responses for the [`transfer`](crate::servers::apis::v1::context::transfer)
//! API context.
use axum::response::Json;

use super::resources::Transfer;
use crate::core::services::transfer::Info;

/// `200` response that contains a [`Transfer`] resource as json.
#[must_use]
pub fn transfer_response(info: Info) -> Json<Transfer> {
    Json(Transfer::from(info))
}

/// `200` response that contains an array of [`Transfer`] resources as json.
#[must_use]
pub fn transfer_list_response(infos: Vec<Info>) -> Json<Vec<Transfer>> {
    Json(infos.into_iter().map(Transfer::from).collect())
}
