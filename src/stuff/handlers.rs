//! `/stuff` handlers. Each one is a single store call between decoding the
//! request and encoding the response.

use http::header::LOCATION;
use http::{HeaderValue, StatusCode};
use tracing::{debug, info};

use super::error::ApiError;
use super::id::StuffId;
use super::model::NewStuff;
use crate::app::AppState;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};

/// `GET /stuff`
pub async fn list(_req: Request, state: AppState) -> Result<Response, ApiError> {
    let all = state.store.find_all().await?;
    debug!(count = all.len(), "listed stuff");
    Ok(Json(all).into_response())
}

/// `GET /stuff/{id}`
pub async fn get(req: Request, state: AppState) -> Result<Response, ApiError> {
    let id = path_id(&req)?;
    let stuff = state.store.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(stuff).into_response())
}

/// `POST /stuff`
///
/// The id is always generated here; whatever the client sent is dropped by
/// [`NewStuff::decode`].
pub async fn create(req: Request, state: AppState) -> Result<Response, ApiError> {
    let stuff = NewStuff::decode(req.body())?.with_id(StuffId::generate());
    state.store.insert(&stuff).await?;
    info!(id = %stuff.id, "created stuff");

    let body = serde_json::to_vec(&stuff).map_err(ApiError::Encode)?;
    let mut builder = Response::builder().status(StatusCode::CREATED);

    let location = format!("{}/stuff/{}", req.host().unwrap_or_default(), stuff.id);
    match HeaderValue::from_str(&location) {
        Ok(value) => builder = builder.header(LOCATION, value),
        Err(e) => debug!(error = %e, %location, "location header not representable"),
    }

    Ok(builder.json(body))
}

/// `DELETE /stuff/{id}`
pub async fn delete(req: Request, state: AppState) -> Result<StatusCode, ApiError> {
    let id = path_id(&req)?;
    match state.store.delete_by_id(id).await? {
        0 => Err(ApiError::NotFound),
        _ => {
            info!(%id, "deleted stuff");
            Ok(StatusCode::OK)
        }
    }
}

fn path_id(req: &Request) -> Result<StuffId, ApiError> {
    Ok(StuffId::parse(req.param("id").unwrap_or_default())?)
}
