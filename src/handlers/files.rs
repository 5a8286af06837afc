//! `/files/{name}`: download with GET, upload with POST.

use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};
use crate::store::{FileStore, StoreError};

pub const PREFIX: &str = "/files/";

pub async fn handle(store: Option<&FileStore>, req: &Request) -> Response {
    let Some(store) = store else {
        tracing::error!(path = %req.path, "File directory not configured, cannot serve /files/");
        return Response::internal_error();
    };

    let name = req.path.strip_prefix(PREFIX).unwrap_or_default();

    match req.method {
        Method::GET => serve(store, name).await,
        Method::POST => upload(store, name, &req.body).await,
        _ => Response::not_found(),
    }
}

async fn serve(store: &FileStore, name: &str) -> Response {
    match store.read(name).await {
        Ok(contents) => Response::octet_stream(contents),
        Err(e) => {
            tracing::debug!(file = name, error = %e, "Cannot serve file");
            Response::not_found()
        }
    }
}

async fn upload(store: &FileStore, name: &str, body: &[u8]) -> Response {
    match store.write(name, body).await {
        Ok(()) => {
            tracing::info!(file = name, bytes = body.len(), "Stored upload");
            Response::empty(StatusCode::Created)
        }
        Err(e @ (StoreError::InvalidName(_) | StoreError::OutsideRoot(_))) => {
            tracing::warn!(file = name, error = %e, "Rejected upload");
            Response::not_found()
        }
        Err(e) => {
            tracing::error!(file = name, error = %e, "Failed to store upload");
            Response::internal_error()
        }
    }
}
