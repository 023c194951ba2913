//! Request body extraction.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body that falls back to `T::default()` when the body is missing,
/// malformed or of the wrong shape.
///
/// Handlers then report the missing field with their own 400 message instead
/// of axum's rejection text.
#[derive(Debug)]
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            ApiError::bad_request("Failed to read request body").with_details(e.to_string())
        })?;

        let value = match serde_json::from_slice::<T>(&bytes) {
            Ok(value) => value,
            Err(e) => {
                if !bytes.is_empty() {
                    tracing::debug!(error = %e, "Ignoring unparseable request body");
                }
                T::default()
            }
        };
        Ok(LenientJson(value))
    }
}
