use crate::error;
use http_body_util::{BodyExt, Limited};
use hyper::body::Body;
use serde::de::DeserializeOwned;
use std::error::Error as StdError;

/// Largest request body we are willing to buffer.
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Buffers the whole body and parses it as JSON.
pub async fn read_json<B, T>(body: B) -> error::Result<T>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
    T: DeserializeOwned,
{
    let bytes = Limited::new(body, MAX_BODY_SIZE)
        .collect()
        .await
        .map_err(|err| {
            log::warn!("cannot read request body: {err}");
            error::Error::BadRequest
        })?
        .to_bytes();
    serde_json::from_slice(&bytes).map_err(|err| {
        log::info!("rejected request body: {err}");
        error::Error::BadRequest
    })
}
