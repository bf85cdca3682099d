use crate::error;
use http_body_util::Full;
use hyper::{
    body::Bytes,
    header::{
        HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
        ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
    },
    Response, StatusCode,
};
use model::response::Failure;
use serde::Serialize;

pub type Reply = Response<Full<Bytes>>;

const APPLICATION_JSON: &str = "application/json";

pub fn json<T: Serialize>(payload: &T) -> error::Result<Reply> {
    let bytes = serde_json::to_vec(payload).map_err(|err| {
        log::error!("cannot serialize response: {err}");
        error::Error::Fatal
    })?;
    let mut res = Response::new(Full::new(Bytes::from(bytes)));
    assert!(res.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON)).is_none());
    Ok(res)
}

pub fn no_content() -> Reply {
    let mut res = Response::new(Full::default());
    *res.status_mut() = StatusCode::NO_CONTENT;
    res
}

pub fn failure(err: &error::Error) -> Reply {
    let status = err.status();
    let text = err.to_string();
    let payload = Failure { success: false, error: status.as_u16(), message: &text };
    let mut res = json(&payload).unwrap_or_else(|_| Response::new(Full::default()));
    *res.status_mut() = status;
    res
}

/// The question board is public, so any origin may call it.
pub fn allow_cors(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type, Authorization"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET, POST, DELETE, OPTIONS"));
}
