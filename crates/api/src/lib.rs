extern crate alloc;

pub mod error;

mod categories;
mod play;
mod questions;
mod util;

use db::Store;
use hyper::{body::Body, Method, Request, Uri};
use std::error::Error as StdError;
use util::{
    body::read_json,
    query,
    response::{self, Reply},
};

pub use util::body::MAX_BODY_SIZE;

/// Serves a single request against the store. Failures are rendered as JSON error
/// bodies, so this never fails.
pub async fn try_respond<S, B>(req: Request<B>, store: &S) -> Reply
where
    S: Store,
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let (parts, body) = req.into_parts();
    log::debug!("{} {}", parts.method, parts.uri);

    let mut res = match route(&parts.method, &parts.uri, body, store).await {
        Ok(res) => res,
        Err(err) => {
            if err.status().is_server_error() {
                log::error!("{} {} failed: {err}", parts.method, parts.uri);
            } else {
                log::info!("{} {} rejected: {err}", parts.method, parts.uri);
            }
            response::failure(&err)
        }
    };

    response::allow_cors(res.headers_mut());
    res
}

async fn route<S, B>(method: &Method, uri: &Uri, body: B, store: &S) -> error::Result<Reply>
where
    S: Store,
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    // Preflight requests are answered for every path.
    if method == Method::OPTIONS {
        return Ok(response::no_content());
    }

    let segments: Vec<_> = uri.path().split('/').filter(|segment| !segment.is_empty()).collect();
    match (segments.as_slice(), method) {
        (["categories"], &Method::GET) => categories::list(store).await,
        (["categories", id, "questions"], &Method::GET) => {
            categories::questions(store, query::id(id)?, query::page(uri.query())?).await
        }
        (["questions"], &Method::GET) => questions::list(store, query::page(uri.query())?).await,
        (["questions"], &Method::POST) => questions::create(store, read_json(body).await?).await,
        (["questions", "search"], &Method::POST) => questions::search(store, read_json(body).await?).await,
        (["questions", id], &Method::DELETE) => {
            questions::delete(store, query::id(id)?, query::page(uri.query())?).await
        }
        // The misspelled route is what older clients still call.
        (["quizzes" | "quizzez"], &Method::POST) => play::next(store, read_json(body).await?).await,
        (
            ["categories"]
            | ["categories", _, "questions"]
            | ["questions"]
            | ["questions", _]
            | ["quizzes" | "quizzez"],
            _,
        ) => Err(error::Error::MethodNotAllowed),
        _ => Err(error::Error::NotFound),
    }
}
