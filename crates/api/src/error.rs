use core::fmt::{self, Display};
use hyper::StatusCode;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Malformed request: bad JSON, missing fields, invalid page number or empty search term.
    BadRequest,
    /// Unknown route or resource, or a listing with nothing to show.
    NotFound,
    /// The route exists but does not accept the request method.
    MethodNotAllowed,
    /// Well-formed request that the store could not carry out.
    Unprocessable,
    /// Unrecoverable error on our end.
    Fatal,
}

impl Error {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Fatal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BadRequest => "bad request",
            Self::NotFound => "resource not found",
            Self::MethodNotAllowed => "method not allowed",
            Self::Unprocessable => "unprocessable",
            Self::Fatal => "internal server error",
        })
    }
}

impl From<db::error::Error> for Error {
    fn from(err: db::error::Error) -> Self {
        match err {
            db::error::Error::NotFound => Self::NotFound,
            db::error::Error::BadInput | db::error::Error::Fatal => Self::Unprocessable,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
