use crate::error;
use core::num::NonZeroUsize;

/// Extracts the 1-based `page` parameter, defaulting to the first page. Zero, negative
/// and non-numeric values are rejected.
pub fn page(query: Option<&str>) -> error::Result<NonZeroUsize> {
    let value = query
        .into_iter()
        .flat_map(|query| query.split('&'))
        .find_map(|pair| pair.strip_prefix("page="));
    match value {
        Some(value) => value.parse().map_err(|_| error::Error::BadRequest),
        None => Ok(NonZeroUsize::MIN),
    }
}

/// Parses a path segment as a row identifier. A malformed identifier cannot name an
/// existing row, hence the `NotFound`.
pub fn id(segment: &str) -> error::Result<i32> {
    segment.parse().map_err(|_| error::Error::NotFound)
}
