use core::num::NonZeroUsize;

/// Number of questions per page across the whole service.
pub const PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

/// Returns the 1-based `page` of `items` in chunks of `size`. Pages past the end
/// are empty rather than an error.
pub fn paginate<T>(items: &[T], page: NonZeroUsize, size: NonZeroUsize) -> &[T] {
    let start = (page.get() - 1).saturating_mul(size.get());
    let end = start.saturating_add(size.get()).min(items.len());
    items.get(start..end).unwrap_or_default()
}
