#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod page;
mod search;
mod select;

pub use page::{paginate, PAGE_SIZE};
pub use search::{matches, search};
pub use select::{select, EmptyPool, Selection};
