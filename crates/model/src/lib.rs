#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod question;
pub mod request;
pub mod response;

pub use question::{Category, NewQuestion, Question};
