//! Success payloads. Every payload carries `"success": true` so that clients can
//! tell them apart from error bodies.

use crate::{Category, Question};
use alloc::{collections::BTreeMap, string::String};
use serde::Serialize;

/// Category labels keyed by their identifier.
pub type CategoryMap = BTreeMap<i32, String>;

pub fn category_map<I>(categories: I) -> CategoryMap
where
    I: IntoIterator<Item = Category>,
{
    categories.into_iter().map(|Category { id, kind }| (id, kind)).collect()
}

#[derive(Serialize)]
pub struct Categories<'a> {
    pub success: bool,
    pub categories: &'a CategoryMap,
}

/// One page of questions along with the size of the whole listing.
#[derive(Serialize)]
pub struct QuestionPage<'a> {
    pub success: bool,
    pub questions: &'a [Question],
    pub total_questions: usize,
    pub current_category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<&'a CategoryMap>,
}

#[derive(Serialize)]
pub struct Created<'a> {
    pub success: bool,
    pub created: i32,
    pub question: &'a Question,
    pub total_questions: usize,
}

#[derive(Serialize)]
pub struct Deleted<'a> {
    pub success: bool,
    pub deleted: i32,
    pub questions: &'a [Question],
    pub total_questions: usize,
}

/// Quiz step. A missing `question` signals that every candidate has been shown.
#[derive(Serialize)]
pub struct QuizStep<'a> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<&'a Question>,
}

#[derive(Serialize)]
pub struct Failure<'a> {
    pub success: bool,
    pub error: u16,
    pub message: &'a str,
}
