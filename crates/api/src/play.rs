use crate::{
    error,
    util::response::{json, Reply},
};
use alloc::collections::BTreeSet;
use db::Store;
use model::{request::Quiz, response::QuizStep};
use quiz::Selection;

/// Draws the next unseen question for a quiz session. The client resubmits the
/// full history on every call, so nothing is kept between requests.
pub async fn next<S: Store>(store: &S, request: Quiz) -> error::Result<Reply> {
    let Quiz { quiz_category, previous_questions } = request;
    let pool = match quiz_category.filter() {
        Some(category) => store.questions_by_category(category).await?,
        None => store.questions().await?,
    };

    let shown: BTreeSet<_> = previous_questions.into_iter().collect();
    let selection = quiz::select(&pool, &shown, &mut rand::thread_rng()).map_err(|err| {
        log::info!("quiz over category {} has no candidates: {err}", quiz_category.id);
        error::Error::NotFound
    })?;

    let question = match selection {
        Selection::Found(question) => Some(question),
        Selection::Exhausted => {
            log::debug!("quiz exhausted after {} questions", shown.len());
            None
        }
    };
    json(&QuizStep { success: true, question })
}
