use crate::{
    error,
    util::response::{json, Reply},
};
use core::num::NonZeroUsize;
use db::Store;
use model::response::{category_map, Categories, QuestionPage};

pub async fn list<S: Store>(store: &S) -> error::Result<Reply> {
    let categories = category_map(store.categories().await?);
    json(&Categories { success: true, categories: &categories })
}

/// Lists one page of the questions in a category.
pub async fn questions<S: Store>(store: &S, id: i32, page: NonZeroUsize) -> error::Result<Reply> {
    let category = store.category(id).await?;
    let questions = store.questions_by_category(id).await?;
    let current = quiz::paginate(&questions, page, quiz::PAGE_SIZE);
    if current.is_empty() {
        return Err(error::Error::NotFound);
    }

    json(&QuestionPage {
        success: true,
        questions: current,
        total_questions: questions.len(),
        current_category: Some(&category.kind),
        categories: None,
    })
}
