use crate::{
    error,
    util::response::{json, Reply},
};
use core::num::NonZeroUsize;
use db::Store;
use model::{
    request::Search,
    response::{category_map, Created, Deleted, QuestionPage},
    NewQuestion,
};

pub async fn list<S: Store>(store: &S, page: NonZeroUsize) -> error::Result<Reply> {
    let questions = store.questions().await?;
    let current = quiz::paginate(&questions, page, quiz::PAGE_SIZE);
    if current.is_empty() {
        return Err(error::Error::NotFound);
    }

    let categories = category_map(store.categories().await?);
    json(&QuestionPage {
        success: true,
        questions: current,
        total_questions: questions.len(),
        current_category: None,
        categories: Some(&categories),
    })
}

pub async fn create<S: Store>(store: &S, new: NewQuestion) -> error::Result<Reply> {
    if new.question.trim().is_empty() || new.answer.trim().is_empty() {
        return Err(error::Error::BadRequest);
    }

    let question = store.insert_question(new).await?;
    log::info!("created question {} in category {}", question.id, question.category);

    let total_questions = store.questions().await?.len();
    json(&Created { success: true, created: question.id, question: &question, total_questions })
}

pub async fn search<S: Store>(store: &S, Search { search_term }: Search) -> error::Result<Reply> {
    if search_term.trim().is_empty() {
        return Err(error::Error::BadRequest);
    }

    let questions = store.search_questions(&search_term).await?;
    if questions.is_empty() {
        return Err(error::Error::NotFound);
    }

    json(&QuestionPage {
        success: true,
        questions: &questions,
        total_questions: questions.len(),
        current_category: None,
        categories: None,
    })
}

/// Removes a question, then replies with the requested page of what remains.
pub async fn delete<S: Store>(store: &S, id: i32, page: NonZeroUsize) -> error::Result<Reply> {
    store.delete_question(id).await?;
    log::info!("deleted question {id}");

    let questions = store.questions().await?;
    let current = quiz::paginate(&questions, page, quiz::PAGE_SIZE);
    json(&Deleted { success: true, deleted: id, questions: current, total_questions: questions.len() })
}
