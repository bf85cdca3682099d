//! In-process [`Store`] with the same constraints as the PostgreSQL schema. Every
//! operation runs under a single lock, so writes are never partially visible.

use crate::{error, Store};
use model::{Category, NewQuestion, Question};
use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i32, String>,
    questions: BTreeMap<i32, Question>,
    last_id: i32,
}

#[derive(Default)]
pub struct MemoryStore(Mutex<Tables>);

impl MemoryStore {
    pub fn new<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = Category>,
    {
        let categories = categories.into_iter().map(|Category { id, kind }| (id, kind)).collect();
        Self(Mutex::new(Tables { categories, ..Default::default() }))
    }

    fn tables(&self) -> error::Result<MutexGuard<'_, Tables>> {
        self.0.lock().map_err(|_| error::Error::Fatal)
    }
}

impl Store for MemoryStore {
    async fn categories(&self) -> error::Result<Vec<Category>> {
        let tables = self.tables()?;
        Ok(tables.categories.iter().map(|(&id, kind)| Category { id, kind: kind.clone() }).collect())
    }

    async fn category(&self, id: i32) -> error::Result<Category> {
        let tables = self.tables()?;
        let kind = tables.categories.get(&id).ok_or(error::Error::NotFound)?.clone();
        Ok(Category { id, kind })
    }

    async fn questions(&self) -> error::Result<Vec<Question>> {
        Ok(self.tables()?.questions.values().cloned().collect())
    }

    async fn questions_by_category(&self, category: i32) -> error::Result<Vec<Question>> {
        let tables = self.tables()?;
        Ok(tables.questions.values().filter(|q| q.category == category).cloned().collect())
    }

    async fn search_questions(&self, term: &str) -> error::Result<Vec<Question>> {
        let tables = self.tables()?;
        Ok(quiz::search(tables.questions.values(), term).cloned().collect())
    }

    async fn question(&self, id: i32) -> error::Result<Question> {
        self.tables()?.questions.get(&id).cloned().ok_or(error::Error::NotFound)
    }

    async fn insert_question(&self, question: NewQuestion) -> error::Result<Question> {
        let mut tables = self.tables()?;
        if !tables.categories.contains_key(&question.category)
            || question.question.is_empty()
            || question.answer.is_empty()
            || !(1..=5).contains(&question.difficulty)
        {
            return Err(error::Error::BadInput);
        }

        let id = tables.last_id.checked_add(1).ok_or(error::Error::Fatal)?;
        tables.last_id = id;
        let question = question.with_id(id);
        tables.questions.insert(id, question.clone());
        Ok(question)
    }

    async fn delete_question(&self, id: i32) -> error::Result<()> {
        self.tables()?.questions.remove(&id).map(drop).ok_or(error::Error::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::{error::Error, Store};
    use model::{Category, NewQuestion};

    fn store() -> MemoryStore {
        MemoryStore::new([
            Category { id: 1, kind: String::from("Science") },
            Category { id: 3, kind: String::from("Geography") },
        ])
    }

    fn new_question(text: &str, category: i32) -> NewQuestion {
        NewQuestion { question: text.into(), answer: String::from("Paris"), category, difficulty: 2 }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn assigns_unique_ids() {
        let store = store();
        let first = store.insert_question(new_question("What is the capital of France?", 3)).await.unwrap();
        let second = store.insert_question(new_question("What is the capital of Italy?", 3)).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.question(first.id).await.unwrap(), first);

        // Identifiers are not reused after deletion.
        store.delete_question(second.id).await.unwrap();
        let third = store.insert_question(new_question("Which river flows through Cairo?", 3)).await.unwrap();
        assert!(third.id > second.id);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn lists_in_id_order() {
        let store = store();
        for (text, category) in [("Why is the sky blue?", 1), ("Where is Lima?", 3), ("What is H2O?", 1)] {
            store.insert_question(new_question(text, category)).await.unwrap();
        }

        let all: Vec<_> = store.questions().await.unwrap().into_iter().map(|q| q.id).collect();
        assert_eq!(all, [1, 2, 3]);
        let science: Vec<_> = store.questions_by_category(1).await.unwrap().into_iter().map(|q| q.id).collect();
        assert_eq!(science, [1, 3]);
        assert!(store.questions_by_category(2).await.unwrap().is_empty());

        let categories = store.categories().await.unwrap();
        assert_eq!(categories.iter().map(|c| c.id).collect::<Vec<_>>(), [1, 3]);
        assert_eq!(store.category(3).await.unwrap().kind, "Geography");
        assert_eq!(store.category(2).await, Err(Error::NotFound));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn searches_case_insensitively() {
        let store = store();
        let capital = store.insert_question(new_question("What is the capital of France?", 3)).await.unwrap();
        store.insert_question(new_question("Why is the sky blue?", 1)).await.unwrap();
        assert_eq!(store.search_questions("CAPITAL").await.unwrap(), [capital]);
        assert!(store.search_questions("zzz99").await.unwrap().is_empty());

        let accented = store.insert_question(new_question("Which river flows through MÜNCHEN and the Straße?", 3)).await.unwrap();
        assert_eq!(store.search_questions("münchen").await.unwrap(), [accented]);
        assert!(store.search_questions("STRASSE").await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn delete_removes_only_existing() {
        let store = store();
        let question = store.insert_question(new_question("Where is Lima?", 3)).await.unwrap();
        store.delete_question(question.id).await.unwrap();
        assert!(store.questions().await.unwrap().is_empty());
        assert_eq!(store.question(question.id).await, Err(Error::NotFound));

        let kept = store.insert_question(new_question("Where is Quito?", 3)).await.unwrap();
        assert_eq!(store.delete_question(question.id).await, Err(Error::NotFound));
        assert_eq!(store.delete_question(9999).await, Err(Error::NotFound));
        assert_eq!(store.questions().await.unwrap(), [kept]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn rejects_invalid_questions() {
        let store = store();
        assert_eq!(store.insert_question(new_question("Orphan?", 2)).await, Err(Error::BadInput));
        assert_eq!(store.insert_question(new_question("", 1)).await, Err(Error::BadInput));

        let mut too_hard = new_question("Too hard?", 1);
        too_hard.difficulty = 6;
        assert_eq!(store.insert_question(too_hard).await, Err(Error::BadInput));

        let mut no_answer = new_question("No answer?", 1);
        no_answer.answer.clear();
        assert_eq!(store.insert_question(no_answer).await, Err(Error::BadInput));

        assert!(store.questions().await.unwrap().is_empty());
    }
}
