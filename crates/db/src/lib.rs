pub mod error;
pub mod memory;

use core::{
    fmt::Display,
    future::{self, Future},
};
use futures_util::TryStreamExt;
use model::{Category, NewQuestion, Question};
use tokio_postgres::{error::SqlState, types::BorrowToSql, Row};

pub use memory::MemoryStore;
pub use tokio_postgres::{tls::NoTls, Client, Config};

/// Statements applied on startup. Safe to run against an initialized database.
pub const SCHEMA: &str = include_str!("../schema.sql");

/// Durable collection of questions and categories. Listings are ordered by identifier
/// so that pagination over them is reproducible.
pub trait Store {
    fn categories(&self) -> impl Future<Output = error::Result<Vec<Category>>> + Send;
    fn category(&self, id: i32) -> impl Future<Output = error::Result<Category>> + Send;
    fn questions(&self) -> impl Future<Output = error::Result<Vec<Question>>> + Send;
    fn questions_by_category(&self, category: i32) -> impl Future<Output = error::Result<Vec<Question>>> + Send;
    /// Questions whose text contains `term`, ignoring case. [`MemoryStore`] folds case
    /// with [`quiz::matches`], while [`Database`] relies on `ILIKE` and therefore on the
    /// database collation: a `C`-collated database folds ASCII only. Multi-character
    /// foldings like `ß` against `SS` match in neither store.
    fn search_questions(&self, term: &str) -> impl Future<Output = error::Result<Vec<Question>>> + Send;
    fn question(&self, id: i32) -> impl Future<Output = error::Result<Question>> + Send;
    /// Stores a new question and returns it with its freshly assigned identifier.
    /// Fails with [`BadInput`](error::Error::BadInput) if the category does not exist.
    fn insert_question(&self, question: NewQuestion) -> impl Future<Output = error::Result<Question>> + Send;
    fn delete_question(&self, id: i32) -> impl Future<Output = error::Result<()>> + Send;
}

pub struct Database(Client);

impl From<Client> for Database {
    fn from(client: Client) -> Self {
        Self(client)
    }
}

fn deserialize_category_from_row(row: Row) -> error::Result<Category> {
    let id = row.try_get("id").map_err(|_| error::Error::Fatal)?;
    let kind = row.try_get("type").map_err(|_| error::Error::Fatal)?;
    Ok(Category { id, kind })
}

fn deserialize_question_from_row(row: Row) -> Result<Question, tokio_postgres::Error> {
    let id = row.try_get("id")?;
    let question = row.try_get("question")?;
    let answer = row.try_get("answer")?;
    let category = row.try_get("category")?;
    let difficulty = row.try_get("difficulty")?;
    Ok(Question { id, question, answer, category, difficulty })
}

/// Escapes the wildcards of a `LIKE` pattern so that `term` is matched literally.
fn escape_like(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn fatal<E: Display>(err: E) -> error::Error {
    log::error!("database error: {err}");
    error::Error::Fatal
}

impl Database {
    pub async fn init_schema(&self) -> error::Result<()> {
        self.0.batch_execute(SCHEMA).await.map_err(fatal)
    }

    async fn query_questions<P, I>(&self, statement: &str, params: I) -> error::Result<Vec<Question>>
    where
        P: BorrowToSql,
        I: IntoIterator<Item = P>,
        I::IntoIter: ExactSizeIterator,
    {
        self.0
            .query_raw(statement, params)
            .await
            .map_err(fatal)?
            .map_err(fatal)
            .and_then(|row| future::ready(deserialize_question_from_row(row).map_err(fatal)))
            .try_collect()
            .await
    }
}

impl Store for Database {
    async fn categories(&self) -> error::Result<Vec<Category>> {
        self.0
            .query("SELECT id, type FROM category ORDER BY id", &[])
            .await
            .map_err(fatal)?
            .into_iter()
            .map(deserialize_category_from_row)
            .collect()
    }

    async fn category(&self, id: i32) -> error::Result<Category> {
        let row = self
            .0
            .query_opt("SELECT id, type FROM category WHERE id = $1", &[&id])
            .await
            .map_err(fatal)?
            .ok_or(error::Error::NotFound)?;
        deserialize_category_from_row(row)
    }

    async fn questions(&self) -> error::Result<Vec<Question>> {
        self.query_questions(
            "SELECT id, question, answer, category, difficulty FROM question ORDER BY id",
            core::iter::empty::<i32>(),
        )
        .await
    }

    async fn questions_by_category(&self, category: i32) -> error::Result<Vec<Question>> {
        self.query_questions(
            "SELECT id, question, answer, category, difficulty FROM question WHERE category = $1 ORDER BY id",
            [category],
        )
        .await
    }

    async fn search_questions(&self, term: &str) -> error::Result<Vec<Question>> {
        let pattern = escape_like(term);
        self.query_questions(
            "SELECT id, question, answer, category, difficulty FROM question WHERE question ILIKE $1 ORDER BY id",
            [pattern],
        )
        .await
    }

    async fn question(&self, id: i32) -> error::Result<Question> {
        let row = self
            .0
            .query_opt("SELECT id, question, answer, category, difficulty FROM question WHERE id = $1", &[&id])
            .await
            .map_err(fatal)?
            .ok_or(error::Error::NotFound)?;
        deserialize_question_from_row(row).map_err(fatal)
    }

    async fn insert_question(&self, question: NewQuestion) -> error::Result<Question> {
        let err = match self
            .0
            .query_opt(
                "INSERT INTO question (question, answer, category, difficulty) VALUES ($1, $2, $3, $4) RETURNING id",
                &[&question.question, &question.answer, &question.category, &question.difficulty],
            )
            .await
        {
            Ok(row) => {
                let row = row.ok_or(error::Error::Fatal)?;
                let id = row.try_get("id").map_err(fatal)?;
                return Ok(question.with_id(id));
            }
            Err(err) => err,
        };

        let Some(db_err) = err.as_db_error() else {
            return Err(fatal(&err));
        };
        let constraint = db_err.constraint().unwrap_or_default();
        match (db_err.code(), constraint) {
            // The referenced category does not exist.
            (&SqlState::FOREIGN_KEY_VIOLATION, "question_category_fkey") => Err(error::Error::BadInput),
            // Empty text or out-of-range difficulty.
            (
                &SqlState::CHECK_VIOLATION,
                "question_question_check" | "question_answer_check" | "question_difficulty_check",
            ) => Err(error::Error::BadInput),
            _ => Err(fatal(&err)),
        }
    }

    async fn delete_question(&self, id: i32) -> error::Result<()> {
        match self.0.execute("DELETE FROM question WHERE id = $1", &[&id]).await {
            Ok(1) => Ok(()),
            Ok(0) => Err(error::Error::NotFound),
            Ok(_) => Err(error::Error::Fatal),
            Err(err) => Err(fatal(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_like, Config, Database, NewQuestion, NoTls, Store};
    use crate::error::Error;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("capital"), "%capital%");
        assert_eq!(escape_like("100%"), r"%100\%%");
        assert_eq!(escape_like(r"a_b\c"), r"%a\_b\\c%");
        assert_eq!(escape_like(""), "%%");
    }

    #[tokio::test(flavor = "current_thread")]
    #[ignore = "requires a PostgreSQL instance configured through PG_* variables"]
    async fn database_test() {
        use std::env::var;
        let user = var("PG_USERNAME").unwrap();
        let pass = var("PG_PASSWORD").unwrap();
        let host = var("PG_HOSTNAME").unwrap();
        let data = var("PG_DATABASE").unwrap();

        let (client, conn) = Config::new()
            .user(&user)
            .password(&pass)
            .host(&host)
            .dbname(&data)
            .port(5432)
            .connect(NoTls)
            .await
            .expect("cannot connect to database");
        let handle = tokio::spawn(conn);
        let db = Database::from(client);
        db.init_schema().await.unwrap();

        // Seeded categories
        let categories = db.categories().await.unwrap();
        assert!(categories.iter().any(|c| c.kind == "Geography"));
        assert_eq!(db.category(9999).await, Err(Error::NotFound));

        // Question creation
        let before = db.questions().await.unwrap().len();
        let created = db
            .insert_question(NewQuestion {
                question: String::from("What is the capital of France? 100% sure_"),
                answer: String::from("Paris"),
                category: 3,
                difficulty: 1,
            })
            .await
            .unwrap();
        assert_eq!(db.question(created.id).await.unwrap(), created);
        assert_eq!(db.questions().await.unwrap().len(), before + 1);
        assert!(db.questions_by_category(3).await.unwrap().contains(&created));

        // Literal wildcards and case-insensitivity
        assert!(db.search_questions("CAPITAL OF france").await.unwrap().contains(&created));
        assert!(db.search_questions("100% SURE_").await.unwrap().contains(&created));
        assert!(!db.search_questions("100%%").await.unwrap().contains(&created));

        // Non-ASCII folding, assuming a database created with a UTF-8 locale
        let accented = db
            .insert_question(NewQuestion {
                question: String::from("Which river flows through MÜNCHEN and the Straße?"),
                answer: String::from("Isar"),
                category: 3,
                difficulty: 2,
            })
            .await
            .unwrap();
        assert!(db.search_questions("münchen").await.unwrap().contains(&accented));
        assert!(db.search_questions("STRASSE").await.unwrap().is_empty());
        db.delete_question(accented.id).await.unwrap();

        // Constraint violations
        let orphan = NewQuestion {
            question: String::from("Orphan?"),
            answer: String::from("Yes"),
            category: 9999,
            difficulty: 1,
        };
        assert_eq!(db.insert_question(orphan).await, Err(Error::BadInput));
        let too_hard = NewQuestion {
            question: String::from("Too hard?"),
            answer: String::from("Yes"),
            category: 1,
            difficulty: 6,
        };
        assert_eq!(db.insert_question(too_hard).await, Err(Error::BadInput));
        assert_eq!(db.questions().await.unwrap().len(), before + 1);

        // Deletion
        db.delete_question(created.id).await.unwrap();
        assert_eq!(db.question(created.id).await, Err(Error::NotFound));
        assert_eq!(db.delete_question(created.id).await, Err(Error::NotFound));
        assert_eq!(db.questions().await.unwrap().len(), before);

        drop(db);
        handle.await.unwrap().unwrap();
    }
}
