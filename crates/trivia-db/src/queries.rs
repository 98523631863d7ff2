use crate::Database;
use crate::models::{CategoryRow, NewQuestion, QuestionRow};
use anyhow::Result;
use rusqlite::{Connection, Row, ToSql};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

impl Database {
    // -- Categories --

    pub fn list_categories(&self) -> Result<Vec<CategoryRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, type FROM categories ORDER BY id")?;
            let rows = stmt
                .query_map([], category_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_category(&self, id: i64) -> Result<Option<CategoryRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, type FROM categories WHERE id = ?1",
                [id],
                category_from_row,
            )
            .optional()
        })
    }

    // -- Questions --

    pub fn list_questions(&self) -> Result<Vec<QuestionRow>> {
        self.with_conn(|conn| {
            query_questions(
                conn,
                &format!("SELECT {} FROM questions ORDER BY id", QUESTION_COLUMNS),
                &[],
            )
        })
    }

    pub fn insert_question(&self, new: &NewQuestion) -> Result<QuestionRow> {
        self.with_tx(|conn| {
            conn.execute(
                "INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![new.question, new.answer, new.category, new.difficulty],
            )?;
            Ok(QuestionRow {
                id: conn.last_insert_rowid(),
                question: new.question.clone(),
                answer: new.answer.clone(),
                category: new.category,
                difficulty: new.difficulty,
            })
        })
    }

    /// Returns `false` if no question has this id.
    pub fn delete_question(&self, id: i64) -> Result<bool> {
        self.with_tx(|conn| Ok(conn.execute("DELETE FROM questions WHERE id = ?1", [id])? > 0))
    }

    /// Case-insensitive substring match on the question text. Case folding
    /// covers all of Unicode, not just ASCII.
    pub fn search_questions(&self, term: &str) -> Result<Vec<QuestionRow>> {
        let pattern = like_pattern(term);
        self.with_conn(|conn| {
            query_questions(
                conn,
                &format!(
                    "SELECT {} FROM questions WHERE casefold(question) LIKE ?1 ESCAPE '\\' ORDER BY id",
                    QUESTION_COLUMNS
                ),
                &[&pattern],
            )
        })
    }

    pub fn questions_in_category(&self, category: i64) -> Result<Vec<QuestionRow>> {
        self.with_conn(|conn| {
            query_questions(
                conn,
                &format!(
                    "SELECT {} FROM questions WHERE category = ?1 ORDER BY id",
                    QUESTION_COLUMNS
                ),
                &[&category],
            )
        })
    }

    /// Questions whose id is not in `exclude`, restricted to `category` when given.
    pub fn quiz_candidates(&self, category: Option<i64>, exclude: &[i64]) -> Result<Vec<QuestionRow>> {
        self.with_conn(|conn| {
            let mut params: Vec<&dyn ToSql> = Vec::with_capacity(exclude.len() + 1);
            let mut clauses: Vec<String> = Vec::new();

            if let Some(category) = category.as_ref() {
                params.push(category);
                clauses.push(format!("category = ?{}", params.len()));
            }

            if !exclude.is_empty() {
                let offset = params.len();
                let placeholders: Vec<String> = (1..=exclude.len())
                    .map(|i| format!("?{}", offset + i))
                    .collect();
                clauses.push(format!("id NOT IN ({})", placeholders.join(", ")));
                params.extend(exclude.iter().map(|id| id as &dyn ToSql));
            }

            let mut sql = format!("SELECT {} FROM questions", QUESTION_COLUMNS);
            if !clauses.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&clauses.join(" AND "));
            }
            sql.push_str(" ORDER BY id");

            query_questions(conn, &sql, &params)
        })
    }
}

fn query_questions(conn: &Connection, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<QuestionRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, question_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<CategoryRow> {
    Ok(CategoryRow {
        id: row.get(0)?,
        kind: row.get(1)?,
    })
}

fn question_from_row(row: &Row<'_>) -> rusqlite::Result<QuestionRow> {
    Ok(QuestionRow {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        category: row.get(3)?,
        difficulty: row.get(4)?,
    })
}

/// Lowercased `%term%` with the term's own wildcards escaped, for
/// `casefold(col) LIKE ... ESCAPE '\'`.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
