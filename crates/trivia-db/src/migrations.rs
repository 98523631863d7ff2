use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Trivia DB: running migration v1 (initial schema)");
        // questions.category is a plain integer, not a foreign key.
        conn.execute_batch(
            "
            CREATE TABLE categories (
                id      INTEGER PRIMARY KEY,
                type    TEXT NOT NULL
            );

            CREATE TABLE questions (
                id          INTEGER PRIMARY KEY,
                question    TEXT NOT NULL,
                answer      TEXT NOT NULL,
                category    INTEGER NOT NULL,
                difficulty  INTEGER NOT NULL
            );

            CREATE INDEX idx_questions_category ON questions(category);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
