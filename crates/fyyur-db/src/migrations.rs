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
        info!("Fyyur DB: running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE venues (
                id                  INTEGER PRIMARY KEY,
                name                TEXT NOT NULL,
                city                TEXT NOT NULL,
                state               TEXT NOT NULL,
                address             TEXT NOT NULL,
                phone               TEXT,
                image_link          TEXT,
                facebook_link       TEXT,
                genres              TEXT NOT NULL DEFAULT '[]',
                website             TEXT,
                seeking_talent      INTEGER NOT NULL DEFAULT 0,
                seeking_description TEXT
            );

            CREATE INDEX idx_venues_area ON venues(city, state);

            CREATE TABLE artists (
                id                  INTEGER PRIMARY KEY,
                name                TEXT NOT NULL,
                city                TEXT NOT NULL,
                state               TEXT NOT NULL,
                phone               TEXT,
                image_link          TEXT,
                facebook_link       TEXT,
                genres              TEXT NOT NULL DEFAULT '[]',
                website             TEXT,
                seeking_venue       INTEGER NOT NULL DEFAULT 0,
                seeking_description TEXT
            );

            CREATE TABLE shows (
                id          INTEGER PRIMARY KEY,
                start_time  TEXT NOT NULL,
                artist_id   INTEGER NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
                venue_id    INTEGER NOT NULL REFERENCES venues(id) ON DELETE CASCADE
            );

            CREATE INDEX idx_shows_venue ON shows(venue_id, start_time);
            CREATE INDEX idx_shows_artist ON shows(artist_id, start_time);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
