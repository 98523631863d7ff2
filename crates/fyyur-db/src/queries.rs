use crate::models::{
    Area, ArtistFields, ArtistRow, NewShow, ShowRow, Summary, VenueFields, VenueRow,
};
use crate::{Database, TIMESTAMP_FORMAT, like_pattern};
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{Connection, Row};

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, image_link, facebook_link, \
     genres, website, seeking_talent, seeking_description";

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, image_link, facebook_link, \
     genres, website, seeking_venue, seeking_description";

const SHOW_SELECT: &str = "SELECT s.id, s.start_time, s.venue_id, v.name, v.image_link,
            s.artist_id, a.name, a.image_link
     FROM shows s
     JOIN venues v ON v.id = s.venue_id
     JOIN artists a ON a.id = s.artist_id";

impl Database {
    // -- Venues --

    /// All venues grouped by distinct (city, state), ordered by state then city.
    pub fn venue_areas(&self, now: NaiveDateTime) -> Result<Vec<Area>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT v.city, v.state, v.id, v.name,
                        (SELECT COUNT(*) FROM shows s WHERE s.venue_id = v.id AND s.start_time >= ?1)
                 FROM venues v
                 ORDER BY v.state, v.city, v.id",
            )?;

            let rows = stmt
                .query_map([timestamp(now)], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        Summary {
                            id: row.get(2)?,
                            name: row.get(3)?,
                            num_upcoming_shows: row.get(4)?,
                        },
                    ))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            let mut areas: Vec<Area> = Vec::new();
            for (city, state, summary) in rows {
                if let Some(area) = areas
                    .last_mut()
                    .filter(|a| a.city == city && a.state == state)
                {
                    area.venues.push(summary);
                    continue;
                }
                areas.push(Area {
                    city,
                    state,
                    venues: vec![summary],
                });
            }
            Ok(areas)
        })
    }

    pub fn search_venues(&self, term: &str, now: NaiveDateTime) -> Result<Vec<Summary>> {
        self.with_conn(|conn| {
            query_summaries(
                conn,
                "SELECT v.id, v.name,
                        (SELECT COUNT(*) FROM shows s WHERE s.venue_id = v.id AND s.start_time >= ?1)
                 FROM venues v
                 WHERE casefold(v.name) LIKE ?2 ESCAPE '\\'
                 ORDER BY v.id",
                now,
                Some(term),
            )
        })
    }

    pub fn get_venue(&self, id: i64) -> Result<Option<VenueRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {} FROM venues WHERE id = ?1", VENUE_COLUMNS);
            let row = conn.query_row(&sql, [id], venue_from_row).optional()?;
            Ok(row)
        })
    }

    pub fn venue_shows(&self, venue_id: i64) -> Result<Vec<ShowRow>> {
        self.with_conn(|conn| {
            query_shows(
                conn,
                &format!("{} WHERE s.venue_id = ?1 ORDER BY s.start_time", SHOW_SELECT),
                Some(venue_id),
            )
        })
    }

    pub fn create_venue(&self, venue: &VenueFields) -> Result<i64> {
        let genres = serde_json::to_string(&venue.genres)?;
        self.with_tx(|conn| {
            conn.execute(
                "INSERT INTO venues (name, city, state, address, phone, image_link, facebook_link,
                                     genres, website, seeking_talent, seeking_description)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                rusqlite::params![
                    venue.name,
                    venue.city,
                    venue.state,
                    venue.address,
                    venue.phone,
                    venue.image_link,
                    venue.facebook_link,
                    genres,
                    venue.website,
                    venue.seeking_talent,
                    venue.seeking_description,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Returns `false` if no venue has this id.
    pub fn update_venue(&self, id: i64, venue: &VenueFields) -> Result<bool> {
        let genres = serde_json::to_string(&venue.genres)?;
        self.with_tx(|conn| {
            let changed = conn.execute(
                "UPDATE venues SET name = ?2, city = ?3, state = ?4, address = ?5, phone = ?6,
                        image_link = ?7, facebook_link = ?8, genres = ?9, website = ?10,
                        seeking_talent = ?11, seeking_description = ?12
                 WHERE id = ?1",
                rusqlite::params![
                    id,
                    venue.name,
                    venue.city,
                    venue.state,
                    venue.address,
                    venue.phone,
                    venue.image_link,
                    venue.facebook_link,
                    genres,
                    venue.website,
                    venue.seeking_talent,
                    venue.seeking_description,
                ],
            )?;
            Ok(changed > 0)
        })
    }

    /// Deletes the venue and, by cascade, its shows. Returns `false` if no venue has this id.
    pub fn delete_venue(&self, id: i64) -> Result<bool> {
        self.with_tx(|conn| Ok(conn.execute("DELETE FROM venues WHERE id = ?1", [id])? > 0))
    }

    // -- Artists --

    pub fn list_artists(&self, now: NaiveDateTime) -> Result<Vec<Summary>> {
        self.with_conn(|conn| {
            query_summaries(
                conn,
                "SELECT a.id, a.name,
                        (SELECT COUNT(*) FROM shows s WHERE s.artist_id = a.id AND s.start_time >= ?1)
                 FROM artists a
                 ORDER BY a.id",
                now,
                None,
            )
        })
    }

    pub fn search_artists(&self, term: &str, now: NaiveDateTime) -> Result<Vec<Summary>> {
        self.with_conn(|conn| {
            query_summaries(
                conn,
                "SELECT a.id, a.name,
                        (SELECT COUNT(*) FROM shows s WHERE s.artist_id = a.id AND s.start_time >= ?1)
                 FROM artists a
                 WHERE casefold(a.name) LIKE ?2 ESCAPE '\\'
                 ORDER BY a.id",
                now,
                Some(term),
            )
        })
    }

    pub fn get_artist(&self, id: i64) -> Result<Option<ArtistRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {} FROM artists WHERE id = ?1", ARTIST_COLUMNS);
            let row = conn.query_row(&sql, [id], artist_from_row).optional()?;
            Ok(row)
        })
    }

    pub fn artist_shows(&self, artist_id: i64) -> Result<Vec<ShowRow>> {
        self.with_conn(|conn| {
            query_shows(
                conn,
                &format!("{} WHERE s.artist_id = ?1 ORDER BY s.start_time", SHOW_SELECT),
                Some(artist_id),
            )
        })
    }

    pub fn create_artist(&self, artist: &ArtistFields) -> Result<i64> {
        let genres = serde_json::to_string(&artist.genres)?;
        self.with_tx(|conn| {
            conn.execute(
                "INSERT INTO artists (name, city, state, phone, image_link, facebook_link,
                                      genres, website, seeking_venue, seeking_description)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                rusqlite::params![
                    artist.name,
                    artist.city,
                    artist.state,
                    artist.phone,
                    artist.image_link,
                    artist.facebook_link,
                    genres,
                    artist.website,
                    artist.seeking_venue,
                    artist.seeking_description,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn update_artist(&self, id: i64, artist: &ArtistFields) -> Result<bool> {
        let genres = serde_json::to_string(&artist.genres)?;
        self.with_tx(|conn| {
            let changed = conn.execute(
                "UPDATE artists SET name = ?2, city = ?3, state = ?4, phone = ?5, image_link = ?6,
                        facebook_link = ?7, genres = ?8, website = ?9, seeking_venue = ?10,
                        seeking_description = ?11
                 WHERE id = ?1",
                rusqlite::params![
                    id,
                    artist.name,
                    artist.city,
                    artist.state,
                    artist.phone,
                    artist.image_link,
                    artist.facebook_link,
                    genres,
                    artist.website,
                    artist.seeking_venue,
                    artist.seeking_description,
                ],
            )?;
            Ok(changed > 0)
        })
    }

    pub fn delete_artist(&self, id: i64) -> Result<bool> {
        self.with_tx(|conn| Ok(conn.execute("DELETE FROM artists WHERE id = ?1", [id])? > 0))
    }

    // -- Shows --

    pub fn list_shows(&self) -> Result<Vec<ShowRow>> {
        self.with_conn(|conn| {
            query_shows(conn, &format!("{} ORDER BY s.start_time, s.id", SHOW_SELECT), None)
        })
    }

    /// Fails if the artist or venue does not exist.
    pub fn create_show(&self, show: &NewShow) -> Result<i64> {
        self.with_tx(|conn| {
            conn.execute(
                "INSERT INTO shows (start_time, artist_id, venue_id) VALUES (?1, ?2, ?3)",
                rusqlite::params![timestamp(show.start_time), show.artist_id, show.venue_id],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }
}

fn timestamp(t: NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// `sql` binds `?1` to `now` and, when `term` is given, `?2` to its LIKE pattern.
fn query_summaries(
    conn: &Connection,
    sql: &str,
    now: NaiveDateTime,
    term: Option<&str>,
) -> Result<Vec<Summary>> {
    let mut stmt = conn.prepare(sql)?;
    let map = |row: &Row<'_>| -> rusqlite::Result<Summary> {
        Ok(Summary {
            id: row.get(0)?,
            name: row.get(1)?,
            num_upcoming_shows: row.get(2)?,
        })
    };

    let rows = match term {
        Some(term) => stmt
            .query_map(rusqlite::params![timestamp(now), like_pattern(term)], map)?
            .collect::<std::result::Result<Vec<_>, _>>()?,
        None => stmt
            .query_map([timestamp(now)], map)?
            .collect::<std::result::Result<Vec<_>, _>>()?,
    };

    Ok(rows)
}

fn query_shows(conn: &Connection, sql: &str, owner_id: Option<i64>) -> Result<Vec<ShowRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = match owner_id {
        Some(id) => stmt
            .query_map([id], show_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?,
        None => stmt
            .query_map([], show_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?,
    };
    Ok(rows)
}

fn venue_from_row(row: &Row<'_>) -> rusqlite::Result<VenueRow> {
    Ok(VenueRow {
        id: row.get(0)?,
        fields: VenueFields {
            name: row.get(1)?,
            city: row.get(2)?,
            state: row.get(3)?,
            address: row.get(4)?,
            phone: row.get(5)?,
            image_link: row.get(6)?,
            facebook_link: row.get(7)?,
            genres: genres_column(row, 8)?,
            website: row.get(9)?,
            seeking_talent: row.get(10)?,
            seeking_description: row.get(11)?,
        },
    })
}

fn artist_from_row(row: &Row<'_>) -> rusqlite::Result<ArtistRow> {
    Ok(ArtistRow {
        id: row.get(0)?,
        fields: ArtistFields {
            name: row.get(1)?,
            city: row.get(2)?,
            state: row.get(3)?,
            phone: row.get(4)?,
            image_link: row.get(5)?,
            facebook_link: row.get(6)?,
            genres: genres_column(row, 7)?,
            website: row.get(8)?,
            seeking_venue: row.get(9)?,
            seeking_description: row.get(10)?,
        },
    })
}

fn show_from_row(row: &Row<'_>) -> rusqlite::Result<ShowRow> {
    Ok(ShowRow {
        id: row.get(0)?,
        start_time: timestamp_column(row, 1)?,
        venue_id: row.get(2)?,
        venue_name: row.get(3)?,
        venue_image_link: row.get(4)?,
        artist_id: row.get(5)?,
        artist_name: row.get(6)?,
        artist_image_link: row.get(7)?,
    })
}

fn genres_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
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
