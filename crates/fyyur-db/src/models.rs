//! Database row types. These map directly to SQLite rows.
//! `genres` is decoded from its JSON column and `start_time` from
//! `TIMESTAMP_FORMAT` before a row leaves this crate.

use chrono::NaiveDateTime;

/// Writable venue columns, shared by insert and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueRow {
    pub id: i64,
    pub fields: VenueFields,
}

/// Writable artist columns, shared by insert and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistRow {
    pub id: i64,
    pub fields: ArtistFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: NaiveDateTime,
}

/// A show joined with the names and images of its venue and artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowRow {
    pub id: i64,
    pub start_time: NaiveDateTime,
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}

impl ShowRow {
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.start_time >= now
    }
}

/// Venue or artist listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<Summary>,
}

/// Split shows into `(past, upcoming)` relative to `now`, keeping order.
pub fn partition_shows(shows: Vec<ShowRow>, now: NaiveDateTime) -> (Vec<ShowRow>, Vec<ShowRow>) {
    let (upcoming, past) = shows.into_iter().partition(|s| s.is_upcoming(now));
    (past, upcoming)
}
