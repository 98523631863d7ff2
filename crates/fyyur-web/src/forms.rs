//! Form-encoded submissions and their conversion into store records.
//!
//! Every field deserializes with a default so that a missing field is
//! reported by `into_*` as a `FormError` rather than as a rejected body.

use chrono::NaiveDateTime;
use serde::Deserialize;

use fyyur_db::models::{ArtistFields, NewShow, VenueFields};

pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// Accepted `start_time` layouts, tried in order.
const START_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} is not a valid id: {value:?}")]
    InvalidId { field: &'static str, value: String },

    #[error("start_time is not a valid date and time: {0:?}")]
    InvalidStartTime(String),
}

/// Decode a checkbox field.
///
/// | submitted                                  | result |
/// |--------------------------------------------|--------|
/// | absent                                     | false  |
/// | `""`, `y`, `yes`, `on`, `true`, `1`        | true   |
/// | `n`, `no`, `off`, `false`, `0`             | false  |
/// | anything else                              | true   |
///
/// Matching ignores case and surrounding whitespace.
pub fn checkbox(value: Option<&str>) -> bool {
    match value {
        None => false,
        Some(v) => !matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "n" | "no" | "off" | "false" | "0"
        ),
    }
}

pub fn parse_start_time(raw: &str) -> Result<NaiveDateTime, FormError> {
    let raw = raw.trim();
    START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| FormError::InvalidStartTime(raw.to_string()))
}

fn required(value: String, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(value.to_string())
}

fn optional(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Checkboxes are collected as lists so that an empty value still counts as
/// submitted. A repeated field (hidden fallback input plus the checkbox
/// itself) resolves to its last value.
fn last(values: &[String]) -> Option<&str> {
    values.last().map(String::as_str)
}

fn genres(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub genres: Vec<String>,
    pub website: String,
    pub seeking_talent: Vec<String>,
    pub seeking_description: String,
}

impl VenueForm {
    pub fn into_fields(self) -> Result<VenueFields, FormError> {
        Ok(VenueFields {
            name: required(self.name, "name")?,
            city: required(self.city, "city")?,
            state: required(self.state, "state")?,
            address: required(self.address, "address")?,
            phone: optional(self.phone),
            image_link: optional(self.image_link),
            facebook_link: optional(self.facebook_link),
            genres: genres(self.genres),
            website: optional(self.website),
            seeking_talent: checkbox(last(&self.seeking_talent)),
            seeking_description: optional(self.seeking_description),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub genres: Vec<String>,
    pub website: String,
    pub seeking_venue: Vec<String>,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn into_fields(self) -> Result<ArtistFields, FormError> {
        Ok(ArtistFields {
            name: required(self.name, "name")?,
            city: required(self.city, "city")?,
            state: required(self.state, "state")?,
            phone: optional(self.phone),
            image_link: optional(self.image_link),
            facebook_link: optional(self.facebook_link),
            genres: genres(self.genres),
            website: optional(self.website),
            seeking_venue: checkbox(last(&self.seeking_venue)),
            seeking_description: optional(self.seeking_description),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl ShowForm {
    pub fn into_new_show(self) -> Result<NewShow, FormError> {
        let id = |value: String, field: &'static str| -> Result<i64, FormError> {
            let value = required(value, field)?;
            value
                .parse::<i64>()
                .map_err(|_| FormError::InvalidId { field, value })
        };

        Ok(NewShow {
            artist_id: id(self.artist_id, "artist_id")?,
            venue_id: id(self.venue_id, "venue_id")?,
            start_time: parse_start_time(&required(self.start_time, "start_time")?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn checkbox_truth_table() {
        assert!(!checkbox(None));
        for on in ["", "y", "Yes", "on", "TRUE", "1", "anything"] {
            assert!(checkbox(Some(on)), "{:?} should be checked", on);
        }
        for off in ["n", "No", "off", "false", " 0 "] {
            assert!(!checkbox(Some(off)), "{:?} should be unchecked", off);
        }
    }

    #[test]
    fn start_time_layouts() {
        let expected = NaiveDate::from_ymd_opt(2035, 4, 1)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        assert_eq!(parse_start_time("2035-04-01 20:00:00"), Ok(expected));
        assert_eq!(parse_start_time("2035-04-01 20:00"), Ok(expected));
        assert_eq!(parse_start_time("2035-04-01T20:00"), Ok(expected));
        assert!(parse_start_time("next tuesday").is_err());
    }

    #[test]
    fn venue_form_requires_core_fields() {
        let form = VenueForm {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            ..Default::default()
        };
        assert_eq!(form.into_fields(), Err(FormError::Missing("address")));
    }

    #[test]
    fn venue_form_blanks_become_none() {
        let form = VenueForm {
            name: " The Musical Hop ".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: "".into(),
            genres: vec!["Jazz".into(), "".into()],
            seeking_talent: vec!["y".into()],
            ..Default::default()
        };
        let fields = form.into_fields().unwrap();
        assert_eq!(fields.name, "The Musical Hop");
        assert_eq!(fields.phone, None);
        assert_eq!(fields.genres, vec!["Jazz".to_string()]);
        assert!(fields.seeking_talent);
    }

    #[test]
    fn show_form_rejects_bad_ids() {
        let form = ShowForm {
            artist_id: "four".into(),
            venue_id: "1".into(),
            start_time: "2035-04-01 20:00:00".into(),
        };
        assert_eq!(
            form.into_new_show(),
            Err(FormError::InvalidId {
                field: "artist_id",
                value: "four".into()
            })
        );
    }
}
