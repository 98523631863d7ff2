//! Create and edit forms. Field names match the structs in `crate::forms`.

use fyyur_db::models::{ArtistFields, VenueFields};

use super::escape;
use crate::forms::{GENRES, STATES};

/// New venue form, or the edit form when `current` is given.
pub fn venue_form(action: &str, current: Option<&VenueFields>) -> String {
    let heading = match current {
        Some(v) => format!("Edit venue <em>{}</em>", escape(&v.name)),
        None => "List a new venue".to_string(),
    };
    let text = |f: fn(&VenueFields) -> Option<&str>| current.and_then(f);

    let mut body = form_open(&heading, action);
    body.push_str(&text_input("Name", "name", text(|v| Some(v.name.as_str())), true));
    body.push_str(&text_input("City", "city", text(|v| Some(v.city.as_str())), true));
    body.push_str(&state_select(text(|v| Some(v.state.as_str()))));
    body.push_str(&text_input("Address", "address", text(|v| Some(v.address.as_str())), true));
    body.push_str(&text_input("Phone", "phone", text(|v| v.phone.as_deref()), false));
    body.push_str(&genre_select(current.map(|v| v.genres.as_slice()).unwrap_or_default()));
    body.push_str(&text_input("Image Link", "image_link", text(|v| v.image_link.as_deref()), false));
    body.push_str(&text_input("Facebook Link", "facebook_link", text(|v| v.facebook_link.as_deref()), false));
    body.push_str(&text_input("Website", "website", text(|v| v.website.as_deref()), false));
    body.push_str(&checkbox_input(
        "Looking for Talent",
        "seeking_talent",
        current.is_some_and(|v| v.seeking_talent),
    ));
    body.push_str(&text_input(
        "Seeking Description",
        "seeking_description",
        text(|v| v.seeking_description.as_deref()),
        false,
    ));
    body.push_str(&form_close(if current.is_some() { "Save" } else { "Create Venue" }));
    body
}

/// New artist form, or the edit form when `current` is given.
pub fn artist_form(action: &str, current: Option<&ArtistFields>) -> String {
    let heading = match current {
        Some(a) => format!("Edit artist <em>{}</em>", escape(&a.name)),
        None => "List a new artist".to_string(),
    };
    let text = |f: fn(&ArtistFields) -> Option<&str>| current.and_then(f);

    let mut body = form_open(&heading, action);
    body.push_str(&text_input("Name", "name", text(|a| Some(a.name.as_str())), true));
    body.push_str(&text_input("City", "city", text(|a| Some(a.city.as_str())), true));
    body.push_str(&state_select(text(|a| Some(a.state.as_str()))));
    body.push_str(&text_input("Phone", "phone", text(|a| a.phone.as_deref()), false));
    body.push_str(&genre_select(current.map(|a| a.genres.as_slice()).unwrap_or_default()));
    body.push_str(&text_input("Image Link", "image_link", text(|a| a.image_link.as_deref()), false));
    body.push_str(&text_input("Facebook Link", "facebook_link", text(|a| a.facebook_link.as_deref()), false));
    body.push_str(&text_input("Website", "website", text(|a| a.website.as_deref()), false));
    body.push_str(&checkbox_input(
        "Looking for Venues",
        "seeking_venue",
        current.is_some_and(|a| a.seeking_venue),
    ));
    body.push_str(&text_input(
        "Seeking Description",
        "seeking_description",
        text(|a| a.seeking_description.as_deref()),
        false,
    ));
    body.push_str(&form_close(if current.is_some() { "Save" } else { "Create Artist" }));
    body
}

pub fn show_form() -> String {
    let mut body = form_open("List a new show", "/shows/create");
    body.push_str(&text_input("Artist ID", "artist_id", None, true));
    body.push_str(&text_input("Venue ID", "venue_id", None, true));
    body.push_str(
        "<label>Start Time <input type=\"datetime-local\" name=\"start_time\" required></label>\n",
    );
    body.push_str(&form_close("Create Show"));
    body
}

fn form_open(heading: &str, action: &str) -> String {
    format!(
        "<h1>{}</h1>\n<form method=\"post\" action=\"{}\">\n",
        heading,
        escape(action)
    )
}

fn form_close(submit: &str) -> String {
    format!("<button type=\"submit\">{}</button>\n</form>", submit)
}

fn text_input(label: &str, name: &str, value: Option<&str>, required: bool) -> String {
    format!(
        "<label>{} <input type=\"text\" name=\"{}\" value=\"{}\"{}></label>\n",
        label,
        name,
        escape(value.unwrap_or_default()),
        if required { " required" } else { "" }
    )
}

fn state_select(selected: Option<&str>) -> String {
    let mut out = String::from("<label>State <select name=\"state\" required>\n");
    for state in STATES {
        out.push_str(&format!(
            "<option value=\"{state}\"{}>{state}</option>\n",
            if selected == Some(*state) { " selected" } else { "" }
        ));
    }
    out.push_str("</select></label>\n");
    out
}

fn genre_select(selected: &[String]) -> String {
    let mut out = String::from("<label>Genres <select name=\"genres\" multiple>\n");
    for genre in GENRES {
        let value = escape(genre);
        out.push_str(&format!(
            "<option value=\"{value}\"{}>{value}</option>\n",
            if selected.iter().any(|g| g.as_str() == *genre) { " selected" } else { "" }
        ));
    }
    out.push_str("</select></label>\n");
    out
}

/// An unchecked box submits nothing, so a hidden `n` goes first and the box
/// itself, when ticked, supplies the last value.
fn checkbox_input(label: &str, name: &str, checked: bool) -> String {
    format!(
        "<input type=\"hidden\" name=\"{name}\" value=\"n\">\
         <label><input type=\"checkbox\" name=\"{name}\" value=\"y\"{}> {label}</label>\n",
        if checked { " checked" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_form_is_prefilled() {
        let venue = VenueFields {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            genres: vec!["Jazz".into(), "Folk".into()],
            seeking_talent: true,
            ..Default::default()
        };
        let page = venue_form("/venues/1/edit", Some(&venue));

        assert!(page.contains("action=\"/venues/1/edit\""));
        assert!(page.contains("value=\"1015 Folsom Street\""));
        assert!(page.contains("<option value=\"CA\" selected>"));
        assert!(page.contains("<option value=\"Jazz\" selected>"));
        assert!(page.contains("<option value=\"Blues\">"));
        assert!(page.contains("value=\"y\" checked"));
    }

    #[test]
    fn blank_form_selects_nothing() {
        let page = artist_form("/artists/create", None);
        assert!(!page.contains(" selected"));
        assert!(!page.contains(" checked"));
        assert!(page.contains("R&amp;B"));
    }
}
