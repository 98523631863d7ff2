use fyyur_db::models::{Area, ShowRow, VenueRow};

use super::{detail_row, escape, genre_list, image, link_row, summary_item};
use crate::filters::{DateStyle, format_datetime};

pub fn list(areas: &[Area]) -> String {
    let mut body = String::from("<h1>Venues</h1>\n");
    body.push_str(
        "<form method=\"post\" action=\"/venues/search\">\
         <input name=\"search_term\" placeholder=\"Find a venue\"></form>\n",
    );
    for area in areas {
        body.push_str(&format!(
            "<h2>{}, {}</h2>\n<ul>\n",
            escape(&area.city),
            escape(&area.state)
        ));
        for venue in &area.venues {
            body.push_str(&summary_item("/venues", venue));
        }
        body.push_str("</ul>\n");
    }
    body
}

pub fn detail(venue: &VenueRow, past: &[ShowRow], upcoming: &[ShowRow]) -> String {
    let v = &venue.fields;
    let mut body = format!("<h1>{}</h1>\n<p class=\"subtitle\">ID: {}</p>\n", escape(&v.name), venue.id);
    body.push_str(&genre_list(&v.genres));
    body.push_str("<dl>\n");
    body.push_str(&detail_row("Address", Some(&v.address)));
    body.push_str(&detail_row("City", Some(&format!("{}, {}", v.city, v.state))));
    body.push_str(&detail_row("Phone", v.phone.as_deref()));
    body.push_str(&link_row("Website", v.website.as_deref()));
    body.push_str(&link_row("Facebook", v.facebook_link.as_deref()));
    body.push_str("</dl>\n");

    if v.seeking_talent {
        body.push_str("<p class=\"seeking\">Currently seeking talent</p>\n");
        if let Some(description) = &v.seeking_description {
            body.push_str(&format!("<p>{}</p>\n", escape(description)));
        }
    } else {
        body.push_str("<p class=\"seeking\">Not currently seeking talent</p>\n");
    }
    body.push_str(&image(v.image_link.as_deref(), "Venue Image"));

    body.push_str(&show_section("Upcoming", upcoming));
    body.push_str(&show_section("Past", past));

    body.push_str(&format!(
        "<p><a href=\"/venues/{id}/edit\">Edit</a> <a href=\"/venues/{id}/delete\">Delete</a></p>",
        id = venue.id
    ));
    body
}

fn show_section(label: &str, shows: &[ShowRow]) -> String {
    let mut out = format!("<section>\n<h2>{} {} Shows</h2>\n<ul>\n", shows.len(), label);
    for show in shows {
        out.push_str(&format!(
            "<li>{}<a href=\"/artists/{}\">{}</a> {}</li>\n",
            image(show.artist_image_link.as_deref(), "Artist Image"),
            show.artist_id,
            escape(&show.artist_name),
            format_datetime(show.start_time, DateStyle::Full)
        ));
    }
    out.push_str("</ul>\n</section>\n");
    out
}
