use fyyur_db::models::{ArtistRow, ShowRow, Summary};

use super::{detail_row, escape, genre_list, image, link_row, summary_item};
use crate::filters::{DateStyle, format_datetime};

pub fn list(artists: &[Summary]) -> String {
    let mut body = String::from("<h1>Artists</h1>\n");
    body.push_str(
        "<form method=\"post\" action=\"/artists/search\">\
         <input name=\"search_term\" placeholder=\"Find an artist\"></form>\n<ul>\n",
    );
    for artist in artists {
        body.push_str(&summary_item("/artists", artist));
    }
    body.push_str("</ul>");
    body
}

pub fn detail(artist: &ArtistRow, past: &[ShowRow], upcoming: &[ShowRow]) -> String {
    let a = &artist.fields;
    let mut body = format!("<h1>{}</h1>\n<p class=\"subtitle\">ID: {}</p>\n", escape(&a.name), artist.id);
    body.push_str(&genre_list(&a.genres));
    body.push_str("<dl>\n");
    body.push_str(&detail_row("City", Some(&format!("{}, {}", a.city, a.state))));
    body.push_str(&detail_row("Phone", a.phone.as_deref()));
    body.push_str(&link_row("Website", a.website.as_deref()));
    body.push_str(&link_row("Facebook", a.facebook_link.as_deref()));
    body.push_str("</dl>\n");

    if a.seeking_venue {
        body.push_str("<p class=\"seeking\">Currently seeking performance venues</p>\n");
        if let Some(description) = &a.seeking_description {
            body.push_str(&format!("<p>{}</p>\n", escape(description)));
        }
    } else {
        body.push_str("<p class=\"seeking\">Not currently seeking performance venues</p>\n");
    }
    body.push_str(&image(a.image_link.as_deref(), "Artist Image"));

    body.push_str(&show_section("Upcoming", upcoming));
    body.push_str(&show_section("Past", past));

    body.push_str(&format!(
        "<p><a href=\"/artists/{id}/edit\">Edit</a> <a href=\"/artists/{id}/delete\">Delete</a></p>",
        id = artist.id
    ));
    body
}

fn show_section(label: &str, shows: &[ShowRow]) -> String {
    let mut out = format!("<section>\n<h2>{} {} Shows</h2>\n<ul>\n", shows.len(), label);
    for show in shows {
        out.push_str(&format!(
            "<li>{}<a href=\"/venues/{}\">{}</a> {}</li>\n",
            image(show.venue_image_link.as_deref(), "Venue Image"),
            show.venue_id,
            escape(&show.venue_name),
            format_datetime(show.start_time, DateStyle::Full)
        ));
    }
    out.push_str("</ul>\n</section>\n");
    out
}
