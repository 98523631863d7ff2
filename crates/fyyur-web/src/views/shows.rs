use fyyur_db::models::ShowRow;

use super::{escape, image};
use crate::filters::{DateStyle, format_datetime};

pub fn list(shows: &[ShowRow]) -> String {
    let mut body = String::from("<h1>Shows</h1>\n<ul class=\"shows\">\n");
    for show in shows {
        body.push_str(&format!(
            "<li>{}<p>{}</p><p><a href=\"/artists/{}\">{}</a> playing at <a href=\"/venues/{}\">{}</a></p></li>\n",
            image(show.artist_image_link.as_deref(), "Artist Image"),
            format_datetime(show.start_time, DateStyle::Medium),
            show.artist_id,
            escape(&show.artist_name),
            show.venue_id,
            escape(&show.venue_name)
        ));
    }
    body.push_str("</ul>");
    body
}
