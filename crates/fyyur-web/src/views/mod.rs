//! HTML pages. Every page is a plain function returning a `String`; user
//! supplied text always goes through [`escape`].

pub mod artists;
pub mod forms;
pub mod shows;
pub mod venues;

use fyyur_db::models::Summary;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn layout(title: &str, flash: Option<&str>, body: &str) -> String {
    let flash = flash
        .map(|message| format!("<div class=\"alert\" role=\"alert\">{}</div>\n", escape(message)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | Fyyur</title>
</head>
<body>
<nav>
<a href="/">Fyyur</a>
<a href="/venues">Venues</a>
<a href="/artists">Artists</a>
<a href="/shows">Shows</a>
</nav>
{flash}<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

pub fn home() -> String {
    r#"<h1>Fyyur</h1>
<p>Find venues, artists and upcoming shows.</p>
<ul>
<li><a href="/venues/create">List a new venue</a></li>
<li><a href="/artists/create">List a new artist</a></li>
<li><a href="/shows/create">Post a show</a></li>
</ul>"#
        .to_string()
}

pub fn not_found() -> String {
    layout(
        "Not Found",
        None,
        "<h1>404</h1>\n<p>The page you requested could not be found.</p>",
    )
}

pub fn server_error() -> String {
    layout(
        "Server Error",
        None,
        "<h1>500</h1>\n<p>Something went wrong. Please try again later.</p>",
    )
}

/// Results for `/venues/search` or `/artists/search`; `base` is the listing
/// path the result links hang off.
pub fn search_results(base: &str, search_term: &str, results: &[Summary]) -> String {
    let mut body = format!(
        "<h1>Number of search results for \"{}\": {}</h1>\n<ul>\n",
        escape(search_term),
        results.len()
    );
    for entry in results {
        body.push_str(&summary_item(base, entry));
    }
    body.push_str("</ul>");
    body
}

pub(crate) fn summary_item(base: &str, entry: &Summary) -> String {
    format!(
        "<li><a href=\"{}/{}\">{}</a> <small>{} upcoming shows</small></li>\n",
        base,
        entry.id,
        escape(&entry.name),
        entry.num_upcoming_shows
    )
}

/// `<dt>`/`<dd>` pair, skipped when there is no value.
pub(crate) fn detail_row(label: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("<dt>{}</dt><dd>{}</dd>\n", label, escape(value)),
        None => String::new(),
    }
}

pub(crate) fn link_row(label: &str, href: Option<&str>) -> String {
    match href {
        Some(href) => format!(
            "<dt>{}</dt><dd><a href=\"{}\">{}</a></dd>\n",
            label,
            escape(href),
            escape(href)
        ),
        None => String::new(),
    }
}

pub(crate) fn genre_list(genres: &[String]) -> String {
    let mut out = String::from("<ul class=\"genres\">");
    for genre in genres {
        out.push_str(&format!("<li>{}</li>", escape(genre)));
    }
    out.push_str("</ul>\n");
    out
}

pub(crate) fn image(src: Option<&str>, alt: &str) -> String {
    match src {
        Some(src) => format!("<img src=\"{}\" alt=\"{}\">", escape(src), escape(alt)),
        None => String::new(),
    }
}
