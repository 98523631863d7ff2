use axum::extract::State;
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::{Form, FormRejection};

use fyyur_db::models::partition_shows;

use crate::error::WebError;
use crate::extract::IdPath;
use crate::forms::{ArtistForm, SearchForm};
use crate::{AppState, Page, flash_outcome, form_body, now, render, views, with_db};

pub async fn list_artists(State(state): State<AppState>, jar: CookieJar) -> Result<Page, WebError> {
    let now = now();
    let artists = with_db(&state, move |db| db.list_artists(now)).await?;
    Ok(render(jar, "Artists", views::artists::list(&artists)))
}

pub async fn search_artists(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Result<Page, WebError> {
    let search_term = form_body(form).map(|f| f.search_term).unwrap_or_default();
    let now = now();
    let term = search_term.clone();
    let results = with_db(&state, move |db| db.search_artists(&term, now)).await?;
    Ok(render(
        jar,
        "Artist Search",
        views::search_results("/artists", &search_term, &results),
    ))
}

pub async fn show_artist(
    State(state): State<AppState>,
    jar: CookieJar,
    IdPath(id): IdPath,
) -> Result<Page, WebError> {
    let found = with_db(&state, move |db| {
        let Some(artist) = db.get_artist(id)? else {
            return Ok(None);
        };
        Ok(Some((artist, db.artist_shows(id)?)))
    })
    .await?;

    let (artist, shows) = found.ok_or(WebError::NotFound)?;
    let (past, upcoming) = partition_shows(shows, now());
    let title = artist.fields.name.clone();
    Ok(render(jar, &title, views::artists::detail(&artist, &past, &upcoming)))
}

pub async fn create_artist_form(jar: CookieJar) -> Page {
    render(jar, "New Artist", views::forms::artist_form("/artists/create", None))
}

pub async fn create_artist_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<ArtistForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let (name, outcome) = match form_body(form) {
        Ok(form) => (form.name.trim().to_string(), insert_artist(&state, form).await),
        Err(e) => (String::new(), Err(e)),
    };

    let jar = flash_outcome(
        jar,
        outcome,
        format!("Artist {} was successfully listed!", name),
        format!("An error occurred. Artist {} could not be listed.", name),
    );
    (jar, Redirect::to("/"))
}

pub async fn edit_artist_form(
    State(state): State<AppState>,
    jar: CookieJar,
    IdPath(id): IdPath,
) -> Result<Page, WebError> {
    let artist = with_db(&state, move |db| db.get_artist(id))
        .await?
        .ok_or(WebError::NotFound)?;
    Ok(render(
        jar,
        "Edit Artist",
        views::forms::artist_form(&format!("/artists/{}/edit", id), Some(&artist.fields)),
    ))
}

pub async fn edit_artist_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    IdPath(id): IdPath,
    form: Result<Form<ArtistForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let (name, outcome) = match form_body(form) {
        Ok(form) => (form.name.trim().to_string(), update_artist(&state, id, form).await),
        Err(e) => (String::new(), Err(e)),
    };

    let jar = flash_outcome(
        jar,
        outcome,
        format!("Artist {} was successfully updated!", name),
        format!("An error occurred. Artist {} could not be updated.", name),
    );
    (jar, Redirect::to(&format!("/artists/{}", id)))
}

pub async fn delete_artist(
    State(state): State<AppState>,
    jar: CookieJar,
    IdPath(id): IdPath,
) -> (CookieJar, Redirect) {
    let outcome = match with_db(&state, move |db| db.delete_artist(id)).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(anyhow::anyhow!("no artist with id {}", id)),
        Err(e) => Err(e),
    };

    let jar = flash_outcome(
        jar,
        outcome,
        format!("Artist {} was successfully deleted.", id),
        format!("An error occurred. Artist {} could not be deleted.", id),
    );
    (jar, Redirect::to("/"))
}

async fn insert_artist(state: &AppState, form: ArtistForm) -> anyhow::Result<i64> {
    let fields = form.into_fields()?;
    with_db(state, move |db| db.create_artist(&fields)).await
}

async fn update_artist(state: &AppState, id: i64, form: ArtistForm) -> anyhow::Result<()> {
    let fields = form.into_fields()?;
    if with_db(state, move |db| db.update_artist(id, &fields)).await? {
        Ok(())
    } else {
        Err(anyhow::anyhow!("no artist with id {}", id))
    }
}
