use axum::extract::State;
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::{Form, FormRejection};

use fyyur_db::models::partition_shows;

use crate::error::WebError;
use crate::extract::IdPath;
use crate::forms::{SearchForm, VenueForm};
use crate::{AppState, Page, flash_outcome, form_body, now, render, views, with_db};

pub async fn list_venues(State(state): State<AppState>, jar: CookieJar) -> Result<Page, WebError> {
    let now = now();
    let areas = with_db(&state, move |db| db.venue_areas(now)).await?;
    Ok(render(jar, "Venues", views::venues::list(&areas)))
}

pub async fn search_venues(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Result<Page, WebError> {
    let search_term = form_body(form).map(|f| f.search_term).unwrap_or_default();
    let now = now();
    let term = search_term.clone();
    let results = with_db(&state, move |db| db.search_venues(&term, now)).await?;
    Ok(render(
        jar,
        "Venue Search",
        views::search_results("/venues", &search_term, &results),
    ))
}

pub async fn show_venue(
    State(state): State<AppState>,
    jar: CookieJar,
    IdPath(id): IdPath,
) -> Result<Page, WebError> {
    let found = with_db(&state, move |db| {
        let Some(venue) = db.get_venue(id)? else {
            return Ok(None);
        };
        Ok(Some((venue, db.venue_shows(id)?)))
    })
    .await?;

    let (venue, shows) = found.ok_or(WebError::NotFound)?;
    let (past, upcoming) = partition_shows(shows, now());
    let title = venue.fields.name.clone();
    Ok(render(jar, &title, views::venues::detail(&venue, &past, &upcoming)))
}

pub async fn create_venue_form(jar: CookieJar) -> Page {
    render(jar, "New Venue", views::forms::venue_form("/venues/create", None))
}

pub async fn create_venue_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<VenueForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let (name, outcome) = match form_body(form) {
        Ok(form) => (form.name.trim().to_string(), insert_venue(&state, form).await),
        Err(e) => (String::new(), Err(e)),
    };

    let jar = flash_outcome(
        jar,
        outcome,
        format!("Venue {} was successfully listed!", name),
        format!("An error occurred. Venue {} could not be listed.", name),
    );
    (jar, Redirect::to("/"))
}

pub async fn edit_venue_form(
    State(state): State<AppState>,
    jar: CookieJar,
    IdPath(id): IdPath,
) -> Result<Page, WebError> {
    let venue = with_db(&state, move |db| db.get_venue(id))
        .await?
        .ok_or(WebError::NotFound)?;
    Ok(render(
        jar,
        "Edit Venue",
        views::forms::venue_form(&format!("/venues/{}/edit", id), Some(&venue.fields)),
    ))
}

pub async fn edit_venue_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    IdPath(id): IdPath,
    form: Result<Form<VenueForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let outcome = match form_body(form) {
        Ok(form) => update_venue(&state, id, form).await,
        Err(e) => Err(e),
    };

    let jar = flash_outcome(
        jar,
        outcome,
        format!("Venue {} was successfully updated.", id),
        format!("An error occurred. Venue {} could not be updated.", id),
    );
    (jar, Redirect::to(&format!("/venues/{}", id)))
}

pub async fn delete_venue(
    State(state): State<AppState>,
    jar: CookieJar,
    IdPath(id): IdPath,
) -> (CookieJar, Redirect) {
    let outcome = match with_db(&state, move |db| db.delete_venue(id)).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(anyhow::anyhow!("no venue with id {}", id)),
        Err(e) => Err(e),
    };

    let jar = flash_outcome(
        jar,
        outcome,
        format!("Venue {} was successfully deleted.", id),
        format!("An error occurred. Venue {} could not be deleted.", id),
    );
    (jar, Redirect::to("/"))
}

async fn insert_venue(state: &AppState, form: VenueForm) -> anyhow::Result<i64> {
    let fields = form.into_fields()?;
    with_db(state, move |db| db.create_venue(&fields)).await
}

async fn update_venue(state: &AppState, id: i64, form: VenueForm) -> anyhow::Result<()> {
    let fields = form.into_fields()?;
    if with_db(state, move |db| db.update_venue(id, &fields)).await? {
        Ok(())
    } else {
        Err(anyhow::anyhow!("no venue with id {}", id))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app, get, post_form};
    use axum::http::StatusCode;

    const NEW_VENUE: &str = "name=The+Dueling+Pianos+Bar&city=New+York&state=NY\
                             &address=335+Delancey+Street&genres=Classical&seeking_talent=y";

    #[tokio::test]
    async fn list_groups_by_area() {
        let app = app();
        post_form(&app, "/venues/create", NEW_VENUE).await;

        let reply = get(&app, "/venues", None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert!(reply.body.contains("<h2>San Francisco, CA</h2>"));
        assert!(reply.body.contains("<h2>New York, NY</h2>"));
        assert!(reply.body.contains("The Musical Hop</a> <small>1 upcoming shows</small>"));
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let app = app();
        let reply = post_form(&app, "/venues/search", "search_term=hop").await;
        assert_eq!(reply.status, StatusCode::OK);
        assert!(reply.body.contains("Number of search results for \"hop\": 1"));
        assert!(reply.body.contains("href=\"/venues/1\""));

        let reply = post_form(&app, "/venues/search", "").await;
        assert!(reply.body.contains(": 1</h1>"));
    }

    #[tokio::test]
    async fn detail_splits_past_and_upcoming() {
        let app = app();
        let reply = get(&app, "/venues/1", None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert!(reply.body.contains("<h1>The Musical Hop</h1>"));
        assert!(reply.body.contains("1 Upcoming Shows"));
        assert!(reply.body.contains("1 Past Shows"));
        assert!(reply.body.contains("Tuesday May, 21, 2019 at 9:30PM"));
        assert!(reply.body.contains("Currently seeking talent"));
    }

    #[tokio::test]
    async fn unknown_or_malformed_id_is_404() {
        let app = app();
        assert_eq!(get(&app, "/venues/99", None).await.status, StatusCode::NOT_FOUND);
        assert_eq!(get(&app, "/venues/abc", None).await.status, StatusCode::NOT_FOUND);
        assert_eq!(get(&app, "/venues/99/edit", None).await.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_then_view() {
        let app = app();
        let reply = post_form(&app, "/venues/create", NEW_VENUE).await;
        assert_eq!(reply.status, StatusCode::SEE_OTHER);

        let page = get(&app, "/venues/2", None).await;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains("335 Delancey Street"));
        assert!(page.body.contains("<li>Classical</li>"));
    }

    #[tokio::test]
    async fn create_without_address_is_not_stored() {
        let app = app();
        let reply = post_form(&app, "/venues/create", "name=Nowhere&city=Reno&state=NV").await;
        assert_eq!(reply.location(), Some("/"));

        let home = get(&app, "/", reply.cookie().as_deref()).await;
        assert!(home.body.contains("An error occurred. Venue Nowhere could not be listed."));
        assert_eq!(get(&app, "/venues/2", None).await.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn edit_updates_and_redirects_to_detail() {
        let app = app();
        let form = get(&app, "/venues/1/edit", None).await;
        assert!(form.body.contains("value=\"1015 Folsom Street\""));

        let reply = post_form(
            &app,
            "/venues/1/edit",
            "name=The+Musical+Hop&city=San+Francisco&state=CA&address=1+Market+Street",
        )
        .await;
        assert_eq!(reply.status, StatusCode::SEE_OTHER);
        assert_eq!(reply.location(), Some("/venues/1"));

        let page = get(&app, "/venues/1", reply.cookie().as_deref()).await;
        assert!(page.body.contains("Venue 1 was successfully updated."));
        assert!(page.body.contains("1 Market Street"));
        assert!(page.body.contains("Not currently seeking talent"));
    }

    #[tokio::test]
    async fn edit_unknown_venue_flashes_failure() {
        let app = app();
        let reply = post_form(
            &app,
            "/venues/42/edit",
            "name=Ghost&city=Reno&state=NV&address=Nowhere",
        )
        .await;
        let page = get(&app, "/", reply.cookie().as_deref()).await;
        assert!(page.body.contains("An error occurred. Venue 42 could not be updated."));
    }

    #[tokio::test]
    async fn delete_removes_venue_and_its_shows() {
        let app = app();
        let reply = get(&app, "/venues/1/delete", None).await;
        assert_eq!(reply.status, StatusCode::SEE_OTHER);

        let home = get(&app, "/", reply.cookie().as_deref()).await;
        assert!(home.body.contains("Venue 1 was successfully deleted."));
        assert_eq!(get(&app, "/venues/1", None).await.status, StatusCode::NOT_FOUND);
        assert!(!get(&app, "/shows", None).await.body.contains("The Musical Hop"));

        let again = get(&app, "/venues/1/delete", None).await;
        let home = get(&app, "/", again.cookie().as_deref()).await;
        assert!(home.body.contains("An error occurred. Venue 1 could not be deleted."));
    }
}
