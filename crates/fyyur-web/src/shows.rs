use axum::extract::State;
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::{Form, FormRejection};

use crate::error::WebError;
use crate::forms::ShowForm;
use crate::{AppState, Page, flash_outcome, form_body, render, views, with_db};

pub async fn list_shows(State(state): State<AppState>, jar: CookieJar) -> Result<Page, WebError> {
    let shows = with_db(&state, |db| db.list_shows()).await?;
    Ok(render(jar, "Shows", views::shows::list(&shows)))
}

pub async fn create_show_form(jar: CookieJar) -> Page {
    render(jar, "New Show", views::forms::show_form())
}

pub async fn create_show_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<ShowForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let outcome = match form_body(form) {
        Ok(form) => insert_show(&state, form).await,
        Err(e) => Err(e),
    };

    let jar = flash_outcome(
        jar,
        outcome,
        "Requested show was successfully listed".to_string(),
        "An error occurred. Requested show not listed.".to_string(),
    );
    (jar, Redirect::to("/"))
}

async fn insert_show(state: &AppState, form: ShowForm) -> anyhow::Result<i64> {
    let show = form.into_new_show()?;
    with_db(state, move |db| db.create_show(&show)).await
}
