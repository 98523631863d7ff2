//! Fyyur: server-rendered pages for listing venues, artists and the shows
//! that connect them.

pub mod artists;
pub mod error;
pub mod extract;
pub mod filters;
pub mod flash;
pub mod forms;
pub mod home;
pub mod shows;
pub mod venues;
pub mod views;

use std::sync::Arc;

use axum::Router;
use axum::response::Html;
use axum::routing::{get, post};
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::{Form, FormRejection};
use chrono::NaiveDateTime;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use fyyur_db::Database;

use crate::error::WebError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

/// A rendered page plus the jar that clears any flash it displayed.
pub type Page = (CookieJar, Html<String>);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        // Venues
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/create",
            get(venues::create_venue_form).post(venues::create_venue_submission),
        )
        .route("/venues/{id}", get(venues::show_venue))
        .route(
            "/venues/{id}/edit",
            get(venues::edit_venue_form).post(venues::edit_venue_submission),
        )
        .route("/venues/{id}/delete", get(venues::delete_venue))
        // Artists
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/create",
            get(artists::create_artist_form).post(artists::create_artist_submission),
        )
        .route("/artists/{id}", get(artists::show_artist))
        .route(
            "/artists/{id}/edit",
            get(artists::edit_artist_form).post(artists::edit_artist_submission),
        )
        .route("/artists/{id}/delete", get(artists::delete_artist))
        // Shows
        .route("/shows", get(shows::list_shows))
        .route(
            "/shows/create",
            get(shows::create_show_form).post(shows::create_show_submission),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> WebError {
    WebError::NotFound
}

/// Wrap `body` in the site layout, consuming any pending flash message.
pub(crate) fn render(jar: CookieJar, title: &str, body: String) -> Page {
    let (jar, message) = flash::take(jar);
    (jar, Html(views::layout(title, message.as_deref(), &body)))
}

/// Log how a submission went and queue the matching flash message.
pub(crate) fn flash_outcome<T>(
    jar: CookieJar,
    outcome: anyhow::Result<T>,
    success: String,
    failure: String,
) -> CookieJar {
    match outcome {
        Ok(_) => {
            info!("{}", success);
            flash::set(jar, success)
        }
        Err(e) => {
            warn!("{} ({:#})", failure, e);
            flash::set(jar, failure)
        }
    }
}

pub(crate) fn form_body<T>(form: Result<Form<T>, FormRejection>) -> anyhow::Result<T> {
    form.map(|Form(body)| body)
        .map_err(|e| anyhow::anyhow!("rejected form body: {:?}", e))
}

/// Shows at or after this instant are upcoming. Submitted start times are
/// the server's local wall-clock time, so this is too.
pub(crate) fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Run blocking DB work off the async runtime.
pub(crate) async fn with_db<F, T>(state: &AppState, f: F) -> anyhow::Result<T>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            anyhow::anyhow!("blocking task failed: {}", e)
        })?
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::{Body, to_bytes};
    use axum::http::{HeaderMap, Request, StatusCode, header};
    use chrono::NaiveDate;
    use tower::ServiceExt;

    use fyyur_db::models::{ArtistFields, NewShow, VenueFields};

    use super::*;

    pub struct Reply {
        pub status: StatusCode,
        pub headers: HeaderMap,
        pub body: String,
    }

    impl Reply {
        pub fn location(&self) -> Option<&str> {
            self.headers.get(header::LOCATION)?.to_str().ok()
        }

        /// `name=value` part of the first `Set-Cookie` header.
        pub fn cookie(&self) -> Option<String> {
            let raw = self.headers.get(header::SET_COOKIE)?.to_str().ok()?;
            raw.split(';').next().map(str::to_string)
        }
    }

    /// Venue 1 "The Musical Hop" and artist 1 "Guns N Petals", with one past
    /// and one upcoming show between them.
    pub fn app() -> Router {
        let db = Database::open_in_memory().unwrap();
        let venue_id = db
            .create_venue(&VenueFields {
                name: "The Musical Hop".into(),
                city: "San Francisco".into(),
                state: "CA".into(),
                address: "1015 Folsom Street".into(),
                genres: vec!["Jazz".into(), "Folk".into()],
                seeking_talent: true,
                ..Default::default()
            })
            .unwrap();
        let artist_id = db
            .create_artist(&ArtistFields {
                name: "Guns N Petals".into(),
                city: "San Francisco".into(),
                state: "CA".into(),
                genres: vec!["Rock n Roll".into()],
                ..Default::default()
            })
            .unwrap();
        for year in [2019, 2099] {
            db.create_show(&NewShow {
                artist_id,
                venue_id,
                start_time: NaiveDate::from_ymd_opt(year, 5, 21)
                    .unwrap()
                    .and_hms_opt(21, 30, 0)
                    .unwrap(),
            })
            .unwrap();
        }
        router(Arc::new(AppStateInner { db }))
    }

    pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Reply {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        send(app, builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(app: &Router, uri: &str, form: &str) -> Reply {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        send(app, request).await
    }

    async fn send(app: &Router, request: Request<Body>) -> Reply {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        Reply {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{app, get, post_form};
    use axum::http::StatusCode;
    use chrono::{Local, TimeDelta};

    #[test]
    fn now_is_local_wall_clock() {
        let before = Local::now().naive_local();
        let t = super::now();
        let after = Local::now().naive_local();
        assert!(before <= t && t <= after);
        assert!(after - before < TimeDelta::seconds(5));
    }

    #[tokio::test]
    async fn home_renders() {
        let app = app();
        let reply = get(&app, "/", None).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert!(reply.body.contains("<title>Home | Fyyur</title>"));
        assert!(reply.cookie().is_none());
    }

    #[tokio::test]
    async fn unknown_route_renders_404_page() {
        let app = app();
        let reply = get(&app, "/nowhere", None).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert!(reply.body.contains("<h1>404</h1>"));
    }

    #[tokio::test]
    async fn flash_survives_redirect_and_is_shown_once() {
        let app = app();
        let reply = post_form(
            &app,
            "/venues/create",
            "name=The+Dueling+Pianos+Bar&city=New+York&state=NY&address=335+Delancey+Street\
             &genres=Classical&genres=R%26B&seeking_talent=n",
        )
        .await;
        assert_eq!(reply.status, StatusCode::SEE_OTHER);
        assert_eq!(reply.location(), Some("/"));

        let cookie = reply.cookie().unwrap();
        assert!(cookie.starts_with("flash="));

        let home = get(&app, "/", Some(&cookie)).await;
        assert!(
            home.body
                .contains("Venue The Dueling Pianos Bar was successfully listed!")
        );
        // The page that displays the message also expires the cookie.
        assert_eq!(home.cookie().as_deref(), Some("flash="));
    }
}
