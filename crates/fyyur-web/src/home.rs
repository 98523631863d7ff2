use axum_extra::extract::cookie::CookieJar;

use crate::{Page, render, views};

pub async fn index(jar: CookieJar) -> Page {
    render(jar, "Home", views::home())
}
