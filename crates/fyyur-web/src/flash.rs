//! One-shot messages carried across a redirect in the `flash` cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

const COOKIE_NAME: &str = "flash";

/// Queue `message` for the next rendered page.
pub fn set(jar: CookieJar, message: impl Into<String>) -> CookieJar {
    let value = URL_SAFE_NO_PAD.encode(message.into());
    jar.add(
        Cookie::build((COOKIE_NAME, value))
            .path("/")
            .http_only(true),
    )
}

/// Read the pending message, if any, and schedule the cookie for removal.
/// A cookie that does not decode is dropped silently.
pub fn take(jar: CookieJar) -> (CookieJar, Option<String>) {
    let Some(cookie) = jar.get(COOKIE_NAME) else {
        return (jar, None);
    };

    let message = URL_SAFE_NO_PAD
        .decode(cookie.value())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok());

    (jar.remove(Cookie::build(COOKIE_NAME).path("/")), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_take() {
        let jar = set(CookieJar::new(), "Venue 3 was successfully deleted.");
        let (jar, message) = take(jar);
        assert_eq!(message.as_deref(), Some("Venue 3 was successfully deleted."));
        assert!(jar.get(COOKIE_NAME).is_none());
    }

    #[test]
    fn garbage_cookie_is_ignored() {
        let jar = CookieJar::new().add(Cookie::new(COOKIE_NAME, "!!not base64!!"));
        let (jar, message) = take(jar);
        assert_eq!(message, None);
        assert!(jar.get(COOKIE_NAME).is_none());
    }

    #[test]
    fn nothing_pending() {
        let (_, message) = take(CookieJar::new());
        assert_eq!(message, None);
    }
}
