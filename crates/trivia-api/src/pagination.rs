//! In-memory pagination over a fully fetched result list.

use serde::Deserialize;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// `?page=N`. Absent or unparsable values mean page 1.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

/// The `page`th slice of `QUESTIONS_PER_PAGE` items (1-indexed).
/// Pages below 1 or past the end are empty.
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    let start = page
        .checked_sub(1)
        .and_then(|p| usize::try_from(p).ok())
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE));

    match start {
        Some(start) if start < items.len() => {
            let end = (start + QUESTIONS_PER_PAGE).min(items.len());
            &items[start..end]
        }
        _ => &[],
    }
}
