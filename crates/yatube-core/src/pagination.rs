//! Page slicing over ordered collections.
//!
//! Page numbers are 1-based. A missing or non-numeric page falls back to the
//! first page; a number outside `1..=num_pages` is clamped to the last page.
//! An empty collection still has one (empty) page.

use std::num::IntErrorKind;

use serde::Serialize;

/// Default number of posts shown per page.
pub const POSTS_PER_PAGE: u64 = 10;

/// Computes page boundaries for a collection of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    total: u64,
    per_page: u64,
}

impl Paginator {
    pub fn new(total: u64, per_page: u64) -> Self {
        Self {
            total,
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn num_pages(&self) -> u64 {
        self.total.div_ceil(self.per_page).max(1)
    }

    /// Turn a raw page parameter into a valid page number.
    pub fn resolve(&self, requested: Option<&str>) -> u64 {
        let Some(raw) = requested else {
            return 1;
        };
        let last = self.num_pages();
        match raw.trim().parse::<i64>() {
            Ok(n) => match u64::try_from(n) {
                Ok(n) if (1..=last).contains(&n) => n,
                _ => last,
            },
            // Still an integer, just out of any page range.
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                last
            }
            Err(_) => 1,
        }
    }

    /// Offset of the first item on `number`, which must already be resolved.
    pub fn offset(&self, number: u64) -> u64 {
        (number.saturating_sub(1)) * self.per_page
    }

    /// Wrap the already-sliced items of page `number`.
    pub fn page<T>(&self, number: u64, items: Vec<T>) -> Page<T> {
        Page {
            items,
            number,
            num_pages: self.num_pages(),
            total: self.total,
            per_page: self.per_page,
        }
    }
}

/// One page of an ordered collection plus navigation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub total: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert the items while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            total: self.total,
            per_page: self.per_page,
        }
    }
}

/// Slice an in-memory ordered collection into the requested page.
pub fn paginate<T>(items: Vec<T>, requested: Option<&str>, per_page: u64) -> Page<T> {
    let paginator = Paginator::new(items.len() as u64, per_page);
    let number = paginator.resolve(requested);
    let offset = paginator.offset(number) as usize;
    let slice = items
        .into_iter()
        .skip(offset)
        .take(paginator.per_page() as usize)
        .collect();
    paginator.page(number, slice)
}
