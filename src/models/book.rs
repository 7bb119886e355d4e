//! Book model and related request types

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_TAKE: u64 = 10;

/// Stored book document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub author: String,
    pub year: i32,
}

/// Validated fields of a book about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub name: String,
    pub price: f64,
    pub image: String,
    pub author: String,
    pub year: i32,
}

impl NewBook {
    pub fn into_book(self, id: Uuid) -> Book {
        Book {
            id,
            name: self.name,
            price: self.price,
            image: self.image,
            author: self.author,
            year: self.year,
        }
    }
}

/// Create book request. Every field must be present and non-empty / non-zero.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[validate(required)]
    pub price: Option<f64>,
    #[validate(required, length(min = 1))]
    pub image: Option<String>,
    #[validate(required, length(min = 1))]
    pub author: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[validate(required)]
    pub year: Option<i32>,
}

impl CreateBook {
    /// Presence check; `None` when any field is missing, empty or zero.
    pub fn into_new_book(self) -> Option<NewBook> {
        if self.validate().is_err() {
            return None;
        }
        let price = self.price.filter(|p| *p != 0.0 && !p.is_nan())?;
        let year = self.year.filter(|y| *y != 0)?;
        Some(NewBook {
            name: self.name?,
            price,
            image: self.image?,
            author: self.author?,
            year,
        })
    }
}

/// Partial book update. Only these fields can be changed; `null` or an
/// absent key leaves the stored value untouched and unknown keys are ignored.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub name: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub price: Option<f64>,
    pub image: Option<String>,
    pub author: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub year: Option<i32>,
}

impl UpdateBook {
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(ref name) = self.name {
            book.name = name.clone();
        }
        if let Some(price) = self.price {
            book.price = price;
        }
        if let Some(ref image) = self.image {
            book.image = image.clone();
        }
        if let Some(ref author) = self.author {
            book.author = author.clone();
        }
        if let Some(year) = self.year {
            book.year = year;
        }
    }
}

/// Raw query string of `GET /books`; values are coerced by [`BookQuery::normalize`]
#[derive(Debug, Default, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Exact author match
    pub author: Option<String>,
    /// Exact publication year
    pub year: Option<String>,
    /// Page number (default: 1)
    pub page: Option<String>,
    /// Books per page (default: 10)
    pub take: Option<String>,
}

/// Equality filter applied to the books collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub author: Option<String>,
    pub year: Option<i32>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        self.author.as_deref().map_or(true, |a| a == book.author)
            && self.year.map_or(true, |y| y == book.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub take: u64,
}

impl Pagination {
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.take)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            take: DEFAULT_TAKE,
        }
    }
}

/// Numeric coercion for query values: integral numbers in any decimal form
/// (`2`, `2.0`, `1e3`) are accepted, everything else is `None`
fn parse_number(raw: Option<&str>) -> Option<i64> {
    let value = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite() && v.fract() == 0.0)?;

    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

impl BookQuery {
    /// Build the query from raw `key=value` pairs. A repeated key keeps its
    /// last value; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = BookQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "author" => query.author = Some(value),
                "year" => query.year = Some(value),
                "page" => query.page = Some(value),
                "take" => query.take = Some(value),
                _ => {}
            }
        }
        query
    }

    /// Turn the raw query into a filter and a page window.
    ///
    /// Returns `None` for the filter when `year` is present but not a number:
    /// such a filter can match no book.
    pub fn normalize(&self, max_take: u64) -> (Option<BookFilter>, Pagination) {
        let page = match parse_number(self.page.as_deref()) {
            Some(p) if p >= 1 => p as u64,
            _ => DEFAULT_PAGE,
        };
        let take = match parse_number(self.take.as_deref()) {
            Some(t) if t >= 1 => (t as u64).min(max_take.max(1)),
            _ => DEFAULT_TAKE.min(max_take.max(1)),
        };
        let pagination = Pagination { page, take };

        let author = self.author.clone().filter(|a| !a.is_empty());
        let year = match self.year.as_deref().filter(|y| !y.is_empty()) {
            None => None,
            Some(raw) => match parse_number(Some(raw)).and_then(|y| i32::try_from(y).ok()) {
                Some(y) => Some(y),
                None => return (None, pagination),
            },
        };

        (Some(BookFilter { author, year }), pagination)
    }
}
