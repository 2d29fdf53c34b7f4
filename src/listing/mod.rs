//! Filter, sort and paginate engine shared by every table in the console
//!
//! A `ViewState` holds what the operator chose (search text, category, sort
//! key, page) and derives the visible slice of a collection on demand. The
//! store owns the data; view states only borrow it.

pub mod records;
pub mod view_state;

pub use records::{
    ActivitySortKey, ProtoMappingSortKey, RequestLogSortKey, RouteSortKey, ServerLogSortKey,
    ServiceSortKey,
};
pub use view_state::{CategoryFilter, DerivedView, SortDirection, ViewState, category_values};

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::fmt;

/// Sort keys offered by a listing
pub trait SortKey: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Every key in cycling order
    fn all() -> &'static [Self];

    /// Column label
    fn label(&self) -> &'static str;
}

/// A record type that can be shown in a filtered, sorted, paginated table
pub trait Listing {
    type SortKey: SortKey;

    /// Text fields matched by the search box
    fn search_fields(&self) -> Vec<&str>;

    /// Value compared against the categorical filter, `None` when the
    /// listing has no category
    fn category(&self) -> Option<Cow<'_, str>> {
        None
    }

    fn sort_value(&self, key: Self::SortKey) -> SortValue<'_>;
}

/// Comparable value extracted for one sort key
///
/// A given key always yields the same variant, so cross-variant ordering
/// never matters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue<'a> {
    Number(u64),
    Text(Cow<'a, str>),
    Time(Option<DateTime<Utc>>),
}

impl<'a> SortValue<'a> {
    pub fn text(value: &'a str) -> Self {
        SortValue::Text(Cow::Borrowed(value))
    }
}
