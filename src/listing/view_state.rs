//! Per-table view state and its derivation

use super::{Listing, SortKey};
use std::collections::BTreeSet;
use std::fmt;

/// Sentinel accepted by `CategoryFilter::parse` for "no filter"
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Categorical filter; `All` lets every row through
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse user input, mapping empty text and the `all` sentinel to `All`
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_CATEGORIES) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(wanted.as_str()),
        }
    }

    /// Next filter when cycling through `options`: All, then each option,
    /// then back to All
    pub fn cycle(&self, options: &[String]) -> Self {
        let next = match self {
            CategoryFilter::All => options.first(),
            CategoryFilter::Only(current) => options
                .iter()
                .position(|o| o == current)
                .and_then(|i| options.get(i + 1)),
        };
        next.map(|v| CategoryFilter::Only(v.clone()))
            .unwrap_or(CategoryFilter::All)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(v) => f.write_str(v),
        }
    }
}

/// Distinct category values present in `source`, sorted
pub fn category_values<T: Listing>(source: &[T]) -> Vec<String> {
    source
        .iter()
        .filter_map(|r| r.category().map(|c| c.into_owned()))
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Result of deriving a view state over a collection
#[derive(Debug)]
pub struct DerivedView<'a, T> {
    pub rows: Vec<&'a T>,
    /// `ceil(total_matches / page_size)`, 0 when nothing matches
    pub total_pages: usize,
    /// Echo of the requested page, never corrected
    pub current_page: usize,
    pub total_matches: usize,
}

impl<T> DerivedView<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Search, category, sort and page chosen for one listing
#[derive(Debug, Clone)]
pub struct ViewState<T: Listing> {
    search: String,
    category: CategoryFilter,
    sort: Option<(T::SortKey, SortDirection)>,
    page: usize,
    page_size: usize,
}

impl<T: Listing> ViewState<T> {
    /// Page sizes below 1 are raised to 1
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn sort(&self) -> Option<(T::SortKey, SortDirection)> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || self.category != CategoryFilter::All
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.page = 1;
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.page = 1;
    }

    /// Sort by `key`; the active key flips direction, a new key starts ascending
    pub fn set_sort(&mut self, key: T::SortKey) {
        self.sort = match self.sort {
            Some((active, direction)) if active == key => Some((key, direction.toggled())),
            _ => Some((key, SortDirection::Ascending)),
        };
        self.page = 1;
    }

    /// Move to the key after the active one (the first key when unsorted)
    pub fn cycle_sort(&mut self) {
        let keys = T::SortKey::all();
        let next = match self.sort {
            Some((active, _)) => keys
                .iter()
                .position(|k| *k == active)
                .map(|i| keys[(i + 1) % keys.len()]),
            None => keys.first().copied(),
        };
        if let Some(key) = next {
            self.sort = Some((key, SortDirection::Ascending));
            self.page = 1;
        }
    }

    /// Flip the direction of the active key, no-op when unsorted
    pub fn toggle_direction(&mut self) {
        if let Some((key, _)) = self.sort {
            self.set_sort(key);
        }
    }

    pub fn clear(&mut self) {
        self.search.clear();
        self.category = CategoryFilter::All;
        self.sort = None;
        self.page = 1;
    }

    /// Set the page as-is; out-of-range pages derive no rows
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Advance one page if it stays within `total_pages`
    pub fn next_page(&mut self, total_pages: usize) -> bool {
        if self.page < total_pages {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    fn matches(&self, record: &T, needle: &str) -> bool {
        let category = record.category();
        if !self.category.matches(category.as_deref()) {
            return false;
        }
        needle.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
    }

    /// Derive the visible rows of `source`
    pub fn derive<'a>(&self, source: &'a [T]) -> DerivedView<'a, T> {
        let needle = self.search.to_lowercase();
        let mut rows: Vec<&T> = source.iter().filter(|r| self.matches(r, &needle)).collect();

        if let Some((key, direction)) = self.sort {
            // sort_by is stable; reversing the comparator keeps ties in source order
            rows.sort_by(|a, b| {
                let ordering = a.sort_value(key).cmp(&b.sort_value(key));
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        let total_matches = rows.len();
        let total_pages = total_matches.div_ceil(self.page_size);

        let rows = match self.page.checked_sub(1) {
            Some(index) => rows
                .into_iter()
                .skip(index.saturating_mul(self.page_size))
                .take(self.page_size)
                .collect(),
            None => Vec::new(),
        };

        DerivedView {
            rows,
            total_pages,
            current_page: self.page,
            total_matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::SortValue;
    use std::borrow::Cow;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        kind: &'static str,
        size: u64,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum RowKey {
        Name,
        Size,
    }

    impl SortKey for RowKey {
        fn all() -> &'static [Self] {
            &[RowKey::Name, RowKey::Size]
        }

        fn label(&self) -> &'static str {
            match self {
                RowKey::Name => "NAME",
                RowKey::Size => "SIZE",
            }
        }
    }

    impl Listing for Row {
        type SortKey = RowKey;

        fn search_fields(&self) -> Vec<&str> {
            vec![self.name]
        }

        fn category(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.kind))
        }

        fn sort_value(&self, key: RowKey) -> SortValue<'_> {
            match key {
                RowKey::Name => SortValue::text(self.name),
                RowKey::Size => SortValue::Number(self.size),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "beta", kind: "x", size: 2 },
            Row { name: "Alpha", kind: "y", size: 10 },
            Row { name: "gamma", kind: "x", size: 2 },
        ]
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut state = ViewState::<Row>::new(10);
        state.set_search("ALP");
        let source = rows();
        let view = state.derive(&source);
        assert_eq!(view.total_matches, 1);
        assert_eq!(view.rows[0].name, "Alpha");
    }

    #[test]
    fn test_numeric_sort_is_numeric() {
        let mut state = ViewState::<Row>::new(10);
        state.set_sort(RowKey::Size);
        let source = rows();
        let view = state.derive(&source);
        let names: Vec<_> = view.rows.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["beta", "gamma", "Alpha"]);
    }

    #[test]
    fn test_descending_keeps_ties_stable() {
        let mut state = ViewState::<Row>::new(10);
        state.set_sort(RowKey::Size);
        state.set_sort(RowKey::Size);
        assert_eq!(state.sort(), Some((RowKey::Size, SortDirection::Descending)));
        let source = rows();
        let names: Vec<_> = state.derive(&source).rows.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_category_filter() {
        let mut state = ViewState::<Row>::new(10);
        state.set_category(CategoryFilter::parse("x"));
        assert_eq!(state.derive(&rows()).total_matches, 2);
        state.set_category(CategoryFilter::parse("ALL"));
        assert_eq!(state.derive(&rows()).total_matches, 3);
    }

    #[test]
    fn test_category_cycle_wraps_to_all() {
        let options = category_values(&rows());
        assert_eq!(options, vec!["x".to_string(), "y".to_string()]);
        let first = CategoryFilter::All.cycle(&options);
        assert_eq!(first, CategoryFilter::Only("x".to_string()));
        let second = first.cycle(&options);
        assert_eq!(second.cycle(&options), CategoryFilter::All);
    }

    #[test]
    fn test_page_zero_and_out_of_range_yield_nothing() {
        let mut state = ViewState::<Row>::new(2);
        state.set_page(0);
        assert!(state.derive(&rows()).is_empty());
        state.set_page(5);
        let source = rows();
        let view = state.derive(&source);
        assert!(view.is_empty());
        assert_eq!(view.current_page, 5);
        assert_eq!(view.total_pages, 2);
    }

    #[test]
    fn test_cycle_sort_and_toggle() {
        let mut state = ViewState::<Row>::new(2);
        state.toggle_direction();
        assert_eq!(state.sort(), None);
        state.cycle_sort();
        assert_eq!(state.sort(), Some((RowKey::Name, SortDirection::Ascending)));
        state.toggle_direction();
        assert_eq!(state.sort(), Some((RowKey::Name, SortDirection::Descending)));
        state.cycle_sort();
        assert_eq!(state.sort(), Some((RowKey::Size, SortDirection::Ascending)));
        state.cycle_sort();
        assert_eq!(state.sort(), Some((RowKey::Name, SortDirection::Ascending)));
    }

    #[test]
    fn test_zero_page_size_is_raised() {
        let state = ViewState::<Row>::new(0);
        assert_eq!(state.page_size(), 1);
        assert_eq!(state.derive(&rows()).total_pages, 3);
    }
}
