//! Filter/sort query builder
//!
//! Listing endpoints take two query parameters: `filter`, an expression in
//! the backend's filter language, and `sort`, a directive for its sort
//! parser. Expressions are assembled from typed [`Predicate`] values and only
//! rendered to text at the end:
//!
//! ```text
//! title % "%frieren%" && hasType("anime-season","anime-movie") && !hasRating("r-17")
//! sort=-score
//! ```
//!
//! Free text is interpolated as-is. A `"` or `%` typed by the user reaches the
//! backend unescaped; the backend only accepts filters from authenticated
//! users, and it rejects expressions it cannot parse.

use crate::client::RequestOptions;
use crate::error::ApiResult;
use crate::facets::{
    string_enum, CollectionType, MediaRating, MediaStatus, MediaType, MediaUserList, ShowType,
};
use crate::url::Url;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Query parameters of an incoming page request
pub type SearchParams = BTreeMap<String, String>;

/// Page size used by the quick-search and dashboard queries
pub const SHORT_PAGE_SIZE: u32 = 10;

/// Collect a URL's query string; a repeated key keeps its last value.
#[must_use]
pub fn params_from_url(url: &Url) -> SearchParams {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

// ============================================================================
// Expression model
// ============================================================================

/// One clause of a filter expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `field % "%text%"`
    Contains {
        /// Text field matched against
        field: &'static str,
        /// Raw user text
        text: String,
    },
    /// `field == "value"`
    Equals {
        /// Compared field
        field: &'static str,
        /// Expected value
        value: String,
    },
    /// `field != null`
    NotNull {
        /// Checked field
        field: &'static str,
    },
    /// `hasX("a","b")` matches any of the values; `!hasX(...)` matches none
    HasAny {
        /// Backend function name, e.g. `hasType`
        function: &'static str,
        /// Values, rendered quoted in order
        values: Vec<String>,
        /// Render with a leading `!`
        negated: bool,
    },
}

impl Predicate {
    /// Substring match on a text field
    pub fn contains(field: &'static str, text: impl Into<String>) -> Self {
        Self::Contains {
            field,
            text: text.into(),
        }
    }

    /// Exact match
    pub fn equals(field: &'static str, value: impl fmt::Display) -> Self {
        Self::Equals {
            field,
            value: value.to_string(),
        }
    }

    /// Field is set
    #[must_use]
    pub fn not_null(field: &'static str) -> Self {
        Self::NotNull { field }
    }

    /// Facet inclusion; `None` for an empty set, which means no constraint
    pub fn has_any<T: fmt::Display>(function: &'static str, values: &[T]) -> Option<Self> {
        Self::facet(function, values, false)
    }

    /// Facet exclusion; `None` for an empty set
    pub fn has_none<T: fmt::Display>(function: &'static str, values: &[T]) -> Option<Self> {
        Self::facet(function, values, true)
    }

    fn facet<T: fmt::Display>(function: &'static str, values: &[T], negated: bool) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self::HasAny {
            function,
            values: values.iter().map(ToString::to_string).collect(),
            negated,
        })
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains { field, text } => write!(f, "{field} % \"%{text}%\""),
            Self::Equals { field, value } => write!(f, "{field} == \"{value}\""),
            Self::NotNull { field } => write!(f, "{field} != null"),
            Self::HasAny {
                function,
                values,
                negated,
            } => {
                if *negated {
                    f.write_str("!")?;
                }
                write!(f, "{function}(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "\"{value}\"")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Clauses joined with logical AND; no clauses renders as `""` (no constraint)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpr {
    clauses: Vec<Predicate>,
}

impl FilterExpr {
    /// Empty expression
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause
    pub fn push(&mut self, clause: Predicate) -> &mut Self {
        self.clauses.push(clause);
        self
    }

    /// Append a clause if there is one
    pub fn push_opt(&mut self, clause: Option<Predicate>) -> &mut Self {
        if let Some(clause) = clause {
            self.clauses.push(clause);
        }
        self
    }

    /// Clauses in emission order
    #[must_use]
    pub fn clauses(&self) -> &[Predicate] {
        &self.clauses
    }

    /// Whether the expression constrains nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" && ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Rendered `+field`
    Asc,
    /// Rendered `-field`
    Desc,
}

/// One sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortItem {
    /// Backend field name
    pub field: String,
    /// Direction
    pub order: SortOrder,
}

/// Value of the `sort` query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortDirective {
    /// `sort=+a,-b`
    Fields(Vec<SortItem>),
    /// `random`
    Random,
    /// `default`: the backend's own order
    Default,
}

impl SortDirective {
    /// Ascending by one field
    pub fn asc(field: impl Into<String>) -> Self {
        Self::Fields(vec![SortItem {
            field: field.into(),
            order: SortOrder::Asc,
        }])
    }

    /// Descending by one field
    pub fn desc(field: impl Into<String>) -> Self {
        Self::Fields(vec![SortItem {
            field: field.into(),
            order: SortOrder::Desc,
        }])
    }

    /// Add a tie-breaking key
    #[must_use]
    pub fn then(self, field: impl Into<String>, order: SortOrder) -> Self {
        let item = SortItem {
            field: field.into(),
            order,
        };
        match self {
            Self::Fields(mut items) => {
                items.push(item);
                Self::Fields(items)
            }
            Self::Random | Self::Default => Self::Fields(vec![item]),
        }
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fields(items) => {
                f.write_str("sort=")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    let sign = match item.order {
                        SortOrder::Asc => '+',
                        SortOrder::Desc => '-',
                    };
                    write!(f, "{sign}{}", item.field)?;
                }
                Ok(())
            }
            Self::Random => f.write_str("random"),
            Self::Default => f.write_str("default"),
        }
    }
}

// ============================================================================
// Listing filters
// ============================================================================

/// Rendered `filter` and `sort` parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    /// Filter expression, `""` for none
    pub filter: String,
    /// Sort directive
    pub sort: String,
}

impl BuiltQuery {
    /// Write both parameters into request options, replacing earlier values
    pub fn apply_to(&self, options: &mut RequestOptions) {
        options.query.insert("filter".to_string(), self.filter.clone());
        options.query.insert("sort".to_string(), self.sort.clone());
    }
}

/// A listing page's filter object
pub trait ListingFilter: Sized {
    /// Clauses in fixed order: text, inclusions, exclusions
    fn filter_expr(&self) -> FilterExpr;

    /// Directive for the selected (or default) sort key
    fn sort_directive(&self) -> SortDirective;

    /// Read the filter from page query parameters
    fn from_search_params(params: &SearchParams) -> ApiResult<Self>;

    /// Render both query parameters
    fn build_query(&self) -> BuiltQuery {
        BuiltQuery {
            filter: self.filter_expr().to_string(),
            sort: self.sort_directive().to_string(),
        }
    }
}

/// Paging parameters passed through from the page URL
#[must_use]
pub fn page_options(params: &SearchParams) -> RequestOptions {
    let mut options = RequestOptions::new();
    for key in ["filter", "sort", "page"] {
        if let Some(value) = params.get(key) {
            options.query.insert(key.to_string(), value.clone());
        }
    }
    options
}

/// Parse a listing filter and produce the request options for its endpoint.
///
/// The filter is returned too so the page can echo the active selection.
pub fn listing_options<F: ListingFilter>(params: &SearchParams) -> ApiResult<(F, RequestOptions)> {
    let filter = F::from_search_params(params)?;
    let mut options = page_options(params);
    filter.build_query().apply_to(&mut options);
    Ok((filter, options))
}

/// Quick title search over media
#[must_use]
pub fn search_options(query: &str) -> RequestOptions {
    let mut filter = FilterExpr::new();
    filter.push(Predicate::contains("title", query));
    RequestOptions::new()
        .with_query("filter", filter.to_string())
        .with_query("perPage", SHORT_PAGE_SIZE.to_string())
}

/// Queries behind the signed-in home page
pub mod dashboard {
    use super::{FilterExpr, Predicate, SortDirective, SHORT_PAGE_SIZE};
    use crate::client::RequestOptions;
    use crate::facets::MediaUserList;

    fn short(filter: &FilterExpr, sort: &SortDirective) -> RequestOptions {
        RequestOptions::new()
            .with_query("filter", filter.to_string())
            .with_query("sort", sort.to_string())
            .with_query("perPage", SHORT_PAGE_SIZE.to_string())
    }

    fn on_list(list: MediaUserList) -> FilterExpr {
        let mut filter = FilterExpr::new();
        filter.push(Predicate::equals("userList", list));
        filter
    }

    /// Media the user is currently watching, most recently touched first
    #[must_use]
    pub fn in_progress() -> RequestOptions {
        short(
            &on_list(MediaUserList::InProgress),
            &SortDirective::desc("userUpdated"),
        )
    }

    /// Backlog media by title
    #[must_use]
    pub fn backlog() -> RequestOptions {
        short(&on_list(MediaUserList::Backlog), &SortDirective::asc("title"))
    }

    /// Newest media or collections
    #[must_use]
    pub fn recently_created() -> RequestOptions {
        short(&FilterExpr::new(), &SortDirective::desc("created"))
    }
}

fn text_param(params: &SearchParams, key: &str) -> String {
    params.get(key).cloned().unwrap_or_default()
}

/// Comma-separated facet values; empty items are dropped, duplicates kept once.
fn list_param<T>(params: &SearchParams, key: &str) -> ApiResult<Vec<T>>
where
    T: FromStr<Err = crate::error::ApiError> + PartialEq,
{
    let mut values = Vec::new();
    let Some(raw) = params.get(key) else {
        return Ok(values);
    };
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let value = item.parse::<T>()?;
        if !values.contains(&value) {
            values.push(value);
        }
    }
    Ok(values)
}

/// Unknown or missing sort keys fall back to the default.
fn sort_param<S: FromStr + Default>(params: &SearchParams) -> S {
    params
        .get("sort")
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

string_enum! {
    /// Sort keys of the media listing
    MediaSort {
        TitleAZ => "title-a-z",
        TitleZA => "title-z-a",
        ScoreHigh => "score-high",
        ScoreLow => "score-low",
    }
}

impl Default for MediaSort {
    fn default() -> Self {
        Self::TitleAZ
    }
}

impl MediaSort {
    /// Backend sort directive
    #[must_use]
    pub fn directive(self) -> SortDirective {
        match self {
            Self::TitleAZ => SortDirective::asc("title"),
            Self::TitleZA => SortDirective::desc("title"),
            Self::ScoreHigh => SortDirective::desc("score"),
            Self::ScoreLow => SortDirective::asc("score"),
        }
    }
}

string_enum! {
    /// Sort keys of a user's watchlist
    WatchlistSort {
        TitleAZ => "title-a-z",
        TitleZA => "title-z-a",
        ScoreHigh => "score-high",
        ScoreLow => "score-low",
        UserScoreHigh => "user-score-high",
        UserScoreLow => "user-score-low",
    }
}

impl Default for WatchlistSort {
    fn default() -> Self {
        Self::TitleAZ
    }
}

impl WatchlistSort {
    /// Backend sort directive
    #[must_use]
    pub fn directive(self) -> SortDirective {
        match self {
            Self::TitleAZ => SortDirective::asc("title"),
            Self::TitleZA => SortDirective::desc("title"),
            Self::ScoreHigh => SortDirective::desc("score"),
            Self::ScoreLow => SortDirective::asc("score"),
            Self::UserScoreHigh => SortDirective::desc("userScore"),
            Self::UserScoreLow => SortDirective::asc("userScore"),
        }
    }
}

string_enum! {
    /// Sort keys of the show listing
    ShowSort {
        NameAZ => "name-a-z",
        NameZA => "name-z-a",
        CreatedNew => "created-new",
        CreatedOld => "created-old",
        UpdatedNew => "updated-new",
        UpdatedOld => "updated-old",
    }
}

impl Default for ShowSort {
    fn default() -> Self {
        Self::NameAZ
    }
}

impl ShowSort {
    /// Backend sort directive
    #[must_use]
    pub fn directive(self) -> SortDirective {
        match self {
            Self::NameAZ => SortDirective::asc("name"),
            Self::NameZA => SortDirective::desc("name"),
            Self::CreatedNew => SortDirective::desc("created"),
            Self::CreatedOld => SortDirective::asc("created"),
            Self::UpdatedNew => SortDirective::desc("updated"),
            Self::UpdatedOld => SortDirective::asc("updated"),
        }
    }
}

string_enum! {
    /// Sort keys of the collection listing
    CollectionSort {
        NameAZ => "name-a-z",
        NameZA => "name-z-a",
    }
}

impl Default for CollectionSort {
    fn default() -> Self {
        Self::NameAZ
    }
}

impl CollectionSort {
    /// Backend sort directive
    #[must_use]
    pub fn directive(self) -> SortDirective {
        match self {
            Self::NameAZ => SortDirective::asc("name"),
            Self::NameZA => SortDirective::desc("name"),
        }
    }
}

/// Facet selections of the media listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaFacets {
    /// `hasType`
    pub types: Vec<MediaType>,
    /// `hasStatus`
    pub status: Vec<MediaStatus>,
    /// `hasRating`
    pub rating: Vec<MediaRating>,
}

/// Filter of the media listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaFilter {
    /// Title substring
    pub query: String,
    /// Facets that must match
    pub include: MediaFacets,
    /// Facets that must not match
    pub exclude: MediaFacets,
    /// Sort key
    pub sort: MediaSort,
}

impl ListingFilter for MediaFilter {
    fn filter_expr(&self) -> FilterExpr {
        let mut expr = FilterExpr::new();
        if !self.query.is_empty() {
            expr.push(Predicate::contains("title", self.query.as_str()));
        }
        expr.push_opt(Predicate::has_any("hasType", &self.include.types))
            .push_opt(Predicate::has_any("hasStatus", &self.include.status))
            .push_opt(Predicate::has_any("hasRating", &self.include.rating))
            .push_opt(Predicate::has_none("hasType", &self.exclude.types))
            .push_opt(Predicate::has_none("hasStatus", &self.exclude.status))
            .push_opt(Predicate::has_none("hasRating", &self.exclude.rating));
        expr
    }

    fn sort_directive(&self) -> SortDirective {
        self.sort.directive()
    }

    fn from_search_params(params: &SearchParams) -> ApiResult<Self> {
        Ok(Self {
            query: text_param(params, "query"),
            include: MediaFacets {
                types: list_param(params, "filterType")?,
                status: list_param(params, "filterStatus")?,
                rating: list_param(params, "filterRating")?,
            },
            exclude: MediaFacets {
                types: list_param(params, "excludeType")?,
                status: list_param(params, "excludeStatus")?,
                rating: list_param(params, "excludeRating")?,
            },
            sort: sort_param(params),
        })
    }
}

/// Filter of the show listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowFilter {
    /// Name substring
    pub query: String,
    /// Show types that must match
    pub include: Vec<ShowType>,
    /// Show types that must not match
    pub exclude: Vec<ShowType>,
    /// Sort key
    pub sort: ShowSort,
}

impl ListingFilter for ShowFilter {
    fn filter_expr(&self) -> FilterExpr {
        let mut expr = FilterExpr::new();
        if !self.query.is_empty() {
            expr.push(Predicate::contains("name", self.query.as_str()));
        }
        expr.push_opt(Predicate::has_any("hasType", &self.include))
            .push_opt(Predicate::has_none("hasType", &self.exclude));
        expr
    }

    fn sort_directive(&self) -> SortDirective {
        self.sort.directive()
    }

    fn from_search_params(params: &SearchParams) -> ApiResult<Self> {
        Ok(Self {
            query: text_param(params, "query"),
            include: list_param(params, "filterType")?,
            exclude: list_param(params, "excludeType")?,
            sort: sort_param(params),
        })
    }
}

/// Filter of the collection listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionFilter {
    /// Name substring
    pub query: String,
    /// Collection types that must match
    pub include: Vec<CollectionType>,
    /// Collection types that must not match
    pub exclude: Vec<CollectionType>,
    /// Sort key
    pub sort: CollectionSort,
}

impl ListingFilter for CollectionFilter {
    fn filter_expr(&self) -> FilterExpr {
        let mut expr = FilterExpr::new();
        if !self.query.is_empty() {
            expr.push(Predicate::contains("name", self.query.as_str()));
        }
        expr.push_opt(Predicate::has_any("hasType", &self.include))
            .push_opt(Predicate::has_none("hasType", &self.exclude));
        expr
    }

    fn sort_directive(&self) -> SortDirective {
        self.sort.directive()
    }

    fn from_search_params(params: &SearchParams) -> ApiResult<Self> {
        Ok(Self {
            query: text_param(params, "query"),
            include: list_param(params, "filterType")?,
            exclude: list_param(params, "excludeType")?,
            sort: sort_param(params),
        })
    }
}

/// Filter of a user's watchlist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchlistFilter {
    /// One list, or every listed entry when `None`
    pub list: Option<MediaUserList>,
    /// Media types that must match
    pub types: Vec<MediaType>,
    /// Statuses that must match
    pub status: Vec<MediaStatus>,
    /// Sort key
    pub sort: WatchlistSort,
}

impl ListingFilter for WatchlistFilter {
    fn filter_expr(&self) -> FilterExpr {
        let mut expr = FilterExpr::new();
        match self.list {
            Some(list) => expr.push(Predicate::equals("userList", list)),
            None => expr.push(Predicate::not_null("userList")),
        };
        expr.push_opt(Predicate::has_any("hasType", &self.types))
            .push_opt(Predicate::has_any("hasStatus", &self.status));
        expr
    }

    fn sort_directive(&self) -> SortDirective {
        self.sort.directive()
    }

    fn from_search_params(params: &SearchParams) -> ApiResult<Self> {
        let list = match params.get("list").map(String::as_str) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse()?),
        };
        Ok(Self {
            list,
            types: list_param(params, "types")?,
            status: list_param(params, "status")?,
            sort: sort_param(params),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn params(pairs: &[(&str, &str)]) -> SearchParams {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_empty_filter_uses_default_sort() {
        let built = MediaFilter::default().build_query();
        assert_eq!(built.filter, "");
        assert_eq!(built.sort, "sort=+title");

        let built = ShowFilter::default().build_query();
        assert_eq!(built, BuiltQuery {
            filter: String::new(),
            sort: "sort=+name".to_string(),
        });
    }

    #[test]
    fn test_text_then_inclusion() {
        let filter = MediaFilter {
            query: "abc".to_string(),
            include: MediaFacets {
                types: vec![MediaType::Movie, MediaType::Tv],
                ..MediaFacets::default()
            },
            ..MediaFilter::default()
        };
        assert_eq!(
            filter.build_query().filter,
            r#"title % "%abc%" && hasType("movie","tv")"#
        );
    }

    #[test]
    fn test_include_and_exclude_same_facet_are_both_kept() {
        let filter = MediaFilter {
            include: MediaFacets {
                types: vec![MediaType::Movie],
                ..MediaFacets::default()
            },
            exclude: MediaFacets {
                types: vec![MediaType::Tv],
                ..MediaFacets::default()
            },
            ..MediaFilter::default()
        };
        assert_eq!(
            filter.build_query().filter,
            r#"hasType("movie") && !hasType("tv")"#
        );
    }

    #[test]
    fn test_clause_order_is_fixed() {
        let filter = MediaFilter {
            query: "x".to_string(),
            include: MediaFacets {
                types: vec![MediaType::Manga],
                status: vec![MediaStatus::Ongoing],
                rating: vec![MediaRating::Pg],
            },
            exclude: MediaFacets {
                types: vec![MediaType::Comic],
                status: vec![MediaStatus::Upcoming],
                rating: vec![MediaRating::RHentai],
            },
            sort: MediaSort::ScoreHigh,
        };
        let built = filter.build_query();
        assert_eq!(
            built.filter,
            concat!(
                r#"title % "%x%" && hasType("manga") && hasStatus("ongoing") && hasRating("pg")"#,
                r#" && !hasType("comic") && !hasStatus("upcoming") && !hasRating("r-hentai")"#
            )
        );
        assert_eq!(built.sort, "sort=-score");
    }

    #[test]
    fn test_free_text_is_not_escaped() {
        let filter = ShowFilter {
            query: r#"50% "off""#.to_string(),
            ..ShowFilter::default()
        };
        assert_eq!(filter.build_query().filter, r#"name % "%50% "off"%""#);
    }

    #[test]
    fn test_media_filter_from_params() {
        let filter = MediaFilter::from_search_params(&params(&[
            ("query", "frieren"),
            ("filterType", "anime-season,,anime-movie,anime-season"),
            ("excludeRating", "r-17"),
            ("sort", "score-low"),
        ]))
        .unwrap();

        assert_eq!(filter.query, "frieren");
        assert_eq!(
            filter.include.types,
            vec![MediaType::AnimeSeason, MediaType::AnimeMovie]
        );
        assert_eq!(filter.exclude.rating, vec![MediaRating::R17]);
        assert_eq!(filter.sort, MediaSort::ScoreLow);
    }

    #[test]
    fn test_unknown_sort_falls_back_to_default() {
        let filter = CollectionFilter::from_search_params(&params(&[("sort", "random-order")])).unwrap();
        assert_eq!(filter.sort, CollectionSort::NameAZ);
        assert_eq!(filter.build_query().sort, "sort=+name");
    }

    #[test]
    fn test_unknown_facet_value_is_an_error() {
        let result = MediaFilter::from_search_params(&params(&[("filterStatus", "paused")]));
        assert!(matches!(result, Err(ApiError::InvalidFilter(_))));
    }

    #[test]
    fn test_watchlist_clauses() {
        let all = WatchlistFilter::default().build_query();
        assert_eq!(all.filter, "userList != null");
        assert_eq!(all.sort, "sort=+title");

        let filter = WatchlistFilter::from_search_params(&params(&[
            ("list", "on-hold"),
            ("types", "tv"),
            ("sort", "user-score-high"),
        ]))
        .unwrap();
        let built = filter.build_query();
        assert_eq!(built.filter, r#"userList == "on-hold" && hasType("tv")"#);
        assert_eq!(built.sort, "sort=-userScore");
    }

    #[test]
    fn test_show_sort_directives() {
        let directives: Vec<String> = ShowSort::ALL
            .iter()
            .map(|s| s.directive().to_string())
            .collect();
        assert_eq!(
            directives,
            [
                "sort=+name",
                "sort=-name",
                "sort=-created",
                "sort=+created",
                "sort=-updated",
                "sort=+updated"
            ]
        );
    }

    #[test]
    fn test_sort_directive_forms() {
        let directive = SortDirective::desc("score").then("title", SortOrder::Asc);
        assert_eq!(directive.to_string(), "sort=-score,+title");
        assert_eq!(SortDirective::Random.to_string(), "random");
        assert_eq!(SortDirective::Default.to_string(), "default");
    }

    #[test]
    fn test_listing_options_override_passthrough() {
        let (filter, options) = listing_options::<MediaFilter>(&params(&[
            ("page", "3"),
            ("sort", "title-z-a"),
            ("filter", "ignored"),
        ]))
        .unwrap();

        assert_eq!(filter.sort, MediaSort::TitleZA);
        assert_eq!(options.query["page"], "3");
        assert_eq!(options.query["sort"], "sort=-title");
        assert_eq!(options.query["filter"], "");
    }

    #[test]
    fn test_search_and_dashboard_options() {
        let options = search_options("akira");
        assert_eq!(options.query["filter"], r#"title % "%akira%""#);
        assert_eq!(options.query["perPage"], "10");

        let options = dashboard::in_progress();
        assert_eq!(options.query["filter"], r#"userList == "in-progress""#);
        assert_eq!(options.query["sort"], "sort=-userUpdated");
        assert_eq!(dashboard::recently_created().query["filter"], "");
    }

    #[test]
    fn test_params_from_url() {
        let url = Url::parse("http://localhost:5173/media?query=a%20b&sort=score-high").unwrap();
        let params = params_from_url(&url);
        assert_eq!(params["query"], "a b");
        assert_eq!(params["sort"], "score-high");
    }
}
