//! Opportunity filtering for the dashboard and matches views.
//!
//! A [`OpportunityBoard`] owns the per-view state (saved ids, search text,
//! active category tab) and derives the visible list on demand:
//!
//! 1. annotate `saved` by membership in the saved-id set,
//! 2. keep only the active category (unless the tab is "all"),
//! 3. keep only records matching the search text in the view's [`SearchScope`],
//! 4. stable-sort by match score, highest first.

use super::errors::{DomainError, DomainResult};
use super::models::{Choice, FundingCategory, FundingOpportunity};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Maximum number of cards the dashboard shows under "recent matches".
pub const DASHBOARD_RECENT_LIMIT: usize = 6;

/// Category tab selected on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(FundingCategory),
}

impl CategoryFilter {
    /// Tabs in display order.
    pub const TABS: [CategoryFilter; 5] = [
        CategoryFilter::All,
        CategoryFilter::Only(FundingCategory::Vc),
        CategoryFilter::Only(FundingCategory::Grant),
        CategoryFilter::Only(FundingCategory::Accelerator),
        CategoryFilter::Only(FundingCategory::Angel),
    ];

    pub fn matches(self, category: FundingCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    pub fn tab_label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(FundingCategory::Vc) => "VCs",
            CategoryFilter::Only(FundingCategory::Grant) => "Grants",
            CategoryFilter::Only(FundingCategory::Accelerator) => "Accelerators",
            CategoryFilter::Only(FundingCategory::Angel) => "Angels",
        }
    }

    pub fn tab_index(self) -> usize {
        Self::TABS.iter().position(|tab| *tab == self).unwrap_or(0)
    }

    pub fn next_tab(self) -> Self {
        Self::TABS[(self.tab_index() + 1) % Self::TABS.len()]
    }

    pub fn previous_tab(self) -> Self {
        let len = Self::TABS.len();
        Self::TABS[(self.tab_index() + len - 1) % len]
    }
}

impl FromStr for CategoryFilter {
    type Err = DomainError;

    /// Accepts `"all"` or a category name, ignoring case.
    fn from_str(s: &str) -> DomainResult<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        FundingCategory::parse(s)
            .map(CategoryFilter::Only)
            .map_err(|_| DomainError::UnknownFilter(s.to_string()))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => f.write_str(&category.value().to_ascii_lowercase()),
        }
    }
}

/// Which fields besides name and company take part in free-text search.
///
/// The two views have always searched different fields; they stay separate
/// rather than being merged into one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchScope {
    /// Name, company and category.
    Dashboard,
    /// Name, company and industry tags.
    Matches,
}

impl SearchScope {
    /// `needle` must already be lowercase.
    fn matches(self, opportunity: &FundingOpportunity, needle: &str) -> bool {
        let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

        if contains(&opportunity.name) || contains(&opportunity.company) {
            return true;
        }
        match self {
            SearchScope::Dashboard => contains(opportunity.category.value()),
            SearchScope::Matches => opportunity.industries.iter().any(|industry| contains(industry)),
        }
    }
}

/// An opportunity as displayed, with its derived saved flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpportunityView<'a> {
    pub opportunity: &'a FundingOpportunity,
    pub saved: bool,
}

/// Average match score of a filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAverage {
    /// The list was empty.
    NoData,
    Score(u8),
}

impl fmt::Display for MatchAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchAverage::NoData => f.write_str("--"),
            MatchAverage::Score(score) => write!(f, "{}%", score),
        }
    }
}

/// Runs the four-stage derivation over `opportunities`.
///
/// The source slice is never modified; ties in match score keep their
/// original relative order.
///
/// # Examples
///
/// ```
/// use fundmatch::domain::{derive_opportunities, CategoryFilter, SearchScope};
/// use fundmatch::infrastructure::matches_catalog;
/// use std::collections::HashSet;
///
/// let catalog = matches_catalog();
/// let saved: HashSet<String> = HashSet::new();
/// let grants = derive_opportunities(&catalog, &saved, CategoryFilter::Only(fundmatch::domain::FundingCategory::Grant), "", SearchScope::Matches);
/// assert_eq!(grants.len(), 1);
/// ```
pub fn derive_opportunities<'a>(
    opportunities: &'a [FundingOpportunity],
    saved: &HashSet<String>,
    filter: CategoryFilter,
    search: &str,
    scope: SearchScope,
) -> Vec<OpportunityView<'a>> {
    let needle = search.to_lowercase();

    let mut views: Vec<OpportunityView<'a>> = opportunities
        .iter()
        .map(|opportunity| OpportunityView {
            opportunity,
            saved: saved.contains(&opportunity.id),
        })
        .filter(|view| filter.matches(view.opportunity.category))
        .filter(|view| needle.is_empty() || scope.matches(view.opportunity, &needle))
        .collect();

    // slice::sort_by is stable
    views.sort_by(|a, b| b.opportunity.match_score.cmp(&a.opportunity.match_score));
    views
}

/// Mean match score rounded half up, or [`MatchAverage::NoData`] for an empty list.
pub fn average_match_score(views: &[OpportunityView<'_>]) -> MatchAverage {
    if views.is_empty() {
        return MatchAverage::NoData;
    }
    let count = views.len() as u32;
    let total: u32 = views.iter().map(|v| u32::from(v.opportunity.match_score)).sum();
    let rounded = (total * 2 + count) / (count * 2);
    MatchAverage::Score(rounded.min(u32::from(u8::MAX)) as u8)
}

/// State owner for one opportunity list view.
///
/// All mutation goes through [`OpportunityBoard::dispatch`]; everything shown
/// on screen is derived from the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct OpportunityBoard {
    opportunities: Vec<FundingOpportunity>,
    scope: SearchScope,
    saved: HashSet<String>,
    search: String,
    filter: CategoryFilter,
    display_limit: Option<usize>,
    /// Index of the highlighted card within the shown list.
    pub selected: usize,
}

/// User intents a board reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    ToggleSaved(String),
    SetSearch(String),
    SetFilter(CategoryFilter),
}

impl OpportunityBoard {
    pub fn new(opportunities: Vec<FundingOpportunity>, scope: SearchScope) -> Self {
        Self {
            opportunities,
            scope,
            saved: HashSet::new(),
            search: String::new(),
            filter: CategoryFilter::All,
            display_limit: None,
            selected: 0,
        }
    }

    /// Caps how many cards are shown and selectable.
    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = Some(limit);
        self
    }

    /// Pre-populates the saved set, e.g. with bookmarks from a previous session.
    pub fn with_saved<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.saved.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn opportunities(&self) -> &[FundingOpportunity] {
        &self.opportunities
    }

    pub fn scope(&self) -> SearchScope {
        self.scope
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved.contains(id)
    }

    /// Applies one user action and keeps the selection inside the new list.
    pub fn dispatch(&mut self, action: BoardAction) {
        match action {
            BoardAction::ToggleSaved(id) => self.toggle_saved(&id),
            BoardAction::SetSearch(search) => {
                debug!(%search, "search changed");
                self.search = search;
            }
            BoardAction::SetFilter(filter) => {
                debug!(%filter, "category tab changed");
                self.filter = filter;
            }
        }
        self.clamp_selection();
    }

    /// Adds `id` to the saved set if absent, removes it otherwise.
    pub fn toggle_saved(&mut self, id: &str) {
        if !self.saved.remove(id) {
            self.saved.insert(id.to_string());
        }
        debug!(id, saved = self.saved.contains(id), "saved toggled");
    }

    /// The filtered, sorted list for the current state.
    pub fn visible(&self) -> Vec<OpportunityView<'_>> {
        derive_opportunities(&self.opportunities, &self.saved, self.filter, &self.search, self.scope)
    }

    /// The cards actually on screen: `visible()` cut to the display limit.
    pub fn shown(&self) -> Vec<OpportunityView<'_>> {
        let mut views = self.visible();
        if let Some(limit) = self.display_limit {
            views.truncate(limit);
        }
        views
    }

    pub fn selected_view(&self) -> Option<OpportunityView<'_>> {
        self.shown().get(self.selected).copied()
    }

    pub fn average_match(&self) -> MatchAverage {
        average_match_score(&self.visible())
    }

    /// Number of source records per tab, ignoring search and the active tab.
    pub fn tab_count(&self, tab: CategoryFilter) -> usize {
        self.opportunities
            .iter()
            .filter(|o| tab.matches(o.category))
            .count()
    }

    /// Number of source records currently saved.
    pub fn saved_count(&self) -> usize {
        self.opportunities
            .iter()
            .filter(|o| self.saved.contains(&o.id))
            .count()
    }

    pub fn select_next(&mut self) {
        let len = self.shown().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.shown().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
