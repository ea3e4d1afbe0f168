//! Data access seam between the state machines and wherever opportunities
//! and profiles actually live.

use super::errors::ProviderResult;
use super::models::{FormData, FundingOpportunity};
use futures::future::BoxFuture;

/// Which listing a view asks the provider for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    /// Short list of recent matches shown on the dashboard.
    Dashboard,
    /// Full list shown on the matches view.
    Matches,
}

/// Source of funding opportunities and sink for submitted startup profiles.
///
/// The wizard and the opportunity boards only talk to this trait, so a real
/// backend can replace the built-in catalog without touching filtering or
/// validation.
pub trait FundingDataProvider: Send + Sync {
    /// Returns every opportunity of a feed in its canonical order.
    fn list_opportunities(&self, feed: Feed) -> ProviderResult<Vec<FundingOpportunity>>;

    /// Submits a completed profile. The returned future owns everything it
    /// needs so it can run detached from the caller.
    fn submit_profile(&self, profile: FormData) -> BoxFuture<'static, ProviderResult<()>>;
}
