//! Built-in opportunity catalog and the provider that serves it.

use crate::domain::{
    Feed, FormData, FundingCategory, FundingDataProvider, FundingOpportunity, ProviderResult,
};
use futures::future::{BoxFuture, FutureExt};
use std::time::Duration;
use tracing::{debug, info};

/// Latency of a simulated profile submission.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// Opportunities bookmarked when the application starts.
pub const DEFAULT_SAVED_IDS: [&str; 2] = ["1", "4"];

#[allow(clippy::too_many_arguments)]
fn opportunity(
    id: &str,
    name: &str,
    category: FundingCategory,
    description: &str,
    amount: &str,
    deadline: Option<&str>,
    company: &str,
    stages: &[&str],
    industries: &[&str],
    location: &str,
    match_score: u8,
) -> FundingOpportunity {
    FundingOpportunity {
        id: id.to_string(),
        name: name.to_string(),
        category,
        description: description.to_string(),
        amount: amount.to_string(),
        deadline: deadline.map(str::to_string),
        company: company.to_string(),
        stages: stages.iter().map(|s| s.to_string()).collect(),
        industries: industries.iter().map(|s| s.to_string()).collect(),
        location: location.to_string(),
        match_score,
    }
}

/// The six opportunities listed on the matches view.
pub fn matches_catalog() -> Vec<FundingOpportunity> {
    vec![
        opportunity(
            "1",
            "TechStars NYC Accelerator",
            FundingCategory::Accelerator,
            "3-month accelerator program for early-stage startups in NYC. Includes $120k investment, mentorship, and demo day.",
            "$120,000",
            Some("March 15, 2024"),
            "TechStars",
            &["Pre-Seed", "Seed"],
            &["FinTech", "SaaS", "AI/ML"],
            "New York, NY",
            92,
        ),
        opportunity(
            "2",
            "Andreessen Horowitz Seed Fund",
            FundingCategory::Vc,
            "Seed-stage funding for technology startups with strong technical teams and innovative solutions.",
            "$1M - $5M",
            None,
            "a16z",
            &["Seed", "Series A"],
            &["AI/ML", "SaaS", "Blockchain"],
            "San Francisco, CA",
            87,
        ),
        opportunity(
            "3",
            "SBIR Phase I Grant",
            FundingCategory::Grant,
            "Small Business Innovation Research grant for R&D projects with commercial potential.",
            "$50,000 - $500,000",
            Some("April 30, 2024"),
            "U.S. Government",
            &["Idea", "Prototype"],
            &["HealthTech", "CleanTech", "AI/ML"],
            "United States",
            78,
        ),
        opportunity(
            "4",
            "First Round Capital",
            FundingCategory::Vc,
            "Early-stage venture capital firm focused on product and engineering excellence.",
            "$500K - $15M",
            None,
            "First Round",
            &["Seed", "Series A"],
            &["SaaS", "Consumer", "Enterprise"],
            "New York, NY",
            84,
        ),
        opportunity(
            "5",
            "Y Combinator W24",
            FundingCategory::Accelerator,
            "World's most successful startup accelerator. 3-month program with $500k investment.",
            "$500,000",
            Some("February 20, 2024"),
            "Y Combinator",
            &["Pre-Seed", "Seed"],
            &["Any"],
            "San Francisco, CA",
            89,
        ),
        opportunity(
            "6",
            "Angel Investor Network",
            FundingCategory::Angel,
            "Network of high-net-worth individuals investing in early-stage startups.",
            "$25K - $250K",
            None,
            "Various Angels",
            &["Pre-Seed", "Seed"],
            &["FinTech", "HealthTech", "AI/ML"],
            "Global",
            76,
        ),
    ]
}

/// The four opportunities shown as recent matches on the dashboard.
pub fn dashboard_catalog() -> Vec<FundingOpportunity> {
    let mut catalog = matches_catalog();
    catalog.truncate(4);
    catalog
}

/// Stand-in for a backend round trip: waits `delay`, then accepts the profile.
pub(crate) fn simulated_submission(profile: FormData, delay: Duration) -> BoxFuture<'static, ProviderResult<()>> {
    async move {
        info!(company = %profile.company_name, delay_ms = delay.as_millis() as u64, "submitting startup profile");
        tokio::time::sleep(delay).await;
        debug!(company = %profile.company_name, "profile accepted");
        Ok(())
    }
    .boxed()
}

/// Serves the built-in catalog and simulates submissions with a fixed delay.
#[derive(Debug, Clone)]
pub struct MockProvider {
    submit_delay: Duration,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

impl MockProvider {
    pub fn new(submit_delay: Duration) -> Self {
        Self { submit_delay }
    }

    pub fn submit_delay(&self) -> Duration {
        self.submit_delay
    }
}

impl FundingDataProvider for MockProvider {
    fn list_opportunities(&self, feed: Feed) -> ProviderResult<Vec<FundingOpportunity>> {
        Ok(match feed {
            Feed::Dashboard => dashboard_catalog(),
            Feed::Matches => matches_catalog(),
        })
    }

    fn submit_profile(&self, profile: FormData) -> BoxFuture<'static, ProviderResult<()>> {
        simulated_submission(profile, self.submit_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_unique() {
        let catalog = matches_catalog();
        let ids: HashSet<&str> = catalog.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_dashboard_is_prefix_of_matches() {
        let dashboard = dashboard_catalog();
        assert_eq!(dashboard.len(), 4);
        assert_eq!(dashboard.as_slice(), &matches_catalog()[..4]);
    }

    #[test]
    fn test_mock_provider_feeds() {
        let provider = MockProvider::default();
        assert_eq!(provider.submit_delay(), DEFAULT_SUBMIT_DELAY);
        assert_eq!(provider.list_opportunities(Feed::Matches).unwrap().len(), 6);
        assert_eq!(provider.list_opportunities(Feed::Dashboard).unwrap().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_waits_for_delay() {
        let provider = MockProvider::new(Duration::from_millis(2000));
        let started = tokio::time::Instant::now();

        provider.submit_profile(FormData::default()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(2000));
    }
}
