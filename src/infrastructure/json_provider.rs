use super::catalog::{DEFAULT_SUBMIT_DELAY, simulated_submission};
use crate::domain::{Feed, FormData, FundingDataProvider, FundingOpportunity, ProviderError, ProviderResult};
use futures::future::BoxFuture;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

const MAX_MATCH_SCORE: u8 = 100;

/// On-disk layout of an opportunity file.
///
/// ```json
/// { "matches": [ ... ], "dashboard": [ ... ] }
/// ```
///
/// `dashboard` is optional and defaults to the matches list.
#[derive(Debug, Deserialize)]
struct OpportunityFeeds {
    matches: Vec<FundingOpportunity>,
    #[serde(default)]
    dashboard: Option<Vec<FundingOpportunity>>,
}

/// Provider backed by a JSON file read once at construction.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    dashboard: Vec<FundingOpportunity>,
    matches: Vec<FundingOpportunity>,
    submit_delay: Duration,
}

impl JsonFileProvider {
    pub fn load(path: impl AsRef<Path>) -> ProviderResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let provider = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            matches = provider.matches.len(),
            dashboard = provider.dashboard.len(),
            "loaded opportunity file"
        );
        Ok(provider)
    }

    pub fn from_json(content: &str) -> ProviderResult<Self> {
        let feeds: OpportunityFeeds = serde_json::from_str(content)?;
        validate_feed(&feeds.matches)?;
        let dashboard = match feeds.dashboard {
            Some(dashboard) => {
                validate_feed(&dashboard)?;
                dashboard
            }
            None => feeds.matches.clone(),
        };

        Ok(Self {
            dashboard,
            matches: feeds.matches,
            submit_delay: DEFAULT_SUBMIT_DELAY,
        })
    }

    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }
}

/// Rejects duplicate ids and match scores above 100.
fn validate_feed(opportunities: &[FundingOpportunity]) -> ProviderResult<()> {
    let mut seen = HashSet::new();
    for opportunity in opportunities {
        if !seen.insert(opportunity.id.as_str()) {
            return Err(ProviderError::DuplicateId(opportunity.id.clone()));
        }
        if opportunity.match_score > MAX_MATCH_SCORE {
            return Err(ProviderError::ScoreOutOfRange {
                id: opportunity.id.clone(),
                score: opportunity.match_score,
            });
        }
    }
    Ok(())
}

impl FundingDataProvider for JsonFileProvider {
    fn list_opportunities(&self, feed: Feed) -> ProviderResult<Vec<FundingOpportunity>> {
        Ok(match feed {
            Feed::Dashboard => self.dashboard.clone(),
            Feed::Matches => self.matches.clone(),
        })
    }

    fn submit_profile(&self, profile: FormData) -> BoxFuture<'static, ProviderResult<()>> {
        simulated_submission(profile, self.submit_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::matches_catalog;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_matches_only_file() {
        let json = serde_json::json!({ "matches": matches_catalog() }).to_string();
        let file = write_file(&json);

        let provider = JsonFileProvider::load(file.path()).unwrap();
        assert_eq!(provider.list_opportunities(Feed::Matches).unwrap(), matches_catalog());
        assert_eq!(provider.list_opportunities(Feed::Dashboard).unwrap(), matches_catalog());
    }

    #[test]
    fn test_separate_dashboard_feed() {
        let catalog = matches_catalog();
        let json = serde_json::json!({ "matches": catalog, "dashboard": &catalog[..1] }).to_string();

        let provider = JsonFileProvider::from_json(&json).unwrap();
        let dashboard = provider.list_opportunities(Feed::Dashboard).unwrap();
        assert_eq!(dashboard.len(), 1);
        assert_eq!(dashboard[0].id, "1");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut catalog = matches_catalog();
        catalog[1].id = "1".to_string();
        let json = serde_json::json!({ "matches": catalog }).to_string();

        let err = JsonFileProvider::from_json(&json).unwrap_err();
        assert!(matches!(err, ProviderError::DuplicateId(id) if id == "1"));
    }

    #[test]
    fn test_score_above_hundred_rejected() {
        let mut catalog = matches_catalog();
        catalog[0].match_score = 250;
        let json = serde_json::json!({ "matches": catalog }).to_string();

        let err = JsonFileProvider::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::ScoreOutOfRange { ref id, score: 250 } if id == "1"
        ));
    }

    #[test]
    fn test_score_of_hundred_accepted() {
        let mut catalog = matches_catalog();
        catalog[0].match_score = 100;
        let json = serde_json::json!({ "matches": catalog, "dashboard": &catalog[..2] }).to_string();

        assert!(JsonFileProvider::from_json(&json).is_ok());
    }

    #[test]
    fn test_dashboard_score_checked() {
        let catalog = matches_catalog();
        let mut dashboard = catalog[..1].to_vec();
        dashboard[0].match_score = 101;
        let json = serde_json::json!({ "matches": catalog, "dashboard": dashboard }).to_string();

        let err = JsonFileProvider::from_json(&json).unwrap_err();
        assert!(matches!(err, ProviderError::ScoreOutOfRange { score: 101, .. }));
    }

    #[test]
    fn test_invalid_json_reported() {
        let err = JsonFileProvider::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ProviderError::Json(_)));
    }

    #[test]
    fn test_missing_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileProvider::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ProviderError::Io(_)));
    }

    #[tokio::test]
    async fn test_submit_uses_configured_delay() {
        let provider = JsonFileProvider::from_json(r#"{ "matches": [] }"#)
            .unwrap()
            .with_submit_delay(Duration::ZERO);
        assert!(provider.submit_profile(FormData::default()).await.is_ok());
    }
}
