//! Command-line configuration.

use crate::application::View;
use crate::domain::{FundingDataProvider, ProviderResult};
use crate::infrastructure::{DEFAULT_SUBMIT_DELAY, JsonFileProvider, MockProvider};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StartView {
    Landing,
    Onboarding,
    Dashboard,
    Matches,
}

impl From<StartView> for View {
    fn from(view: StartView) -> Self {
        match view {
            StartView::Landing => View::Landing,
            StartView::Onboarding => View::Onboarding,
            StartView::Dashboard => View::Dashboard,
            StartView::Matches => View::Matches,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "fundmatch")]
#[command(about = "Find grants, accelerators, and investors for your startup from the terminal")]
#[command(version)]
pub struct Cli {
    /// JSON file with opportunities ({"matches": [...], "dashboard": [...]}); defaults to the built-in catalog
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Simulated latency of a profile submission, in milliseconds
    #[arg(long, default_value_t = DEFAULT_SUBMIT_DELAY.as_millis() as u64)]
    pub submit_delay_ms: u64,

    /// View shown on startup
    #[arg(long, value_enum, default_value_t = StartView::Landing)]
    pub start_view: StartView,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// File receiving log output (the terminal is taken by the UI)
    #[arg(long, default_value = "fundmatch.log")]
    pub log_file: PathBuf,
}

impl Cli {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    /// Builds the data provider selected by `--data`.
    pub fn build_provider(&self) -> ProviderResult<Box<dyn FundingDataProvider>> {
        Ok(match &self.data {
            Some(path) => Box::new(JsonFileProvider::load(path)?.with_submit_delay(self.submit_delay())),
            None => Box::new(MockProvider::new(self.submit_delay())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Feed;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["fundmatch"]).unwrap();
        assert_eq!(cli.data, None);
        assert_eq!(cli.submit_delay(), Duration::from_millis(2000));
        assert_eq!(cli.start_view, StartView::Landing);
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.log_file, PathBuf::from("fundmatch.log"));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "fundmatch",
            "--submit-delay-ms",
            "10",
            "--start-view",
            "matches",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.submit_delay(), Duration::from_millis(10));
        assert_eq!(View::from(cli.start_view), View::Matches);
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn test_unknown_view_rejected() {
        assert!(Cli::try_parse_from(["fundmatch", "--start-view", "settings"]).is_err());
    }

    #[test]
    fn test_build_mock_provider() {
        let cli = Cli::try_parse_from(["fundmatch"]).unwrap();
        let provider = cli.build_provider().unwrap();
        assert_eq!(provider.list_opportunities(Feed::Matches).unwrap().len(), 6);
    }

    #[test]
    fn test_build_provider_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.json");
        let cli = Cli::try_parse_from(["fundmatch", "--data", missing.to_str().unwrap()]).unwrap();
        assert!(cli.build_provider().is_err());
    }
}
