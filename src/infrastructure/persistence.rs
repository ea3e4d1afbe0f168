use crate::domain::{Choice, FormData, OpportunityView};
use serde::Serialize;
use std::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid file format - {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Saves and restores draft startup profiles as pretty-printed JSON.
pub struct ProfileRepository;

impl ProfileRepository {
    pub fn save_profile(profile: &FormData, filename: &str) -> PersistenceResult<String> {
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(filename, json)?;
        Ok(filename.to_string())
    }

    pub fn load_profile(filename: &str) -> PersistenceResult<(FormData, String)> {
        let content = fs::read_to_string(filename)?;
        let profile = serde_json::from_str::<FormData>(&content)?;
        Ok((profile, filename.to_string()))
    }
}

#[derive(Serialize)]
struct MatchRow<'a> {
    id: &'a str,
    name: &'a str,
    category: &'a str,
    company: &'a str,
    amount: &'a str,
    deadline: &'a str,
    location: &'a str,
    match_score: u8,
    saved: bool,
}

/// Writes a derived opportunity list to CSV, in the order given.
pub struct MatchesExporter;

impl MatchesExporter {
    pub fn export_to_csv(views: &[OpportunityView<'_>], filename: &str) -> PersistenceResult<String> {
        let mut writer = csv::Writer::from_path(filename)?;
        for view in views {
            let o = view.opportunity;
            writer.serialize(MatchRow {
                id: &o.id,
                name: &o.name,
                category: o.category.label(),
                company: &o.company,
                amount: &o.amount,
                deadline: o.deadline.as_deref().unwrap_or(""),
                location: &o.location,
                match_score: o.match_score,
                saved: view.saved,
            })?;
        }
        writer.flush()?;
        Ok(filename.to_string())
    }
}
