use super::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// A fixed set of options offered by a select, radio group, or checkbox group.
///
/// `value` is the stable machine identifier, `label` is what the form shows.
pub trait Choice: Sized + Copy + PartialEq + 'static {
    /// Human readable name of the option set, used in error messages.
    const KIND: &'static str;
    /// Every option, in display order.
    const ALL: &'static [Self];

    fn value(self) -> &'static str;

    fn label(self) -> &'static str;

    /// Parses an option from its value or label, ignoring ASCII case.
    fn parse(input: &str) -> DomainResult<Self> {
        let input = input.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.value().eq_ignore_ascii_case(input) || c.label().eq_ignore_ascii_case(input))
            .ok_or_else(|| DomainError::UnknownChoice {
                kind: Self::KIND,
                value: input.to_string(),
            })
    }

    /// Returns the option after `current`, wrapping back to `None` after the last one.
    fn cycle(current: Option<Self>) -> Option<Self> {
        match current {
            None => Self::ALL.first().copied(),
            Some(choice) => {
                let index = Self::ALL.iter().position(|c| *c == choice)?;
                Self::ALL.get(index + 1).copied()
            }
        }
    }
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => ($value:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl Choice for $name {
            const KIND: &'static str = $kind;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn value(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> DomainResult<Self> {
                <Self as Choice>::parse(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

choice_enum! {
    /// Kind of funding source an opportunity represents.
    FundingCategory, "category" {
        Vc => ("VC", "VC"),
        Grant => ("Grant", "Grant"),
        Accelerator => ("Accelerator", "Accelerator"),
        Angel => ("Angel", "Angel"),
    }
}

choice_enum! {
    Stage, "stage" {
        Idea => ("idea", "Idea Stage"),
        Prototype => ("prototype", "Prototype/MVP"),
        PreSeed => ("pre-seed", "Pre-Seed"),
        Seed => ("seed", "Seed"),
        SeriesA => ("series-a", "Series A"),
        SeriesB => ("series-b", "Series B+"),
    }
}

choice_enum! {
    BusinessModel, "business model" {
        B2b => ("b2b", "B2B"),
        B2c => ("b2c", "B2C"),
        B2b2c => ("b2b2c", "B2B2C"),
        Marketplace => ("marketplace", "Marketplace"),
        Subscription => ("subscription", "Subscription"),
    }
}

choice_enum! {
    TeamSize, "team size" {
        OneToThree => ("1-3", "1-3 people"),
        FourToTen => ("4-10", "4-10 people"),
        ElevenToTwentyFive => ("11-25", "11-25 people"),
        TwentySixToFifty => ("26-50", "26-50 people"),
        FiftyPlus => ("50+", "50+ people"),
    }
}

choice_enum! {
    /// Funding sources a founder is interested in (checkbox group on the last step).
    FundingType, "funding type" {
        VentureCapital => ("vc", "Venture Capital"),
        Angel => ("angel", "Angel Investors"),
        Grant => ("grant", "Government Grants"),
        Accelerator => ("accelerator", "Accelerators"),
        Crowdfunding => ("crowdfunding", "Crowdfunding"),
    }
}

choice_enum! {
    GeographicPreference, "geographic preference" {
        Local => ("local", "Local/Regional"),
        National => ("national", "National"),
        International => ("international", "International"),
        NoPreference => ("no-preference", "No Preference"),
    }
}

choice_enum! {
    Timeline, "timeline" {
        Immediate => ("immediate", "Immediately"),
        OneToThreeMonths => ("1-3-months", "1-3 months"),
        ThreeToSixMonths => ("3-6-months", "3-6 months"),
        SixToTwelveMonths => ("6-12-months", "6-12 months"),
        Planning => ("planning", "Just planning ahead"),
    }
}

/// Industries offered on the business details step.
pub const INDUSTRIES: &[&str] = &[
    "FinTech",
    "HealthTech",
    "EdTech",
    "AI/ML",
    "SaaS",
    "E-commerce",
    "CleanTech",
    "Blockchain",
    "IoT",
    "Cybersecurity",
    "BioTech",
    "AgTech",
];

/// A funding source as listed on the dashboard and matches views.
///
/// Records are immutable once loaded. Whether the user saved an opportunity
/// is tracked by the owning board, never on the record itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingOpportunity {
    pub id: String,
    pub name: String,
    #[serde(alias = "type")]
    pub category: FundingCategory,
    pub description: String,
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    pub company: String,
    #[serde(default, alias = "stage")]
    pub stages: Vec<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    pub location: String,
    #[serde(alias = "matchScore")]
    pub match_score: u8,
}

impl FundingOpportunity {
    /// One-line description used for clipboard copies and log lines.
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} ({}) - {} - {} - {}% match",
            self.name, self.company, self.category, self.amount, self.match_score
        );
        if let Some(deadline) = &self.deadline {
            summary.push_str(&format!(" - due {}", deadline));
        }
        summary
    }
}

/// Free-text fields of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    CompanyName,
    FoundedYear,
    Website,
    Description,
    PreviousFunding,
    FundingGoal,
    UseOfFunds,
    TargetMarket,
    Location,
}

impl TextField {
    pub fn label(self) -> &'static str {
        match self {
            TextField::CompanyName => "Company Name *",
            TextField::FoundedYear => "Founded Year",
            TextField::Website => "Website",
            TextField::Description => "Company Description *",
            TextField::PreviousFunding => "Previous Funding",
            TextField::FundingGoal => "Funding Goal *",
            TextField::UseOfFunds => "Use of Funds *",
            TextField::TargetMarket => "Target Market",
            TextField::Location => "Location",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            TextField::CompanyName => "Enter your company name",
            TextField::FoundedYear => "2024",
            TextField::Website => "https://yourcompany.com",
            TextField::Description => "What does your company do?",
            TextField::PreviousFunding => "$0 (if none)",
            TextField::FundingGoal => "$500k",
            TextField::UseOfFunds => "Product development, hiring, marketing...",
            TextField::TargetMarket => "e.g., SMBs, Enterprise, Consumers",
            TextField::Location => "City, State/Country",
        }
    }
}

/// Single-choice fields of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectField {
    Stage,
    BusinessModel,
    TeamSize,
    GeographicPreference,
    Timeline,
}

impl SelectField {
    pub fn label(self) -> &'static str {
        match self {
            SelectField::Stage => "Current Stage *",
            SelectField::BusinessModel => "Business Model",
            SelectField::TeamSize => "Team Size",
            SelectField::GeographicPreference => "Geographic Preference",
            SelectField::Timeline => "Funding Timeline",
        }
    }
}

/// Draft startup profile collected by the intake wizard.
///
/// `industries` and `funding_types` behave as sets: the toggle methods never
/// introduce duplicates and keep first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormData {
    pub company_name: String,
    pub founded_year: String,
    pub website: String,
    pub description: String,

    pub stage: Option<Stage>,
    pub previous_funding: String,
    pub funding_goal: String,
    pub use_of_funds: String,

    pub industries: Vec<String>,
    pub business_model: Option<BusinessModel>,
    pub target_market: String,
    pub team_size: Option<TeamSize>,
    pub location: String,

    pub funding_types: Vec<FundingType>,
    pub geographic_preference: Option<GeographicPreference>,
    pub timeline: Option<Timeline>,
}

impl FormData {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::CompanyName => &self.company_name,
            TextField::FoundedYear => &self.founded_year,
            TextField::Website => &self.website,
            TextField::Description => &self.description,
            TextField::PreviousFunding => &self.previous_funding,
            TextField::FundingGoal => &self.funding_goal,
            TextField::UseOfFunds => &self.use_of_funds,
            TextField::TargetMarket => &self.target_market,
            TextField::Location => &self.location,
        }
    }

    pub fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::CompanyName => &mut self.company_name,
            TextField::FoundedYear => &mut self.founded_year,
            TextField::Website => &mut self.website,
            TextField::Description => &mut self.description,
            TextField::PreviousFunding => &mut self.previous_funding,
            TextField::FundingGoal => &mut self.funding_goal,
            TextField::UseOfFunds => &mut self.use_of_funds,
            TextField::TargetMarket => &mut self.target_market,
            TextField::Location => &mut self.location,
        }
    }

    /// Label of the current value of a select field, if one is chosen.
    pub fn selection_label(&self, field: SelectField) -> Option<&'static str> {
        match field {
            SelectField::Stage => self.stage.map(Choice::label),
            SelectField::BusinessModel => self.business_model.map(Choice::label),
            SelectField::TeamSize => self.team_size.map(Choice::label),
            SelectField::GeographicPreference => self.geographic_preference.map(Choice::label),
            SelectField::Timeline => self.timeline.map(Choice::label),
        }
    }

    /// Advances a select field to its next option (or back to unset after the last).
    pub fn cycle_selection(&mut self, field: SelectField) {
        match field {
            SelectField::Stage => self.stage = Choice::cycle(self.stage),
            SelectField::BusinessModel => self.business_model = Choice::cycle(self.business_model),
            SelectField::TeamSize => self.team_size = Choice::cycle(self.team_size),
            SelectField::GeographicPreference => {
                self.geographic_preference = Choice::cycle(self.geographic_preference)
            }
            SelectField::Timeline => self.timeline = Choice::cycle(self.timeline),
        }
    }

    pub fn has_industry(&self, industry: &str) -> bool {
        self.industries.iter().any(|i| i == industry)
    }

    /// Adds the industry if absent, removes it if present.
    pub fn toggle_industry(&mut self, industry: &str) {
        toggle_member(&mut self.industries, industry.to_string());
    }

    pub fn has_funding_type(&self, funding_type: FundingType) -> bool {
        self.funding_types.contains(&funding_type)
    }

    /// Adds the funding type if absent, removes it if present.
    pub fn toggle_funding_type(&mut self, funding_type: FundingType) {
        toggle_member(&mut self.funding_types, funding_type);
    }
}

fn toggle_member<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if let Some(index) = items.iter().position(|existing| *existing == item) {
        items.remove(index);
    } else {
        items.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_ignores_case() {
        assert_eq!("vc".parse::<FundingCategory>(), Ok(FundingCategory::Vc));
        assert_eq!("GRANT".parse::<FundingCategory>(), Ok(FundingCategory::Grant));
        assert_eq!(
            "bank".parse::<FundingCategory>(),
            Err(DomainError::UnknownChoice {
                kind: "category",
                value: "bank".to_string()
            })
        );
    }

    #[test]
    fn test_choice_parse_accepts_label() {
        assert_eq!(Stage::parse("Series A"), Ok(Stage::SeriesA));
        assert_eq!(Stage::parse("pre-seed"), Ok(Stage::PreSeed));
        assert_eq!(TeamSize::parse("50+"), Ok(TeamSize::FiftyPlus));
    }

    #[test]
    fn test_choice_cycle_wraps_to_unset() {
        assert_eq!(Timeline::cycle(None), Some(Timeline::Immediate));
        assert_eq!(Timeline::cycle(Some(Timeline::Immediate)), Some(Timeline::OneToThreeMonths));
        assert_eq!(Timeline::cycle(Some(Timeline::Planning)), None);
    }

    #[test]
    fn test_toggle_keeps_insertion_order() {
        let mut form = FormData::default();
        form.toggle_industry("SaaS");
        form.toggle_industry("FinTech");
        form.toggle_industry("IoT");
        form.toggle_industry("FinTech");

        assert_eq!(form.industries, vec!["SaaS".to_string(), "IoT".to_string()]);
    }

    #[test]
    fn test_toggle_funding_type_never_duplicates() {
        let mut form = FormData::default();
        form.toggle_funding_type(FundingType::Grant);
        form.toggle_funding_type(FundingType::Grant);
        form.toggle_funding_type(FundingType::Grant);

        assert_eq!(form.funding_types, vec![FundingType::Grant]);
        assert!(form.has_funding_type(FundingType::Grant));
    }

    #[test]
    fn test_cycle_selection_sets_stage() {
        let mut form = FormData::default();
        assert_eq!(form.selection_label(SelectField::Stage), None);

        form.cycle_selection(SelectField::Stage);
        assert_eq!(form.stage, Some(Stage::Idea));
        assert_eq!(form.selection_label(SelectField::Stage), Some("Idea Stage"));
    }

    #[test]
    fn test_opportunity_accepts_field_aliases() {
        let json = r#"{
            "id": "9",
            "name": "Demo Fund",
            "type": "Angel",
            "description": "Angels",
            "amount": "$10K",
            "company": "Demo",
            "stage": ["Seed"],
            "industries": ["SaaS"],
            "location": "Remote",
            "matchScore": 71
        }"#;

        let opportunity: FundingOpportunity = serde_json::from_str(json).unwrap();
        assert_eq!(opportunity.category, FundingCategory::Angel);
        assert_eq!(opportunity.match_score, 71);
        assert_eq!(opportunity.stages, vec!["Seed".to_string()]);
        assert!(opportunity.deadline.is_none());
    }

    #[test]
    fn test_summary_includes_deadline() {
        let opportunity = FundingOpportunity {
            id: "1".to_string(),
            name: "Demo".to_string(),
            category: FundingCategory::Grant,
            description: String::new(),
            amount: "$5K".to_string(),
            deadline: Some("May 1".to_string()),
            company: "Gov".to_string(),
            stages: Vec::new(),
            industries: Vec::new(),
            location: "US".to_string(),
            match_score: 50,
        };

        assert_eq!(opportunity.summary(), "Demo (Gov) - Grant - $5K - 50% match - due May 1");
    }
}
