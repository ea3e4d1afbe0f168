//! The four-step startup intake wizard.
//!
//! The wizard owns the draft [`FormData`] and the current step. Every
//! transition is guarded: a disallowed transition leaves the state untouched
//! and reports `false` instead of failing.

use super::models::{Choice, FormData, FundingType, INDUSTRIES, SelectField, TextField};
use super::provider::FundingDataProvider;
use tracing::{debug, info, warn};

/// Number of steps in the intake flow.
pub const TOTAL_STEPS: u8 = 4;

/// Terminal hand-off emitted after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    /// The profile was accepted; the caller should show the matches view.
    Completed,
}

/// How a pending submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    Failed(String),
    Cancelled,
}

/// A focusable input on one of the wizard steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardField {
    Text(TextField),
    Select(SelectField),
    Industry(&'static str),
    FundingType(FundingType),
}

/// User intents the wizard reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    SetText(TextField, String),
    CycleSelect(SelectField),
    ToggleIndustry(String),
    ToggleFundingType(FundingType),
    Next,
    Previous,
}

/// State machine behind the onboarding flow.
///
/// # Examples
///
/// ```
/// use fundmatch::domain::{IntakeWizard, TextField, WizardAction};
///
/// let mut wizard = IntakeWizard::default();
/// assert!(!wizard.next());
///
/// wizard.dispatch(WizardAction::SetText(TextField::CompanyName, "Acme".into()));
/// wizard.dispatch(WizardAction::SetText(TextField::Description, "Rockets".into()));
/// assert!(wizard.next());
/// assert_eq!(wizard.step(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeWizard {
    form: FormData,
    step: u8,
    is_submitting: bool,
}

impl Default for IntakeWizard {
    fn default() -> Self {
        Self {
            form: FormData::default(),
            step: 1,
            is_submitting: false,
        }
    }
}

impl IntakeWizard {
    /// Current step, always within `1..=TOTAL_STEPS`.
    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_last_step(&self) -> bool {
        self.step == TOTAL_STEPS
    }

    /// Completion as a percentage; round only when displaying.
    pub fn progress_percent(&self) -> f64 {
        f64::from(self.step) / f64::from(TOTAL_STEPS) * 100.0
    }

    pub fn step_label(&self) -> String {
        format!("Step {} of {}", self.step, TOTAL_STEPS)
    }

    pub fn progress_label(&self) -> String {
        format!("{}% complete", self.progress_percent().round())
    }

    /// Whether the required fields of `step` are filled in.
    pub fn step_complete(&self, step: u8) -> bool {
        let form = &self.form;
        match step {
            1 => !form.company_name.is_empty() && !form.description.is_empty(),
            2 => form.stage.is_some() && !form.funding_goal.is_empty() && !form.use_of_funds.is_empty(),
            3 => !form.industries.is_empty(),
            4 => !form.funding_types.is_empty(),
            _ => false,
        }
    }

    pub fn can_advance(&self) -> bool {
        self.step < TOTAL_STEPS && self.step_complete(self.step)
    }

    /// Going back is refused on step 1 and while a submission is in flight.
    pub fn can_go_back(&self) -> bool {
        self.step > 1 && !self.is_submitting
    }

    pub fn can_submit(&self) -> bool {
        self.is_last_step() && !self.is_submitting && self.step_complete(TOTAL_STEPS)
    }

    /// Moves to the following step if the current one is complete.
    pub fn next(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.step += 1;
        debug!(step = self.step, "wizard advanced");
        true
    }

    /// Moves to the preceding step if [`can_go_back`](Self::can_go_back) allows it.
    pub fn previous(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.step -= 1;
        debug!(step = self.step, "wizard went back");
        true
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        *self.form.text_mut(field) = value.into();
    }

    pub fn toggle_industry(&mut self, industry: &str) {
        self.form.toggle_industry(industry);
    }

    pub fn toggle_funding_type(&mut self, funding_type: FundingType) {
        self.form.toggle_funding_type(funding_type);
    }

    /// Applies one user action. Returns whether the state changed.
    pub fn dispatch(&mut self, action: WizardAction) -> bool {
        match action {
            WizardAction::SetText(field, value) => {
                if self.form.text(field) == value {
                    return false;
                }
                self.set_text(field, value);
                true
            }
            WizardAction::CycleSelect(field) => {
                self.form.cycle_selection(field);
                true
            }
            WizardAction::ToggleIndustry(industry) => {
                self.toggle_industry(&industry);
                true
            }
            WizardAction::ToggleFundingType(funding_type) => {
                self.toggle_funding_type(funding_type);
                true
            }
            WizardAction::Next => self.next(),
            WizardAction::Previous => self.previous(),
        }
    }

    /// Replaces the draft with a previously saved one and restarts at step 1.
    ///
    /// Ignored while a submission is in flight.
    pub fn load_draft(&mut self, form: FormData) -> bool {
        if self.is_submitting {
            return false;
        }
        self.form = form;
        self.step = 1;
        true
    }

    /// Inputs shown on the current step, in focus order.
    pub fn fields(&self) -> Vec<WizardField> {
        Self::fields_for_step(self.step)
    }

    pub fn fields_for_step(step: u8) -> Vec<WizardField> {
        match step {
            1 => vec![
                WizardField::Text(TextField::CompanyName),
                WizardField::Text(TextField::FoundedYear),
                WizardField::Text(TextField::Website),
                WizardField::Text(TextField::Description),
            ],
            2 => vec![
                WizardField::Select(SelectField::Stage),
                WizardField::Text(TextField::PreviousFunding),
                WizardField::Text(TextField::FundingGoal),
                WizardField::Text(TextField::UseOfFunds),
            ],
            3 => {
                let mut fields: Vec<WizardField> =
                    INDUSTRIES.iter().copied().map(WizardField::Industry).collect();
                fields.extend([
                    WizardField::Select(SelectField::BusinessModel),
                    WizardField::Select(SelectField::TeamSize),
                    WizardField::Text(TextField::TargetMarket),
                    WizardField::Text(TextField::Location),
                ]);
                fields
            }
            4 => {
                let mut fields: Vec<WizardField> =
                    FundingType::ALL.iter().copied().map(WizardField::FundingType).collect();
                fields.extend([
                    WizardField::Select(SelectField::GeographicPreference),
                    WizardField::Select(SelectField::Timeline),
                ]);
                fields
            }
            _ => Vec::new(),
        }
    }

    pub fn step_title(step: u8) -> (&'static str, &'static str) {
        match step {
            1 => ("Company Information", "Tell us about your startup"),
            2 => ("Stage & Funding", "Where are you now and where are you going?"),
            3 => ("Business Details", "Help us understand your business model"),
            4 => ("Funding Preferences", "What type of funding are you looking for?"),
            _ => ("", ""),
        }
    }

    /// Enters the submitting phase and returns a snapshot of the profile to send.
    ///
    /// Returns `None` when submitting is not allowed, including while a
    /// previous submission is still pending.
    pub fn begin_submit(&mut self) -> Option<FormData> {
        if !self.can_submit() {
            return None;
        }
        self.is_submitting = true;
        info!(company = %self.form.company_name, "profile submission started");
        Some(self.form.clone())
    }

    /// Leaves the submitting phase. Only a successful submission produces the
    /// completion hand-off.
    pub fn finish_submit(&mut self, outcome: SubmitOutcome) -> Option<WizardEvent> {
        if !self.is_submitting {
            return None;
        }
        self.is_submitting = false;
        match outcome {
            SubmitOutcome::Succeeded => {
                info!("profile submission completed");
                Some(WizardEvent::Completed)
            }
            SubmitOutcome::Failed(reason) => {
                warn!(%reason, "profile submission failed");
                None
            }
            SubmitOutcome::Cancelled => {
                warn!("profile submission cancelled");
                None
            }
        }
    }

    /// Runs a whole submission against `provider`, awaiting its latency.
    pub async fn submit<P>(&mut self, provider: &P) -> Option<WizardEvent>
    where
        P: FundingDataProvider + ?Sized,
    {
        let profile = self.begin_submit()?;
        let outcome = match provider.submit_profile(profile).await {
            Ok(()) => SubmitOutcome::Succeeded,
            Err(err) => SubmitOutcome::Failed(err.to_string()),
        };
        self.finish_submit(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FundingOpportunity, ProviderError, ProviderResult, Stage};
    use crate::domain::provider::Feed;
    use futures::future::{BoxFuture, FutureExt};

    struct StubProvider {
        reject: bool,
    }

    impl FundingDataProvider for StubProvider {
        fn list_opportunities(&self, _feed: Feed) -> ProviderResult<Vec<FundingOpportunity>> {
            Ok(Vec::new())
        }

        fn submit_profile(&self, _profile: FormData) -> BoxFuture<'static, ProviderResult<()>> {
            let reject = self.reject;
            async move {
                if reject {
                    Err(ProviderError::Rejected("closed".to_string()))
                } else {
                    Ok(())
                }
            }
            .boxed()
        }
    }

    fn fill_step(wizard: &mut IntakeWizard, step: u8) {
        match step {
            1 => {
                wizard.set_text(TextField::CompanyName, "Acme");
                wizard.set_text(TextField::Description, "We build rockets");
            }
            2 => {
                wizard.form.stage = Some(Stage::Seed);
                wizard.set_text(TextField::FundingGoal, "$500k");
                wizard.set_text(TextField::UseOfFunds, "Hiring");
            }
            3 => wizard.toggle_industry("SaaS"),
            4 => wizard.toggle_funding_type(FundingType::VentureCapital),
            _ => {}
        }
    }

    fn wizard_at_last_step() -> IntakeWizard {
        let mut wizard = IntakeWizard::default();
        for step in 1..=TOTAL_STEPS {
            fill_step(&mut wizard, step);
            wizard.next();
        }
        wizard
    }

    #[test]
    fn test_wizard_default() {
        let wizard = IntakeWizard::default();
        assert_eq!(wizard.step(), 1);
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.form(), &FormData::default());
        assert_eq!(wizard.progress_percent(), 25.0);
        assert_eq!(wizard.step_label(), "Step 1 of 4");
        assert_eq!(wizard.progress_label(), "25% complete");
    }

    #[test]
    fn test_next_blocked_until_step_complete() {
        let mut wizard = IntakeWizard::default();
        for step in 1..TOTAL_STEPS {
            let before = wizard.clone();
            assert!(!wizard.next(), "step {step} advanced while incomplete");
            assert_eq!(wizard, before);

            fill_step(&mut wizard, step);
            assert!(wizard.next());
            assert_eq!(wizard.step(), step + 1);
        }
    }

    #[test]
    fn test_step_one_requires_both_fields() {
        let mut wizard = IntakeWizard::default();
        wizard.set_text(TextField::CompanyName, "Acme");
        assert!(!wizard.next());

        wizard.set_text(TextField::CompanyName, "");
        wizard.set_text(TextField::Description, "Rockets");
        assert!(!wizard.next());
        assert_eq!(wizard.step(), 1);
    }

    #[test]
    fn test_step_two_requires_stage() {
        let mut wizard = IntakeWizard::default();
        fill_step(&mut wizard, 1);
        wizard.next();
        wizard.set_text(TextField::FundingGoal, "$1M");
        wizard.set_text(TextField::UseOfFunds, "Hiring");
        assert!(!wizard.next());

        wizard.dispatch(WizardAction::CycleSelect(SelectField::Stage));
        assert!(wizard.next());
        assert_eq!(wizard.step(), 3);
    }

    #[test]
    fn test_previous_is_noop_on_first_step() {
        let mut wizard = IntakeWizard::default();
        fill_step(&mut wizard, 1);
        let before = wizard.clone();

        assert!(!wizard.previous());
        assert_eq!(wizard, before);
    }

    #[test]
    fn test_next_is_noop_on_last_step() {
        let mut wizard = wizard_at_last_step();
        assert_eq!(wizard.step(), 4);
        assert!(wizard.step_complete(4));

        let before = wizard.clone();
        assert!(!wizard.next());
        assert_eq!(wizard, before);
        assert_eq!(wizard.progress_percent(), 100.0);
    }

    #[test]
    fn test_previous_keeps_form() {
        let mut wizard = wizard_at_last_step();
        assert!(wizard.previous());
        assert!(wizard.previous());
        assert_eq!(wizard.step(), 2);
        assert_eq!(wizard.form().company_name, "Acme");
        assert_eq!(wizard.form().industries, vec!["SaaS".to_string()]);
    }

    #[test]
    fn test_double_toggle_industry_restores_set() {
        let mut wizard = IntakeWizard::default();
        wizard.toggle_industry("FinTech");
        let before = wizard.form().industries.clone();

        wizard.dispatch(WizardAction::ToggleIndustry("AI/ML".to_string()));
        assert_eq!(wizard.form().industries.len(), before.len() + 1);
        wizard.dispatch(WizardAction::ToggleIndustry("AI/ML".to_string()));

        assert_eq!(wizard.form().industries, before);
    }

    #[test]
    fn test_dispatch_set_text_reports_change() {
        let mut wizard = IntakeWizard::default();
        assert!(wizard.dispatch(WizardAction::SetText(TextField::Website, "acme.io".into())));
        assert!(!wizard.dispatch(WizardAction::SetText(TextField::Website, "acme.io".into())));
        assert_eq!(wizard.form().website, "acme.io");
    }

    #[test]
    fn test_fields_per_step() {
        assert_eq!(IntakeWizard::fields_for_step(1).len(), 4);
        assert_eq!(IntakeWizard::fields_for_step(3).len(), INDUSTRIES.len() + 4);
        assert_eq!(
            IntakeWizard::fields_for_step(4)[0],
            WizardField::FundingType(FundingType::VentureCapital)
        );
        assert!(IntakeWizard::fields_for_step(5).is_empty());
    }

    #[test]
    fn test_begin_submit_blocks_reentry() {
        let mut wizard = wizard_at_last_step();
        let snapshot = wizard.begin_submit();
        assert_eq!(snapshot.as_ref(), Some(wizard.form()));
        assert!(wizard.is_submitting());

        assert!(wizard.begin_submit().is_none());
        assert!(!wizard.can_submit());
    }

    #[test]
    fn test_previous_blocked_while_submitting() {
        let mut wizard = wizard_at_last_step();
        wizard.begin_submit();
        assert!(!wizard.can_go_back());
        assert!(!wizard.dispatch(WizardAction::Previous));
        assert_eq!(wizard.step(), 4);

        assert_eq!(wizard.finish_submit(SubmitOutcome::Failed("offline".to_string())), None);
        assert_eq!(wizard.step(), 4);
        assert!(wizard.can_go_back());
        assert!(wizard.previous());
    }

    #[test]
    fn test_begin_submit_requires_last_step() {
        let mut wizard = IntakeWizard::default();
        fill_step(&mut wizard, 1);
        assert!(wizard.begin_submit().is_none());
        assert!(!wizard.is_submitting());
    }

    #[test]
    fn test_finish_submit_outcomes() {
        let mut wizard = wizard_at_last_step();
        wizard.begin_submit();
        assert_eq!(wizard.finish_submit(SubmitOutcome::Cancelled), None);
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.step(), 4);

        wizard.begin_submit();
        assert_eq!(wizard.finish_submit(SubmitOutcome::Succeeded), Some(WizardEvent::Completed));
        assert_eq!(wizard.finish_submit(SubmitOutcome::Succeeded), None);
    }

    #[test]
    fn test_load_draft_restarts_flow() {
        let mut wizard = wizard_at_last_step();
        let mut draft = FormData::default();
        draft.company_name = "Globex".to_string();

        assert!(wizard.load_draft(draft.clone()));
        assert_eq!(wizard.step(), 1);
        assert_eq!(wizard.form(), &draft);
    }

    #[tokio::test]
    async fn test_submit_hands_off_on_success() {
        let mut wizard = wizard_at_last_step();
        let event = wizard.submit(&StubProvider { reject: false }).await;

        assert_eq!(event, Some(WizardEvent::Completed));
        assert!(!wizard.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_rejected_stays_on_last_step() {
        let mut wizard = wizard_at_last_step();
        let event = wizard.submit(&StubProvider { reject: true }).await;

        assert_eq!(event, None);
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.step(), 4);
        assert!(wizard.can_submit());
    }
}
