//! Application state for the terminal front-end.
//!
//! [`App`] owns one controller per view (the intake wizard and two
//! opportunity boards), the current view and input mode, and the submission
//! in flight, if any.

use super::submit::{PendingSubmit, SubmitTask};
use super::text_input::TextInput;
use crate::domain::{
    BoardAction, DASHBOARD_RECENT_LIMIT, Feed, FormData, FundingDataProvider, IntakeWizard, OpportunityBoard, ProviderResult,
    SearchScope, SubmitOutcome, WizardAction, WizardEvent, WizardField,
};
use crate::infrastructure::{DEFAULT_SAVED_IDS, MockProvider};
use tracing::info;

pub const DEFAULT_PROFILE_FILE: &str = "startup-profile.json";
pub const DEFAULT_EXPORT_FILE: &str = "matches.csv";

const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Onboarding,
    Dashboard,
    Matches,
}

impl View {
    pub const ALL: [View; 4] = [View::Landing, View::Onboarding, View::Dashboard, View::Matches];

    pub fn title(self) -> &'static str {
        match self {
            View::Landing => "Home",
            View::Onboarding => "Onboarding",
            View::Dashboard => "Dashboard",
            View::Matches => "Matches",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// Represents the current input mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Navigation keys and shortcuts
    Normal,
    /// Typing into the focused wizard text field
    Editing,
    /// Typing a search query on a board
    Search,
    /// Help screen is displayed
    Help,
    /// Prompting for a filename to save the profile draft
    SaveProfile,
    /// Prompting for a filename to load a profile draft
    LoadProfile,
    /// Prompting for a filename to export matches as CSV
    ExportCsv,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use fundmatch::application::{App, View};
///
/// let app = App::default();
/// assert_eq!(app.view, View::Landing);
/// assert_eq!(app.wizard.step(), 1);
/// ```
pub struct App {
    pub view: View,
    pub mode: AppMode,
    pub wizard: IntakeWizard,
    /// Index into the current wizard step's fields
    pub wizard_focus: usize,
    pub dashboard: OpportunityBoard,
    pub matches: OpportunityBoard,
    /// Shared buffer for field editing, search, and filename prompts
    pub input: TextInput,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Redraw ticks seen while a submission is running
    spinner: usize,
    provider: Box<dyn FundingDataProvider>,
    pending_submit: Option<PendingSubmit>,
}

impl Default for App {
    fn default() -> Self {
        let provider = MockProvider::default();
        let dashboard = provider.list_opportunities(Feed::Dashboard).unwrap_or_default();
        let matches = provider.list_opportunities(Feed::Matches).unwrap_or_default();
        Self::with_feeds(Box::new(provider), dashboard, matches, View::Landing)
    }
}

impl App {
    /// Loads both feeds from `provider` and opens `start_view`.
    pub fn new(provider: Box<dyn FundingDataProvider>, start_view: View) -> ProviderResult<Self> {
        let dashboard = provider.list_opportunities(Feed::Dashboard)?;
        let matches = provider.list_opportunities(Feed::Matches)?;
        info!(dashboard = dashboard.len(), matches = matches.len(), "opportunities loaded");
        Ok(Self::with_feeds(provider, dashboard, matches, start_view))
    }

    fn with_feeds(
        provider: Box<dyn FundingDataProvider>,
        dashboard: Vec<crate::domain::FundingOpportunity>,
        matches: Vec<crate::domain::FundingOpportunity>,
        view: View,
    ) -> Self {
        Self {
            view,
            mode: AppMode::Normal,
            wizard: IntakeWizard::default(),
            wizard_focus: 0,
            dashboard: OpportunityBoard::new(dashboard, SearchScope::Dashboard)
                .with_saved(DEFAULT_SAVED_IDS)
                .with_display_limit(DASHBOARD_RECENT_LIMIT),
            matches: OpportunityBoard::new(matches, SearchScope::Matches).with_saved(DEFAULT_SAVED_IDS),
            input: TextInput::default(),
            status_message: None,
            help_scroll: 0,
            spinner: 0,
            provider,
            pending_submit: None,
        }
    }

    /// Whether `q` should quit rather than be treated as input.
    pub fn can_quit(&self) -> bool {
        matches!(self.mode, AppMode::Normal)
    }

    pub fn navigate(&mut self, view: View) {
        if self.view != view {
            info!(from = self.view.title(), to = view.title(), "navigate");
        }
        self.view = view;
        self.mode = AppMode::Normal;
        self.input.clear();
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    // ---- onboarding ----

    pub fn focused_field(&self) -> Option<WizardField> {
        self.wizard.fields().get(self.wizard_focus).copied()
    }

    pub fn focus_next_field(&mut self) {
        let count = self.wizard.fields().len();
        if count > 0 {
            self.wizard_focus = (self.wizard_focus + 1) % count;
        }
    }

    pub fn focus_previous_field(&mut self) {
        let count = self.wizard.fields().len();
        if count > 0 {
            self.wizard_focus = (self.wizard_focus + count - 1) % count;
        }
    }

    /// Edits a text field, cycles a select, or flips a checkbox.
    pub fn activate_focused_field(&mut self) {
        match self.focused_field() {
            Some(WizardField::Text(_)) => self.start_editing(),
            Some(WizardField::Select(field)) => {
                self.wizard.dispatch(WizardAction::CycleSelect(field));
            }
            Some(WizardField::Industry(industry)) => {
                self.wizard.dispatch(WizardAction::ToggleIndustry(industry.to_string()));
            }
            Some(WizardField::FundingType(funding_type)) => {
                self.wizard.dispatch(WizardAction::ToggleFundingType(funding_type));
            }
            None => {}
        }
    }

    pub fn next_step(&mut self) {
        if self.wizard.dispatch(WizardAction::Next) {
            self.wizard_focus = 0;
            self.status_message = None;
        } else if !self.wizard.is_last_step() {
            self.status_message = Some("Fill in the required (*) fields to continue".to_string());
        }
    }

    pub fn previous_step(&mut self) {
        if self.wizard.dispatch(WizardAction::Previous) {
            self.wizard_focus = 0;
            self.status_message = None;
        }
    }

    /// Loads the focused text field into the input buffer.
    pub fn start_editing(&mut self) {
        if let Some(WizardField::Text(field)) = self.focused_field() {
            self.mode = AppMode::Editing;
            self.input = TextInput::with_value(self.wizard.form().text(field));
        }
    }

    /// Writes the input buffer back into the focused text field.
    pub fn finish_editing(&mut self) {
        if let Some(WizardField::Text(field)) = self.focused_field() {
            let value = self.input.take();
            self.wizard.dispatch(WizardAction::SetText(field, value));
        }
        self.mode = AppMode::Normal;
        self.input.clear();
    }

    pub fn cancel_editing(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
    }

    /// Starts submitting the profile if the wizard allows it.
    ///
    /// The returned task is picked up with [`App::take_submit_task`].
    pub fn submit_profile(&mut self) -> bool {
        if self.pending_submit.is_some() {
            return false;
        }
        let Some(profile) = self.wizard.begin_submit() else {
            return false;
        };
        let future = self.provider.submit_profile(profile);
        self.pending_submit = Some(PendingSubmit::new(future));
        self.status_message = Some("Finding matches...".to_string());
        true
    }

    pub fn is_submitting(&self) -> bool {
        self.wizard.is_submitting()
    }

    /// Advances the submitting indicator; called on every redraw tick.
    pub fn on_tick(&mut self) {
        if self.is_submitting() {
            self.spinner = self.spinner.wrapping_add(1);
        } else {
            self.spinner = 0;
        }
    }

    pub fn spinner_frame(&self) -> char {
        SPINNER_FRAMES[self.spinner % SPINNER_FRAMES.len()]
    }

    /// Hands the started submission to the caller for spawning (once).
    pub fn take_submit_task(&mut self) -> Option<SubmitTask> {
        self.pending_submit.as_mut()?.task.take()
    }

    pub fn cancel_submit(&mut self) {
        if let Some(pending) = &self.pending_submit {
            pending.handle.abort();
        }
    }

    /// Applies the outcome of the submission and performs the hand-off.
    pub fn finish_submit(&mut self, outcome: SubmitOutcome) {
        self.pending_submit = None;
        let failure = match &outcome {
            SubmitOutcome::Failed(reason) => Some(format!("Submission failed: {}", reason)),
            SubmitOutcome::Cancelled => Some("Submission cancelled".to_string()),
            SubmitOutcome::Succeeded => None,
        };

        match self.wizard.finish_submit(outcome) {
            Some(WizardEvent::Completed) => {
                self.navigate(View::Matches);
                self.status_message = Some("Profile submitted - here are your matches".to_string());
            }
            None => self.status_message = failure,
        }
    }

    pub fn start_save_profile(&mut self) {
        self.mode = AppMode::SaveProfile;
        self.input = TextInput::with_value(DEFAULT_PROFILE_FILE);
        self.status_message = None;
    }

    pub fn start_load_profile(&mut self) {
        self.mode = AppMode::LoadProfile;
        self.input = TextInput::with_value(DEFAULT_PROFILE_FILE);
        self.status_message = None;
    }

    /// Gets the filename typed at the prompt, falling back to `default`.
    pub fn prompt_filename(&self, default: &str) -> String {
        if self.input.is_empty() {
            default.to_string()
        } else {
            self.input.value().to_string()
        }
    }

    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
    }

    pub fn set_save_result(&mut self, result: Result<String, String>) {
        self.status_message = Some(match result {
            Ok(filename) => format!("Saved profile to {}", filename),
            Err(error) => format!("Save failed: {}", error),
        });
        self.cancel_filename_input();
    }

    pub fn set_load_result(&mut self, result: Result<(FormData, String), String>) {
        self.status_message = Some(match result {
            Ok((form, filename)) => {
                if self.wizard.load_draft(form) {
                    self.wizard_focus = 0;
                    format!("Loaded profile from {}", filename)
                } else {
                    "Cannot load a profile while submitting".to_string()
                }
            }
            Err(error) => format!("Load failed: {}", error),
        });
        self.cancel_filename_input();
    }

    // ---- opportunity boards ----

    pub fn active_board(&self) -> Option<&OpportunityBoard> {
        match self.view {
            View::Dashboard => Some(&self.dashboard),
            View::Matches => Some(&self.matches),
            View::Landing | View::Onboarding => None,
        }
    }

    pub fn active_board_mut(&mut self) -> Option<&mut OpportunityBoard> {
        match self.view {
            View::Dashboard => Some(&mut self.dashboard),
            View::Matches => Some(&mut self.matches),
            View::Landing | View::Onboarding => None,
        }
    }

    pub fn start_search(&mut self) {
        if let Some(board) = self.active_board() {
            self.input = TextInput::with_value(board.search());
            self.mode = AppMode::Search;
            self.status_message = None;
        }
    }

    /// Re-filters the active board with the current input buffer.
    pub fn update_search(&mut self) {
        let search = self.input.value().to_string();
        if let Some(board) = self.active_board_mut() {
            board.dispatch(BoardAction::SetSearch(search));
        }
    }

    /// Keeps the query applied and returns to normal mode.
    pub fn finish_search(&mut self) {
        self.update_search();
        let found = self.active_board().map(|b| b.visible().len()).unwrap_or(0);
        if !self.input.is_empty() {
            self.status_message = Some(format!(
                "{} opportunit{} found for '{}'",
                found,
                if found == 1 { "y" } else { "ies" },
                self.input.value()
            ));
        }
        self.mode = AppMode::Normal;
        self.input.clear();
    }

    /// Drops the query and returns to normal mode.
    pub fn cancel_search(&mut self) {
        if let Some(board) = self.active_board_mut() {
            board.dispatch(BoardAction::SetSearch(String::new()));
        }
        self.mode = AppMode::Normal;
        self.input.clear();
    }

    pub fn next_tab(&mut self) {
        let filter = self.matches.filter().next_tab();
        self.matches.dispatch(BoardAction::SetFilter(filter));
    }

    pub fn previous_tab(&mut self) {
        let filter = self.matches.filter().previous_tab();
        self.matches.dispatch(BoardAction::SetFilter(filter));
    }

    pub fn toggle_saved_selected(&mut self) {
        let Some(board) = self.active_board_mut() else {
            return;
        };
        let Some(id) = board.selected_view().map(|v| v.opportunity.id.clone()) else {
            return;
        };
        board.dispatch(BoardAction::ToggleSaved(id.clone()));
        let saved = board.is_saved(&id);
        // the dashboard and matches lists share ids; keep both in sync
        for other in [&mut self.dashboard, &mut self.matches] {
            if other.is_saved(&id) != saved {
                other.dispatch(BoardAction::ToggleSaved(id.clone()));
            }
        }
    }

    pub fn apply_selected(&mut self) {
        let Some(summary) = self.selected_summary() else {
            return;
        };
        info!(opportunity = %summary, "apply requested");
        self.status_message = Some(format!("Application started: {}", summary));
    }

    pub fn selected_summary(&self) -> Option<String> {
        self.active_board()?.selected_view().map(|v| v.opportunity.summary())
    }

    pub fn set_copy_result(&mut self, result: Result<String, String>) {
        self.status_message = Some(match result {
            Ok(what) => format!("Copied {} to clipboard", what),
            Err(error) => format!("Copy failed: {}", error),
        });
    }

    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.input = TextInput::with_value(DEFAULT_EXPORT_FILE);
        self.status_message = None;
    }

    pub fn set_csv_export_result(&mut self, result: Result<String, String>) {
        self.status_message = Some(match result {
            Ok(filename) => format!("Exported to {}", filename),
            Err(error) => format!("Export failed: {}", error),
        });
        self.cancel_filename_input();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::drive_submit;
    use crate::domain::{FundingType, TextField};
    use crate::infrastructure::MockProvider;
    use std::time::Duration;

    fn instant_app() -> App {
        App::new(Box::new(MockProvider::new(Duration::ZERO)), View::Onboarding).unwrap()
    }

    fn complete_wizard(app: &mut App) {
        let wizard = &mut app.wizard;
        wizard.set_text(TextField::CompanyName, "Acme");
        wizard.set_text(TextField::Description, "Rockets");
        wizard.next();
        wizard.dispatch(WizardAction::CycleSelect(crate::domain::SelectField::Stage));
        wizard.set_text(TextField::FundingGoal, "$1M");
        wizard.set_text(TextField::UseOfFunds, "Engines");
        wizard.next();
        wizard.toggle_industry("CleanTech");
        wizard.next();
        wizard.toggle_funding_type(FundingType::Grant);
    }

    #[test]
    fn test_app_default() {
        let app = App::default();
        assert_eq!(app.view, View::Landing);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.dashboard.opportunities().len(), 4);
        assert_eq!(app.matches.opportunities().len(), 6);
        assert_eq!(app.matches.saved_count(), 2);
        assert!(app.can_quit());
    }

    #[test]
    fn test_dashboard_selection_limited_to_recent_cards() {
        let mut records = crate::infrastructure::matches_catalog();
        records.extend(crate::infrastructure::matches_catalog().into_iter().map(|mut o| {
            o.id = format!("x{}", o.id);
            o.match_score /= 2;
            o
        }));
        let json = serde_json::json!({ "matches": records }).to_string();
        let provider = crate::infrastructure::JsonFileProvider::from_json(&json).unwrap();
        let mut app = App::new(Box::new(provider), View::Dashboard).unwrap();
        assert_eq!(app.dashboard.visible().len(), 12);

        for _ in 0..20 {
            app.dashboard.select_next();
        }
        assert_eq!(app.dashboard.selected, 5);
        let selected = app.dashboard.selected_view().map(|v| v.opportunity.id.clone());
        assert_eq!(selected, app.dashboard.shown().last().map(|v| v.opportunity.id.clone()));
        assert!(!selected.unwrap().starts_with('x'));
    }

    #[test]
    fn test_tick_animates_only_while_submitting() {
        let mut app = instant_app();
        app.on_tick();
        assert_eq!(app.spinner_frame(), '|');

        complete_wizard(&mut app);
        assert!(app.submit_profile());
        app.on_tick();
        assert_eq!(app.spinner_frame(), '/');
        app.on_tick();
        assert_eq!(app.spinner_frame(), '-');

        app.finish_submit(SubmitOutcome::Cancelled);
        app.on_tick();
        assert_eq!(app.spinner_frame(), '|');
    }

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Landing.next(), View::Onboarding);
        assert_eq!(View::Matches.next(), View::Landing);
    }

    #[test]
    fn test_editing_writes_field() {
        let mut app = instant_app();
        assert_eq!(app.focused_field(), Some(WizardField::Text(TextField::CompanyName)));

        app.start_editing();
        assert_eq!(app.mode, AppMode::Editing);
        app.input.insert('A');
        app.input.insert('x');
        app.finish_editing();

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.wizard.form().company_name, "Ax");
    }

    #[test]
    fn test_cancel_editing_keeps_field() {
        let mut app = instant_app();
        app.wizard.set_text(TextField::CompanyName, "Acme");
        app.start_editing();
        app.input.clear();
        app.cancel_editing();
        assert_eq!(app.wizard.form().company_name, "Acme");
    }

    #[test]
    fn test_blocked_next_sets_status() {
        let mut app = instant_app();
        app.next_step();
        assert_eq!(app.wizard.step(), 1);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_activate_checkbox_on_step_three() {
        let mut app = instant_app();
        complete_wizard(&mut app);
        app.wizard.previous();
        app.wizard_focus = 0;

        assert_eq!(app.focused_field(), Some(WizardField::Industry("FinTech")));
        app.activate_focused_field();
        assert!(app.wizard.form().has_industry("FinTech"));
        app.activate_focused_field();
        assert!(!app.wizard.form().has_industry("FinTech"));
    }

    #[test]
    fn test_focus_wraps() {
        let mut app = instant_app();
        app.focus_previous_field();
        assert_eq!(app.wizard_focus, 3);
        app.focus_next_field();
        assert_eq!(app.wizard_focus, 0);
    }

    #[tokio::test]
    async fn test_submit_flow_navigates_to_matches() {
        let mut app = instant_app();
        complete_wizard(&mut app);
        assert_eq!(app.wizard.step(), 4);

        assert!(app.submit_profile());
        assert!(app.is_submitting());
        assert!(!app.submit_profile());

        let task = app.take_submit_task().unwrap();
        assert!(app.take_submit_task().is_none());

        let outcome = drive_submit(task).await;
        app.finish_submit(outcome);

        assert!(!app.is_submitting());
        assert_eq!(app.view, View::Matches);
    }

    #[tokio::test]
    async fn test_cancelled_submit_stays_on_wizard() {
        let mut app = instant_app();
        complete_wizard(&mut app);
        app.submit_profile();
        let task = app.take_submit_task().unwrap();

        app.cancel_submit();
        app.finish_submit(drive_submit(task).await);

        assert_eq!(app.view, View::Onboarding);
        assert_eq!(app.status_message.as_deref(), Some("Submission cancelled"));
        assert!(app.wizard.can_submit());
    }

    #[test]
    fn test_submit_refused_before_last_step() {
        let mut app = instant_app();
        assert!(!app.submit_profile());
        assert!(app.take_submit_task().is_none());
    }

    #[test]
    fn test_live_search_and_cancel() {
        let mut app = instant_app();
        app.navigate(View::Matches);
        app.start_search();
        assert_eq!(app.mode, AppMode::Search);

        for c in "angel".chars() {
            app.input.insert(c);
            app.update_search();
        }
        assert_eq!(app.matches.visible().len(), 1);

        app.cancel_search();
        assert_eq!(app.matches.search(), "");
        assert_eq!(app.matches.visible().len(), 6);
    }

    #[test]
    fn test_finish_search_reports_count() {
        let mut app = instant_app();
        app.navigate(View::Dashboard);
        app.start_search();
        for c in "vc".chars() {
            app.input.insert(c);
        }
        app.finish_search();

        assert_eq!(app.dashboard.search(), "vc");
        assert_eq!(app.status_message.as_deref(), Some("2 opportunities found for 'vc'"));
    }

    #[test]
    fn test_toggle_saved_syncs_boards() {
        let mut app = instant_app();
        app.navigate(View::Matches);
        // highest score first: id 1 is saved by default
        app.toggle_saved_selected();

        assert!(!app.matches.is_saved("1"));
        assert!(!app.dashboard.is_saved("1"));
        assert_eq!(app.matches.saved_count(), 1);
    }

    #[test]
    fn test_tabs_on_matches() {
        let mut app = instant_app();
        app.next_tab();
        assert_eq!(app.matches.visible().len(), 2);
        app.previous_tab();
        app.previous_tab();
        assert_eq!(app.matches.visible().len(), 1);
    }

    #[test]
    fn test_apply_selected_reports() {
        let mut app = instant_app();
        app.apply_selected();
        assert!(app.status_message.is_none());

        app.navigate(View::Dashboard);
        app.apply_selected();
        assert!(app.status_message.as_deref().unwrap().contains("TechStars NYC Accelerator"));
    }

    #[test]
    fn test_load_result_replaces_draft() {
        let mut app = instant_app();
        complete_wizard(&mut app);
        let mut draft = FormData::default();
        draft.company_name = "Globex".to_string();

        app.start_load_profile();
        app.set_load_result(Ok((draft, "p.json".to_string())));

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.wizard.step(), 1);
        assert_eq!(app.wizard.form().company_name, "Globex");
        assert_eq!(app.status_message.as_deref(), Some("Loaded profile from p.json"));
    }

    #[test]
    fn test_prompt_filename_default() {
        let mut app = instant_app();
        app.start_save_profile();
        assert_eq!(app.prompt_filename(DEFAULT_PROFILE_FILE), DEFAULT_PROFILE_FILE);
        app.input.clear();
        assert_eq!(app.prompt_filename("x.json"), "x.json");
    }
}
