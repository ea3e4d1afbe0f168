use crate::application::{App, AppMode, DEFAULT_EXPORT_FILE, DEFAULT_PROFILE_FILE, TextInput, View};
use crate::infrastructure::{ClipboardWriter, MatchesExporter, ProfileRepository};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Editing => Self::handle_editing_mode(app, key),
            AppMode::Search => Self::handle_search_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::SaveProfile | AppMode::LoadProfile | AppMode::ExportCsv => {
                Self::handle_filename_input_mode(app, key)
            }
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match (app.view, key) {
                (View::Onboarding, KeyCode::Char('s')) => app.start_save_profile(),
                (View::Onboarding, KeyCode::Char('o')) => app.start_load_profile(),
                (View::Onboarding, KeyCode::Char('n')) => app.next_step(),
                (View::Onboarding, KeyCode::Char('p')) => app.previous_step(),
                (View::Onboarding, KeyCode::Enter) => Self::submit_profile(app),
                (View::Matches, KeyCode::Char('e')) => app.start_csv_export(),
                _ => {}
            }
            return;
        }

        if !app.is_submitting() {
            app.status_message = None;
        }

        match key {
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.show_help();
                return;
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                app.navigate(View::ALL[index]);
                return;
            }
            KeyCode::Tab => {
                app.navigate(app.view.next());
                return;
            }
            _ => {}
        }

        match app.view {
            View::Landing => Self::handle_landing(app, key),
            View::Onboarding => Self::handle_onboarding(app, key),
            View::Dashboard | View::Matches => Self::handle_board(app, key),
        }
    }

    fn handle_landing(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('g') => app.navigate(View::Onboarding),
            KeyCode::Char('d') => app.navigate(View::Dashboard),
            _ => {}
        }
    }

    fn handle_onboarding(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.focus_previous_field(),
            KeyCode::Down | KeyCode::Char('j') => app.focus_next_field(),
            KeyCode::Enter | KeyCode::Char(' ') => app.activate_focused_field(),
            KeyCode::Right | KeyCode::Char('n') => app.next_step(),
            KeyCode::Left | KeyCode::Char('p') => app.previous_step(),
            KeyCode::F(5) | KeyCode::Char('f') => Self::submit_profile(app),
            _ => {}
        }
    }

    fn submit_profile(app: &mut App) {
        if !app.submit_profile() && !app.is_submitting() {
            app.status_message = Some("Choose at least one funding type on the last step".to_string());
        }
    }

    fn handle_board(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(board) = app.active_board_mut() {
                    board.select_previous();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(board) = app.active_board_mut() {
                    board.select_next();
                }
            }
            KeyCode::Left | KeyCode::Char('h') if app.view == View::Matches => app.previous_tab(),
            KeyCode::Right | KeyCode::Char('l') if app.view == View::Matches => app.next_tab(),
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Char('s') => app.toggle_saved_selected(),
            KeyCode::Enter | KeyCode::Char('a') => app.apply_selected(),
            KeyCode::Char('v') if app.view == View::Dashboard => app.navigate(View::Matches),
            KeyCode::Char('y') => {
                if let Some(summary) = app.selected_summary() {
                    let result = ClipboardWriter::copy(&summary);
                    app.set_copy_result(result);
                }
            }
            _ => {}
        }
    }

    /// Applies a line-editing key to `input`. Returns whether the text changed.
    fn edit_input(input: &mut TextInput, key: KeyCode) -> bool {
        match key {
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => {
                input.move_left();
                false
            }
            KeyCode::Right => {
                input.move_right();
                false
            }
            KeyCode::Home => {
                input.move_home();
                false
            }
            KeyCode::End => {
                input.move_end();
                false
            }
            KeyCode::Char(c) => {
                input.insert(c);
                true
            }
            _ => false,
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_editing(),
            KeyCode::Esc => app.cancel_editing(),
            _ => {
                Self::edit_input(&mut app.input, key);
            }
        }
    }

    fn handle_search_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_search(),
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Down => {
                if let Some(board) = app.active_board_mut() {
                    board.select_next();
                }
            }
            KeyCode::Up => {
                if let Some(board) = app.active_board_mut() {
                    board.select_previous();
                }
            }
            _ => {
                // Perform live search as user types
                if Self::edit_input(&mut app.input, key) {
                    app.update_search();
                }
            }
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => app.close_help(),
            KeyCode::Up | KeyCode::Char('k') => app.help_scroll = app.help_scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => app.help_scroll += 1,
            KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(5),
            KeyCode::PageDown => app.help_scroll += 5,
            KeyCode::Home => app.help_scroll = 0,
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => match app.mode {
                AppMode::SaveProfile => {
                    let filename = app.prompt_filename(DEFAULT_PROFILE_FILE);
                    let result = ProfileRepository::save_profile(app.wizard.form(), &filename)
                        .map_err(|e| e.to_string());
                    app.set_save_result(result);
                }
                AppMode::LoadProfile => {
                    let filename = app.prompt_filename(DEFAULT_PROFILE_FILE);
                    let result = ProfileRepository::load_profile(&filename).map_err(|e| e.to_string());
                    app.set_load_result(result);
                }
                AppMode::ExportCsv => {
                    let filename = app.prompt_filename(DEFAULT_EXPORT_FILE);
                    let result = MatchesExporter::export_to_csv(&app.matches.visible(), &filename)
                        .map_err(|e| e.to_string());
                    app.set_csv_export_result(result);
                }
                _ => {}
            },
            KeyCode::Esc => app.cancel_filename_input(),
            _ => {
                Self::edit_input(&mut app.input, key);
            }
        }
    }
}
