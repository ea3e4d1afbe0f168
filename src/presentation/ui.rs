use crate::application::{App, AppMode, View};
use crate::domain::{CategoryFilter, FundingCategory, IntakeWizard, OpportunityView, TOTAL_STEPS, WizardField};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.view {
        View::Landing => render_landing(f, chunks[1]),
        View::Onboarding => render_onboarding(f, app, chunks[1]),
        View::Dashboard => render_dashboard(f, app, chunks[1]),
        View::Matches => render_matches(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("{} {}", i + 1, view.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.view.index())
        .style(Style::default().fg(Color::Cyan))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    f.render_widget(tabs, area);
}

fn render_landing(f: &mut Frame, area: Rect) {
    let accent = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("✦ AI-Powered Funding Discovery", Style::default().fg(Color::Cyan))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Find the right ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("funding", accent),
            Span::styled(" instantly", Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from("Match with grants, accelerators, and VCs in seconds. Our AI analyzes your startup"),
        Line::from("profile and connects you with the perfect funding opportunities."),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] Get Started", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw("    "),
            Span::styled("[d] Dashboard", Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("$2.4B+", accent),
            Span::raw(" Funding matched    "),
            Span::styled("15,000+", accent),
            Span::raw(" Startups helped    "),
            Span::styled("500+", accent),
            Span::raw(" Funding sources"),
        ]),
    ];

    let hero = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("fundmatch"));
    f.render_widget(hero, area);
}

fn render_onboarding(f: &mut Frame, app: &App, area: Rect) {
    let wizard = &app.wizard;
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Startup Profile Setup - Help us find the perfect funding opportunities for your startup");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let progress = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(wizard.progress_percent().round() as u16)
        .label(format!("{} | {}", wizard.step_label(), wizard.progress_label()));
    f.render_widget(progress, chunks[0]);

    let (title, subtitle) = IntakeWizard::step_title(wizard.step());
    let heading = Paragraph::new(vec![
        Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(subtitle, Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(heading, chunks[1]);

    let items: Vec<ListItem> = wizard
        .fields()
        .into_iter()
        .map(|field| ListItem::new(field_line(app, field)))
        .collect();
    let mut state = ListState::default().with_selected(Some(app.wizard_focus));
    let fields = List::new(items)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("> ");
    f.render_stateful_widget(fields, chunks[2], &mut state);

    f.render_widget(wizard_buttons(wizard, app.spinner_frame()), chunks[3]);
}

fn field_line(app: &App, field: WizardField) -> Line<'static> {
    let form = app.wizard.form();
    let editing = matches!(app.mode, AppMode::Editing) && app.focused_field() == Some(field);

    match field {
        WizardField::Text(text) => {
            let value = if editing {
                Span::styled(format!("{}▏", app.input.value()), Style::default().fg(Color::Green))
            } else if form.text(text).is_empty() {
                Span::styled(text.placeholder().to_string(), Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(form.text(text).to_string())
            };
            Line::from(vec![Span::raw(format!("{:<24}", text.label())), value])
        }
        WizardField::Select(select) => {
            let value = match form.selection_label(select) {
                Some(label) => Span::raw(format!("‹ {} ›", label)),
                None => Span::styled("‹ select ›".to_string(), Style::default().fg(Color::DarkGray)),
            };
            Line::from(vec![Span::raw(format!("{:<24}", select.label())), value])
        }
        WizardField::Industry(industry) => checkbox_line(form.has_industry(industry), industry),
        WizardField::FundingType(funding_type) => {
            checkbox_line(form.has_funding_type(funding_type), &funding_type.to_string())
        }
    }
}

fn checkbox_line(checked: bool, label: &str) -> Line<'static> {
    let mark = if checked { "[x]" } else { "[ ]" };
    Line::from(format!("{} {}", mark, label))
}

fn wizard_buttons(wizard: &IntakeWizard, spinner: char) -> Paragraph<'static> {
    let enabled = Style::default().fg(Color::Cyan);
    let disabled = Style::default().fg(Color::DarkGray);

    let previous = Span::styled("← Previous", if wizard.can_go_back() { enabled } else { disabled });
    let forward = if wizard.step() < TOTAL_STEPS {
        Span::styled("Next →", if wizard.can_advance() { enabled } else { disabled })
    } else if wizard.is_submitting() {
        Span::styled(format!("{} Finding Matches...", spinner), Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            "✓ Find My Matches [f]",
            if wizard.can_submit() {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                disabled
            },
        )
    };

    Paragraph::new(Line::from(vec![previous, Span::raw("        "), forward])).alignment(Alignment::Center)
}

fn render_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let stats = [
        ("Profile Completion", "85%"),
        ("Active Matches", "12"),
        ("Applications Sent", "4"),
        ("Total Potential", "$2.4M"),
    ];
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[0]);
    for ((title, value), tile) in stats.iter().zip(tiles.iter()) {
        let widget = Paragraph::new(Line::from(Span::styled(
            *value,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(*title));
        f.render_widget(widget, *tile);
    }

    let actions = Paragraph::new("[2] Complete profile   [4] Browse all matches   [/] Search   [s] Save   [a] Apply")
        .block(Block::default().borders(Borders::ALL).title("Quick Actions"));
    f.render_widget(actions, chunks[1]);

    let board = &app.dashboard;
    let visible = board.visible();
    let title = format!(
        "Recent Matches - {} funding opportunities found [v] View All Matches",
        visible.len()
    );
    render_opportunity_list(f, &board.shown(), board.selected, title, chunks[2]);
}

fn render_matches(f: &mut Frame, app: &App, area: Rect) {
    let board = &app.matches;
    let visible = board.visible();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let summary = Paragraph::new(Line::from(vec![
        Span::raw("Based on your startup profile and preferences    Average match: "),
        Span::styled(
            board.average_match().to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("    ★ {} Saved", board.saved_count())),
    ]))
    .block(Block::default().borders(Borders::ALL).title(format!(
        "Funding Matches - {} opportunities found for your startup",
        visible.len()
    )));
    f.render_widget(summary, chunks[0]);

    let titles: Vec<Line> = CategoryFilter::TABS
        .iter()
        .map(|tab| Line::from(format!("{} ({})", tab.tab_label(), board.tab_count(*tab))))
        .collect();
    let tabs = Tabs::new(titles)
        .select(board.filter().tab_index())
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    f.render_widget(tabs, chunks[1]);

    if visible.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No matches found", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("Try adjusting your search criteria or updating your startup profile"),
            Line::from(""),
            Line::from("[2] Update Profile"),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, chunks[2]);
        return;
    }

    render_opportunity_list(f, &visible, board.selected, String::new(), chunks[2]);
}

fn category_color(category: FundingCategory) -> Color {
    match category {
        FundingCategory::Vc => Color::Blue,
        FundingCategory::Grant => Color::Green,
        FundingCategory::Accelerator => Color::Magenta,
        FundingCategory::Angel => Color::Yellow,
    }
}

fn opportunity_item(view: &OpportunityView) -> ListItem<'static> {
    let o = view.opportunity;
    let bookmark = if view.saved { "★" } else { "☆" };

    let mut details = format!("   {} · {} · {}", o.company, o.amount, o.location);
    if let Some(deadline) = &o.deadline {
        details.push_str(&format!(" · Due: {}", deadline));
    }

    let mut tags: Vec<String> = o.industries.iter().take(3).cloned().collect();
    if o.industries.len() > 3 {
        tags.push(format!("+{} more", o.industries.len() - 3));
    }

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(format!("{} ", bookmark), Style::default().fg(Color::Yellow)),
            Span::styled(format!("{:<12}", o.category.to_string()), Style::default().fg(category_color(o.category))),
            Span::styled(o.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}% match", o.match_score), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(details),
        Line::from(Span::styled(
            format!("   {}", o.description),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(format!("   {}", tags.join(", "))),
    ])
}

fn render_opportunity_list(f: &mut Frame, views: &[OpportunityView], selected: usize, title: String, area: Rect) {
    let items: Vec<ListItem> = views.iter().map(opportunity_item).collect();
    let mut state = ListState::default().with_selected(if views.is_empty() { None } else { Some(selected) });
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▌");
    f.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                match app.view {
                    View::Landing => "Enter: get started | 1-4/Tab: switch view | ?: help | q: quit".to_string(),
                    View::Onboarding => "↑↓: field | Enter/Space: edit/toggle | →/←: next/previous step | f: find matches | Ctrl+S/O: save/load | q: quit".to_string(),
                    View::Dashboard => "↑↓: select | /: search | s: save | a: apply | y: copy | v: all matches | q: quit".to_string(),
                    View::Matches => "↑↓: select | ←→: tab | /: search | s: save | a: apply | y: copy | Ctrl+E: export CSV | q: quit".to_string(),
                }
            }
        }
        AppMode::Editing => format!("Editing: {} (Enter to save, Esc to cancel)", app.input.value()),
        AppMode::Search => format!("Search: {} (Enter to keep, Esc to clear)", app.input.value()),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::SaveProfile => format!("Save profile as: {} (Enter to save, Esc to cancel)", app.input.value()),
        AppMode::LoadProfile => format!("Load profile: {} (Enter to load, Esc to cancel)", app.input.value()),
        AppMode::ExportCsv => format!("Export CSV as: {} (Enter to export, Esc to cancel)", app.input.value()),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Editing | AppMode::Search => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::SaveProfile | AppMode::LoadProfile => Style::default().fg(Color::Yellow),
            AppMode::ExportCsv => Style::default().fg(Color::Magenta),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("fundmatch Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"FUNDMATCH KEY REFERENCE

=== VIEWS ===
1 / 2 / 3 / 4   Home, Onboarding, Dashboard, Matches
Tab             Next view
?  or F1        Show this help
q               Quit

=== ONBOARDING ===
↑↓ or k/j       Move between fields
Enter / Space   Edit a text field, cycle a selection, or tick a checkbox
→ or n          Next step (required * fields must be filled)
← or p          Previous step
f/F5/Ctrl+Enter Find My Matches (last step, at least one funding type)
Ctrl+S          Save the draft profile as JSON
Ctrl+O          Load a draft profile

Required fields per step:
  1  Company Name, Company Description
  2  Current Stage, Funding Goal, Use of Funds
  3  At least one industry
  4  At least one funding type

=== DASHBOARD & MATCHES ===
↑↓ or k/j       Select an opportunity
/               Search (name and company, plus category on the
                dashboard or industries on the matches view)
Esc             Clear the search
s               Save / unsave the selected opportunity
a or Enter      Apply to the selected opportunity
y               Copy the selected opportunity to the clipboard
←→ or h/l       Switch category tab (matches view)
Ctrl+E          Export the visible matches to CSV (matches view)
v               View all matches (dashboard)

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#;
