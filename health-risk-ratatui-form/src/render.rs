//! Drawing the form: sections of fields, the outcome panel, the submit button.

use health_risk::{RiskPrediction, Section, SubmissionStatus};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
    },
};

use crate::state::{Editor, FieldInput, FormState};

/// Color theme for the TUI form.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
    pub selected_bg: Color,
    pub disabled: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Blue,
            text: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
            selected_bg: Color::DarkGray,
            disabled: Color::DarkGray,
        }
    }
}

pub const SUBMIT_LABEL: &str = "Get Health Risk Prediction";
pub const SUBMITTING_LABEL: &str = "Analyzing...";
const RESULTS_TITLE: &str = " Prediction Results ";
const HELP_TEXT: &str =
    "Tab/Shift+Tab: Next/Prev  ↑/↓: Navigate  Space/Enter: Select  F10: Submit  Esc: Quit";

/// Blank rows between two sections
const SECTION_SPACING: u16 = 1;
/// Results panel never grows past this many rows, borders included
const MAX_RESULTS_HEIGHT: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Header(Section),
    Field(usize),
}

/// One row of the scrollable content, positioned in virtual coordinates.
#[derive(Debug, Clone, Copy)]
struct Row {
    kind: RowKind,
    y: u16,
    height: u16,
}

fn field_height(input: &FieldInput) -> u16 {
    match input.editor {
        Editor::Text { .. } => 3,
        Editor::Options { .. } => 2 + input.field.options().len() as u16,
    }
}

/// Lay fields out in order, with a header where a new section starts.
fn layout_rows(inputs: &[FieldInput]) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut y = 0;
    let mut current = None;
    for (idx, input) in inputs.iter().enumerate() {
        let section = input.field.section();
        if current != Some(section) {
            if current.is_some() {
                y += SECTION_SPACING;
            }
            rows.push(Row {
                kind: RowKind::Header(section),
                y,
                height: 1,
            });
            y += 1;
            current = Some(section);
        }
        let height = field_height(input);
        rows.push(Row {
            kind: RowKind::Field(idx),
            y,
            height,
        });
        y += height;
    }
    rows
}

impl FormState {
    /// Adjust scroll offset to ensure focused field is visible
    fn adjust_scroll(&mut self, rows: &[Row], viewport_height: u16) {
        if self.submit_focused {
            return;
        }
        let Some(pos) = rows
            .iter()
            .position(|row| row.kind == RowKind::Field(self.focused_idx))
        else {
            return;
        };
        let row = rows[pos];

        // Bring the section header along when the field opens its section
        let top = match pos.checked_sub(1).map(|prev| rows[prev]) {
            Some(prev @ Row {
                kind: RowKind::Header(_),
                ..
            }) => prev.y,
            _ => row.y,
        };
        if top < self.scroll_offset {
            self.scroll_offset = top;
        }

        let bottom = row.y + row.height;
        if bottom > self.scroll_offset + viewport_height {
            self.scroll_offset = bottom.saturating_sub(viewport_height);
        }
    }
}

fn status_height(status: &SubmissionStatus) -> u16 {
    match status {
        SubmissionStatus::Succeeded(prediction) => {
            (prediction.len().max(1) as u16 + 2).min(MAX_RESULTS_HEIGHT)
        }
        SubmissionStatus::Failed(_) | SubmissionStatus::Invalid(_) => 3,
        _ => 0,
    }
}

pub fn draw_form(frame: &mut Frame, state: &mut FormState) {
    let area = frame.area();
    let theme = state.theme.clone();
    let status = state.form().status().clone();

    // Main layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                     // Title
            Constraint::Min(6),                        // Form content
            Constraint::Length(status_height(&status)), // Outcome
            Constraint::Length(3),                     // Submit button
            Constraint::Length(1),                     // Help bar
        ])
        .split(area);

    let title = Paragraph::new(state.title.clone())
        .style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(title, chunks[0]);

    // Form content area - reserve space for scrollbar on the right
    let form_area = chunks[1];
    let content_width = form_area.width.saturating_sub(2);
    let viewport_height = form_area.height;

    let rows = layout_rows(&state.inputs);
    state.adjust_scroll(&rows, viewport_height);
    let total_height = rows.last().map(|row| row.y + row.height).unwrap_or(0);
    let scroll_offset = state.scroll_offset;

    for row in &rows {
        // Skip rows completely or partially above the viewport
        if row.y < scroll_offset {
            continue;
        }
        let visible_top = row.y - scroll_offset;
        if visible_top >= viewport_height {
            break;
        }
        let row_area = Rect {
            x: form_area.x + 1,
            y: form_area.y + visible_top,
            width: content_width,
            height: row.height.min(viewport_height - visible_top),
        };

        match row.kind {
            RowKind::Header(section) => {
                let header = Paragraph::new(section.title()).style(
                    Style::default()
                        .fg(theme.secondary)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                );
                frame.render_widget(header, row_area);
            }
            RowKind::Field(idx) => {
                let is_focused = !state.submit_focused && idx == state.focused_idx;
                let input = &state.inputs[idx];
                let error = state.form().error_for(input.field);
                let selected = state.selected_option(input.field);
                draw_field(frame, input, selected, error, row_area, is_focused, &theme);
            }
        }
    }

    // Draw scrollbar if content exceeds viewport
    if total_height > viewport_height {
        let scrollbar_area = Rect {
            x: form_area.x + form_area.width.saturating_sub(1),
            y: form_area.y,
            width: 1,
            height: viewport_height,
        };

        let mut scrollbar_state = ScrollbarState::new(total_height as usize)
            .position(scroll_offset as usize)
            .viewport_content_length(viewport_height as usize);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }

    draw_status(frame, &status, chunks[2], &theme);
    draw_submit(frame, state, chunks[3], &theme);

    let help = Paragraph::new(HELP_TEXT).style(Style::default().fg(theme.border));
    frame.render_widget(help, chunks[4]);
}

fn draw_status(frame: &mut Frame, status: &SubmissionStatus, area: Rect, theme: &Theme) {
    match status {
        SubmissionStatus::Succeeded(prediction) => draw_results(frame, prediction, area, theme),
        SubmissionStatus::Failed(message) => {
            let panel = Paragraph::new(format!("⚠ {message}"))
                .style(Style::default().fg(theme.error))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme.error)),
                );
            frame.render_widget(panel, area);
        }
        SubmissionStatus::Invalid(errors) => {
            let names: Vec<&str> = errors.fields().map(|field| field.label()).collect();
            let panel = Paragraph::new(format!("Please correct: {}", names.join(", ")))
                .style(Style::default().fg(theme.error))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme.error)),
                );
            frame.render_widget(panel, area);
        }
        SubmissionStatus::Idle | SubmissionStatus::Validating | SubmissionStatus::Submitting => {}
    }
}

fn draw_results(frame: &mut Frame, prediction: &RiskPrediction, area: Rect, theme: &Theme) {
    let lines: Vec<Line> = if prediction.is_empty() {
        vec![Line::from("No risks returned")]
    } else {
        prediction
            .display_rows()
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(label, Style::default().fg(theme.text)),
                    Span::raw(": "),
                    Span::styled(
                        value,
                        Style::default()
                            .fg(theme.success)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect()
    };

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.success))
            .title(RESULTS_TITLE)
            .title_style(
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
    );
    frame.render_widget(panel, area);
}

fn draw_submit(frame: &mut Frame, state: &FormState, area: Rect, theme: &Theme) {
    let submitting = state.form().is_submitting();
    let focused = state.submit_focused;

    let style = if submitting {
        Style::default().fg(theme.disabled)
    } else if focused {
        Style::default()
            .fg(theme.text)
            .bg(theme.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD)
    };
    let text = match (submitting, focused) {
        (true, _) => SUBMITTING_LABEL.to_string(),
        (false, true) => format!("[ {SUBMIT_LABEL} ]"),
        (false, false) => SUBMIT_LABEL.to_string(),
    };

    let button = Paragraph::new(text)
        .style(style)
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if focused && !submitting {
                    theme.primary
                } else {
                    theme.border
                })),
        );
    frame.render_widget(button, area);
}

fn draw_field(
    frame: &mut Frame,
    input: &FieldInput,
    selected: Option<usize>,
    error: Option<&str>,
    area: Rect,
    is_focused: bool,
    theme: &Theme,
) {
    let border_color = if error.is_some() {
        theme.error
    } else if is_focused {
        theme.primary
    } else {
        theme.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", input.field.label()))
        .title_style(Style::default().fg(if is_focused {
            theme.highlight
        } else {
            theme.text
        }));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &input.editor {
        Editor::Text { value, cursor } => {
            let text = Paragraph::new(value.clone()).style(Style::default().fg(theme.text));
            frame.render_widget(text, inner);

            if is_focused {
                let cursor_x = inner.x + *cursor as u16;
                if cursor_x < inner.x + inner.width {
                    frame.set_cursor_position((cursor_x, inner.y));
                }
            }
        }
        Editor::Options { highlight } => {
            let items: Vec<ListItem> = input
                .field
                .options()
                .iter()
                .enumerate()
                .map(|(idx, option)| {
                    let marker = if selected == Some(idx) { "(●)" } else { "( )" };
                    let style = if is_focused && idx == *highlight {
                        Style::default()
                            .fg(theme.text)
                            .bg(theme.selected_bg)
                            .add_modifier(Modifier::BOLD)
                    } else if selected == Some(idx) {
                        Style::default().fg(theme.highlight)
                    } else {
                        Style::default().fg(theme.text)
                    };
                    ListItem::new(format!("{marker} {}", option.label)).style(style)
                })
                .collect();
            frame.render_widget(List::new(items), inner);
        }
    }

    // Error replaces the bottom border
    if let Some(error) = error
        && area.height > 1
    {
        let error_text =
            Paragraph::new(format!("⚠ {error}")).style(Style::default().fg(theme.error));
        let error_area = Rect {
            x: area.x + 1,
            y: area.y + area.height - 1,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(error_text, error_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_risk::{Field, FieldKind, HealthRiskForm, RiskScore};

    fn state() -> FormState {
        FormState::new(HealthRiskForm::new(), Theme::default(), "Test")
    }

    #[test]
    fn every_section_gets_one_header() {
        let state = state();
        let rows = layout_rows(&state.inputs);
        let headers: Vec<Section> = rows
            .iter()
            .filter_map(|row| match row.kind {
                RowKind::Header(section) => Some(section),
                RowKind::Field(_) => None,
            })
            .collect();
        assert_eq!(
            headers,
            vec![
                Section::BasicInformation,
                Section::Lifestyle,
                Section::MedicalHistory,
                Section::VitalSigns,
            ]
        );
        assert_eq!(rows.len(), Field::ALL.len() + 4);
    }

    #[test]
    fn text_fields_are_three_rows_tall() {
        let state = state();
        for input in &state.inputs {
            if matches!(input.field.kind(), FieldKind::Int | FieldKind::Float) {
                assert_eq!(field_height(input), 3, "{}", input.field);
            } else {
                assert_eq!(
                    field_height(input),
                    2 + input.field.options().len() as u16
                );
            }
        }
    }

    #[test]
    fn scroll_follows_focus_down_and_back_up() {
        let mut state = state();
        let rows = layout_rows(&state.inputs);

        state.focus(Field::Cholesterol);
        state.adjust_scroll(&rows, 10);
        let last = rows[rows.len() - 1];
        assert_eq!(state.scroll_offset, last.y + last.height - 10);

        state.focus(Field::Age);
        state.adjust_scroll(&rows, 10);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn status_panel_sized_by_outcome() {
        assert_eq!(status_height(&SubmissionStatus::Idle), 0);
        assert_eq!(status_height(&SubmissionStatus::Submitting), 0);
        assert_eq!(
            status_height(&SubmissionStatus::Failed("x".to_string())),
            3
        );
        let prediction = RiskPrediction::new(vec![
            RiskScore::new("a", "1"),
            RiskScore::new("b", "2"),
        ]);
        assert_eq!(status_height(&SubmissionStatus::Succeeded(prediction)), 4);
    }
}
