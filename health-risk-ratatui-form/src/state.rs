//! Editing state of the terminal form: focus, text buffers, option highlights.
//!
//! The [`HealthRiskForm`] stays the single owner of field values and the
//! submission status; this layer only keeps what the terminal needs on top
//! (typed text, cursor positions, which option is highlighted).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use health_risk::{
    Field, FieldKind, HealthRiskForm, PredictionRequest, RiskPrediction, SubmitError,
};

use crate::Theme;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    /// The user asked to submit. The loop decides whether a request starts.
    Submit,
    Quit,
}

/// How a field is edited on screen.
#[derive(Debug, Clone)]
pub(crate) enum Editor {
    /// Numeric input typed as text.
    Text { value: String, cursor: usize },
    /// Radio list over `Field::options()`.
    Options { highlight: usize },
}

/// A field in the form.
#[derive(Debug, Clone)]
pub(crate) struct FieldInput {
    pub(crate) field: Field,
    pub(crate) editor: Editor,
}

/// State for the entire form.
pub struct FormState {
    form: HealthRiskForm,
    pub(crate) inputs: Vec<FieldInput>,
    pub(crate) focused_idx: usize,
    /// Whether the submit button is focused
    pub(crate) submit_focused: bool,
    /// Scroll offset in rows (vertical)
    pub(crate) scroll_offset: u16,
    pub(crate) theme: Theme,
    pub(crate) title: String,
}

impl FormState {
    pub fn new(form: HealthRiskForm, theme: Theme, title: impl Into<String>) -> Self {
        let inputs = Field::ALL
            .into_iter()
            .map(|field| {
                let editor = match field.kind() {
                    FieldKind::Int | FieldKind::Float => {
                        let value = form.profile().input(field);
                        Editor::Text {
                            cursor: value.len(),
                            value,
                        }
                    }
                    FieldKind::Bool | FieldKind::Choice => Editor::Options {
                        highlight: selected_option(&form, field).unwrap_or(0),
                    },
                };
                FieldInput { field, editor }
            })
            .collect();

        Self {
            form,
            inputs,
            focused_idx: 0,
            submit_focused: false,
            scroll_offset: 0,
            theme,
            title: title.into(),
        }
    }

    pub fn form(&self) -> &HealthRiskForm {
        &self.form
    }

    pub fn into_form(self) -> HealthRiskForm {
        self.form
    }

    /// The focused field, or `None` while the submit button has focus.
    pub fn focused_field(&self) -> Option<Field> {
        if self.submit_focused {
            return None;
        }
        self.inputs.get(self.focused_idx).map(|input| input.field)
    }

    pub fn is_submit_focused(&self) -> bool {
        self.submit_focused
    }

    /// Index into `Field::options()` of the value currently held by the form.
    pub fn selected_option(&self, field: Field) -> Option<usize> {
        selected_option(&self.form, field)
    }

    /// Text currently shown in a numeric field.
    pub fn text(&self, field: Field) -> Option<&str> {
        self.inputs
            .iter()
            .find(|input| input.field == field)
            .and_then(|input| match &input.editor {
                Editor::Text { value, .. } => Some(value.as_str()),
                Editor::Options { .. } => None,
            })
    }

    pub fn focus(&mut self, field: Field) {
        if let Some(idx) = self.inputs.iter().position(|input| input.field == field) {
            self.focused_idx = idx;
            self.submit_focused = false;
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut FieldInput> {
        if self.submit_focused {
            return None;
        }
        self.inputs.get_mut(self.focused_idx)
    }

    pub fn next_field(&mut self) {
        if self.submit_focused {
            // Already on submit button, can't go further
            return;
        }
        if self.focused_idx + 1 < self.inputs.len() {
            self.focused_idx += 1;
        } else {
            self.submit_focused = true;
        }
    }

    pub fn prev_field(&mut self) {
        if self.submit_focused {
            self.submit_focused = false;
            self.focused_idx = self.inputs.len().saturating_sub(1);
        } else if self.focused_idx > 0 {
            self.focused_idx -= 1;
        }
    }

    /// Check if current field is a radio list
    pub fn is_selection_field(&self) -> bool {
        !self.submit_focused
            && self
                .inputs
                .get(self.focused_idx)
                .is_some_and(|input| matches!(input.editor, Editor::Options { .. }))
    }

    fn handle_text_input(&mut self, c: char) {
        if !(c.is_ascii_digit() || matches!(c, '-' | '+' | '.')) {
            return;
        }
        let Some(input) = self.focused_input_mut() else {
            return;
        };
        if let Editor::Text { value, cursor } = &mut input.editor {
            value.insert(*cursor, c);
            *cursor += 1;
            self.commit_text();
        }
    }

    fn handle_backspace(&mut self) {
        if let Some(FieldInput {
            editor: Editor::Text { value, cursor },
            ..
        }) = self.focused_input_mut()
            && *cursor > 0
        {
            *cursor -= 1;
            value.remove(*cursor);
            self.commit_text();
        }
    }

    fn handle_delete(&mut self) {
        if let Some(FieldInput {
            editor: Editor::Text { value, cursor },
            ..
        }) = self.focused_input_mut()
            && *cursor < value.len()
        {
            value.remove(*cursor);
            self.commit_text();
        }
    }

    fn move_cursor(&mut self, to: impl FnOnce(usize, usize) -> usize) {
        if let Some(FieldInput {
            editor: Editor::Text { value, cursor },
            ..
        }) = self.focused_input_mut()
        {
            *cursor = to(*cursor, value.len()).min(value.len());
        }
    }

    /// Push the focused text buffer into the form.
    fn commit_text(&mut self) {
        let Some(input) = self.inputs.get(self.focused_idx) else {
            return;
        };
        if let Editor::Text { value, .. } = &input.editor
            && let Err(err) = self.form.set_input(input.field, value)
        {
            tracing::warn!("rejected input: {err}");
        }
    }

    fn move_highlight(&mut self, forward: bool) {
        let Some(input) = self.focused_input_mut() else {
            return;
        };
        let count = input.field.options().len();
        if let Editor::Options { highlight } = &mut input.editor
            && count > 0
        {
            *highlight = if forward {
                (*highlight + 1) % count
            } else {
                (*highlight + count - 1) % count
            };
        }
    }

    /// Select the currently highlighted option.
    pub fn select_option(&mut self) {
        let Some(input) = self.inputs.get(self.focused_idx) else {
            return;
        };
        if self.submit_focused {
            return;
        }
        if let Editor::Options { highlight } = input.editor
            && let Some(option) = input.field.options().get(highlight)
            && let Err(err) = self.form.set_input(input.field, option.value)
        {
            tracing::warn!("rejected option: {err}");
        }
    }

    /// Validate and start a submission.
    ///
    /// Returns the request to send, or `None` if validation failed (focus
    /// moves to the first field with an error) or a request is already in flight.
    pub fn begin_submit(&mut self) -> Option<PredictionRequest> {
        match self.form.begin_submit() {
            Ok(request) => Some(request),
            Err(SubmitError::InFlight) => None,
            Err(SubmitError::Invalid(_)) => {
                let first = self
                    .form
                    .errors()
                    .and_then(|errors| errors.fields().next());
                if let Some(field) = first {
                    self.focus(field);
                }
                None
            }
        }
    }

    pub fn finish_submit(&mut self, outcome: Result<RiskPrediction, anyhow::Error>) {
        self.form.finish_submit(outcome);
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyOutcome::Quit;
            }
            // Ctrl+Enter or F10 to submit the form
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyOutcome::Submit;
            }
            KeyCode::F(10) => return KeyOutcome::Submit,
            // Enter: submit if on button, select option, or move to next field
            KeyCode::Enter => {
                if self.submit_focused {
                    return KeyOutcome::Submit;
                } else if self.is_selection_field() {
                    self.select_option();
                } else {
                    self.next_field();
                }
            }
            KeyCode::BackTab => self.prev_field(),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => self.prev_field(),
            KeyCode::Tab => self.next_field(),
            KeyCode::Up => {
                if self.is_selection_field() {
                    self.move_highlight(false);
                } else {
                    self.prev_field();
                }
            }
            KeyCode::Down => {
                if self.is_selection_field() {
                    self.move_highlight(true);
                } else {
                    self.next_field();
                }
            }
            KeyCode::Left if key.modifiers.contains(KeyModifiers::CONTROL) => self.prev_field(),
            KeyCode::Right if key.modifiers.contains(KeyModifiers::CONTROL) => self.next_field(),
            KeyCode::Left => self.move_cursor(|cursor, _| cursor.saturating_sub(1)),
            KeyCode::Right => self.move_cursor(|cursor, _| cursor + 1),
            KeyCode::Home => self.move_cursor(|_, _| 0),
            KeyCode::End => self.move_cursor(|_, len| len),
            KeyCode::Char(' ') => {
                if self.is_selection_field() {
                    self.select_option();
                }
            }
            KeyCode::Char(c) => self.handle_text_input(c),
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Delete => self.handle_delete(),
            KeyCode::PageDown => {
                for _ in 0..5 {
                    self.next_field();
                }
            }
            KeyCode::PageUp => {
                for _ in 0..5 {
                    self.prev_field();
                }
            }
            _ => {}
        }
        KeyOutcome::Continue
    }
}

fn selected_option(form: &HealthRiskForm, field: Field) -> Option<usize> {
    let current = form.profile().input(field);
    field
        .options()
        .iter()
        .position(|option| option.value == current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_risk::{Gender, SubmissionStatus};

    fn press(state: &mut FormState, code: KeyCode) -> KeyOutcome {
        state.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn state() -> FormState {
        FormState::new(HealthRiskForm::new(), Theme::default(), "Test")
    }

    #[test]
    fn starts_on_first_field_with_defaults_loaded() {
        let state = state();
        assert_eq!(state.focused_field(), Some(Field::Age));
        assert_eq!(state.text(Field::Age), Some("30"));
        assert_eq!(state.text(Field::Bmi), Some("24.5"));
        assert_eq!(state.selected_option(Field::Gender), Some(1));
        assert_eq!(state.selected_option(Field::ExistingConditions), Some(0));
    }

    #[test]
    fn tab_walks_fields_then_submit_button() {
        let mut state = state();
        for _ in 0..Field::ALL.len() - 1 {
            press(&mut state, KeyCode::Tab);
        }
        assert_eq!(state.focused_field(), Some(Field::Cholesterol));

        press(&mut state, KeyCode::Tab);
        assert!(state.is_submit_focused());
        assert_eq!(state.focused_field(), None);

        press(&mut state, KeyCode::BackTab);
        assert_eq!(state.focused_field(), Some(Field::Cholesterol));
    }

    #[test]
    fn typing_updates_profile() {
        let mut state = state();
        press(&mut state, KeyCode::Backspace);
        press(&mut state, KeyCode::Backspace);
        assert_eq!(state.form().profile().age, 0);

        press(&mut state, KeyCode::Char('4'));
        press(&mut state, KeyCode::Char('x'));
        press(&mut state, KeyCode::Char('5'));
        assert_eq!(state.text(Field::Age), Some("45"));
        assert_eq!(state.form().profile().age, 45);
    }

    #[test]
    fn cursor_edits_in_the_middle() {
        let mut state = state();
        press(&mut state, KeyCode::Home);
        press(&mut state, KeyCode::Delete);
        assert_eq!(state.text(Field::Age), Some("0"));
        press(&mut state, KeyCode::Char('7'));
        assert_eq!(state.form().profile().age, 70);
        press(&mut state, KeyCode::End);
        press(&mut state, KeyCode::Right);
        press(&mut state, KeyCode::Char('1'));
        assert_eq!(state.text(Field::Age), Some("701"));
    }

    #[test]
    fn arrows_move_highlight_and_enter_selects() {
        let mut state = state();
        state.focus(Field::Gender);
        press(&mut state, KeyCode::Down);
        assert_eq!(state.form().profile().gender, Some(Gender::Male));

        press(&mut state, KeyCode::Enter);
        assert_eq!(state.form().profile().gender, Some(Gender::Female));

        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Char(' '));
        assert_eq!(state.form().profile().gender, None);
    }

    #[test]
    fn invalid_submit_focuses_first_error() {
        let mut state = state();
        state.focus(Field::SleepHours);
        press(&mut state, KeyCode::Backspace);
        state.focus(Field::Gender);
        press(&mut state, KeyCode::Up);
        press(&mut state, KeyCode::Enter);
        state.focus(Field::Cholesterol);

        assert_eq!(press(&mut state, KeyCode::F(10)), KeyOutcome::Submit);
        assert!(state.begin_submit().is_none());
        assert_eq!(state.focused_field(), Some(Field::Gender));
        assert!(state.form().error_for(Field::SleepHours).is_some());
    }

    #[test]
    fn submit_is_refused_while_in_flight() {
        let mut state = state();
        assert!(state.begin_submit().is_some());
        assert!(state.begin_submit().is_none());
        assert_eq!(state.form().status(), &SubmissionStatus::Submitting);

        state.finish_submit(Err(anyhow::anyhow!("down")));
        assert!(state.begin_submit().is_some());
    }

    #[test]
    fn escape_quits() {
        let mut state = state();
        assert_eq!(press(&mut state, KeyCode::Esc), KeyOutcome::Quit);
    }
}
