//! Drive the form with key events and check what ends up on screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use health_risk::{
    Field, HealthRiskForm, RiskPrediction, RiskScore, SUBMISSION_FAILED_MESSAGE, ScriptedPredictor,
};
use health_risk_ratatui_form::{
    FormState, KeyOutcome, SUBMIT_LABEL, SUBMITTING_LABEL, Theme, draw_form,
};
use pretty_assertions::assert_eq;
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

fn state() -> FormState {
    FormState::new(HealthRiskForm::new(), Theme::default(), "Health Risk Assessment")
}

fn press(state: &mut FormState, code: KeyCode) -> KeyOutcome {
    state.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn render(state: &mut FormState, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| draw_form(frame, state)).unwrap();
    buffer_text(terminal.backend().buffer())
}

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn first_screen_shows_title_section_and_defaults() {
    let mut state = state();
    let screen = render(&mut state, 80, 30);

    assert!(screen.contains("Health Risk Assessment"));
    assert!(screen.contains("Basic Information"));
    assert!(screen.contains(" Age (years) "));
    assert!(screen.contains("30"));
    assert!(screen.contains(SUBMIT_LABEL));
    assert!(!screen.contains(SUBMITTING_LABEL));
}

#[test]
fn focusing_a_late_field_scrolls_its_section_into_view() {
    let mut state = state();
    state.focus(Field::Cholesterol);
    let screen = render(&mut state, 80, 24);

    assert!(screen.contains("Cholesterol"));
    assert!(!screen.contains("Basic Information"));
}

#[test]
fn inline_error_shows_then_clears_on_edit() {
    let mut state = state();
    state.focus(Field::SleepHours);
    press(&mut state, KeyCode::Backspace);
    press(&mut state, KeyCode::F(10));
    assert!(state.begin_submit().is_none());

    let screen = render(&mut state, 80, 24);
    assert!(screen.contains("Sleep hours must be between 1 and 24"));
    assert!(screen.contains("Please correct"));

    press(&mut state, KeyCode::Char('8'));
    assert_eq!(state.form().error_for(Field::SleepHours), None);
    let screen = render(&mut state, 80, 24);
    assert!(!screen.contains("Sleep hours must be between 1 and 24"));
}

#[test]
fn button_is_disabled_while_submitting() {
    let mut state = state();
    assert!(state.begin_submit().is_some());

    let screen = render(&mut state, 80, 24);
    assert!(screen.contains(SUBMITTING_LABEL));
    assert!(!screen.contains(SUBMIT_LABEL));

    assert_eq!(press(&mut state, KeyCode::F(10)), KeyOutcome::Submit);
    assert!(state.begin_submit().is_none());
}

#[test]
fn results_are_listed_with_percent_suffix() {
    let mut state = state();
    state.begin_submit().unwrap();
    state.finish_submit(Ok(RiskPrediction::new(vec![
        RiskScore::new("Heart_Disease", "12.5"),
        RiskScore::new("diabetes", "40"),
    ])));

    let screen = render(&mut state, 80, 30);
    assert!(screen.contains("Prediction Results"));
    assert!(screen.contains("Heart Disease: 12.5%"));
    assert!(screen.contains("Diabetes: 40%"));
    assert!(screen.contains(SUBMIT_LABEL));
}

#[test]
fn failure_shows_only_the_generic_message() {
    let predictor = ScriptedPredictor::new().with_response(500, "secret stack trace");
    let mut form = HealthRiskForm::new();
    form.submit(&predictor);
    let mut state = FormState::new(form, Theme::default(), "Health Risk Assessment");

    let screen = render(&mut state, 80, 24);
    assert!(screen.contains(SUBMISSION_FAILED_MESSAGE));
    assert!(!screen.contains("secret"));
}

#[test]
fn choosing_condition_from_keyboard() {
    let mut state = state();
    state.focus(Field::ExistingConditions);
    press(&mut state, KeyCode::Down);
    press(&mut state, KeyCode::Down);
    press(&mut state, KeyCode::Char(' '));

    let screen = render(&mut state, 80, 30);
    assert!(screen.contains("(●) COPD"));
    assert_eq!(state.form().profile().input(Field::ExistingConditions), "copd");
}
