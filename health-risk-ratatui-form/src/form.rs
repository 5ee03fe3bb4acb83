//! Terminal runner: owns the terminal and the event loop.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use health_risk::{HealthRiskForm, Predictor};
use ratatui::{Terminal, prelude::CrosstermBackend};
use thiserror::Error;

use crate::{FormState, KeyOutcome, SubmissionWorker, Theme, WorkerHandle, draw_form};

/// How often the loop wakes up to check on an in-flight request.
const TICK: Duration = Duration::from_millis(100);

/// Error type for the terminal form.
#[derive(Debug, Error)]
pub enum RatatuiFormError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The terminal could not be put back into its normal mode.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Full-screen health risk form.
#[derive(Debug, Clone)]
pub struct RatatuiForm {
    title: String,
    theme: Theme,
    form: HealthRiskForm,
}

impl Default for RatatuiForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RatatuiForm {
    pub fn new() -> Self {
        Self {
            title: "Health Risk Assessment".to_string(),
            theme: Theme::default(),
            form: HealthRiskForm::new(),
        }
    }

    /// Set the title shown at the top of the form.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Start from an existing form instead of the defaults.
    pub fn with_form(mut self, form: HealthRiskForm) -> Self {
        self.form = form;
        self
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, RatatuiFormError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), RatatuiFormError> {
        disable_raw_mode().map_err(|err| RatatuiFormError::Terminal(err.to_string()))?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Show the form until the user quits, submitting through `predictor`.
    ///
    /// Returns the form as it was when the user left, including the last
    /// submission status.
    pub fn run<P>(self, predictor: Arc<P>) -> Result<HealthRiskForm, RatatuiFormError>
    where
        P: Predictor + Send + Sync + 'static,
    {
        let mut terminal = self.setup_terminal()?;
        let mut state = FormState::new(self.form.clone(), self.theme.clone(), self.title.clone());

        let result = event_loop(&mut terminal, &mut state, predictor);
        let restored = self.restore_terminal(&mut terminal);

        result?;
        restored?;
        Ok(state.into_form())
    }
}

fn event_loop<P>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut FormState,
    predictor: Arc<P>,
) -> Result<(), RatatuiFormError>
where
    P: Predictor + Send + Sync + 'static,
{
    let mut in_flight: Option<WorkerHandle> = None;

    loop {
        if let Some(outcome) = in_flight.as_ref().and_then(WorkerHandle::try_recv) {
            state.finish_submit(outcome);
            in_flight = None;
        }

        terminal.draw(|frame| draw_form(frame, state))?;

        if !event::poll(TICK)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match state.handle_key(key) {
            KeyOutcome::Continue => {}
            KeyOutcome::Quit => {
                if in_flight.is_some() {
                    tracing::info!("leaving with a request still in flight");
                }
                return Ok(());
            }
            KeyOutcome::Submit => {
                if let Some(request) = state.begin_submit() {
                    tracing::info!("submitting profile");
                    in_flight = Some(SubmissionWorker::spawn(predictor.clone(), request));
                }
            }
        }
    }
}
