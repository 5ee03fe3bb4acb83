//! Health risk assessment: fill in the form, get risk percentages back.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use health_risk::{HttpPredictor, SubmissionStatus};
use health_risk_ratatui_form::RatatuiForm;

mod cli;
mod logging;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(&cli.log_file)?;

    let config = cli.predictor_config();
    tracing::info!(url = %config.predict_url(), timeout = ?config.timeout, "starting");
    let predictor = Arc::new(HttpPredictor::new(&config)?);

    let form = RatatuiForm::new().with_title(cli.title).run(predictor)?;

    // Leave the last result on screen once the alternate screen is gone
    if let SubmissionStatus::Succeeded(prediction) = form.status() {
        println!("Prediction Results");
        for (label, value) in prediction.display_rows() {
            println!("  {label}: {value}");
        }
    }

    tracing::info!(status = form.status().name(), "exiting");
    Ok(())
}
