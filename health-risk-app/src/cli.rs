use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use health_risk::{DEFAULT_ENDPOINT, PredictorConfig};

#[derive(Debug, Parser)]
#[command(name = "health-risk", version, about = "Health risk assessment form")]
pub struct Cli {
    /// Base URL of the prediction service
    #[arg(long, env = "HEALTH_RISK_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Give up on a request after this many seconds (no limit when unset)
    #[arg(long, env = "HEALTH_RISK_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Where to write logs; the terminal belongs to the form
    #[arg(long, env = "HEALTH_RISK_LOG_FILE", default_value = "health-risk.log")]
    pub log_file: PathBuf,

    /// Title shown at the top of the form
    #[arg(long, default_value = "Health Risk Assessment")]
    pub title: String,
}

impl Cli {
    pub fn predictor_config(&self) -> PredictorConfig {
        let config = PredictorConfig::new(self.endpoint.clone());
        match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}
