pub mod app_config;
pub mod config;
pub mod reviews;
pub mod system;

use thiserror::Error;

pub use app_config::{AppConfig, Defuzzification, Environment, GridSteps, InputPolicy};
pub use config::{load_app_config, load_app_config_from_env};
pub use reviews::{
    review_length, sentiment_score, LabelThresholds, ReviewRecord, SatisfactionLabel,
    ScoredReview,
};
pub use system::{
    load_system, parse_system, AndExpr, ExprConfig, IsExpr, OrExpr, RuleConfig, SystemFile,
    TermConfig, TermRef, VariableConfig,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read system file {path}: {source}")]
    SystemFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse system file: {0}")]
    SystemFileParse(#[from] serde_yaml::Error),

    #[error("system validation error: {0}")]
    Validation(String),
}
