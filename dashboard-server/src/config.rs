//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the pipeline artifact loaded at startup
    pub pipeline_path: String,

    /// Directory holding the evaluation artifacts (summary, predictions, images)
    pub reports_dir: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            pipeline_path: env::var("STRESSLENS_PIPELINE_PATH")
                .unwrap_or_else(|_| "data/stress_pipeline.json".to_string()),

            reports_dir: env::var("STRESSLENS_REPORTS_DIR")
                .unwrap_or_else(|_| "data/reports".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_local_paths() {
        // Only checks the fallback values; env overrides are exercised in deployment
        let config = Config {
            pipeline_path: "data/stress_pipeline.json".into(),
            reports_dir: "data/reports".into(),
            port: 8080,
            environment: "development".into(),
        };
        assert!(!config.is_production());
    }
}
