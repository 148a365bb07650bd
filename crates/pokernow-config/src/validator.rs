//! Configuration validation.

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_poll(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }

        if let Some(ref path) = config.browser.chrome_path {
            if !path.exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chrome executable does not exist: {:?}", path),
                ));
            }
        }
    }

    fn validate_poll(config: &Config, result: &mut ValidationResult) {
        let poll = &config.poll;

        if poll.interval_seconds == 0 {
            result.add_error(ValidationError::new(
                "poll.interval_seconds",
                "interval_seconds must be greater than 0",
            ));
        }

        if poll.budget_seconds == 0 {
            result.add_error(ValidationError::new(
                "poll.budget_seconds",
                "budget_seconds must be greater than 0",
            ));
        } else if poll.budget_seconds < poll.interval_seconds {
            result.add_warning(ValidationWarning::new(
                "poll.budget_seconds",
                "budget is shorter than one interval, only a single poll will run",
            ));
        }

        if poll.element_timeout_seconds == 0 || poll.table_load_timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "poll",
                "wait timeouts must be greater than 0",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        let level = config.logging.level.to_lowercase();
        // Full filter directives such as "pokernow_table=debug" are allowed.
        if !level.contains('=') && !valid_levels.contains(&level.as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, valid_levels
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
