use crate::config::types::{Config, SweepConfig};
use crate::crawler::Extractor;
use crate::url::{parse_absolute, UrlTemplate};
use crate::ConfigError;

/// Upper bound on the worker count
pub const MAX_WORKERS: usize = 1000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_sweep_config(&config.sweep)
}

/// Validates the sweep parameters
pub fn validate_sweep_config(config: &SweepConfig) -> Result<(), ConfigError> {
    validate_template(&config.url_template, config.start)?;
    validate_range(config.start, config.length)?;
    validate_workers(config.workers)?;
    validate_selector(&config.selector)?;
    Ok(())
}

/// Checks the template has one placeholder and renders to an absolute URL
fn validate_template(raw: &str, start: u64) -> Result<(), ConfigError> {
    let template = UrlTemplate::parse(raw).map_err(|e| ConfigError::Validation(e.to_string()))?;

    parse_absolute(&template.render(start))
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid url-template: {}", e)))?;

    Ok(())
}

fn validate_range(start: u64, length: u64) -> Result<(), ConfigError> {
    if start.checked_add(length).is_none() {
        return Err(ConfigError::Validation(format!(
            "start ({}) + length ({}) overflows the page id range",
            start, length
        )));
    }

    Ok(())
}

// Zero workers would leave the task source blocked forever.
fn validate_workers(workers: usize) -> Result<(), ConfigError> {
    if workers < 1 || workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and {}, got {}",
            MAX_WORKERS, workers
        )));
    }

    Ok(())
}

fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::InvalidSelector(
            "selector cannot be empty".to_string(),
        ));
    }

    Extractor::new(selector).map(|_| ())
}
