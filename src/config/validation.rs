use crate::config::types::{Config, HttpConfig, OutputConfig, SearchConfig, VpnConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_search_config(&config.search)?;
    validate_http_config(&config.http)?;
    validate_vpn_config(&config.vpn)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates search configuration
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.index_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid index-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "index-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if Selector::parse(&config.listing_selector).is_err() {
        return Err(ConfigError::Validation(format!(
            "listing-selector is not a valid CSS selector: '{}'",
            config.listing_selector
        )));
    }

    if config.city.trim().is_empty() {
        return Err(ConfigError::Validation("city cannot be empty".to_string()));
    }

    if config.state.trim().is_empty() {
        return Err(ConfigError::Validation("state cannot be empty".to_string()));
    }

    if config.distance < 1 {
        return Err(ConfigError::Validation(format!(
            "distance must be >= 1, got {}",
            config.distance
        )));
    }

    Ok(())
}

/// Validates HTTP configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.fetch_timeout_secs < 1 || config.fetch_timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "fetch-timeout-secs must be between 1 and 120, got {}",
            config.fetch_timeout_secs
        )));
    }

    Ok(())
}

/// Validates VPN configuration
fn validate_vpn_config(config: &VpnConfig) -> Result<(), ConfigError> {
    if config.install_dir.is_empty() {
        return Err(ConfigError::Validation(
            "vpn install-dir cannot be empty".to_string(),
        ));
    }

    if config.binary.is_empty() {
        return Err(ConfigError::Validation(
            "vpn binary cannot be empty".to_string(),
        ));
    }

    if config.process_name.is_empty() {
        return Err(ConfigError::Validation(
            "vpn process-name cannot be empty".to_string(),
        ));
    }

    if config.region.is_empty() {
        return Err(ConfigError::Validation(
            "vpn region cannot be empty".to_string(),
        ));
    }

    if config.wait_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "vpn wait-attempts must be >= 1, got {}",
            config.wait_attempts
        )));
    }

    if config.wait_interval_ms < 10 {
        return Err(ConfigError::Validation(format!(
            "vpn wait-interval-ms must be >= 10ms, got {}ms",
            config.wait_interval_ms
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}
