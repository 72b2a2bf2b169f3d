//! HTTP adapter for the external schedule planner.

use crate::error::PlannerError;
use crate::schedule::{SchedulePayload, ScheduleResponse};
use crate::traits::SchedulePlanner;

/// Where the planner lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub base_url: String,
    pub path: String,
    pub timeout_secs: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            path: "/schedule".to_string(),
            timeout_secs: 30,
        }
    }
}

impl PlannerConfig {
    /// Full schedule URL, joined without doubled slashes.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

/// Blocking JSON client for the planner's schedule endpoint.
#[derive(Debug, Clone)]
pub struct PlannerClient {
    config: PlannerConfig,
    client: reqwest::blocking::Client,
}

impl PlannerClient {
    /// Build the HTTP client with the configured timeout.
    pub fn new(config: PlannerConfig) -> Result<Self, PlannerError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl SchedulePlanner for PlannerClient {
    fn request_schedule(&self, payload: &SchedulePayload) -> Result<ScheduleResponse, PlannerError> {
        let url = self.config.endpoint();
        tracing::debug!(
            url = %url,
            selected = payload.selected_places.len(),
            candidates = payload.candidate_places.len(),
            "requesting schedule from planner"
        );

        let response = self.client.post(&url).json(payload).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlannerError::Status(status.as_u16()));
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_slashes() {
        let config = PlannerConfig {
            base_url: "http://planner.local/".to_string(),
            path: "/v1/schedule".to_string(),
            timeout_secs: 5,
        };
        assert_eq!(config.endpoint(), "http://planner.local/v1/schedule");
        assert_eq!(PlannerConfig::default().endpoint(), "http://localhost:8000/schedule");
    }
}
