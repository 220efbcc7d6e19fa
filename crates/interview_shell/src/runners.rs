use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use code_runner::CodeRunner;
use code_runner_judge::{JudgeRunner, JudgeRunnerConfig, JUDGE_RUNNER_ID};
use code_runner_mock::{MockRunner, MOCK_RUNNER_ID};
use serde::Deserialize;

pub const DEFAULT_RUNNER_ID: &str = MOCK_RUNNER_ID;
pub const RUNNER_ENV_VAR: &str = "INTERVIEW_SHELL_RUNNER";
pub const JUDGE_CONFIG_PATH_ENV_VAR: &str = "INTERVIEW_SHELL_JUDGE_CONFIG_PATH";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JudgeConfigFile {
    api_key: String,
    #[serde(default)]
    api_host: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    timeout_sec: Option<u64>,
}

pub fn runner_from_env() -> Result<Arc<dyn CodeRunner>, String> {
    let runner_id = env_string_opt(RUNNER_ENV_VAR);
    let config_path = env_string_opt(JUDGE_CONFIG_PATH_ENV_VAR);

    runner_for_id(
        runner_id.as_deref().unwrap_or(DEFAULT_RUNNER_ID),
        config_path.as_deref().map(Path::new),
    )
}

pub fn runner_for_id(
    runner_id: &str,
    judge_config_path: Option<&Path>,
) -> Result<Arc<dyn CodeRunner>, String> {
    match runner_id {
        MOCK_RUNNER_ID => Ok(Arc::new(MockRunner::default())),
        JUDGE_RUNNER_ID => {
            let path = judge_config_path.ok_or_else(|| {
                format!("{JUDGE_CONFIG_PATH_ENV_VAR} must be set when {RUNNER_ENV_VAR}={JUDGE_RUNNER_ID}")
            })?;
            let config = load_judge_config(path)?;
            let runner = JudgeRunner::new(config).map_err(|error| error.to_string())?;
            Ok(Arc::new(runner))
        }
        unknown => Err(format!(
            "Unsupported runner '{unknown}'. Available runners: {MOCK_RUNNER_ID}, {JUDGE_RUNNER_ID}"
        )),
    }
}

/// Reads a judge runner config file.
///
/// `api_key` must be non-empty, `timeout_sec` must be positive when present,
/// and unknown fields are rejected.
pub fn load_judge_config(path: &Path) -> Result<JudgeRunnerConfig, String> {
    let raw = fs::read_to_string(path).map_err(|error| {
        format!(
            "Failed to read judge config {}: {error}",
            path.display()
        )
    })?;
    parse_judge_config(&raw)
        .map_err(|error| format!("Invalid judge config {}: {error}", path.display()))
}

fn parse_judge_config(raw: &str) -> Result<JudgeRunnerConfig, String> {
    let file: JudgeConfigFile = serde_json::from_str(raw).map_err(|error| error.to_string())?;

    let api_key = file.api_key.trim();
    if api_key.is_empty() {
        return Err("api_key must be non-empty".to_string());
    }

    let mut config = JudgeRunnerConfig::new(api_key);
    if let Some(api_host) = non_blank(file.api_host) {
        config = config.with_api_host(api_host);
    }
    if let Some(base_url) = non_blank(file.base_url) {
        config = config.with_base_url(base_url);
    }
    match file.timeout_sec {
        Some(0) => return Err("timeout_sec must be > 0".to_string()),
        Some(seconds) => config = config.with_timeout(Duration::from_secs(seconds)),
        None => {}
    }

    Ok(config)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_string_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
