//! Async executor for `gh api` requests
//!
//! # Example
//!
//! ```rust,ignore
//! use repo_insight_mcp::gh::execute_gh_api;
//! use repo_signals::RawRepo;
//!
//! let repo: RawRepo = execute_gh_api(&["repos/rust-lang/rust"]).await?;
//! ```

use serde::de::DeserializeOwned;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, instrument};

use super::error::{GhError, GhResult};

/// Run `gh api <args>` and parse the JSON response
///
/// # Errors
///
/// Returns an error if:
/// - The gh process fails to spawn
/// - The request fails (`GhError::Http` when gh reports a status)
/// - The JSON output cannot be parsed
#[instrument(fields(cmd = %args.join(" ")))]
pub async fn execute_gh_api<T: DeserializeOwned>(args: &[&str]) -> GhResult<T> {
    let stdout = run_gh_api(args).await?;
    let parsed: T = serde_json::from_slice(&stdout)?;
    Ok(parsed)
}

/// Run `gh api <args>` and return the raw response body
///
/// Used where an empty body is meaningful (202 from the statistics
/// endpoints) or the body is ignored (existence checks).
#[instrument(fields(cmd = %args.join(" ")))]
pub async fn execute_gh_api_raw(args: &[&str]) -> GhResult<String> {
    let stdout = run_gh_api(args).await?;
    Ok(String::from_utf8_lossy(&stdout).to_string())
}

async fn run_gh_api(args: &[&str]) -> GhResult<Vec<u8>> {
    let mut full_args: Vec<&str> = Vec::with_capacity(args.len() + 1);
    full_args.push("api");
    full_args.extend_from_slice(args);

    debug!("executing: gh {}", full_args.join(" "));

    let output = Command::new("gh")
        .args(&full_args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GhError::NotFound
            } else {
                GhError::SpawnError(e)
            }
        })?
        .wait_with_output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let code = output.status.code().unwrap_or(-1);

        if stderr.contains("gh auth login") || stderr.contains("not logged in") {
            error!("gh authentication required");
            return Err(GhError::NotAuthenticated);
        }

        if let Some(status) = http_status(&stderr) {
            // 404s are routine for existence probes
            debug!(status, stderr = %stderr, "gh api request failed");
            return Err(GhError::Http {
                status,
                message: stderr,
            });
        }

        error!(code, stderr = %stderr, "gh command failed");
        return Err(GhError::CommandFailed { code, stderr });
    }

    Ok(output.stdout)
}

/// Extract the HTTP status from gh's error output (`... (HTTP 404)`)
pub fn http_status(stderr: &str) -> Option<u16> {
    stderr.match_indices("HTTP ").find_map(|(index, marker)| {
        let digits: String = stderr[index + marker.len()..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        if digits.len() == 3 {
            digits.parse().ok()
        } else {
            None
        }
    })
}

/// Check if gh CLI is available and authenticated
#[instrument]
pub async fn check_gh_available() -> GhResult<()> {
    debug!("checking gh availability");

    let output = Command::new("gh")
        .args(["auth", "status"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GhError::NotFound
            } else {
                GhError::SpawnError(e)
            }
        })?
        .wait_with_output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if stderr.contains("not logged in") {
            return Err(GhError::NotAuthenticated);
        }
    }

    debug!("gh is available and authenticated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_from_stderr() {
        assert_eq!(http_status("gh: Not Found (HTTP 404)"), Some(404));
        assert_eq!(
            http_status("gh: API rate limit exceeded (HTTP 403)\nsee docs"),
            Some(403)
        );
        assert_eq!(http_status("HTTP 50 weird"), None);
        assert_eq!(http_status("could not resolve host"), None);
    }

    #[test]
    fn test_http_status_skips_non_numeric_marker() {
        assert_eq!(http_status("HTTP request failed (HTTP 502)"), Some(502));
    }

    #[tokio::test]
    async fn test_check_gh_available() {
        // Only checks that the probe does not panic without gh configured
        let result = check_gh_available().await;
        println!("gh available: {:?}", result.is_ok());
    }
}
