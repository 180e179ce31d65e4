//! gh CLI wrapper module
//!
//! Async execution of `gh api` requests with JSON decoding and HTTP status
//! extraction from gh's error output.

pub mod error;
pub mod executor;

pub use error::{GhError, GhResult};
pub use executor::{check_gh_available, execute_gh_api, execute_gh_api_raw, http_status};
