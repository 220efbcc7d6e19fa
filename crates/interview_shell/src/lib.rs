//! Line-oriented host for the mock-interview core.
//!
//! Each stdin line is either a slash command or source code appended to the
//! editor buffer. Type `/help` for the command list.
//!
//! ## Runner selection
//!
//! - `INTERVIEW_SHELL_RUNNER=mock` (default) runs code against a scripted
//!   offline runner that echoes stdin.
//! - `INTERVIEW_SHELL_RUNNER=judge` submits code to a Judge0-compatible
//!   service. Set `INTERVIEW_SHELL_JUDGE_CONFIG_PATH` to a UTF-8 JSON file:
//!
//! ```json
//! {
//!   "api_key": "<rapidapi key>",
//!   "api_host": "judge0-ce.p.rapidapi.com",
//!   "base_url": "https://judge0-ce.p.rapidapi.com",
//!   "timeout_sec": 30
//! }
//! ```
//!
//! Contract notes:
//! - `api_key` is required and must be non-empty.
//! - `timeout_sec` is optional and must be > 0 when provided.
//! - Unknown JSON fields are rejected.
//!
//! ## Session persistence
//!
//! Wizard progress is kept in memory unless `INTERVIEW_SHELL_STORE_PATH`
//! names a JSON file, in which case it survives a restart until `/signout`.

pub mod app;
pub mod commands;
pub mod runners;
