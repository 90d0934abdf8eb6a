//! UI module for consistent CLI output
//!
//! Styled output and spinners in interactive terminals, with automatic
//! fallback to plain `[OK]`/`[WARN]`/`[FAIL]` lines in CI and
//! non-interactive environments.

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{
    intro, outro_success, remark, step_error_detail, step_info, step_ok, step_ok_detail,
    step_warn_hint,
};
pub use progress::{BuildProgress, TaskSpinner};
