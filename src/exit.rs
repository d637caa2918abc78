// src/exit.rs
//! Standardized process exit codes for `vulntally`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum TallyExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (e.g. IO, write failure).
    Error = 1,
    /// Required input missing (no driving summary table).
    MissingInput = 2,
}

impl TallyExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for TallyExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
