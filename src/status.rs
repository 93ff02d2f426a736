//! Process exit status mapping

use std::process::ExitCode;

/// Exit status of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every entry processed without error
    Success,
    /// Completed, at least one entry failed
    PartialFailure,
    /// Root key missing
    NotFound,
    /// Root open or enumeration failed
    Critical,
    /// Log file could not be opened
    LogInit,
}

impl ExitStatus {
    /// Normal completion: success unless some entry failed
    pub fn from_errors(errors: usize) -> Self {
        if errors == 0 {
            ExitStatus::Success
        } else {
            ExitStatus::PartialFailure
        }
    }

    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::PartialFailure => 1,
            ExitStatus::NotFound => 2,
            ExitStatus::Critical => 3,
            ExitStatus::LogInit => 4,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
