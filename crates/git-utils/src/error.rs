use std::process::ExitStatus;

use bstr::BString;

/// Base error type for git-utils operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    #[error("subprocess failed: {command}: {source}")]
    Subprocess {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: BString,
    },

    #[error("{command} produced non-UTF-8 output")]
    NonUtf8Output { command: String },
}
