use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use bstr::{BString, ByteSlice};

use crate::error::UtilError;
use crate::Result;

/// Result of running a subprocess.
#[derive(Debug)]
pub struct GitCommandResult {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl GitCommandResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Builder for subprocess execution.
///
/// Wraps `std::process::Command` with a fluent API. Input given with
/// [`input`](GitCommand::input) is written to the child's stdin from a
/// separate thread so a child that fills its stdout pipe cannot deadlock us.
pub struct GitCommand {
    program: OsString,
    args: Vec<OsString>,
    env_vars: Vec<(OsString, OsString)>,
    input: Option<Vec<u8>>,
    working_dir: Option<PathBuf>,
}

impl GitCommand {
    /// Create a builder for `program`. Both output streams are captured.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            env_vars: Vec::new(),
            input: None,
            working_dir: None,
        }
    }

    /// Create a builder for the `git` executable.
    pub fn git() -> Self {
        Self::new("git")
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl AsRef<OsStr>>) -> Self {
        for arg in args {
            self.args.push(arg.as_ref().to_os_string());
        }
        self
    }

    pub fn env(mut self, key: impl AsRef<OsStr>, val: impl AsRef<OsStr>) -> Self {
        self.env_vars
            .push((key.as_ref().to_os_string(), val.as_ref().to_os_string()));
        self
    }

    /// Feed `data` to the child's stdin.
    pub fn input(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.input = Some(data.into());
        self
    }

    pub fn working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, val) in &self.env_vars {
            cmd.env(key, val);
        }
        cmd.stdin(if self.input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// The command line, for error messages and logs.
    pub fn command_string(&self) -> String {
        let mut s = self.program.to_string_lossy().to_string();
        for arg in &self.args {
            s.push(' ');
            s.push_str(&arg.to_string_lossy());
        }
        s
    }

    /// Run the command to completion, capturing its output.
    pub fn run(&self) -> Result<GitCommandResult> {
        let cmd_str = self.command_string();
        tracing::debug!(command = %cmd_str, "running subprocess");

        let io_err = |source| UtilError::Subprocess {
            command: cmd_str.clone(),
            source,
        };

        let mut child = self.build_command().spawn().map_err(io_err)?;

        let output = std::thread::scope(|scope| {
            let writer = match (child.stdin.take(), self.input.as_deref()) {
                (Some(mut stdin), Some(data)) => {
                    Some(scope.spawn(move || stdin.write_all(data)))
                }
                _ => None,
            };
            let output = child.wait_with_output();
            if let Some(writer) = writer {
                match writer.join() {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => return Err(e),
                    Err(_) => {
                        return Err(std::io::Error::other("stdin writer panicked"));
                    }
                }
            }
            output
        })
        .map_err(io_err)?;

        Ok(GitCommandResult {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    /// Run the command and return its stdout, failing on a non-zero exit.
    pub fn output(&self) -> Result<Vec<u8>> {
        let result = self.run()?;
        if !result.success() {
            return Err(UtilError::Failed {
                command: self.command_string(),
                status: result.status,
                stderr: BString::from(result.stderr.trim()),
            });
        }
        Ok(result.stdout)
    }

    /// Like [`output`](GitCommand::output), decoded as UTF-8 with surrounding whitespace trimmed.
    pub fn output_string(&self) -> Result<String> {
        let stdout = self.output()?;
        let text = String::from_utf8(stdout).map_err(|_| UtilError::NonUtf8Output {
            command: self.command_string(),
        })?;
        Ok(text.trim().to_owned())
    }
}
