use crate::{
    auth::redact,
    common::{
        constants::DEFAULT_SHELL,
        error::{CommandFailed, Result, ShellSpawn, U8VectorToString},
    },
};
use snafu::{ensure, ResultExt};
use std::{
    process::{Command, ExitStatus, Stdio},
    str,
};
use tracing::{debug, info};

/// What a command run surfaces to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// The command ran to completion.
    Completed {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
    /// The command was launched and left running. The child is never waited on, so once it
    /// exits it stays a zombie until this process exits.
    Detached { pid: u32 },
}

impl CommandOutput {
    /// Standard output of a completed command. Empty for detached ones.
    pub fn stdout(&self) -> &str {
        match self {
            Self::Completed { stdout, .. } => stdout.as_str(),
            Self::Detached { .. } => "",
        }
    }

    /// Predicate for detached launches.
    pub fn is_detached(&self) -> bool {
        matches!(self, Self::Detached { .. })
    }
}

/// Executes command lines.
pub trait CommandRunner {
    /// Run the command. With `detach` set this returns as soon as the process is started.
    fn run_command(&self, command: &str, detach: bool) -> Result<CommandOutput>;
}

impl<T> CommandRunner for &T
where
    T: CommandRunner + ?Sized,
{
    fn run_command(&self, command: &str, detach: bool) -> Result<CommandOutput> {
        (**self).run_command(command, detach)
    }
}

/// Runs command lines with `<shell> -c <command>`.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
        }
    }
}

impl ShellRunner {
    /// This creates a runner which uses `sh`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different shell binary, e.g. `bash`.
    #[must_use]
    pub fn with_shell<J>(mut self, shell: J) -> Self
    where
        J: ToString,
    {
        self.shell = shell.to_string();
        self
    }

    fn command(&self, command: &str) -> Command {
        let mut cmd = Command::new(self.shell.as_str());
        cmd.arg("-c").arg(command);
        cmd
    }

    fn spawn_detached(&self, command: &str) -> Result<CommandOutput> {
        let child = self
            .command(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context(ShellSpawn {
                shell: self.shell.clone(),
                command: redact(command),
            })?;

        let pid = child.id();
        info!(pid, command = %redact(command), "Launched detached command");
        Ok(CommandOutput::Detached { pid })
    }

    fn run_attached(&self, command: &str) -> Result<CommandOutput> {
        let output = self.command(command).output().context(ShellSpawn {
            shell: self.shell.clone(),
            command: redact(command),
        })?;

        let stdout = str::from_utf8(output.stdout.as_slice())
            .context(U8VectorToString)?
            .to_string();
        let stderr = str::from_utf8(output.stderr.as_slice())
            .context(U8VectorToString)?
            .to_string();
        debug!(%stdout, %stderr, status = %output.status, "Command output");

        ensure!(
            output.status.success(),
            CommandFailed {
                command: redact(command),
                code: output.status.code(),
                std_err: stderr,
            }
        );

        Ok(CommandOutput::Completed {
            status: output.status,
            stdout,
            stderr,
        })
    }
}

impl CommandRunner for ShellRunner {
    fn run_command(&self, command: &str, detach: bool) -> Result<CommandOutput> {
        debug!(shell = %self.shell, command = %redact(command), detach, "Running command");

        if detach {
            self.spawn_detached(command)
        } else {
            self.run_attached(command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandOutput, CommandRunner, ShellRunner};
    use crate::Error;

    #[test]
    fn captures_stdout() {
        let output = ShellRunner::new()
            .run_command("echo chart operator", false)
            .unwrap();

        assert!(!output.is_detached());
        assert_eq!(output.stdout(), "chart operator\n");
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let error = ShellRunner::new()
            .run_command("echo oops 1>&2; exit 3", false)
            .unwrap_err();

        match error {
            Error::CommandFailed { code, std_err, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(std_err, "oops\n");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_shell_is_a_spawn_error() {
        let error = ShellRunner::new()
            .with_shell("/nonexistent/shell")
            .run_command("true", false)
            .unwrap_err();

        assert!(matches!(error, Error::ShellSpawn { .. }));
    }

    #[test]
    fn detached_does_not_wait() {
        let start = std::time::Instant::now();
        let output = ShellRunner::new().run_command("sleep 5", true).unwrap();

        assert!(matches!(output, CommandOutput::Detached { pid } if pid > 0));
        assert_eq!(output.stdout(), "");
        assert!(start.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn failed_command_error_masks_the_token() {
        let error = ShellRunner::new()
            .run_command("echo --kube-token s3cr3t-token >/dev/null; exit 1", false)
            .unwrap_err();
        let message = error.to_string();

        assert!(!message.contains("s3cr3t-token"), "{message}");
        assert!(message.contains("--kube-token ***"), "{message}");
    }
}
