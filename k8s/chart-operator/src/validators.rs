use crate::{
    common::{
        constants::HELM_COMMAND,
        error::{Error, HelmVersion, HelmVersionCommand, RegexCompile, Result},
    },
    runner::CommandRunner,
    space_joined,
};
use regex::Regex;
use snafu::ResultExt;
use tracing::debug;

/// Validate that the helm v3 binary is present in the shell's $PATH.
pub fn validate_helmv3_in_path<R>(runner: &R) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    let command = space_joined![HELM_COMMAND, "version", "--short"];
    debug!(%command, "Helm version command");

    // Execute `helm version` to verify if the binary exists.
    let output = runner
        .run_command(command.as_str(), false)
        .map_err(|error| match error {
            Error::CommandFailed { std_err, .. } => HelmVersionCommand {
                command: command.clone(),
                std_err,
            }
            .build(),
            other => other,
        })?;

    let version = output.stdout().trim();
    debug!(%version, "Helm version command standard output");

    // Parse based on regex, to validate if the version string (semver) is v3.x.
    let regex: &str = r"^(v3\.[0-9]+\.[0-9])";
    if !Regex::new(regex)
        .context(RegexCompile {
            expression: regex.to_string(),
        })?
        .is_match(version)
    {
        return HelmVersion {
            version: version.to_string(),
        }
        .fail();
    }

    Ok(())
}
