use crate::{
    auth::AuthWrap,
    common::{
        constants::{DETACH_TRUE, HELM_COMMAND},
        error::Result,
    },
    fixtures::ChartFixtures,
    runner::{CommandOutput, CommandRunner},
    space_joined,
};
use std::{convert::Infallible, str::FromStr};
use tracing::debug;

/// Parameters for `helm install` of a test chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartInstallRequest {
    pub release_name: String,
    pub test_chart: String,
    pub extra_args: String,
}

/// Parameters for `helm upgrade` of a test chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartUpgradeRequest {
    pub release_name: String,
    pub test_chart: String,
    pub detach: bool,
    pub extra_args: String,
}

/// The string-typed detach flag. Only the literal "True" means detached, everything else
/// (including "true") is attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetachFlag(bool);

impl DetachFlag {
    /// The flag as a bool.
    pub fn enabled(self) -> bool {
        self.0
    }
}

impl FromStr for DetachFlag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s == DETACH_TRUE))
    }
}

impl From<DetachFlag> for bool {
    fn from(flag: DetachFlag) -> Self {
        flag.enabled()
    }
}

/// Installs and upgrades test charts with the `helm` binary.
/// Commands are built by joining their parts with single spaces, without any shell escaping,
/// and are wrapped with cluster authentication before being handed to the runner.
#[derive(Debug, Clone)]
pub struct ChartOperator<R, A> {
    runner: R,
    auth: A,
    fixtures: ChartFixtures,
}

impl<R, A> ChartOperator<R, A>
where
    R: CommandRunner,
    A: AuthWrap,
{
    /// This creates a ChartOperator.
    pub fn new(runner: R, auth: A, fixtures: ChartFixtures) -> Self {
        Self {
            runner,
            auth,
            fixtures,
        }
    }

    /// The test charts root in use.
    pub fn fixtures(&self) -> &ChartFixtures {
        &self.fixtures
    }

    /// The wrapped `helm install <release_name> <chart_path> <extra_args>` command.
    pub fn install_command(
        &self,
        release_name: &str,
        test_chart: &str,
        extra_args: &str,
    ) -> String {
        self.chart_command("install", release_name, test_chart, extra_args)
    }

    /// The wrapped `helm upgrade <release_name> <chart_path> <extra_args>` command.
    pub fn upgrade_command(
        &self,
        release_name: &str,
        test_chart: &str,
        extra_args: &str,
    ) -> String {
        self.chart_command("upgrade", release_name, test_chart, extra_args)
    }

    /// The `helm <extra_args>` command. Only the binary is passed through the auth wrap, the
    /// arguments are appended afterwards.
    pub fn run_command_line(&self, extra_args: &str) -> String {
        space_joined![self.auth.auth_wrap(HELM_COMMAND), extra_args]
    }

    /// Runs `helm install` for a test chart and waits for it.
    pub fn install_test_chart(
        &self,
        release_name: &str,
        test_chart: &str,
        extra_args: &str,
    ) -> Result<CommandOutput> {
        let command = self.install_command(release_name, test_chart, extra_args);
        debug!(%release_name, %test_chart, "Installing test chart");
        self.runner.run_command(command.as_str(), false)
    }

    /// Runs `helm upgrade` for a test chart. With `detach` set, this doesn't wait for helm.
    pub fn upgrade_test_chart(
        &self,
        release_name: &str,
        test_chart: &str,
        detach: bool,
        extra_args: &str,
    ) -> Result<CommandOutput> {
        let command = self.upgrade_command(release_name, test_chart, extra_args);
        debug!(%release_name, %test_chart, detach, "Upgrading test chart");
        self.runner.run_command(command.as_str(), detach)
    }

    /// Runs `helm <extra_args>` and waits for it.
    pub fn run(&self, extra_args: &str) -> Result<CommandOutput> {
        let command = self.run_command_line(extra_args);
        self.runner.run_command(command.as_str(), false)
    }

    /// Same as install_test_chart(), from a request.
    pub fn install(&self, request: &ChartInstallRequest) -> Result<CommandOutput> {
        self.install_test_chart(
            request.release_name.as_str(),
            request.test_chart.as_str(),
            request.extra_args.as_str(),
        )
    }

    /// Same as upgrade_test_chart(), from a request.
    pub fn upgrade(&self, request: &ChartUpgradeRequest) -> Result<CommandOutput> {
        self.upgrade_test_chart(
            request.release_name.as_str(),
            request.test_chart.as_str(),
            request.detach,
            request.extra_args.as_str(),
        )
    }

    fn chart_command(
        &self,
        verb: &str,
        release_name: &str,
        test_chart: &str,
        extra_args: &str,
    ) -> String {
        let chart_path = self.fixtures.chart_path(test_chart);
        let command = space_joined![HELM_COMMAND, verb, release_name, chart_path, extra_args];
        self.auth.auth_wrap(command.as_str())
    }
}
