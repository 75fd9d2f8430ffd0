/// Module for authentication wrapping of cluster commands.
pub mod auth;
/// Module for constants, errors and macros.
pub mod common;
/// Module for test chart fixtures.
pub mod fixtures;
/// Module for the Helm test-chart operator.
pub mod helm;
/// Module for command execution.
pub mod runner;
/// Validations run before operating on charts.
pub mod validators;

pub use auth::{AuthWrap, ClusterAuth, NoAuth};
pub use common::error::{Error, Result};
pub use fixtures::ChartFixtures;
pub use helm::{ChartInstallRequest, ChartOperator, ChartUpgradeRequest, DetachFlag};
pub use runner::{CommandOutput, CommandRunner, ShellRunner};
