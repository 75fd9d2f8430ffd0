use chart_operator::{
    common::constants::DEFAULT_SHELL,
    DetachFlag,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// These are the supported cli configuration options for the chart operator.
#[derive(Parser)]
#[command(version, about = "Installs and upgrades Helm test charts", long_about = None)]
pub(crate) struct CliArgs {
    /// The directory which holds the test charts. Defaults to $TEST_CHARTS_ROOT_DIR, or the
    /// testdata shipped with this crate.
    #[arg(long, value_name = "DIR_PATH")]
    charts_dir: Option<PathBuf>,

    /// YAML file with the cluster access settings.
    #[arg(long, value_name = "FILE_PATH")]
    auth_config: Option<PathBuf>,

    /// The kubeconfig file, this overrides $KUBECONFIG and the auth config.
    #[arg(long)]
    kubeconfig: Option<String>,

    /// The kubeconfig context, this overrides $HELM_KUBECONTEXT and the auth config.
    #[arg(long)]
    kube_context: Option<String>,

    /// The Kubernetes Namespace, this overrides $HELM_NAMESPACE and the auth config.
    #[arg(short, long)]
    namespace: Option<String>,

    /// The shell the helm commands are run with.
    #[arg(long, default_value = DEFAULT_SHELL)]
    shell: String,

    /// If set then this skips the check for helm v3 in $PATH.
    #[arg(long, default_value_t = false)]
    skip_helm_check: bool,

    #[command(subcommand)]
    operation: Operation,
}

#[derive(Subcommand)]
pub(crate) enum Operation {
    /// Runs `helm install <release-name> <charts-dir>/<test-chart> <extra-args>`.
    /// Everything after the chart name is passed on to helm as it is.
    Install {
        release_name: String,
        test_chart: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        extra_args: Vec<String>,
    },
    /// Runs `helm upgrade <release-name> <charts-dir>/<test-chart> <extra-args>`.
    /// --detach is only recognised before the first extra arg, from there on everything is
    /// passed on to helm as it is.
    Upgrade {
        release_name: String,
        test_chart: String,
        /// Only 'True' leaves helm running in the background.
        #[arg(long, default_value = "False")]
        detach: DetachFlag,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        extra_args: Vec<String>,
    },
    /// Runs `helm <extra-args>`. All args go to helm, including --help.
    #[command(disable_help_flag = true)]
    Run {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        extra_args: Vec<String>,
    },
}

impl CliArgs {
    /// This returns the test charts directory, if set.
    pub(crate) fn charts_dir(&self) -> Option<PathBuf> {
        self.charts_dir.clone()
    }

    /// This returns the auth config filepath, if set.
    pub(crate) fn auth_config(&self) -> Option<PathBuf> {
        self.auth_config.clone()
    }

    /// This returns the kubeconfig filepath.
    pub(crate) fn kubeconfig(&self) -> Option<String> {
        self.kubeconfig.clone()
    }

    /// This returns the kubeconfig context.
    pub(crate) fn kube_context(&self) -> Option<String> {
        self.kube_context.clone()
    }

    /// This returns the Kubernetes Namespace.
    pub(crate) fn namespace(&self) -> Option<String> {
        self.namespace.clone()
    }

    /// This returns the shell binary.
    pub(crate) fn shell(&self) -> String {
        self.shell.clone()
    }

    /// This decides to skip the helm v3 check or not.
    pub(crate) fn skip_helm_check(&self) -> bool {
        self.skip_helm_check
    }

    /// This returns the requested chart operation.
    pub(crate) fn operation(&self) -> &Operation {
        &self.operation
    }
}

#[cfg(test)]
mod tests {
    use super::{CliArgs, Operation};
    use clap::Parser;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("chart-operator").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn upgrade_parses_the_detach_flag() {
        let opts = parse(&["upgrade", "r1", "nginx", "--detach", "True", "--wait"]);
        match opts.operation() {
            Operation::Upgrade {
                release_name,
                test_chart,
                detach,
                extra_args,
            } => {
                assert_eq!(release_name, "r1");
                assert_eq!(test_chart, "nginx");
                assert!(detach.enabled());
                assert_eq!(extra_args, &vec!["--wait".to_string()]);
            }
            _ => panic!("expected the upgrade subcommand"),
        }

        let opts = parse(&["upgrade", "r1", "nginx", "--detach", "true"]);
        assert!(matches!(opts.operation(), Operation::Upgrade { detach, .. } if !detach.enabled()));

        let opts = parse(&["upgrade", "r1", "nginx"]);
        assert!(matches!(opts.operation(), Operation::Upgrade { detach, .. } if !detach.enabled()));
    }

    #[test]
    fn detach_after_the_extra_args_goes_to_helm() {
        let opts = parse(&["upgrade", "r1", "nginx", "--wait", "--detach", "True"]);
        match opts.operation() {
            Operation::Upgrade {
                detach, extra_args, ..
            } => {
                assert!(!detach.enabled());
                assert_eq!(extra_args, &vec!["--wait", "--detach", "True"]);
            }
            _ => panic!("expected the upgrade subcommand"),
        }
    }

    #[test]
    fn install_keeps_hyphenated_extra_args() {
        let opts = parse(&["install", "r1", "nginx", "--wait", "--timeout", "5m"]);
        assert!(matches!(
            opts.operation(),
            Operation::Install { extra_args, .. } if extra_args == &vec!["--wait", "--timeout", "5m"]
        ));
    }

    #[test]
    fn run_forwards_help_to_helm() {
        let opts = parse(&["run", "--help"]);
        assert!(matches!(
            opts.operation(),
            Operation::Run { extra_args } if extra_args == &vec!["--help"]
        ));
    }

    #[test]
    fn global_flags_come_before_the_subcommand() {
        let opts = parse(&[
            "--charts-dir",
            "/ci/charts",
            "-n",
            "e2e",
            "--skip-helm-check",
            "run",
            "list",
        ]);
        assert_eq!(opts.charts_dir(), Some("/ci/charts".into()));
        assert_eq!(opts.namespace(), Some("e2e".to_string()));
        assert!(opts.skip_helm_check());
        assert_eq!(opts.shell(), "sh");
    }
}

