use chart_operator::{
    validators::validate_helmv3_in_path, ChartFixtures, ChartOperator, ClusterAuth,
    CommandOutput, Result, ShellRunner,
};
use clap::Parser;
use opts::{CliArgs, Operation};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod opts;

fn main() {
    init_logging();

    if let Err(error) = run(CliArgs::parse()) {
        error!(%error, "Failed to operate on test chart");
        std::process::exit(1);
    }
}

/// Initialize logging components -- tracing. RUST_LOG takes precedence over the 'info' default.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
}

fn run(opts: CliArgs) -> Result<()> {
    let runner = ShellRunner::new().with_shell(opts.shell());
    if !opts.skip_helm_check() {
        validate_helmv3_in_path(&runner)?;
    }

    let fixtures = opts
        .charts_dir()
        .map(ChartFixtures::new)
        .unwrap_or_else(ChartFixtures::from_env);
    let auth = cluster_auth(&opts)?;
    let operator = ChartOperator::new(runner, auth, fixtures);

    let output = match opts.operation() {
        Operation::Install {
            release_name,
            test_chart,
            extra_args,
        } => operator.install_test_chart(release_name, test_chart, extra_args.join(" ").as_str()),
        Operation::Upgrade {
            release_name,
            test_chart,
            detach,
            extra_args,
        } => operator.upgrade_test_chart(
            release_name,
            test_chart,
            detach.enabled(),
            extra_args.join(" ").as_str(),
        ),
        Operation::Run { extra_args } => operator.run(extra_args.join(" ").as_str()),
    }?;

    match output {
        CommandOutput::Detached { pid } => info!(pid, "Helm is running detached"),
        CommandOutput::Completed { stdout, .. } => print!("{stdout}"),
    }
    Ok(())
}

/// Layers the cluster access settings: environment, then the auth config file, then the flags.
fn cluster_auth(opts: &CliArgs) -> Result<ClusterAuth> {
    let mut base = ClusterAuth::from_env();
    if let Some(path) = opts.auth_config() {
        base = base.merge(ClusterAuth::from_yaml_file(path)?);
    }

    let mut overrides = ClusterAuth::new();
    if let Some(kubeconfig) = opts.kubeconfig() {
        overrides = overrides.with_kubeconfig(kubeconfig);
    }
    if let Some(context) = opts.kube_context() {
        overrides = overrides.with_kube_context(context);
    }
    if let Some(namespace) = opts.namespace() {
        overrides = overrides.with_namespace(namespace);
    }

    Ok(base.merge(overrides))
}

#[cfg(test)]
mod tests {
    use super::cluster_auth;
    use crate::opts::CliArgs;
    use chart_operator::ClusterAuth;
    use clap::Parser;
    use std::{env, io::Write};
    use tempfile::NamedTempFile;

    #[test]
    fn flags_override_auth_config_which_overrides_env() {
        let mut auth_config = NamedTempFile::new().unwrap();
        writeln!(
            auth_config,
            "kubeContext: file-ctx\nkubeApiserver: https://10.0.0.1:6443\nnamespace: file-ns"
        )
        .unwrap();
        let opts = CliArgs::try_parse_from([
            "chart-operator",
            "--auth-config",
            auth_config.path().to_str().unwrap(),
            "--namespace",
            "flag-ns",
            "run",
            "list",
        ])
        .unwrap();

        let keys = ["KUBECONFIG", "HELM_KUBECONTEXT", "HELM_NAMESPACE"];
        let saved: Vec<_> = keys.iter().map(|key| env::var_os(key)).collect();
        env::set_var(
            "KUBECONFIG",
            env::join_paths(["/env/first", "/env/second"]).unwrap(),
        );
        env::set_var("HELM_KUBECONTEXT", "env-ctx");
        env::set_var("HELM_NAMESPACE", "env-ns");

        let auth = cluster_auth(&opts);

        for (key, value) in keys.iter().zip(saved) {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }

        assert_eq!(
            auth.unwrap(),
            ClusterAuth::new()
                .with_kubeconfig("/env/first")
                .with_kube_context("file-ctx")
                .with_kube_apiserver("https://10.0.0.1:6443")
                .with_namespace("flag-ns")
        );
    }

    #[test]
    fn unreadable_auth_config_is_an_error() {
        let opts = CliArgs::try_parse_from([
            "chart-operator",
            "--auth-config",
            "/definitely/not/here.yaml",
            "run",
            "list",
        ])
        .unwrap();

        assert!(cluster_auth(&opts).is_err());
    }
}
