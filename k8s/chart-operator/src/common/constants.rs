/// This is the name of the Helm binary, as looked up in $PATH by the shell.
pub const HELM_COMMAND: &str = "helm";

/// This is the shell used to run commands, unless configured otherwise.
pub const DEFAULT_SHELL: &str = "sh";

/// This is the environment variable which overrides the test charts root directory.
pub const TEST_CHARTS_ROOT_DIR_ENV: &str = "TEST_CHARTS_ROOT_DIR";

/// This is the test charts root directory, relative to this crate's manifest directory.
pub(crate) const TEST_CHARTS_RELATIVE_DIR: &str = "testdata/charts";

/// The only value of the string-typed detach flag which means 'detached'.
pub const DETACH_TRUE: &str = "True";

/// Environment variable for the path(s) to kubeconfig files.
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Environment variable for the kubeconfig context Helm should use.
pub const HELM_KUBECONTEXT_ENV: &str = "HELM_KUBECONTEXT";

/// Environment variable for the namespace Helm should use.
pub const HELM_NAMESPACE_ENV: &str = "HELM_NAMESPACE";

/// Helm's global flag for the bearer token, whose value is masked in logs and errors.
pub const KUBE_TOKEN_FLAG: &str = "--kube-token";

/// Stands in for secrets in logs and errors.
pub const REDACTED: &str = "***";
