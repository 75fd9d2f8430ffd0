use crate::common::{
    constants::{
        HELM_KUBECONTEXT_ENV, HELM_NAMESPACE_ENV, KUBECONFIG_ENV, KUBE_TOKEN_FLAG, REDACTED,
    },
    error::{ReadingFile, Result, YamlParseFromFile},
};
use serde::Deserialize;
use snafu::ResultExt;
use std::{env, fmt, fs, path::Path};
use tracing::debug;

/// Adds cluster authentication arguments to a command line.
pub trait AuthWrap {
    /// Returns the command with the authentication arguments applied.
    fn auth_wrap(&self, command: &str) -> String;
}

impl<F> AuthWrap for F
where
    F: Fn(&str) -> String,
{
    fn auth_wrap(&self, command: &str) -> String {
        self(command)
    }
}

/// Leaves commands untouched, for clusters reachable with the ambient kubeconfig.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAuth;

impl AuthWrap for NoAuth {
    fn auth_wrap(&self, command: &str) -> String {
        command.to_string()
    }
}

/// Masks the value of any `--kube-token` flag in a command line, for logs and errors.
/// Words are split and re-joined on single spaces, so everything else is left as it was.
pub fn redact(command: &str) -> String {
    let inline_prefix = format!("{KUBE_TOKEN_FLAG}=");
    let mut after_flag = false;

    command
        .split(' ')
        .map(|word| {
            let redacted = if after_flag && !word.is_empty() {
                REDACTED.to_string()
            } else if word.starts_with(inline_prefix.as_str()) {
                format!("{inline_prefix}{REDACTED}")
            } else {
                word.to_string()
            };
            if !word.is_empty() {
                after_flag = word == KUBE_TOKEN_FLAG;
            }
            redacted
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Cluster access settings, passed to the command as Helm's global flags.
#[derive(Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterAuth {
    kubeconfig: Option<String>,
    kube_context: Option<String>,
    kube_token: Option<String>,
    kube_apiserver: Option<String>,
    kube_ca_file: Option<String>,
    namespace: Option<String>,
}

impl fmt::Debug for ClusterAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterAuth")
            .field("kubeconfig", &self.kubeconfig)
            .field("kube_context", &self.kube_context)
            .field("kube_token", &self.kube_token.as_ref().map(|_| REDACTED))
            .field("kube_apiserver", &self.kube_apiserver)
            .field("kube_ca_file", &self.kube_ca_file)
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl ClusterAuth {
    /// This creates a ClusterAuth without any flags set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the settings from a YAML file, e.g.:
    ///
    /// ```yaml
    /// kubeconfig: /home/ci/.kube/config
    /// kubeContext: kind-e2e
    /// ```
    pub fn from_yaml_file<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let filepath = path.as_ref().to_path_buf();
        let buf = fs::read(filepath.as_path()).context(ReadingFile {
            filepath: filepath.clone(),
        })?;

        serde_yaml::from_slice(buf.as_slice()).context(YamlParseFromFile { filepath })
    }

    /// Picks up $KUBECONFIG, $HELM_KUBECONTEXT and $HELM_NAMESPACE. Only the first entry of a
    /// multi-path $KUBECONFIG is used.
    pub fn from_env() -> Self {
        let non_empty = |key: &str| env::var(key).ok().filter(|value| !value.is_empty());

        let kubeconfig = env::var_os(KUBECONFIG_ENV).and_then(|paths| {
            env::split_paths(&paths)
                .find(|path| !path.as_os_str().is_empty())
                .map(|path| path.to_string_lossy().into_owned())
        });

        Self {
            kubeconfig,
            kube_context: non_empty(HELM_KUBECONTEXT_ENV),
            namespace: non_empty(HELM_NAMESPACE_ENV),
            ..Default::default()
        }
    }

    /// Set the kubeconfig filepath.
    #[must_use]
    pub fn with_kubeconfig<J>(mut self, kubeconfig: J) -> Self
    where
        J: ToString,
    {
        self.kubeconfig = Some(kubeconfig.to_string());
        self
    }

    /// Set the kubeconfig context.
    #[must_use]
    pub fn with_kube_context<J>(mut self, context: J) -> Self
    where
        J: ToString,
    {
        self.kube_context = Some(context.to_string());
        self
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_kube_token<J>(mut self, token: J) -> Self
    where
        J: ToString,
    {
        self.kube_token = Some(token.to_string());
        self
    }

    /// Set the API server address.
    #[must_use]
    pub fn with_kube_apiserver<J>(mut self, apiserver: J) -> Self
    where
        J: ToString,
    {
        self.kube_apiserver = Some(apiserver.to_string());
        self
    }

    /// Set the certificate authority file for the API server.
    #[must_use]
    pub fn with_kube_ca_file<J>(mut self, ca_file: J) -> Self
    where
        J: ToString,
    {
        self.kube_ca_file = Some(ca_file.to_string());
        self
    }

    /// Set the Kubernetes Namespace.
    #[must_use]
    pub fn with_namespace<J>(mut self, namespace: J) -> Self
    where
        J: ToString,
    {
        self.namespace = Some(namespace.to_string());
        self
    }

    /// Fields which are set in `other` replace the ones in `self`.
    #[must_use]
    pub fn merge(self, other: ClusterAuth) -> Self {
        Self {
            kubeconfig: other.kubeconfig.or(self.kubeconfig),
            kube_context: other.kube_context.or(self.kube_context),
            kube_token: other.kube_token.or(self.kube_token),
            kube_apiserver: other.kube_apiserver.or(self.kube_apiserver),
            kube_ca_file: other.kube_ca_file.or(self.kube_ca_file),
            namespace: other.namespace.or(self.namespace),
        }
    }

    /// The Helm global flags for the settings which are set, in a fixed order.
    pub fn flags(&self) -> Vec<String> {
        [
            ("--kubeconfig", &self.kubeconfig),
            ("--kube-context", &self.kube_context),
            (KUBE_TOKEN_FLAG, &self.kube_token),
            ("--kube-apiserver", &self.kube_apiserver),
            ("--kube-ca-file", &self.kube_ca_file),
            ("--namespace", &self.namespace),
        ]
        .into_iter()
        .filter_map(|(flag, value)| value.as_ref().map(|value| format!("{flag} {value}")))
        .collect()
    }
}

impl AuthWrap for ClusterAuth {
    /// Inserts the flags right after the binary, i.e. the first word of the command.
    fn auth_wrap(&self, command: &str) -> String {
        let flags = self.flags();
        if flags.is_empty() {
            return command.to_string();
        }
        debug!(flag_count = flags.len(), "Adding cluster auth flags");

        let flags = flags.join(" ");
        match command.split_once(' ') {
            Some((binary, rest)) => format!("{binary} {flags} {rest}"),
            None => format!("{command} {flags}"),
        }
    }
}
