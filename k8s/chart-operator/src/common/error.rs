use snafu::Snafu;
use std::path::PathBuf;

/// For use with multiple fallible operations which may fail for different reasons, but are
/// defined within the same scope and must return to the outer scope (calling scope) using
/// the try operator -- '?'.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))]
pub enum Error {
    /// Error for when the shell process for a command could not be started.
    #[snafu(display(
        "Failed to start shell '{}' for command '{}': {}",
        shell,
        command,
        source
    ))]
    ShellSpawn {
        source: std::io::Error,
        shell: String,
        command: String,
    },

    /// Error for when a command exits with a non-zero status.
    #[snafu(display(
        "Command failed,\ncommand: {},\nexit_code: {:?},\nstd_err: {}",
        command,
        code,
        std_err
    ))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        std_err: String,
    },

    /// Error for when Vec<u8> to str conversion fails.
    #[snafu(display("Failed to convert Vec<u8> to UTF-8 formatted string: {}", source))]
    U8VectorToString { source: std::str::Utf8Error },

    /// Error for when a file could not be read.
    #[snafu(display("Failed to read file {}: {}", filepath.display(), source))]
    ReadingFile {
        source: std::io::Error,
        filepath: PathBuf,
    },

    /// Error for when yaml could not be parsed from a file.
    #[snafu(display("Failed to parse YAML at {}: {}", filepath.display(), source))]
    YamlParseFromFile {
        source: serde_yaml::Error,
        filepath: PathBuf,
    },

    /// Error for when the `helm version` command could not run successfully.
    #[snafu(display(
        "Helm version command failed,\ncommand: {},\nstd_err: {}",
        command,
        std_err
    ))]
    HelmVersionCommand { command: String, std_err: String },

    /// Error for when Helm v3.x.y is not present in $PATH.
    #[snafu(display("Helm version {} does not start with 'v3.x.y'", version))]
    HelmVersion { version: String },

    /// Error for when regular expression parsing or compilation fails.
    #[snafu(display("Failed to compile regex {}: {}", expression, source))]
    RegexCompile {
        source: regex::Error,
        expression: String,
    },
}

/// A wrapper type to remove repeated Result<T, Error> returns.
pub type Result<T, E = Error> = std::result::Result<T, E>;
