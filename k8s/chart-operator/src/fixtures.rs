use crate::common::constants::{TEST_CHARTS_RELATIVE_DIR, TEST_CHARTS_ROOT_DIR_ENV};
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::debug;

/// The root directory which holds the named test chart directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartFixtures {
    root: String,
}

impl Default for ChartFixtures {
    /// The test charts directory which ships with this crate.
    fn default() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join(TEST_CHARTS_RELATIVE_DIR))
    }
}

impl ChartFixtures {
    /// Use an explicit fixtures root.
    pub fn new<P>(root: P) -> Self
    where
        P: AsRef<Path>,
    {
        Self {
            root: root.as_ref().to_string_lossy().into_owned(),
        }
    }

    /// Use the directory in $TEST_CHARTS_ROOT_DIR if set, or the default one otherwise.
    pub fn from_env() -> Self {
        match env::var_os(TEST_CHARTS_ROOT_DIR_ENV) {
            Some(root) if !root.is_empty() => {
                debug!(root = ?root, "Using test charts root from environment");
                Self::new(PathBuf::from(root))
            }
            _ => Self::default(),
        }
    }

    /// The fixtures root directory.
    pub fn root(&self) -> &str {
        self.root.as_str()
    }

    /// Path to the named test chart. This is '<root>/<test_chart>', with no normalization and
    /// no check that the chart exists.
    pub fn chart_path(&self, test_chart: &str) -> String {
        format!("{}/{}", self.root, test_chart)
    }
}

#[cfg(test)]
mod tests {
    use super::ChartFixtures;
    use std::{env, path::Path};

    #[test]
    fn chart_path_is_plain_concatenation() {
        let fixtures = ChartFixtures::new("/opt/charts");
        assert_eq!(fixtures.chart_path("nginx"), "/opt/charts/nginx");
        assert_eq!(fixtures.chart_path("../nginx"), "/opt/charts/../nginx");
        assert_eq!(fixtures.chart_path(""), "/opt/charts/");
    }

    #[test]
    fn trailing_separator_is_not_collapsed() {
        let fixtures = ChartFixtures::new("/opt/charts/");
        assert_eq!(fixtures.chart_path("nginx"), "/opt/charts//nginx");
    }

    #[test]
    fn default_root_is_the_shipped_testdata() {
        let fixtures = ChartFixtures::default();
        assert!(fixtures.root().ends_with("testdata/charts"));
        assert!(Path::new(fixtures.chart_path("nginx").as_str())
            .join("Chart.yaml")
            .is_file());
    }

    #[test]
    fn from_env_prefers_the_override() {
        let saved = env::var_os("TEST_CHARTS_ROOT_DIR");

        env::set_var("TEST_CHARTS_ROOT_DIR", "/ci/charts");
        let overridden = ChartFixtures::from_env();
        env::set_var("TEST_CHARTS_ROOT_DIR", "");
        let empty = ChartFixtures::from_env();
        env::remove_var("TEST_CHARTS_ROOT_DIR");
        let unset = ChartFixtures::from_env();

        if let Some(value) = saved {
            env::set_var("TEST_CHARTS_ROOT_DIR", value);
        }

        assert_eq!(overridden.chart_path("nginx"), "/ci/charts/nginx");
        assert_eq!(empty, ChartFixtures::default());
        assert_eq!(unset, ChartFixtures::default());
    }
}
