use std::path::PathBuf;

/// Configuration for an Automodel run
#[derive(Debug, Default, Clone)]
pub struct Config {
    /// Schema namespace to reflect and to resolve table names in
    pub namespace: Option<String>,

    /// Tables to generate models for. Empty means every entity table.
    pub tables: Vec<String>,

    /// Where to write the generated module. `None` writes to stdout.
    pub output: Option<PathBuf>,
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the schema namespace
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Add a table to generate a model for
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.tables.push(name.into());
        self
    }

    /// Add several tables to generate models for
    pub fn tables<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.tables.extend(names.into_iter().map(Into::into));
        self
    }

    /// Set the output file
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }
}
