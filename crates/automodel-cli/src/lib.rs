mod config;
mod logging;
mod snapshot;
mod utility;

pub use config::*;
pub use snapshot::SnapshotFile;

use anyhow::Result;
use automodel_codegen::Renderer;
use automodel_core::{Catalog, ModelSet, Reflect};
use automodel_driver_sqlite::Sqlite;
use clap::{Args, Parser};
use std::{io::Write, path::PathBuf};

/// Automodel CLI library for building custom command-line tools
#[derive(Debug, Default)]
pub struct AutomodelCli {
    config: Config,
}

impl AutomodelCli {
    /// Create a new AutomodelCli instance with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new AutomodelCli instance with a custom configuration.
    /// Command-line flags are applied on top of it.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and execute CLI commands from command-line arguments
    pub fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli)
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        self.run(cli)
    }

    fn run(&self, cli: Cli) -> Result<()> {
        logging::init_tracing(&cli.log_level);

        let config = cli.apply(self.config.clone());

        let driver: Box<dyn Reflect> = match (&cli.source.url, &cli.source.snapshot) {
            (Some(url), _) => {
                tracing::info!(url = %utility::redact_url_password(url), "reflecting database");
                Box::new(Sqlite::new(url.as_str())?)
            }
            (None, Some(path)) => {
                tracing::info!(path = %path.display(), "loading schema snapshot");
                Box::new(SnapshotFile::load(path)?.schema)
            }
            (None, None) => anyhow::bail!("either `--url` or `--snapshot` is required"),
        };

        let catalog = Catalog::reflect(driver.as_ref(), config.namespace.as_deref())?;

        if let Some(path) = &cli.write_snapshot {
            SnapshotFile::new(catalog.schema().clone()).save(path)?;
            tracing::info!(path = %path.display(), "wrote schema snapshot");
        }

        let source = generate(&catalog, &config)?;

        match &config.output {
            Some(path) => {
                std::fs::write(path, source)?;
                tracing::info!(path = %path.display(), "wrote models");
            }
            None => std::io::stdout().lock().write_all(source.as_bytes())?,
        }

        Ok(())
    }
}

/// Builds the models selected by `config` and renders them as one module.
pub fn generate(catalog: &Catalog, config: &Config) -> Result<String> {
    let models = if config.tables.is_empty() {
        ModelSet::build(catalog)?
    } else {
        ModelSet::only(catalog, &config.tables)?
    };

    let warnings = models.warnings().count();
    if warnings > 0 {
        tracing::warn!(warnings, "some relations are ambiguous; review the generated models");
    }

    Ok(Renderer::sqlalchemy(catalog).render_file(&models))
}

#[derive(Parser, Debug)]
#[command(name = "automodel")]
#[command(about = "Generate SQLAlchemy declarative models from a database schema")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    source: Source,

    /// Only reflect tables in this schema namespace
    #[arg(long = "schema", value_name = "NAMESPACE")]
    namespace: Option<String>,

    /// Generate models for these tables only (repeatable)
    #[arg(long = "table", value_name = "NAME")]
    tables: Vec<String>,

    /// Write the generated module here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Save the reflected schema as a snapshot file
    #[arg(long, value_name = "FILE")]
    write_snapshot: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Source {
    /// Database connection URL, e.g. `sqlite:///path/to/db.sqlite`
    #[arg(long)]
    url: Option<String>,

    /// Schema snapshot file written by `--write-snapshot`
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(namespace) = &self.namespace {
            config = config.namespace(namespace);
        }

        config = config.tables(self.tables.iter().cloned());

        if let Some(output) = &self.output {
            config = config.output(output);
        }

        config
    }
}
