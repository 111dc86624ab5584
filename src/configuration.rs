use crate::cli::Cli;
use crate::metrics::MissingFieldPolicy;
use serde_valid::Validate;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_URL: &str = "http://localhost:9200";
pub const DEFAULT_REGION: &str = "us-west-1";
pub const DEFAULT_NAMESPACE: &str = "Custom/ElasticsearchCluster";
pub const DEFAULT_TIMEOUT_SECS: i64 = 10;
pub const ENV_PREFIX: &str = "ES_CLOUDWATCH";

#[derive(Debug, Clone, serde::Deserialize, Validate)]
pub struct Settings {
    #[validate]
    pub elasticsearch: ElasticsearchSettings,
    #[validate]
    pub cloudwatch: CloudWatchSettings,
    pub instance: Option<String>,
    #[serde(default)]
    pub on_missing: MissingFieldPolicy,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, serde::Deserialize, Validate)]
pub struct ElasticsearchSettings {
    pub url: String,
    #[validate(minimum = 1)]
    #[validate(maximum = 300)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, serde::Deserialize, Validate)]
pub struct CloudWatchSettings {
    #[validate(min_length = 1)]
    pub region: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub namespace: String,
    pub endpoint_url: Option<String>,
    #[validate(minimum = 1)]
    #[validate(maximum = 300)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct LogSettings {
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
}

impl ElasticsearchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CloudWatchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl LogSettings {
    pub fn level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

impl Settings {
    /// Command-line values win over file and environment.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.url {
            self.elasticsearch.url = url.clone();
        }
        if let Some(region) = &cli.region {
            self.cloudwatch.region = region.clone();
        }
        if let Some(namespace) = &cli.namespace {
            self.cloudwatch.namespace = namespace.clone();
        }
        if let Some(endpoint_url) = &cli.endpoint_url {
            self.cloudwatch.endpoint_url = Some(endpoint_url.clone());
        }
        if let Some(instance) = &cli.instance {
            self.instance = Some(instance.clone());
        }
        if let Some(file) = &cli.logfile {
            self.log.file = Some(file.clone());
        }
        if cli.verbose {
            self.log.verbose = true;
        }
        if cli.skip_missing {
            self.on_missing = MissingFieldPolicy::Skip;
        }
        if cli.dry_run {
            self.dry_run = true;
        }
        self
    }

    pub fn check(&self) -> Result<(), config::ConfigError> {
        self.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;

        reqwest::Url::parse(&self.elasticsearch.url).map_err(|e| {
            config::ConfigError::Message(format!(
                "invalid elasticsearch url {:?}: {}",
                self.elasticsearch.url, e
            ))
        })?;
        if let Some(endpoint_url) = &self.cloudwatch.endpoint_url {
            reqwest::Url::parse(endpoint_url).map_err(|e| {
                config::ConfigError::Message(format!(
                    "invalid cloudwatch endpoint url {:?}: {}",
                    endpoint_url, e
                ))
            })?;
        }
        if matches!(&self.instance, Some(instance) if instance.is_empty()) {
            return Err(config::ConfigError::Message(
                "instance must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Layers defaults, the optional config file and `ES_CLOUDWATCH__*`
/// environment variables.
pub fn get_configuration(config_file: Option<&Path>) -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let mut builder = config::Config::builder()
        .set_default("elasticsearch.url", DEFAULT_URL)?
        .set_default("elasticsearch.timeout_secs", DEFAULT_TIMEOUT_SECS)?
        .set_default("cloudwatch.region", DEFAULT_REGION)?
        .set_default("cloudwatch.namespace", DEFAULT_NAMESPACE)?
        .set_default("cloudwatch.timeout_secs", DEFAULT_TIMEOUT_SECS)?;

    if let Some(path) = config_file {
        // .yaml, .toml, .json picked by extension
        builder = builder.add_source(config::File::from(path));
    }

    builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize()
}

/// Full resolution order: defaults, file, environment, command line.
pub fn load(cli: &Cli) -> Result<Settings, config::ConfigError> {
    let settings = get_configuration(cli.config.as_deref())?.apply_cli(cli);
    settings.check()?;
    Ok(settings)
}
