//! Command-line surface of the `es-cloudwatch` binary.
//!
//! ```text
//! es-cloudwatch -i i-73b28fc7
//! es-cloudwatch -u http://es.internal:9200 -r eu-west-1 -l /var/log/es-cloudwatch.log
//! ```
//!
//! Every flag is optional. Values given here override the config file and
//! `ES_CLOUDWATCH__*` environment variables.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "es-cloudwatch",
    version,
    about = "Publish Elasticsearch cluster health to CloudWatch",
    long_about = "Reads /_cluster/health once and submits the cluster status and shard/node\n\
        counts as CloudWatch metrics. Meant to be run from cron or a systemd timer."
)]
pub struct Cli {
    /// Instance name or id, added as the `Instance` dimension
    #[arg(short, long, value_name = "INSTANCE")]
    pub instance: Option<String>,
    /// AWS region (default: us-west-1)
    #[arg(short, long, value_name = "AWS_REGION")]
    pub region: Option<String>,
    /// URL of the Elasticsearch HTTP API (default: http://localhost:9200)
    #[arg(short, long, value_name = "ELASTICSEARCH_URL")]
    pub url: Option<String>,
    /// CloudWatch metrics namespace (default: Custom/ElasticsearchCluster)
    #[arg(short, long, value_name = "NAMESPACE")]
    pub namespace: Option<String>,
    /// Log file. By default all messages go to stdout
    #[arg(short, long = "logfile", value_name = "FILE")]
    pub logfile: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
    /// Configuration file (yaml, toml or json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Override the CloudWatch endpoint (e.g. LocalStack)
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,
    /// Leave out null/absent health fields instead of failing the run
    #[arg(long)]
    pub skip_missing: bool,
    /// Log the data points instead of submitting them
    #[arg(long)]
    pub dry_run: bool,
}
