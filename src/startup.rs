use crate::configuration::Settings;
use crate::errors::MonitorError;
use crate::health::{redact_url, HealthFetcher};
use crate::metrics::{CloudWatchSink, DryRunSink, MetricPublisher, MetricSink};
use std::sync::Arc;
use tracing::Instrument;

/// One fetch followed by one submission. Returns the number of data points sent.
pub async fn run_once(
    fetcher: &HealthFetcher,
    publisher: &MetricPublisher,
    instance: Option<&str>,
) -> Result<usize, MonitorError> {
    let doc = fetcher.fetch().await?;
    tracing::info!(
        cluster = %doc.cluster_name,
        status = %doc.status,
        "Cluster health received"
    );

    let count = publisher.publish(&doc, instance).await?;
    Ok(count)
}

/// Wires the components from `settings` and performs one run.
pub async fn run(settings: Settings) -> Result<usize, MonitorError> {
    let span = tracing::info_span!(
        "es_cloudwatch",
        url = %redact_url(&settings.elasticsearch.url),
        namespace = %settings.cloudwatch.namespace,
        dry_run = settings.dry_run,
    );

    async move {
        let result = execute(&settings).await;
        if let Err(err) = &result {
            tracing::error!("{}", err);
        }
        result
    }
    .instrument(span)
    .await
}

async fn execute(settings: &Settings) -> Result<usize, MonitorError> {
    let fetcher =
        HealthFetcher::new(&settings.elasticsearch.url, settings.elasticsearch.timeout())?;

    let sink: Arc<dyn MetricSink> = if settings.dry_run {
        Arc::new(DryRunSink)
    } else {
        Arc::new(
            CloudWatchSink::from_env(
                &settings.cloudwatch.region,
                settings.cloudwatch.endpoint_url.as_deref(),
                settings.cloudwatch.timeout(),
            )
            .await,
        )
    };
    let publisher = MetricPublisher::new(
        sink,
        settings.cloudwatch.namespace.clone(),
        settings.on_missing,
    );

    run_once(&fetcher, &publisher, settings.instance.as_deref()).await
}
