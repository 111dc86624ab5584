use clap::Parser;
use es_cloudwatch::cli::Cli;
use es_cloudwatch::configuration;
use es_cloudwatch::errors::MonitorError;
use es_cloudwatch::startup::run;
use es_cloudwatch::telemetry::{get_subscriber, init_log_bridge, log_sink};
use std::process::ExitCode;
use tracing::instrument::WithSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

async fn execute(cli: Cli) -> Result<(), MonitorError> {
    let settings = configuration::load(&cli)?;

    let sink = log_sink(settings.log.file.as_deref()).map_err(MonitorError::Telemetry)?;
    let subscriber = get_subscriber("es-cloudwatch".into(), settings.log.level().into(), sink);
    init_log_bridge().map_err(MonitorError::Telemetry)?;

    run(settings).with_subscriber(subscriber).await?;
    Ok(())
}
