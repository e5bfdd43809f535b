use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use queue_provisioner::cli::{CommonArgs, merged_config};
use queue_provisioner::logging;
use queue_provisioner::provision::{self, load_plan, resolve_source};
use queue_provisioner::report::{Reporter, Severity, TracingReporter};
use queue_provisioner::sqs::SqsBackend;

#[derive(Parser, Debug)]
#[command(
    name = "create_queues",
    about = "Create queues",
    after_long_help = r#"This command creates queues.

Specify file in config file:
[queue_client]
queues_file = "path/to/file.yml"

Or specify file with file option:
    --file=path/to/file.yml

Or list queues to create:
    create_queues queue1 queue2 queue3"#
)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Manifest file to read
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Queues to create (ignored when --file is given)
    #[arg(value_name = "QUEUES", value_parser = NonEmptyStringValueParser::new())]
    queues: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();
    let mut out = TracingReporter;

    let cfg = match merged_config(&args.common) {
        Ok(cfg) => cfg,
        Err(err) => {
            out.write(&format!("{err:#}"), Severity::Critical);
            return ExitCode::from(1);
        }
    };

    let source = match resolve_source(args.file, args.queues, cfg.queues_file()) {
        Ok(source) => source,
        Err(err) => {
            out.write(&err.to_string(), err.severity());
            return ExitCode::from(1);
        }
    };

    let plan = match load_plan(source, &cfg.parameters()) {
        Ok(plan) => plan,
        Err(err) => {
            out.write(&err.to_string(), err.severity());
            return ExitCode::from(1);
        }
    };

    let backend = match SqsBackend::connect(&cfg).await {
        Ok(backend) => Some(backend),
        Err(err) => {
            out.write(&format!("{err:#}"), Severity::Critical);
            None
        }
    };

    provision::run(backend.as_ref(), &mut out, &plan).await.into()
}
