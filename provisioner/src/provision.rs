use std::path::PathBuf;
use std::process::ExitCode;

use crate::backend::QueueBackend;
use crate::error::{ManifestError, ResolveError};
use crate::manifest::{Manifest, QUEUE_NAME_NODE, QueueSpec, parse_manifest};
use crate::params::Parameters;
use crate::report::{Reporter, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::from(1),
        }
    }
}

/// Where the queue definitions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Names(Vec<String>),
}

/// Pick the input: `--file`, then positional names, then the configured
/// `queue_client.queues_file`. An empty `--file` counts as not given.
pub fn resolve_source(
    file: Option<PathBuf>,
    names: Vec<String>,
    fallback: Option<&str>,
) -> Result<Source, ResolveError> {
    if let Some(path) = file.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(Source::File(path));
    }
    if !names.is_empty() {
        return Ok(Source::Names(names));
    }
    fallback
        .map(|path| Source::File(PathBuf::from(path)))
        .ok_or(ResolveError::NoQueuesFile)
}

/// Parsed work, ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Manifest(Manifest),
    Names(Vec<String>),
}

pub fn load_plan(source: Source, params: &Parameters) -> Result<Plan, ManifestError> {
    match source {
        Source::File(path) => parse_manifest(&path, params).map(Plan::Manifest),
        Source::Names(names) => Ok(Plan::Names(names)),
    }
}

/// Apply `plan`. Without a backend nothing is attempted.
pub async fn run<B, R>(backend: Option<&B>, reporter: &mut R, plan: &Plan) -> Status
where
    B: QueueBackend + ?Sized,
    R: Reporter + ?Sized,
{
    let Some(backend) = backend else {
        reporter.write("No queue client service found.", Severity::Critical);
        return Status::Failure;
    };

    match plan {
        Plan::Manifest(manifest) => provision(backend, reporter, &manifest.queues).await,
        Plan::Names(names) => create_named(backend, reporter, names).await,
    }
}

/// Create every queue of a manifest and its aliases, in declared order.
///
/// Backend failures are reported as warnings and never stop the run.
///
/// An entry without a name is reported and skipped entirely: it never
/// reaches `create_queue("")` and its aliases are not attempted.
///
/// An empty alias marks a declared alias node that had no usable value; it
/// is reported as invalid and the next alias is attempted.
pub async fn provision<B, R>(backend: &B, reporter: &mut R, specs: &[QueueSpec]) -> Status
where
    B: QueueBackend + ?Sized,
    R: Reporter + ?Sized,
{
    reporter.write("Start create queue.", Severity::Info);
    for spec in specs {
        if spec.name.is_empty() {
            reporter.write(&format!("Empty {QUEUE_NAME_NODE} node."), Severity::Critical);
            continue;
        }
        create_one(backend, reporter, &spec.name).await;
        for alias in &spec.aliases {
            if alias.is_empty() {
                reporter.write("Invalid alias node.", Severity::Warning);
                continue;
            }
            match backend.add_alias(&spec.name, alias).await {
                Ok(()) => reporter.write(
                    &format!("Queue alias {alias} -> {} found.", spec.name),
                    Severity::Info,
                ),
                Err(err) => reporter.write(&format!("{err:#}"), Severity::Warning),
            }
        }
    }
    reporter.write("End create queue.", Severity::Info);
    Status::Success
}

/// Create queues given by name, without aliases.
pub async fn create_named<B, R>(backend: &B, reporter: &mut R, names: &[String]) -> Status
where
    B: QueueBackend + ?Sized,
    R: Reporter + ?Sized,
{
    for name in names {
        create_one(backend, reporter, name).await;
    }
    Status::Success
}

async fn create_one<B, R>(backend: &B, reporter: &mut R, name: &str)
where
    B: QueueBackend + ?Sized,
    R: Reporter + ?Sized,
{
    match backend.create_queue(name).await {
        Ok(()) => reporter.write(&format!("Queue {name} created."), Severity::Info),
        Err(err) => reporter.write(&format!("{err:#}"), Severity::Warning),
    }
}
