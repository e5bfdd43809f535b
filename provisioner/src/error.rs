use std::path::PathBuf;

use thiserror::Error;

use crate::params::ParameterError;
use crate::report::Severity;

/// No input could be resolved for the command.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No queue_client.queues_file parameter found.")]
    NoQueuesFile,
}

impl ResolveError {
    pub fn severity(&self) -> Severity {
        Severity::Critical
    }
}

/// A manifest that cannot be turned into a queue list.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Unable to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error("File {} is empty.", path.display())]
    EmptyDocument { path: PathBuf },

    #[error("No queues node found in {}.", path.display())]
    MissingQueuesNode { path: PathBuf },

    #[error("Empty queues node.")]
    EmptyQueuesNode,

    #[error("Invalid queues node in {}: expected a list.", path.display())]
    InvalidQueuesNode { path: PathBuf },
}

impl ManifestError {
    pub fn severity(&self) -> Severity {
        match self {
            ManifestError::EmptyDocument { .. } => Severity::Warning,
            _ => Severity::Critical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_an_empty_document_is_a_warning() {
        let empty = ManifestError::EmptyDocument { path: "q.yml".into() };
        assert_eq!(empty.severity(), Severity::Warning);
        assert_eq!(empty.to_string(), "File q.yml is empty.");

        let missing = ManifestError::MissingQueuesNode { path: "q.yml".into() };
        assert_eq!(missing.severity(), Severity::Critical);
        assert_eq!(missing.to_string(), "No queues node found in q.yml.");

        assert_eq!(ManifestError::EmptyQueuesNode.severity(), Severity::Critical);
        assert_eq!(ResolveError::NoQueuesFile.severity(), Severity::Critical);
    }
}
