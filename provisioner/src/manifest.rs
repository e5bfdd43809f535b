//! Declarative queue manifests.
//!
//! ```yaml
//! queues:
//!   - name: orders
//!     aliases: [orders-v1, orders-legacy]
//!   - name: invoices
//! ```

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::error::ManifestError;
use crate::params::Parameters;

pub const QUEUES_NODE: &str = "queues";
pub const QUEUE_NAME_NODE: &str = "name";
pub const QUEUE_ALIASES_NODE: &str = "aliases";

/// One desired queue.
///
/// `name` is empty when the manifest entry had no usable name; the
/// provisioner reports and skips such entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueueSpec {
    pub name: String,
    pub aliases: Vec<String>,
}

impl QueueSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    fn from_entry(entry: &Value) -> Self {
        let name = entry
            .get(QUEUE_NAME_NODE)
            .and_then(scalar_string)
            .unwrap_or_default();

        // Every declared element is kept; a non-scalar one becomes an empty
        // alias that the provisioner reports as invalid.
        let aliases = match entry.get(QUEUE_ALIASES_NODE) {
            Some(Value::Sequence(items)) => items.iter().map(alias_node).collect(),
            Some(Value::Mapping(items)) => items.values().map(alias_node).collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => vec![alias_node(other)],
        };

        Self { name, aliases }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    pub queues: Vec<QueueSpec>,
}

impl Manifest {
    /// Interpret YAML source. `path` is only used in error messages.
    pub fn from_yaml(src: &str, path: &Path, params: &Parameters) -> Result<Self, ManifestError> {
        if src.trim().is_empty() {
            return Err(ManifestError::EmptyDocument { path: path.into() });
        }

        let mut doc: Value = serde_yaml::from_str(src).map_err(|source| ManifestError::Parse {
            path: path.into(),
            source,
        })?;
        doc.apply_merge().map_err(|source| ManifestError::Parse {
            path: path.into(),
            source,
        })?;
        params.resolve_tree(&mut doc)?;

        if doc.is_null() {
            return Err(ManifestError::EmptyDocument { path: path.into() });
        }

        let queues = match doc.get(QUEUES_NODE) {
            None => return Err(ManifestError::MissingQueuesNode { path: path.into() }),
            Some(Value::Null) => return Err(ManifestError::EmptyQueuesNode),
            Some(Value::Sequence(entries)) => entries.iter().map(QueueSpec::from_entry).collect(),
            Some(_) => return Err(ManifestError::InvalidQueuesNode { path: path.into() }),
        };

        Ok(Self { queues })
    }
}

/// Read and interpret the manifest at `path`.
pub fn parse_manifest(path: &Path, params: &Parameters) -> Result<Manifest, ManifestError> {
    let src = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.into(),
        source,
    })?;
    Manifest::from_yaml(&src, path, params)
}

fn alias_node(value: &Value) -> String {
    scalar_string(value).unwrap_or_default()
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<Manifest, ManifestError> {
        Manifest::from_yaml(src, Path::new("queues.yml"), &Parameters::default())
    }

    #[test]
    fn reads_names_and_aliases_in_order() {
        let manifest = parse(
            r#"
queues:
  - name: queue1
    aliases: [alias1, alias2]
  - name: queue2
"#,
        )
        .unwrap();

        assert_eq!(
            manifest.queues,
            vec![
                QueueSpec::new("queue1").with_aliases(["alias1", "alias2"]),
                QueueSpec::new("queue2"),
            ]
        );
    }

    #[test]
    fn blank_file_is_an_empty_document() {
        assert!(matches!(parse(""), Err(ManifestError::EmptyDocument { .. })));
        assert!(matches!(parse("  \n\n"), Err(ManifestError::EmptyDocument { .. })));
        assert!(matches!(parse("~\n"), Err(ManifestError::EmptyDocument { .. })));
    }

    #[test]
    fn queues_node_must_be_present() {
        assert!(matches!(
            parse("topics:\n  - name: a\n"),
            Err(ManifestError::MissingQueuesNode { .. })
        ));
        assert!(matches!(parse("just a string\n"), Err(ManifestError::MissingQueuesNode { .. })));
    }

    #[test]
    fn null_queues_differs_from_empty_list() {
        assert!(matches!(parse("queues:\n"), Err(ManifestError::EmptyQueuesNode)));
        assert!(matches!(parse("queues: ~\n"), Err(ManifestError::EmptyQueuesNode)));
        assert_eq!(parse("queues: []\n").unwrap(), Manifest::default());
    }

    #[test]
    fn queues_node_must_be_a_list() {
        assert!(matches!(
            parse("queues:\n  orders: {}\n"),
            Err(ManifestError::InvalidQueuesNode { .. })
        ));
    }

    #[test]
    fn entries_without_a_name_are_kept_with_an_empty_name() {
        let manifest = parse("queues:\n  - aliases: [a]\n  - name: ''\n  - plain\n  - name: b\n").unwrap();
        let names: Vec<_> = manifest.queues.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, ["", "", "", "b"]);
    }

    #[test]
    fn scalar_names_and_single_alias_are_accepted() {
        let manifest = parse("queues:\n  - name: 42\n    aliases: answer\n  - name: x\n    aliases:\n").unwrap();
        assert_eq!(manifest.queues[0], QueueSpec::new("42").with_aliases(["answer"]));
        assert_eq!(manifest.queues[1], QueueSpec::new("x"));
    }

    #[test]
    fn non_scalar_aliases_keep_their_slot() {
        let manifest = parse("queues:\n  - name: q\n    aliases: [~, {x: 1}, [a], good]\n").unwrap();
        assert_eq!(manifest.queues[0].aliases, ["", "", "", "good"]);
    }

    #[test]
    fn alias_mapping_contributes_its_values() {
        let manifest = parse("queues:\n  - name: q\n    aliases:\n      v1: q-v1\n      v2: q-v2\n").unwrap();
        assert_eq!(manifest.queues[0].aliases, ["q-v1", "q-v2"]);
    }

    #[test]
    fn merge_keys_are_applied() {
        let manifest = parse(
            "defaults: &d\n  aliases: [shared]\nqueues:\n  - <<: *d\n    name: q\n  - name: r\n",
        )
        .unwrap();
        assert_eq!(
            manifest.queues,
            vec![QueueSpec::new("q").with_aliases(["shared"]), QueueSpec::new("r")]
        );
    }

    #[test]
    fn placeholders_are_resolved_before_reading_queues() {
        let params: Parameters = [("env".to_string(), "prod".to_string())].into_iter().collect();
        let manifest = Manifest::from_yaml(
            "queues:\n  - name: '%env%-orders'\n    aliases: ['%env%-orders-v1']\n",
            Path::new("queues.yml"),
            &params,
        )
        .unwrap();
        assert_eq!(
            manifest.queues,
            vec![QueueSpec::new("prod-orders").with_aliases(["prod-orders-v1"])]
        );
    }

    #[test]
    fn unknown_placeholder_is_a_fatal_error() {
        let err = parse("queues:\n  - name: '%env%'\n").unwrap_err();
        assert!(matches!(err, ManifestError::Parameter(_)));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        assert!(matches!(parse("queues: [unclosed\n"), Err(ManifestError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = parse_manifest(Path::new("/definitely/not/here.yml"), &Parameters::default())
            .unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
    }
}
