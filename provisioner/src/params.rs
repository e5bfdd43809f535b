//! `%name%` placeholder substitution for manifest values.
//!
//! Placeholders are resolved against the `[queue_client.parameters]` table of
//! the application config. `%%` stands for a literal percent sign.

use std::collections::HashMap;

use serde_yaml::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParameterError {
    #[error("You have requested a non-existent parameter \"{0}\".")]
    NotFound(String),
}

#[derive(Debug, Clone, Default)]
pub struct Parameters {
    values: HashMap<String, String>,
}

impl Parameters {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        // config folds keys to lowercase, so fall back to that spelling
        self.values
            .get(name)
            .or_else(|| self.values.get(&name.to_lowercase()))
            .map(String::as_str)
    }

    /// Substitute every placeholder in `input`.
    ///
    /// A `%` without a closing partner is copied through unchanged.
    pub fn resolve(&self, input: &str) -> Result<String, ParameterError> {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(start) = rest.find('%') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('%') {
                Some(0) => {
                    out.push('%');
                    rest = &after[1..];
                }
                Some(end) => {
                    let name = &after[..end];
                    if name.chars().any(char::is_whitespace) {
                        // "50% off 20%" is prose, not a placeholder
                        out.push('%');
                        rest = after;
                        continue;
                    }
                    let value = self
                        .get(name)
                        .ok_or_else(|| ParameterError::NotFound(name.to_string()))?;
                    out.push_str(value);
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        Ok(out)
    }

    /// Resolve every string leaf of a parsed document in place.
    ///
    /// Mapping keys and non-string scalars are left alone.
    pub fn resolve_tree(&self, value: &mut Value) -> Result<(), ParameterError> {
        match value {
            Value::String(s) => {
                if s.contains('%') {
                    *s = self.resolve(s)?;
                }
            }
            Value::Sequence(items) => {
                for item in items {
                    self.resolve_tree(item)?;
                }
            }
            Value::Mapping(map) => {
                for (_, item) in map.iter_mut() {
                    self.resolve_tree(item)?;
                }
            }
            Value::Tagged(tagged) => self.resolve_tree(&mut tagged.value)?,
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
