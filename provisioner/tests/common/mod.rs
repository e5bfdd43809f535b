#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use queue_provisioner::backend::QueueBackend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(String),
    Alias(String, String),
}

pub fn create(name: &str) -> Call {
    Call::Create(name.to_string())
}

pub fn alias(queue: &str, alias: &str) -> Call {
    Call::Alias(queue.to_string(), alias.to_string())
}

/// Records every call in order; fails the names it is told to.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<Call>>,
    fail_create: HashSet<String>,
    fail_alias: HashSet<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_create(mut self, name: &str) -> Self {
        self.fail_create.insert(name.to_string());
        self
    }

    pub fn failing_alias(mut self, alias: &str) -> Self {
        self.fail_alias.insert(alias.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueueBackend for RecordingBackend {
    async fn create_queue(&self, name: &str) -> Result<()> {
        self.calls.lock().unwrap().push(create(name));
        if self.fail_create.contains(name) {
            return Err(anyhow!("queue {name} rejected"));
        }
        Ok(())
    }

    async fn add_alias(&self, queue_name: &str, alias_name: &str) -> Result<()> {
        self.calls.lock().unwrap().push(alias(queue_name, alias_name));
        if self.fail_alias.contains(alias_name) {
            return Err(anyhow!("alias {alias_name} rejected"));
        }
        Ok(())
    }
}
