/// How loud a provisioning message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Output sink for everything the provisioner has to say.
pub trait Reporter {
    fn write(&mut self, message: &str, severity: Severity);
}

/// Collects messages in order. Handy when the caller wants to inspect them.
impl Reporter for Vec<(Severity, String)> {
    fn write(&mut self, message: &str, severity: Severity) {
        self.push((severity, message.to_string()));
    }
}

/// Forwards messages to the installed tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn write(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => tracing::info!("{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Critical => tracing::error!("{message}"),
        }
    }
}
