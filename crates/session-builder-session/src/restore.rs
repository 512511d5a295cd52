//! Best-effort restore

use serde::Serialize;

use session_builder_host::{Host, Message};
use session_builder_storage::SessionName;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestoreReport {
    pub opened: Vec<String>,
    pub failed: Vec<String>,
}

impl RestoreReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Open every path independently. Each failure becomes one warning naming
/// the path; the rest still open.
pub fn restore_files<H>(host: &H, session: &SessionName, files: &[String]) -> RestoreReport
where
    H: Host + ?Sized,
{
    let mut report = RestoreReport::default();

    for path in files {
        match host.open_document(path) {
            Ok(()) => report.opened.push(path.clone()),
            Err(e) => {
                tracing::warn!(session = %session, path = %path, error = %e, "Failed to open file");
                host.notify(Message::warning(format!("Failed to open file: {path}")));
                report.failed.push(path.clone());
            }
        }
    }

    tracing::info!(
        session = %session,
        opened = report.opened.len(),
        failed = report.failed.len(),
        "Restored session files"
    );

    report
}
