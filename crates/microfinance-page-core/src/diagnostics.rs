use serde::Serialize;

use crate::controller::FormKind;
use crate::guards::GuardRejection;

/// Counters exposed to the page for debugging, serialized as camelCase JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDiagnostics {
    pub phase: String,
    pub flash_messages_scheduled: u64,
    pub guards_installed: Vec<String>,
    pub submits_allowed: u64,
    pub submits_cancelled: u64,
    pub banners_shown: u64,
    pub banners_dropped: u64,
    pub timers_cancelled: u64,
    pub last_rejection: Option<String>,
    pub last_error: Option<String>,
}

impl Default for PageDiagnostics {
    fn default() -> Self {
        Self {
            phase: "idle".to_string(),
            flash_messages_scheduled: 0,
            guards_installed: Vec::new(),
            submits_allowed: 0,
            submits_cancelled: 0,
            banners_shown: 0,
            banners_dropped: 0,
            timers_cancelled: 0,
            last_rejection: None,
            last_error: None,
        }
    }
}

impl PageDiagnostics {
    #[must_use]
    pub fn failed(message: &str) -> Self {
        Self {
            phase: "error".to_string(),
            last_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn set_phase(&mut self, phase: &str) {
        self.phase = phase.to_string();
    }

    pub fn record_guard_installed(&mut self, kind: FormKind) {
        let name = kind.as_str().to_string();
        if !self.guards_installed.contains(&name) {
            self.guards_installed.push(name);
        }
    }

    pub fn record_submit_allowed(&mut self) {
        self.submits_allowed += 1;
    }

    pub fn record_submit_cancelled(&mut self, rejection: GuardRejection) {
        self.submits_cancelled += 1;
        self.last_rejection = Some(rejection.as_str().to_string());
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn record_timers_cancelled(&mut self, count: usize) {
        self.timers_cancelled += count as u64;
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            "{\"phase\":\"error\",\"lastError\":\"diagnostics serialization failed\"}".to_string()
        })
    }
}
