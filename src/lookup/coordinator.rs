use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::{LookupError, LookupKind, LookupOutcome, LookupService, RequestSequence};
use crate::core::format::digits_only;

/// Drives a [`LookupService`] for one form field.
///
/// ```ignore
/// let coordinator = LookupCoordinator::new(registry, LookupKind::Cnpj);
///
/// // on every change of the CNPJ input:
/// match coordinator.lookup(&input).await {
///     LookupOutcome::Resolved(company) | LookupOutcome::Cached(company) => fill(company),
///     LookupOutcome::ManualEntry(_) => enable_manual_fields(),
///     LookupOutcome::Superseded | LookupOutcome::Rejected(_) => {}
/// }
/// ```
pub struct LookupCoordinator<S: LookupService> {
    service: S,
    kind: LookupKind,
    quiet_period: Duration,
    fetch_timeout: Duration,
    sequence: RequestSequence,
    resolved: Mutex<HashMap<String, S::Record>>,
}

impl<S: LookupService> LookupCoordinator<S> {
    /// Wait after the last keystroke before calling the service.
    pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);
    pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(service: S, kind: LookupKind) -> Self {
        Self {
            service,
            kind,
            quiet_period: Self::DEFAULT_QUIET_PERIOD,
            fetch_timeout: Self::DEFAULT_FETCH_TIMEOUT,
            sequence: RequestSequence::new(),
            resolved: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn kind(&self) -> LookupKind {
        self.kind
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, S::Record>> {
        // The map holds only completed inserts, so a poisoned lock is still usable.
        self.resolved.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cached(&self, key: &str) -> Option<S::Record> {
        self.cache().get(key).cloned()
    }

    /// Drop every resolved key, e.g. when the form is reset.
    pub fn clear(&self) {
        self.cache().clear();
    }

    /// Look up `raw` as typed by the user.
    ///
    /// Every call supersedes the calls before it, including calls with an
    /// invalid or cached key. Successful responses are cached even when
    /// superseded, since they are still correct for their key.
    pub async fn lookup(&self, raw: &str) -> LookupOutcome<S::Record> {
        let ticket = self.sequence.issue();

        let check = self.kind.validate(raw);
        if !check.valid {
            return LookupOutcome::Rejected(check.error.unwrap_or_default());
        }

        let key = digits_only(raw);
        if let Some(record) = self.cached(&key) {
            tracing::debug!(kind = ?self.kind, %key, "lookup served from session cache");
            return LookupOutcome::Cached(record);
        }

        tokio::time::sleep(self.quiet_period).await;
        if !self.sequence.is_latest(ticket) {
            tracing::debug!(kind = ?self.kind, %key, ticket = ticket.value(), "lookup superseded while debouncing");
            return LookupOutcome::Superseded;
        }

        let result = match tokio::time::timeout(self.fetch_timeout, self.service.fetch(&key)).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout),
        };

        if let Ok(record) = &result {
            self.cache().insert(key.clone(), record.clone());
        }

        if !self.sequence.is_latest(ticket) {
            tracing::debug!(kind = ?self.kind, %key, ticket = ticket.value(), "stale lookup response discarded");
            return LookupOutcome::Superseded;
        }

        match result {
            Ok(record) => LookupOutcome::Resolved(record),
            Err(error) => {
                tracing::warn!(kind = ?self.kind, %key, %error, "lookup failed, falling back to manual entry");
                LookupOutcome::ManualEntry(error)
            }
        }
    }
}
