use std::collections::BTreeMap;

use futures_util::future::AbortHandle;

/// Owns the abort handles of in-flight dismissal tasks.
#[derive(Debug, Default)]
pub(crate) struct TimerRegistry {
    next_id: u64,
    handles: BTreeMap<u64, AbortHandle>,
}

impl TimerRegistry {
    pub(crate) fn register(&mut self, handle: AbortHandle) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.handles.insert(id, handle);
        id
    }

    /// Forgets a task that ran to completion or was aborted.
    pub(crate) fn finish(&mut self, id: u64) -> bool {
        self.handles.remove(&id).is_some()
    }

    pub(crate) fn cancel_all(&mut self) -> usize {
        let handles = std::mem::take(&mut self.handles);
        let count = handles.len();
        for handle in handles.into_values() {
            handle.abort();
        }
        count
    }

    pub(crate) fn len(&self) -> usize {
        self.handles.len()
    }
}
