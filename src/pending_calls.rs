use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

/// What a response encoder needs to know about the call it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCall {
    /// Format-native sequence id from the call's envelope.
    pub seq_id: i32,
    pub service: String,
    pub method: String,
}

/// Correlation id → [`PendingCall`] table.
///
/// Written when a call is decoded and read when its response is encoded.
/// Entries are never replaced and never evicted by the codec; the owning
/// runtime calls [`PendingCalls::forget`] once a call is settled.
#[derive(Debug, Default)]
pub struct PendingCalls {
    entries: RwLock<HashMap<i64, PendingCall>>,
}

impl PendingCalls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a call. Returns `false` (keeping the existing record) when
    /// the correlation id is already present.
    pub fn record(&self, correlation_id: i64, call: PendingCall) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        if entries.contains_key(&correlation_id) {
            tracing::warn!(
                "pending call {} already recorded; keeping the first record for `{}`",
                correlation_id,
                call.method
            );
            return false;
        }

        entries.insert(correlation_id, call);
        true
    }

    pub fn get(&self, correlation_id: i64) -> Option<PendingCall> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&correlation_id)
            .cloned()
    }

    pub fn forget(&self, correlation_id: i64) -> Option<PendingCall> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&correlation_id)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
