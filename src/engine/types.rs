//! Engine types
//!
//! Lifecycle states of a managed record and the outcomes reported back to
//! the orchestrator.

use crate::record::LocalRecord;
use crate::types::Operation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a local record stands relative to the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// No remote counterpart is tracked yet
    Unmanaged,
    PendingCreate,
    /// Local record reflects the last remote response
    Synced,
    PendingUpdate,
    PendingDelete,
    /// The remote resource no longer exists
    Gone,
}

impl LifecycleState {
    /// State of a record before any operation runs
    pub fn of(record: &LocalRecord) -> Self {
        if record.id().is_some() {
            LifecycleState::Synced
        } else {
            LifecycleState::Unmanaged
        }
    }

    /// State entered while `op` is in flight, or `None` if `op` is not
    /// valid from this state
    pub fn begin(self, op: Operation) -> Option<LifecycleState> {
        match (self, op) {
            (LifecycleState::Unmanaged, Operation::Create) => Some(LifecycleState::PendingCreate),
            (LifecycleState::Unmanaged, Operation::Import)
            | (LifecycleState::Synced, Operation::Read | Operation::Lookup) => Some(self),
            (LifecycleState::Synced, Operation::Update) => Some(LifecycleState::PendingUpdate),
            (LifecycleState::Synced, Operation::Delete) => Some(LifecycleState::PendingDelete),
            _ => None,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Unmanaged => "Unmanaged",
            LifecycleState::PendingCreate => "PendingCreate",
            LifecycleState::Synced => "Synced",
            LifecycleState::PendingUpdate => "PendingUpdate",
            LifecycleState::PendingDelete => "PendingDelete",
            LifecycleState::Gone => "Gone",
        };
        f.write_str(name)
    }
}

/// Result of a read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Refreshed record
    Present(LocalRecord),
    /// The remote answered 404; the orchestrator should drop the record
    Gone,
}

impl ReadOutcome {
    pub fn state(&self) -> LifecycleState {
        match self {
            ReadOutcome::Present(_) => LifecycleState::Synced,
            ReadOutcome::Gone => LifecycleState::Gone,
        }
    }

    pub fn is_gone(&self) -> bool {
        matches!(self, ReadOutcome::Gone)
    }

    pub fn record(&self) -> Option<&LocalRecord> {
        match self {
            ReadOutcome::Present(record) => Some(record),
            ReadOutcome::Gone => None,
        }
    }

    pub fn into_record(self) -> Option<LocalRecord> {
        match self {
            ReadOutcome::Present(record) => Some(record),
            ReadOutcome::Gone => None,
        }
    }
}
