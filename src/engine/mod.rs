//! Reconciliation engine module
//!
//! Drives one lifecycle event against a gateway and folds the remote result
//! back into the local record.
//!
//! # Overview
//!
//! - `Reconciler` - create / read / update / delete / import / lookup
//! - `LifecycleState` - Unmanaged, PendingCreate, Synced, PendingUpdate,
//!   PendingDelete, Gone
//! - `ReadOutcome` - a refreshed record, or notice that it is gone
//!
//! Every operation calls exactly one gateway operation. A 404 becomes a
//! state transition only for read and delete; every error is returned
//! annotated with the operation and resource kind.

mod types;

pub use types::{LifecycleState, ReadOutcome};

use crate::error::{Error, Result};
use crate::gateway::{DeleteResult, Gateway, MakeClient};
use crate::record::{validate_desired, LocalRecord, RemoteRecord};
use crate::schema::ResourceKind;
use crate::types::Operation;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Reconciliation contract for one resource kind
#[derive(Debug, Clone)]
pub struct Reconciler {
    gateway: Gateway,
}

impl Reconciler {
    /// Create a reconciler over a gateway
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn kind(&self) -> ResourceKind {
        self.gateway.kind()
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Create the remote resource from desired values
    ///
    /// `Unmanaged -> Synced`. The returned record is built entirely from the
    /// remote response, identifier included.
    pub async fn create(
        &self,
        cancel: &CancellationToken,
        desired: &LocalRecord,
    ) -> Result<LocalRecord> {
        let op = Operation::Create;
        self.run(op, async {
            let pending = self.begin(op, LifecycleState::of(desired))?;
            validate_desired(self.gateway.schema(), desired)?;
            self.transition(LifecycleState::Unmanaged, pending, None);

            let remote = self.gateway.create(cancel, desired).await?;
            if remote.id.is_empty() {
                return Err(Error::decode(format!(
                    "create {} response did not include an identifier",
                    self.kind()
                )));
            }
            let record = remote.into_local(self.kind())?;
            self.transition(pending, LifecycleState::Synced, record.id());
            Ok(record)
        })
        .await
    }

    /// Refresh a synced record from the remote
    ///
    /// `Synced -> Synced`, or `Synced -> Gone` when the remote answers 404.
    /// Every attribute is replaced by the remote value.
    pub async fn read(
        &self,
        cancel: &CancellationToken,
        prior: &LocalRecord,
    ) -> Result<ReadOutcome> {
        let op = Operation::Read;
        self.run(op, async {
            let id = self.known_id(op, prior)?;
            match self.gateway.get(cancel, id).await {
                Ok(remote) => {
                    let record = self.refresh(id, remote)?;
                    self.transition(LifecycleState::Synced, LifecycleState::Synced, Some(id));
                    Ok(ReadOutcome::Present(record))
                }
                Err(e) if e.is_not_found() => {
                    warn!("{} {} no longer exists remotely, removing from state", self.kind(), id);
                    self.transition(LifecycleState::Synced, LifecycleState::Gone, Some(id));
                    Ok(ReadOutcome::Gone)
                }
                Err(e) => Err(e),
            }
        })
        .await
    }

    /// Push planned values to an existing remote resource
    ///
    /// `Synced -> Synced`. A 404 is an error: the resource is not recreated.
    pub async fn update(
        &self,
        cancel: &CancellationToken,
        planned: &LocalRecord,
    ) -> Result<LocalRecord> {
        let op = Operation::Update;
        self.run(op, async {
            let id = self.known_id(op, planned)?;
            validate_desired(self.gateway.schema(), planned)?;
            self.transition(LifecycleState::Synced, LifecycleState::PendingUpdate, Some(id));

            let remote = self.gateway.update(cancel, id, planned).await?;
            let record = self.refresh(id, remote)?;
            self.transition(LifecycleState::PendingUpdate, LifecycleState::Synced, Some(id));
            Ok(record)
        })
        .await
    }

    /// Delete the remote resource
    ///
    /// `Synced -> Gone`, whether the remote deleted it now or it was already
    /// absent. On error the record stays `Synced`.
    pub async fn delete(
        &self,
        cancel: &CancellationToken,
        prior: &LocalRecord,
    ) -> Result<DeleteResult> {
        let op = Operation::Delete;
        self.run(op, async {
            let id = self.known_id(op, prior)?;
            self.transition(LifecycleState::Synced, LifecycleState::PendingDelete, Some(id));

            let result = self.gateway.delete(cancel, id).await?;
            if result == DeleteResult::AlreadyAbsent {
                warn!("{} {} was already deleted", self.kind(), id);
            }
            self.transition(LifecycleState::PendingDelete, LifecycleState::Gone, Some(id));
            Ok(result)
        })
        .await
    }

    /// Bring an existing remote resource under management from its identifier
    ///
    /// `Unmanaged -> Synced`. No desired values are validated; every
    /// attribute comes from the remote.
    pub async fn import(&self, cancel: &CancellationToken, id: &str) -> Result<LocalRecord> {
        let op = Operation::Import;
        self.run(op, async {
            self.begin(op, LifecycleState::Unmanaged)?;
            self.gateway.schema().check_identifier(id)?;

            let remote = self.gateway.get(cancel, id).await?;
            let record = self.refresh(id, remote)?;
            self.transition(LifecycleState::Unmanaged, LifecycleState::Synced, Some(id));
            Ok(record)
        })
        .await
    }

    /// Read-only fetch by identifier; a 404 is an error
    pub async fn lookup(&self, cancel: &CancellationToken, id: &str) -> Result<LocalRecord> {
        self.run(Operation::Lookup, async {
            self.gateway.schema().check_identifier(id)?;
            let remote = self.gateway.get(cancel, id).await?;
            self.refresh(id, remote)
        })
        .await
    }

    async fn run<T>(
        &self,
        op: Operation,
        work: impl std::future::Future<Output = Result<T>>,
    ) -> Result<T> {
        debug!("{} {}", op, self.kind());
        work.await.map_err(|e| e.during(op, self.kind()))
    }

    fn begin(&self, op: Operation, state: LifecycleState) -> Result<LifecycleState> {
        state.begin(op).ok_or_else(|| match state {
            LifecycleState::Unmanaged => Error::config(format!(
                "cannot {op} a {} that has no identifier yet",
                self.kind()
            )),
            _ => Error::config(format!(
                "cannot {op} a {} that already has an identifier",
                self.kind()
            )),
        })
    }

    fn known_id<'a>(&self, op: Operation, record: &'a LocalRecord) -> Result<&'a str> {
        if record.kind != self.kind() {
            return Err(Error::config(format!(
                "expected a {} record, got a {} record",
                self.kind(),
                record.kind
            )));
        }
        self.begin(op, LifecycleState::of(record))?;
        let id = record.id().unwrap_or_default();
        self.gateway.schema().check_identifier(id)?;
        Ok(id)
    }

    /// Map a response into a full record, keeping the identifier fixed
    fn refresh(&self, id: &str, remote: RemoteRecord) -> Result<LocalRecord> {
        if !remote.id.is_empty() && remote.id != id {
            return Err(Error::IdentifierChanged {
                kind: self.kind(),
                expected: id.to_string(),
                actual: remote.id,
            });
        }
        let mut record = remote.into_local(self.kind())?;
        record.id = id.to_string().into();
        Ok(record)
    }

    fn transition(&self, from: LifecycleState, to: LifecycleState, id: Option<&str>) {
        trace!(
            kind = %self.kind(),
            id = id.unwrap_or("<unknown>"),
            "{from} -> {to}"
        );
    }
}

impl MakeClient {
    /// Reconciler for a resource kind
    pub fn reconciler(&self, kind: ResourceKind) -> Reconciler {
        Reconciler::new(self.gateway(kind))
    }
}
