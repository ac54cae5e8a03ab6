//! Generic gateway implementation

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{extract_error_message, ApiRequest, HttpTransport, RawResponse, Transport};
use crate::record::{request_body, LocalRecord, RemoteRecord};
use crate::schema::{schema_for, ResourceKind, ResourceSchema};
use crate::types::JsonValue;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Outcome of a delete call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteResult {
    /// The remote removed the resource
    Deleted,
    /// The remote answered 404; the resource was already absent
    AlreadyAbsent,
}

/// REST gateway for one resource kind
#[derive(Clone)]
pub struct Gateway {
    schema: &'static ResourceSchema,
    transport: Arc<dyn Transport>,
}

impl Gateway {
    /// Create a gateway for a kind over a shared transport
    pub fn new(kind: ResourceKind, transport: Arc<dyn Transport>) -> Self {
        Self {
            schema: schema_for(kind),
            transport,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.schema.kind
    }

    pub fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    /// `POST` the desired record to the collection
    pub async fn create(
        &self,
        cancel: &CancellationToken,
        desired: &LocalRecord,
    ) -> Result<RemoteRecord> {
        let body = request_body(self.schema, desired)?;
        let request = ApiRequest::post(self.schema.collection, JsonValue::Object(body));
        let response = self.execute(cancel, request).await?;

        if response.is_error() {
            return Err(api_error(&response));
        }
        RemoteRecord::from_body(&response.body)
    }

    /// `GET` a single member
    pub async fn get(&self, cancel: &CancellationToken, id: &str) -> Result<RemoteRecord> {
        let request = ApiRequest::get(self.schema.member_path(id)?);
        let response = self.execute(cancel, request).await?;
        self.decode_member(id, &response)
    }

    /// `PUT` the desired record to an existing member
    pub async fn update(
        &self,
        cancel: &CancellationToken,
        id: &str,
        desired: &LocalRecord,
    ) -> Result<RemoteRecord> {
        let body = request_body(self.schema, desired)?;
        let request = ApiRequest::put(self.schema.member_path(id)?, JsonValue::Object(body));
        let response = self.execute(cancel, request).await?;
        self.decode_member(id, &response)
    }

    /// `DELETE` a member; a 404 counts as success
    pub async fn delete(&self, cancel: &CancellationToken, id: &str) -> Result<DeleteResult> {
        let request = ApiRequest::delete(self.schema.member_path(id)?);
        let response = self.execute(cancel, request).await?;

        if response.is_not_found() {
            debug!("{} {} already absent", self.schema.kind, id);
            return Ok(DeleteResult::AlreadyAbsent);
        }
        if response.is_error() {
            return Err(api_error(&response));
        }
        Ok(DeleteResult::Deleted)
    }

    fn decode_member(&self, id: &str, response: &RawResponse) -> Result<RemoteRecord> {
        if response.is_not_found() {
            return Err(Error::not_found(self.schema.kind, id));
        }
        if response.is_error() {
            return Err(api_error(response));
        }
        RemoteRecord::from_body(&response.body)
    }

    /// Send through the transport unless the caller cancels first
    async fn execute(
        &self,
        cancel: &CancellationToken,
        request: ApiRequest,
    ) -> Result<RawResponse> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(Error::Cancelled),
            response = self.transport.send(request) => response,
        }
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("kind", &self.schema.kind)
            .field("collection", &self.schema.collection)
            .finish_non_exhaustive()
    }
}

fn api_error(response: &RawResponse) -> Error {
    Error::api(response.status, extract_error_message(&response.body))
}

/// Entry point handing out one gateway per resource kind
///
/// The only shared state is the immutable transport, so clones and the
/// gateways they hand out may be used from any number of tasks.
#[derive(Clone)]
pub struct MakeClient {
    transport: Arc<dyn Transport>,
}

impl MakeClient {
    /// Create a client talking HTTP to the configured endpoint
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn gateway(&self, kind: ResourceKind) -> Gateway {
        Gateway::new(kind, Arc::clone(&self.transport))
    }

    pub fn scenarios(&self) -> Gateway {
        self.gateway(ResourceKind::Scenario)
    }

    pub fn connections(&self) -> Gateway {
        self.gateway(ResourceKind::Connection)
    }

    pub fn webhooks(&self) -> Gateway {
        self.gateway(ResourceKind::Webhook)
    }

    pub fn teams(&self) -> Gateway {
        self.gateway(ResourceKind::Team)
    }

    pub fn organizations(&self) -> Gateway {
        self.gateway(ResourceKind::Organization)
    }

    pub fn data_stores(&self) -> Gateway {
        self.gateway(ResourceKind::DataStore)
    }
}

impl std::fmt::Debug for MakeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MakeClient").finish_non_exhaustive()
    }
}
