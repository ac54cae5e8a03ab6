//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::ClientConfig;
use crate::engine::{ReadOutcome, Reconciler};
use crate::error::{Error, Result};
use crate::gateway::{DeleteResult, MakeClient};
use crate::record::LocalRecord;
use crate::schema::{schema_for, ResourceKind};
use crate::types::JsonValue;
use serde_json::json;
use std::io::Read as _;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command and print its result
    pub async fn run(&self) -> Result<()> {
        let output = if let Commands::Schema { kind } = &self.cli.command {
            serde_json::to_value(schema_for(*kind))?
        } else {
            let config =
                ClientConfig::resolve(self.cli.api_token.clone(), self.cli.base_url.clone())?;
            debug!("Using API endpoint {}", config.base_url);
            let client = MakeClient::new(&config)?;

            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Interrupted, cancelling request");
                    on_interrupt.cancel();
                }
            });

            self.execute(&client, &cancel).await?
        };

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Run the command's single engine operation against a client
    pub async fn execute(&self, client: &MakeClient, cancel: &CancellationToken) -> Result<JsonValue> {
        let kind = self.cli.command.kind();
        let reconciler = client.reconciler(kind);

        match &self.cli.command {
            Commands::Create { record, .. } => {
                let desired = load_record(kind, record)?;
                let created = reconciler.create(cancel, &desired).await?;
                info!("Created {} {}", kind, created.id().unwrap_or_default());
                Ok(created.to_json())
            }
            Commands::Read { id, .. } => {
                let prior = LocalRecord::from_id(kind, id.as_str());
                match reconciler.read(cancel, &prior).await? {
                    ReadOutcome::Present(record) => Ok(record.to_json()),
                    ReadOutcome::Gone => Ok(json!({"id": id, "state": "gone"})),
                }
            }
            Commands::Update { id, record, .. } => {
                let mut planned = load_record(kind, record)?;
                planned.id = id.clone().into();
                Ok(reconciler.update(cancel, &planned).await?.to_json())
            }
            Commands::Delete { id, .. } => delete(&reconciler, cancel, kind, id).await,
            Commands::Import { id, .. } => Ok(reconciler.import(cancel, id).await?.to_json()),
            Commands::Lookup { id, .. } => Ok(reconciler.lookup(cancel, id).await?.to_json()),
            Commands::Schema { kind } => Ok(serde_json::to_value(schema_for(*kind))?),
        }
    }
}

async fn delete(
    reconciler: &Reconciler,
    cancel: &CancellationToken,
    kind: ResourceKind,
    id: &str,
) -> Result<JsonValue> {
    let prior = LocalRecord::from_id(kind, id);
    let result = match reconciler.delete(cancel, &prior).await? {
        DeleteResult::Deleted => "deleted",
        DeleteResult::AlreadyAbsent => "already_absent",
    };
    Ok(json!({"id": id, "state": "gone", "result": result}))
}

/// Load a record from a JSON file, or stdin for `-`
fn load_record(kind: ResourceKind, path: &Path) -> Result<LocalRecord> {
    let content = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| Error::config(format!("Failed to read record from stdin: {e}")))?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read record file: {e}")))?
    };

    let value: JsonValue = serde_json::from_str(&content)
        .map_err(|e| Error::config(format!("Invalid record JSON: {e}")))?;
    debug!("Loaded {kind} record from {}", path.display());
    LocalRecord::from_json(kind, &value)
}
