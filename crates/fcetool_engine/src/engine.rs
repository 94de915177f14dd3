use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use fcetool_logging::{fce_error, fce_info, fce_warn};
use thiserror::Error;

use crate::client::{ClientSettings, ExtractionClient, ReqwestExtractionClient};
use crate::{ClientError, EngineEvent, ExtractRequest, RequestId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not build http client: {0}")]
    Client(#[from] ClientError),
    #[error("could not start engine runtime: {0}")]
    Runtime(#[from] io::Error),
}

enum EngineCommand {
    Extract {
        request_id: RequestId,
        request: ExtractRequest,
    },
    ProbeHealth,
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Owns the async runtime thread. Commands go in; every command produces
/// exactly one [`EngineEvent`] on the sink.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let client = ReqwestExtractionClient::new(settings)?;
        Ok(Self::with_client(Arc::new(client), sink)?)
    }

    pub fn with_client(
        client: Arc<dyn ExtractionClient>,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("fcetool-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    runtime.spawn(handle_command(client.clone(), command, sink.clone()));
                }
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, request_id: RequestId, request: ExtractRequest) {
        if self
            .cmd_tx
            .send(EngineCommand::Extract {
                request_id,
                request,
            })
            .is_err()
        {
            fce_error!("engine thread is gone; request {} dropped", request_id);
        }
    }

    pub fn probe_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::ProbeHealth);
    }
}

async fn handle_command(
    client: Arc<dyn ExtractionClient>,
    command: EngineCommand,
    sink: Arc<dyn EventSink>,
) {
    match command {
        EngineCommand::Extract {
            request_id,
            request,
        } => {
            // Run the call in its own task so a panic still produces a completion.
            let task = tokio::spawn(async move { client.extract(&request).await });
            let result = match task.await {
                Ok(result) => result,
                Err(err) => Err(ClientError::Internal(err.to_string())),
            };
            match &result {
                Ok(reply) => fce_info!(
                    "request {} finished with http status {}",
                    request_id,
                    reply.http_status
                ),
                Err(err) => fce_warn!("request {} failed: {}", request_id, err),
            }
            sink.emit(EngineEvent::ExtractionFinished { request_id, result });
        }
        EngineCommand::ProbeHealth => {
            let online = client.probe_health().await;
            sink.emit(EngineEvent::HealthChecked { online });
        }
    }
}
