use std::sync::{mpsc, Arc};

use fcetool_core::{Effect, ExtractionOutcome, Msg, ReplyBody, ServiceConfig};
use fcetool_engine::{
    ClientSettings, EngineError, EngineEvent, EngineHandle, EventSink, ExtractRequest,
    ExtractResponse,
};
use fcetool_logging::{fce_info, fce_warn};

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        config: &ServiceConfig,
        app_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        let sink = Arc::new(MsgSink { app_tx });
        let engine = EngineHandle::new(client_settings(config), sink)?;
        Ok(Self { engine })
    }

    #[cfg(test)]
    pub fn with_client(
        client: Arc<dyn fcetool_engine::ExtractionClient>,
        app_tx: mpsc::Sender<AppEvent>,
    ) -> std::io::Result<Self> {
        let engine = EngineHandle::with_client(client, Arc::new(MsgSink { app_tx }))?;
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitExtraction {
                    request_id,
                    request,
                } => {
                    fce_info!(
                        "SubmitExtraction request_id={} images={} url={}",
                        request_id,
                        request.images,
                        request.url
                    );
                    self.engine.submit(
                        request_id,
                        ExtractRequest {
                            url: request.url,
                            images: request.images,
                        },
                    );
                }
                Effect::ProbeHealth => self.engine.probe_health(),
            }
        }
    }
}

pub fn client_settings(config: &ServiceConfig) -> ClientSettings {
    ClientSettings {
        request_timeout: config.request_timeout,
        ..ClientSettings::new(config.extract_endpoint(), config.health_endpoint())
    }
}

/// Feeds engine completions back into the controller loop as core messages.
struct MsgSink {
    app_tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.app_tx.send(AppEvent::Engine(map_event(event)));
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ExtractionFinished { request_id, result } => {
            let outcome = match result {
                Ok(reply) => ExtractionOutcome::Replied {
                    http_status: reply.http_status,
                    body: map_body(reply.body),
                },
                Err(err) => {
                    fce_warn!("Extraction {} failed: {}", request_id, err);
                    ExtractionOutcome::TransportFailed {
                        reason: err.to_string(),
                    }
                }
            };
            Msg::ExtractionFinished {
                request_id,
                outcome,
            }
        }
        EngineEvent::HealthChecked { online } => Msg::HealthChecked { online },
    }
}

fn map_body(body: ExtractResponse) -> ReplyBody {
    ReplyBody {
        status: body.status,
        message: body.message,
        detail: body.detail,
        download_url: body.download_url,
        filename: body.filename,
        duration_seconds: body.duration_seconds,
    }
}
