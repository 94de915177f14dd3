//! fcetool engine: the extraction service client and effect execution.
mod client;
mod engine;
mod types;

pub use client::{ClientSettings, ExtractionClient, ReqwestExtractionClient};
pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use types::{
    ClientError, EngineEvent, ExtractRequest, ExtractResponse, RequestId, ServiceReply,
};
