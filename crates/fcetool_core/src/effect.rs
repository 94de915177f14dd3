use crate::RequestId;

/// Body of one extraction call: a firmware URL and a single partition name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub url: String,
    pub images: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitExtraction {
        request_id: RequestId,
        request: ExtractionRequest,
    },
    ProbeHealth,
}
