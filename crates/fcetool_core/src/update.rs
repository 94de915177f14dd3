use crate::outcome::VALIDATION_MESSAGE;
use crate::{classify, AppState, Effect, ErrorKind, ExtractionRequest, Msg, ServiceStatus, UiState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            state.mark_dirty();
            if state.probe_health_enabled() {
                vec![Effect::ProbeHealth]
            } else {
                Vec::new()
            }
        }
        Msg::UrlEdited(url) => {
            if state.form_editable() {
                state.set_url(url);
            }
            Vec::new()
        }
        Msg::PartitionSelected(partition) => {
            if state.form_editable() {
                state.set_partition(partition.filter(|name| !name.is_empty()));
            }
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::NewExtractionClicked => {
            // No cancellation: the only way out of Loading is the in-flight reply.
            if !state.is_loading() {
                state.reset();
            }
            Vec::new()
        }
        Msg::ExtractionFinished {
            request_id,
            outcome,
        } => {
            let next = match state.in_flight() {
                Some((in_flight, images)) if in_flight == request_id => {
                    Some(classify(outcome, images))
                }
                _ => None,
            };
            if let Some(next) = next {
                state.set_ui(next);
            }
            Vec::new()
        }
        Msg::HealthChecked { online } => {
            state.set_service(if online {
                ServiceStatus::Online
            } else {
                ServiceStatus::Unreachable
            });
            Vec::new()
        }
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    if !state.form_editable() {
        return Vec::new();
    }

    let Some(images) = state.form().partition.clone() else {
        state.set_ui(UiState::Error {
            kind: ErrorKind::Generic,
            message: VALIDATION_MESSAGE.to_string(),
        });
        return Vec::new();
    };

    let request_id = state.next_request_id();
    let request = ExtractionRequest {
        url: state.form().url.clone(),
        images: images.clone(),
    };
    state.set_ui(UiState::Loading { request_id, images });
    vec![Effect::SubmitExtraction {
        request_id,
        request,
    }]
}
