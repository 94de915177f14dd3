use std::sync::Once;

use fcetool_core::{
    update, AppState, Effect, ErrorKind, ExtractionOutcome, ExtractionRequest, Msg, ReplyBody,
    ServiceConfig, ServiceStatus, Tone, UiState, NETWORK_ERROR_MESSAGE, SUBMIT_LABEL_BUSY,
    SUBMIT_LABEL_IDLE, VALIDATION_MESSAGE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(fcetool_logging::initialize_for_tests);
}

fn fill_form(state: AppState, url: &str, partition: Option<&str>) -> AppState {
    let (state, _) = update(state, Msg::UrlEdited(url.to_string()));
    let (state, _) = update(state, Msg::PartitionSelected(partition.map(str::to_string)));
    state
}

fn submit(state: AppState, url: &str, partition: &str) -> (AppState, Vec<Effect>) {
    let state = fill_form(state, url, Some(partition));
    update(state, Msg::SubmitClicked)
}

fn finish(state: AppState, request_id: u64, http_status: u16, body: ReplyBody) -> AppState {
    let (state, effects) = update(
        state,
        Msg::ExtractionFinished {
            request_id,
            outcome: ExtractionOutcome::Replied { http_status, body },
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn started_populates_partitions_and_probes_health() {
    init_logging();
    let (mut state, effects) = update(AppState::default(), Msg::Started);

    assert_eq!(effects, vec![Effect::ProbeHealth]);
    assert!(state.consume_dirty());
    let view = state.view();
    assert_eq!(view.partitions, ServiceConfig::default().images);
    assert!(view.form_visible);
    assert!(view.submit_enabled);
    assert_eq!(view.submit_label, SUBMIT_LABEL_IDLE);
    assert_eq!(view.status, None);
    assert_eq!(view.download, None);
}

#[test]
fn started_skips_probe_when_disabled() {
    let config = ServiceConfig {
        probe_health: false,
        images: vec!["boot.img".to_string()],
        ..ServiceConfig::default()
    };
    let (state, effects) = update(AppState::new(&config), Msg::Started);

    assert!(effects.is_empty());
    assert_eq!(state.view().partitions, vec!["boot.img".to_string()]);
}

#[test]
fn submit_without_partition_fails_validation_without_effects() {
    init_logging();
    let state = fill_form(AppState::default(), "http://x/fw.bin", None);
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(
        state.ui(),
        &UiState::Error {
            kind: ErrorKind::Generic,
            message: VALIDATION_MESSAGE.to_string(),
        }
    );
    let status = state.view().status.unwrap();
    assert_eq!(status.tone, Tone::Error);
    assert!(state.view().submit_enabled);
}

#[test]
fn empty_partition_name_counts_as_unselected() {
    let state = fill_form(AppState::default(), "http://x/fw.bin", Some(""));
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert!(matches!(state.ui(), UiState::Error { .. }));
}

#[test]
fn submit_enters_loading_and_emits_single_request() {
    init_logging();
    let (state, effects) = submit(AppState::default(), "http://x/fw.bin", "boot.img");

    assert_eq!(
        effects,
        vec![Effect::SubmitExtraction {
            request_id: 1,
            request: ExtractionRequest {
                url: "http://x/fw.bin".to_string(),
                images: "boot.img".to_string(),
            },
        }]
    );
    let view = state.view();
    assert!(!view.submit_enabled);
    assert!(!view.inputs_enabled);
    assert_eq!(view.submit_label, SUBMIT_LABEL_BUSY);
    assert!(view.form_visible);
    assert_eq!(view.status, None);
}

#[test]
fn url_is_not_validated_locally() {
    let (_state, effects) = submit(AppState::default(), "", "boot.img");
    assert_eq!(effects.len(), 1);
}

#[test]
fn submit_and_edits_are_ignored_while_loading() {
    let (state, _) = submit(AppState::default(), "http://x/fw.bin", "boot.img");
    let before = state.clone();

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    let (state, _) = update(state, Msg::UrlEdited("http://y".to_string()));
    let (state, _) = update(state, Msg::NewExtractionClicked);

    assert_eq!(state, before);
}

#[test]
fn completed_reply_shows_download_section() {
    init_logging();
    let (state, _) = submit(AppState::default(), "http://x/fw.bin", "boot.img");
    let state = finish(
        state,
        1,
        200,
        ReplyBody {
            status: Some("completed".to_string()),
            message: Some("Done".to_string()),
            download_url: Some("http://x/out.img".to_string()),
            filename: Some("boot_extracted.img".to_string()),
            duration_seconds: Some(12.0),
            ..ReplyBody::default()
        },
    );

    let view = state.view();
    assert!(!view.form_visible);
    assert!(view.submit_enabled);
    assert_eq!(view.submit_label, SUBMIT_LABEL_IDLE);
    let status = view.status.unwrap();
    assert_eq!(status.text, "Done");
    assert_eq!(status.tone, Tone::Success);
    let download = view.download.unwrap();
    assert_eq!(download.status_label, Some("Extraction completed"));
    assert_eq!(download.download_url, "http://x/out.img");
    assert_eq!(download.filename, "boot_extracted.img");
    assert_eq!(download.duration_text, "12s");
}

#[test]
fn cached_reply_uses_info_tone() {
    let (state, _) = submit(AppState::default(), "http://x/fw.bin", "dtbo.img");
    let state = finish(
        state,
        1,
        200,
        ReplyBody {
            status: Some("cached".to_string()),
            message: Some("File already exists in dataset (from cache)".to_string()),
            download_url: Some("http://hf/dtbo.img".to_string()),
            filename: Some("dtbo.img".to_string()),
            duration_seconds: Some(0.0),
            ..ReplyBody::default()
        },
    );

    let view = state.view();
    assert_eq!(view.status.unwrap().tone, Tone::Info);
    let download = view.download.unwrap();
    assert_eq!(download.status_label, Some("Retrieved from cache"));
    assert_eq!(download.duration_text, "0s");
}

#[test]
fn unknown_success_status_shows_download_without_notice() {
    let (state, _) = submit(AppState::default(), "http://x/fw.bin", "boot.img");
    let state = finish(
        state,
        1,
        201,
        ReplyBody {
            status: Some("queued".to_string()),
            download_url: Some("http://x/out.img".to_string()),
            ..ReplyBody::default()
        },
    );

    let view = state.view();
    assert_eq!(view.status, None);
    let download = view.download.unwrap();
    assert_eq!(download.status_label, None);
    assert_eq!(download.filename, "boot.img");
    assert_eq!(download.duration_text, "0s");
}

#[test]
fn rate_limited_reply_is_a_warning() {
    let (state, _) = submit(AppState::default(), "http://x/fw.bin", "boot.img");
    let state = finish(
        state,
        1,
        429,
        ReplyBody {
            message: Some("Too many requests".to_string()),
            ..ReplyBody::default()
        },
    );

    assert_eq!(
        state.ui(),
        &UiState::Error {
            kind: ErrorKind::RateLimited,
            message: "Too many requests".to_string(),
        }
    );
    let view = state.view();
    assert_eq!(view.status.unwrap().tone, Tone::Warning);
    assert!(view.form_visible);
    assert_eq!(view.download, None);
}

#[test]
fn capacity_detail_is_a_warning() {
    let (state, _) = submit(AppState::default(), "http://x/fw.bin", "boot.img");
    let state = finish(
        state,
        1,
        503,
        ReplyBody {
            detail: Some("server at capacity".to_string()),
            ..ReplyBody::default()
        },
    );

    assert_eq!(
        state.ui(),
        &UiState::Error {
            kind: ErrorKind::Capacity,
            message: "server at capacity".to_string(),
        }
    );
    assert_eq!(state.view().status.unwrap().tone, Tone::Warning);
}

#[test]
fn transport_failure_clears_loading_with_network_message() {
    init_logging();
    let (state, _) = submit(AppState::default(), "http://x/fw.bin", "boot.img");
    let (state, effects) = update(
        state,
        Msg::ExtractionFinished {
            request_id: 1,
            outcome: ExtractionOutcome::TransportFailed {
                reason: "dns error".to_string(),
            },
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.submit_enabled);
    assert_eq!(view.submit_label, SUBMIT_LABEL_IDLE);
    let status = view.status.unwrap();
    assert_eq!(status.text, NETWORK_ERROR_MESSAGE);
    assert_eq!(status.tone, Tone::Error);
}

#[test]
fn stale_completion_is_ignored() {
    let (state, _) = submit(AppState::default(), "http://x/fw.bin", "boot.img");
    let before = state.clone();
    let state = finish(state, 99, 200, ReplyBody::default());

    assert_eq!(state, before);
}

#[test]
fn resubmit_after_error_uses_a_new_request_id() {
    let (state, _) = submit(AppState::default(), "http://x/fw.bin", "boot.img");
    let state = finish(state, 1, 500, ReplyBody::default());
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(matches!(
        effects.as_slice(),
        [Effect::SubmitExtraction { request_id: 2, .. }]
    ));
    assert!(state.is_loading());
}

#[test]
fn submit_is_ignored_while_success_is_displayed() {
    let (state, _) = submit(AppState::default(), "http://x/fw.bin", "boot.img");
    let state = finish(
        state,
        1,
        200,
        ReplyBody {
            status: Some("completed".to_string()),
            ..ReplyBody::default()
        },
    );
    let (_state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
}

#[test]
fn reset_returns_to_idle_view_from_every_terminal_state() {
    init_logging();
    let (idle, _) = update(AppState::default(), Msg::Started);
    let idle_view = idle.view();

    let replies = [
        (200, Some("completed"), None),
        (200, Some("cached"), None),
        (429, None, Some("slow down")),
        (503, None, Some("at capacity")),
        (500, None, None),
    ];
    for (http_status, status, message) in replies {
        let (state, _) = submit(idle.clone(), "http://x/fw.bin", "boot.img");
        let state = finish(
            state,
            1,
            http_status,
            ReplyBody {
                status: status.map(str::to_string),
                message: message.map(str::to_string),
                ..ReplyBody::default()
            },
        );
        let (mut state, effects) = update(state, Msg::NewExtractionClicked);

        assert!(effects.is_empty());
        assert!(state.consume_dirty());
        assert_eq!(state.ui(), &UiState::Idle);
        let view = state.view();
        assert_eq!(view.url, "");
        assert_eq!(view.selected_partition, None);
        assert_eq!(view.status, None);
        assert_eq!(view.download, None);
        assert_eq!(view.form_visible, idle_view.form_visible);
        assert_eq!(view.submit_label, idle_view.submit_label);
    }

    // Validation errors reset the same way.
    let state = fill_form(idle.clone(), "http://x", None);
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(state, Msg::NewExtractionClicked);
    assert_eq!(state.ui(), &UiState::Idle);
    assert_eq!(state.view().url, "");
}

#[test]
fn health_probe_never_changes_ui_state() {
    let (state, _) = submit(AppState::default(), "http://x/fw.bin", "boot.img");
    let ui_before = state.ui().clone();

    let (state, effects) = update(state, Msg::HealthChecked { online: false });
    assert!(effects.is_empty());
    assert_eq!(state.ui(), &ui_before);
    assert_eq!(state.view().service, ServiceStatus::Unreachable);

    let (state, _) = update(state, Msg::HealthChecked { online: true });
    assert_eq!(state.service(), ServiceStatus::Online);
}

#[test]
fn unchanged_edits_do_not_mark_dirty() {
    let (mut state, _) = update(AppState::default(), Msg::UrlEdited("http://a".to_string()));
    assert!(state.consume_dirty());
    let (mut state, _) = update(state, Msg::UrlEdited("http://a".to_string()));
    assert!(!state.consume_dirty());
}
