use fcetool_core::{AppViewModel, ServiceStatus, Tone};

use super::constants::*;
use super::display_name;

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    match view.service {
        ServiceStatus::Unknown => {}
        ServiceStatus::Online => lines.push("Service: online".to_string()),
        ServiceStatus::Unreachable => lines.push("Service: unreachable".to_string()),
    }

    if view.form_visible {
        let url = if view.url.is_empty() {
            "(empty)"
        } else {
            view.url.as_str()
        };
        let partition = view
            .selected_partition
            .as_deref()
            .map(display_name)
            .unwrap_or("(none)");
        lines.push(format!("URL:       {url}"));
        lines.push(format!("Partition: {partition}"));
        if view.submit_enabled {
            lines.push(format!("[ {} ]", view.submit_label));
        } else {
            lines.push(format!("[ {} ] (busy)", view.submit_label));
        }
    }

    if let Some(status) = &view.status {
        lines.push(format!("{} {}", tone_tag(status.tone), status.text));
    }

    if let Some(download) = &view.download {
        if let Some(label) = download.status_label {
            lines.push(format!("Status:    {label}"));
        }
        lines.push(format!("Filename:  {}", download.filename));
        lines.push(format!("Duration:  {}", download.duration_text));
        lines.push(format!("Download:  {}", download.download_url));
        lines.push(format!("Type `{CMD_NEW}` to start a new extraction."));
    }

    lines
}

pub fn render_partitions(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.partitions.len() + 1);
    lines.push("Partition images:".to_string());
    for (index, name) in view.partitions.iter().enumerate() {
        lines.push(format!("  {:>2}. {}", index + 1, display_name(name)));
    }
    lines
}

fn tone_tag(tone: Tone) -> &'static str {
    match tone {
        Tone::Info => TAG_INFO,
        Tone::Success => TAG_SUCCESS,
        Tone::Warning => TAG_WARNING,
        Tone::Error => TAG_ERROR,
    }
}
