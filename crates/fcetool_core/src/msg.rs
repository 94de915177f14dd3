#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Front-end finished drawing the initial page.
    Started,
    /// User edited the firmware URL field.
    UrlEdited(String),
    /// User picked a partition; `None` clears the selection.
    PartitionSelected(Option<String>),
    /// User submitted the form.
    SubmitClicked,
    /// User clicked "start new extraction".
    NewExtractionClicked,
    /// Engine completion for a submitted extraction.
    ExtractionFinished {
        request_id: crate::RequestId,
        outcome: crate::ExtractionOutcome,
    },
    /// Engine reply to the startup health probe.
    HealthChecked { online: bool },
}
