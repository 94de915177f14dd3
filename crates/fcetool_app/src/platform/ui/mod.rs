pub mod constants;
pub mod input;
pub mod render;
pub mod terminal;

use fcetool_core::AppViewModel;

/// A surface the controller can draw on.
///
/// User actions reach the controller as input lines (see [`input`]); the
/// surface itself only renders.
pub trait ExtractorUi {
    fn render(&mut self, view: &AppViewModel);

    /// Out-of-band text such as help or input hints. Never touches state.
    fn notice(&mut self, lines: &[String]);
}

/// Partition name as shown to and typed by the user, without bidi marks.
pub fn display_name(name: &str) -> &str {
    name.trim_end_matches('\u{200e}')
}
