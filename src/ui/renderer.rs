//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute a [`UIViewModel`] from `AppState`, then
//! hand it to the component layer. Nothing here clears the screen; Zellij
//! redraws the pane from what is printed.
//!
//! [`UIViewModel`]: crate::ui::viewmodel::UIViewModel

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for a pane of `rows` x `cols`.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows = rows, cols = cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_screen(&viewmodel, &state.theme, rows, cols);
}
