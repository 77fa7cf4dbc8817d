//! Side effects emitted by the event handler.
//!
//! The handler never talks to Zellij directly. It returns a `Vec<Action>` and
//! the plugin shim executes each one in order.

use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user presses `q` in the list.
    CloseFocus,

    /// Posts a message to the background worker thread.
    ///
    /// Used for photo reads so file I/O never blocks the render loop.
    PostToWorker(WorkerMessage),
}
