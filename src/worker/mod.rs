//! Background worker for photo file reads.
//!
//! Reading and encoding an image is the only slow operation in the plugin, so
//! it runs on Zellij's worker thread and reports back over JSON IPC.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Message processing on the worker side

pub mod handler;
pub mod messages;

pub use handler::ContactsWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
