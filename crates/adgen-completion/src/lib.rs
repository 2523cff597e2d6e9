//! HTTP client for the external text-completion backend.
//!
//! The backend is consumed as a black box: given a prompt and parameters it
//! returns text, either synchronously (`200` + text) or as an asynchronous
//! backend job (`202` + job id) that this crate polls with backoff, jitter,
//! a hard deadline, and cooperative cancellation. Transient failures are
//! retried; quota and parse failures are hard stops.

mod client;
mod error;
mod poll;
mod retry;
mod types;

pub use client::CompletionClient;
pub use error::CompletionError;
pub use types::{CompletionContext, CompletionRequest, PollObserver, PollPolicy};
