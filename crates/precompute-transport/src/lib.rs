//! Precompute Transport
//!
//! Network capabilities used by the pre-compute stage:
//!
//! - [`Fetcher`]: download a URL, either whole or as a [`ByteStream`]
//! - [`WorkerApi`]: report the exit cause of a failed run to the worker
//!
//! Both are traits so the pipeline can be driven by in-memory fakes. The
//! reqwest-backed implementations are [`HttpFetcher`] and [`WorkerApiClient`].
//! Timeouts are whatever the underlying client is configured with.

mod error;
mod fetch;
mod worker_api;

pub use error::TransportError;
pub use fetch::{Fetcher, HttpFetcher};
pub use precompute_artifact::ByteStream;
pub use worker_api::{DEFAULT_WORKER_API_URL, WorkerApi, WorkerApiClient};
