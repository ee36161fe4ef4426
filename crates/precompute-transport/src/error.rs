use thiserror::Error;

/// Errors raised by the network capabilities.
#[derive(Debug, Error)]
pub enum TransportError {
  /// The request could not be sent, or the server answered with an error status.
  #[error("request failed: {0}")]
  Request(#[from] reqwest::Error),

  /// A URL could not be built.
  #[error("invalid url {url}: {message}")]
  InvalidUrl { url: String, message: String },

  /// The worker API answered the exit report with a non-success status.
  #[error("worker api rejected the exit report with status {status}")]
  Rejected { status: u16 },
}
