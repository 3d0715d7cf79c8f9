use thiserror::Error;

/// Errors surfaced by the router.
///
/// Only pattern errors are raised to the caller, at the registration call
/// that produced them. Everything request-scoped is reported through HTTP
/// status responses instead; the router never halts the process.
#[derive(Debug, Error)]
pub enum Error {
  /// A route or filter pattern failed to compile. A broken route is worse
  /// than a rejected one, so this is returned immediately at registration
  /// and never deferred to request time.
  #[error("invalid pattern {pattern:?}: {source}")]
  Pattern {
    pattern: String,
    #[source]
    source: regex::Error,
  },

  /// The underlying hyper server failed to bind or serve.
  #[error(transparent)]
  Server(#[from] hyper::Error),

  /// The request body could not be read from the transport.
  #[error("failed to read request body: {0}")]
  Body(#[source] hyper::Error),

  /// The request body was not valid JSON.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// The request body was not valid XML.
  #[error(transparent)]
  Xml(#[from] quick_xml::DeError),
}
