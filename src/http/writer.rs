use crate::http::{HeaderMap, HeaderName, HeaderValue, Response, StatusCode};
use bytes::BytesMut;
use hyper::Body;

/// The capability surface of an outbound response channel: a status line,
/// header fields, and an appendable body.
pub trait ResponseSink: Send {
  fn set_status(&mut self, status: StatusCode);
  fn insert_header(&mut self, name: HeaderName, value: HeaderValue);
  fn append_header(&mut self, name: HeaderName, value: HeaderValue);
  fn write(&mut self, data: &[u8]);
}

/// A response accumulated in memory, converted into a hyper response once
/// the dispatch pipeline finishes.
pub struct BufferedSink {
  status: StatusCode,
  headers: HeaderMap,
  body: BytesMut,
}

impl Default for BufferedSink {
  fn default() -> Self {
    Self {
      status: StatusCode::OK,
      headers: HeaderMap::new(),
      body: BytesMut::new(),
    }
  }
}

impl ResponseSink for BufferedSink {
  fn set_status(&mut self, status: StatusCode) {
    self.status = status;
  }

  fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
    self.headers.insert(name, value);
  }

  fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
    self.headers.append(name, value);
  }

  fn write(&mut self, data: &[u8]) {
    self.body.extend_from_slice(data);
  }
}

impl BufferedSink {
  pub fn into_response(self) -> Response {
    let mut response = hyper::Response::new(Body::from(self.body.freeze()));
    *response.status_mut() = self.status;
    *response.headers_mut() = self.headers;
    response
  }
}

/// Observations recorded by [`ResponseWriter`] as the response is built.
///
/// `started` flips to true on the first status or body write and never
/// reverts; it is the sole signal the dispatcher uses to decide whether to
/// keep processing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseState {
  started: bool,
  status: Option<StatusCode>,
  bytes_written: u64,
}

impl ResponseState {
  pub fn started(&self) -> bool {
    self.started
  }

  /// The last status code explicitly set, if any.
  pub fn status(&self) -> Option<StatusCode> {
    self.status
  }

  pub fn bytes_written(&self) -> u64 {
    self.bytes_written
  }
}

/// A tracking decorator around a response sink.
///
/// Every operation is forwarded to the wrapped sink while the writer
/// records whether the response has started, the status code, and the
/// running byte count. Handlers and filters terminate a request simply by
/// writing to it; there is no separate abort signal.
pub struct ResponseWriter<S: ResponseSink = BufferedSink> {
  sink: S,
  state: ResponseState,
}

impl<S: ResponseSink> ResponseWriter<S> {
  pub fn new(sink: S) -> Self {
    Self {
      sink,
      state: ResponseState::default(),
    }
  }

  pub fn state(&self) -> &ResponseState {
    &self.state
  }

  pub fn started(&self) -> bool {
    self.state.started
  }

  /// Sets the response status and marks the response as started. The sink
  /// only ever receives the first status set; later calls are recorded in
  /// the state but not forwarded.
  pub fn set_status(&mut self, status: StatusCode) {
    if !self.state.started {
      self.sink.set_status(status);
    }
    self.state.status = Some(status);
    self.state.started = true;
  }

  /// Sets a header field. Headers do not start the response.
  pub fn header(&mut self, name: HeaderName, value: HeaderValue) {
    self.sink.insert_header(name, value);
  }

  /// Appends a header field without replacing existing values.
  pub fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
    self.sink.append_header(name, value);
  }

  /// Appends body bytes and marks the response as started.
  pub fn write(&mut self, data: &[u8]) {
    self.state.started = true;
    self.state.bytes_written += data.len() as u64;
    self.sink.write(data);
  }
}

impl<S: ResponseSink> ResponseSink for ResponseWriter<S> {
  fn set_status(&mut self, status: StatusCode) {
    ResponseWriter::set_status(self, status)
  }

  fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
    ResponseWriter::header(self, name, value)
  }

  fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
    ResponseWriter::append_header(self, name, value)
  }

  fn write(&mut self, data: &[u8]) {
    ResponseWriter::write(self, data)
  }
}

impl Default for ResponseWriter {
  fn default() -> Self {
    ResponseWriter::new(BufferedSink::default())
  }
}

impl ResponseWriter {
  /// Consumes the writer and produces the buffered hyper response.
  pub fn into_response(self) -> Response {
    self.sink.into_response()
  }
}
