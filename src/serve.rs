//! Helper functions that replace the boilerplate of serializing resources
//! and writing them to the response.

use crate::error::Error;
use crate::http::{header, HeaderValue, Request, ResponseSink, ResponseWriter, StatusCode};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;

// commonly used mime-types
const APPLICATION_JSON: &str = "application/json";
const APPLICATION_XML: &str = "application/xml";
const TEXT_XML: &str = "text/xml";

/// Replies to the request with a JSON representation of resource `v`.
/// A serialization failure is reported as a 500, never a panic.
pub fn serve_json<S, T>(w: &mut ResponseWriter<S>, v: &T)
where
  S: ResponseSink,
  T: Serialize,
{
  match serde_json::to_vec(v) {
    Ok(content) => {
      w.header(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
      w.header(header::CONTENT_LENGTH, HeaderValue::from(content.len() as u64));
      w.write(&content);
    }
    Err(_) => error(w, StatusCode::INTERNAL_SERVER_ERROR),
  }
}

/// Replies to the request with an XML representation of resource `v`.
pub fn serve_xml<S, T>(w: &mut ResponseWriter<S>, v: &T)
where
  S: ResponseSink,
  T: Serialize,
{
  match quick_xml::se::to_string(v) {
    Ok(content) => {
      w.header(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/xml; charset=utf-8"),
      );
      w.header(header::CONTENT_LENGTH, HeaderValue::from(content.len() as u64));
      w.write(content.as_bytes());
    }
    Err(_) => error(w, StatusCode::INTERNAL_SERVER_ERROR),
  }
}

/// Replies in the format requested by the client's `Accept` header: XML
/// for the XML mime types, JSON for `application/json`, an absent or
/// wildcard header, and anything else.
pub fn serve_formatted<S, T>(w: &mut ResponseWriter<S>, req: &Request, v: &T)
where
  S: ResponseSink,
  T: Serialize,
{
  let accept = req
    .headers()
    .get(header::ACCEPT)
    .and_then(|value| value.to_str().ok())
    .unwrap_or("");
  if accept.contains(APPLICATION_XML) || accept.contains(TEXT_XML) {
    serve_xml(w, v)
  } else {
    serve_json(w, v)
  }
}

/// Eager JSON writer: gzips the payload when the client's
/// `Accept-Encoding` advertises gzip support.
pub fn serve_json_encoded<S, T>(w: &mut ResponseWriter<S>, req: &Request, v: &T)
where
  S: ResponseSink,
  T: Serialize,
{
  let content = match serde_json::to_vec(v) {
    Ok(content) => content,
    Err(_) => return error(w, StatusCode::INTERNAL_SERVER_ERROR),
  };
  w.header(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));

  if !accepts_gzip(req) {
    w.header(header::CONTENT_LENGTH, HeaderValue::from(content.len() as u64));
    w.write(&content);
    return;
  }

  let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
  if encoder.write_all(&content).is_err() {
    return error(w, StatusCode::INTERNAL_SERVER_ERROR);
  }
  match encoder.finish() {
    Ok(compressed) => {
      w.header(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
      w.header(
        header::CONTENT_LENGTH,
        HeaderValue::from(compressed.len() as u64),
      );
      w.write(&compressed);
    }
    Err(_) => error(w, StatusCode::INTERNAL_SERVER_ERROR),
  }
}

fn accepts_gzip(req: &Request) -> bool {
  req
    .headers()
    .get(header::ACCEPT_ENCODING)
    .and_then(|value| value.to_str().ok())
    .map_or(false, |value| value.contains("gzip"))
}

/// Reads the request body and parses it as JSON into `T`.
pub async fn read_json<T: DeserializeOwned>(req: &mut Request) -> Result<T, Error> {
  let body = std::mem::take(req.body_mut());
  let bytes = hyper::body::to_bytes(body).await.map_err(Error::Body)?;
  serde_json::from_slice(&bytes).map_err(Error::from)
}

/// Reads the request body and parses it as XML into `T`.
pub async fn read_xml<T: DeserializeOwned>(req: &mut Request) -> Result<T, Error> {
  let body = std::mem::take(req.body_mut());
  let bytes = hyper::body::to_bytes(body).await.map_err(Error::Body)?;
  quick_xml::de::from_reader(bytes.as_ref()).map_err(Error::from)
}

/// Terminates the request with the given status code, writing the
/// canonical reason phrase as the body.
pub fn error<S: ResponseSink>(w: &mut ResponseWriter<S>, code: StatusCode) {
  w.set_status(code);
  w.write(code.canonical_reason().unwrap_or("").as_bytes());
}
