use crate::http::writer::{ResponseSink, ResponseWriter};
use crate::http::Request;
use cookie::Cookie;
use http::header::{COOKIE, SET_COOKIE};
use http::HeaderValue;

/// Parses all cookies sent with the request. Malformed pairs are skipped.
pub fn cookies(req: &Request) -> Vec<Cookie<'static>> {
  let mut parsed = Vec::new();
  for header in req.headers().get_all(COOKIE) {
    let raw = match header.to_str() {
      Ok(raw) => raw,
      Err(_) => continue,
    };
    for piece in raw.split(';') {
      if let Ok(cookie) = Cookie::parse(piece.trim().to_owned()) {
        parsed.push(cookie);
      }
    }
  }
  parsed
}

/// Returns the named request cookie, if present.
pub fn get_cookie(req: &Request, name: &str) -> Option<Cookie<'static>> {
  cookies(req).into_iter().find(|cookie| cookie.name() == name)
}

/// Adds a `Set-Cookie` header for the given cookie. Setting a cookie does
/// not start the response.
pub fn set_cookie<S: ResponseSink>(w: &mut ResponseWriter<S>, cookie: &Cookie) {
  if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
    w.append_header(SET_COOKIE, value);
  }
}

/// Instructs the client to delete the cookie with the given name.
pub fn clear_cookie<S: ResponseSink>(w: &mut ResponseWriter<S>, name: &str) {
  let cookie = Cookie::build(name.to_owned(), "").path("/").finish();
  if let Ok(value) = HeaderValue::from_str(&format!("{}; Max-Age=0", cookie)) {
    w.append_header(SET_COOKIE, value);
  }
}
