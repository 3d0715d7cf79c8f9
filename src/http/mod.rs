mod context;
mod cookies;
mod writer;

#[doc(inline)]
pub use context::{Context, Params, Values};

#[doc(inline)]
pub use cookies::{clear_cookie, cookies, get_cookie, set_cookie};

#[doc(inline)]
pub use writer::{BufferedSink, ResponseSink, ResponseState, ResponseWriter};

#[doc(inline)]
pub use http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};

/// The type of an incoming web request.
pub type Request = hyper::Request<hyper::Body>;

/// An outbound HTTP response.
pub type Response = hyper::Response<hyper::Body>;
