pub(crate) mod filter;
pub(crate) mod pattern;
pub(crate) mod route;
pub(crate) mod statics;

use crate::action::{Action, BoxedAction, FnAction, Guard, Handler};
use crate::error::Error;
use crate::http::{BufferedSink, Context, Method, Request, Response, ResponseWriter, StatusCode};
use crate::serve::error;
use self::filter::{wildcard, ParamGate, PathGate};
use self::pattern::Pattern;
use self::route::Route;
use self::statics::StaticDir;
use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use std::time::Instant;

/// Registers routes to be matched and dispatches a handler.
///
/// Routes are tried in registration order and the first one whose method
/// and pattern both match the full request path wins; no attempt is made
/// to prefer more specific patterns, so callers order registrations from
/// most to least specific.
///
/// ```no_run
/// use futures::future::BoxFuture;
/// use routemux::{Context, Request, ResponseWriter, Router};
///
/// fn whoami<'a>(
///   w: &'a mut ResponseWriter,
///   _req: &'a mut Request,
///   ctx: &'a mut Context,
/// ) -> BoxFuture<'a, ()> {
///   Box::pin(async move {
///     let last = ctx.params.get("last").unwrap_or("");
///     let first = ctx.params.get("first").unwrap_or("");
///     w.write(format!("you are {} {}", first, last).as_bytes());
///   })
/// }
///
/// # fn main() -> Result<(), routemux::Error> {
/// let router = Router::new();
/// router.get("/:last/:first", whoami)?;
/// # Ok(())
/// # }
/// ```
pub struct Router {
  inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
  /// Routes to be matched, in registration order.
  routes: Vec<Arc<Route>>,

  /// Middleware filters, run in registration order once a route matches.
  filters: Vec<Arc<dyn Action>>,
}

impl Default for Router {
  fn default() -> Self {
    Router {
      inner: RwLock::new(Inner::default()),
    }
  }
}

impl Router {
  pub fn new() -> Router {
    Router::default()
  }

  /// Adds a new route for GET requests.
  pub fn get<H: Handler + 'static>(&self, pattern: &str, handler: H) -> Result<(), Error> {
    self.add_route(Method::GET, pattern, handler)
  }

  /// Adds a new route for PUT requests.
  pub fn put<H: Handler + 'static>(&self, pattern: &str, handler: H) -> Result<(), Error> {
    self.add_route(Method::PUT, pattern, handler)
  }

  /// Adds a new route for POST requests.
  pub fn post<H: Handler + 'static>(&self, pattern: &str, handler: H) -> Result<(), Error> {
    self.add_route(Method::POST, pattern, handler)
  }

  /// Adds a new route for PATCH requests.
  pub fn patch<H: Handler + 'static>(&self, pattern: &str, handler: H) -> Result<(), Error> {
    self.add_route(Method::PATCH, pattern, handler)
  }

  /// Adds a new route for DELETE requests.
  pub fn delete<H: Handler + 'static>(&self, pattern: &str, handler: H) -> Result<(), Error> {
    self.add_route(Method::DELETE, pattern, handler)
  }

  /// Compiles the pattern and appends a route for the given method.
  ///
  /// A malformed pattern or override sub-pattern fails here, at the
  /// registration call, never at request time.
  pub fn add_route<H: Handler + 'static>(
    &self,
    method: Method,
    pattern: &str,
    handler: H,
  ) -> Result<(), Error> {
    self.push(method, pattern, Box::new(FnAction(handler)), None)
  }

  /// Appends a route carrying an authorization predicate.
  ///
  /// The guard runs after parameter binding and before the filter chain.
  /// Returning false rejects the request with 401 Unauthorized, unless
  /// the guard already wrote a response of its own (e.g. a redirect), in
  /// which case that response stands.
  pub fn add_guarded<H, G>(
    &self,
    method: Method,
    pattern: &str,
    guard: G,
    handler: H,
  ) -> Result<(), Error>
  where
    H: Handler + 'static,
    G: Fn(&mut ResponseWriter, &Request, &Context) -> bool + Send + Sync + 'static,
  {
    self.push(method, pattern, Box::new(FnAction(handler)), Some(Box::new(guard)))
  }

  /// Serves files under `dir` for GET requests beginning with `prefix`.
  ///
  /// The remainder of the path is captured as a parameter and resolved
  /// against the directory; traversal outside it is rejected with 403.
  pub fn static_files(&self, prefix: &str, dir: impl Into<PathBuf>) -> Result<(), Error> {
    let mut pattern = prefix.to_owned();
    if !pattern.ends_with('/') {
      pattern.push('/');
    }
    pattern.push(':');
    pattern.push_str(statics::PARAM);
    pattern.push_str("(.+)");
    let action = Box::new(StaticDir { root: dir.into() });
    self.push(Method::GET, &pattern, action, None)
  }

  /// Appends a middleware filter.
  ///
  /// Filters run once per matched request, strictly in registration
  /// order, before the matched handler. A filter that starts the response
  /// stops all further processing; that is the only cancellation
  /// mechanism.
  pub fn filter<H: Handler + 'static>(&self, filter: H) {
    self
      .write_lock()
      .filters
      .push(Arc::new(FnAction(filter)));
  }

  /// Appends a filter that only runs when the named path parameter was
  /// bound non-empty for the matched route. A leading `:` on the name is
  /// accepted and stripped.
  pub fn filter_param<H: Handler + 'static>(&self, param: &str, filter: H) {
    let gate = ParamGate {
      param: param.trim_start_matches(':').to_owned(),
      inner: Box::new(FnAction(filter)),
    };
    self.write_lock().filters.push(Arc::new(gate));
  }

  /// Appends a filter that only runs when the raw request path matches
  /// the wildcard pattern, where a `*` matches one or more characters of
  /// any kind.
  pub fn filter_path<H: Handler + 'static>(&self, pattern: &str, filter: H) -> Result<(), Error> {
    let gate = PathGate {
      regex: wildcard(pattern)?,
      inner: Box::new(FnAction(filter)),
    };
    self.write_lock().filters.push(Arc::new(gate));
    Ok(())
  }

  fn push(
    &self,
    method: Method,
    pattern: &str,
    handler: BoxedAction,
    guard: Option<Guard>,
  ) -> Result<(), Error> {
    let pattern = Pattern::compile(pattern)?;
    tracing::debug!(
      method = %method,
      pattern = pattern.template(),
      params = ?pattern.param_names(),
      "registered route"
    );
    let route = Route {
      method,
      pattern,
      handler,
      guard,
    };
    self.write_lock().routes.push(Arc::new(route));
    Ok(())
  }

  /// Dispatches a single request and produces its response.
  ///
  /// The route table is iterated in order; the first route whose method
  /// and matcher both satisfy the request gets its parameters bound, its
  /// guard evaluated, the filter chain run, and its handler invoked.
  /// Exhausting the table yields 404 Not Found.
  pub async fn dispatch(&self, mut req: Request) -> Response {
    let begin = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let (routes, filters) = self.snapshot();
    let mut w = ResponseWriter::new(BufferedSink::default());
    let mut ctx = Context::new();
    let mut matched = false;

    'table: for route in &routes {
      if !route.matches(&method, &path, &mut ctx) {
        continue;
      }
      matched = true;

      if let Some(guard) = &route.guard {
        let allowed = guard(&mut w, &req, &ctx);
        if !allowed && !w.started() {
          error(&mut w, StatusCode::UNAUTHORIZED);
        }
        // whatever the guard wrote is authoritative
        if !allowed || w.started() {
          break 'table;
        }
      }

      for f in &filters {
        f.call(&mut w, &mut req, &mut ctx).await;
        if w.started() {
          break 'table;
        }
      }

      route.handler.call(&mut w, &mut req, &mut ctx).await;
      break 'table;
    }

    if !matched && !w.started() {
      error(&mut w, StatusCode::NOT_FOUND);
    }

    let bytes = w.state().bytes_written();
    let response = w.into_response();

    // observability only; the response above is already complete
    tracing::info!(
      method = %method,
      path = %path,
      status = response.status().as_u16(),
      bytes,
      matched,
      elapsed_ms = begin.elapsed().as_millis() as u64,
      "dispatched request"
    );

    response
  }

  /// Clones the current table under the read lock and releases it before
  /// any handler runs, so matching is a pure function of the snapshot and
  /// dispatch never blocks registration.
  fn snapshot(&self) -> (Vec<Arc<Route>>, Vec<Arc<dyn Action>>) {
    let inner = match self.inner.read() {
      Ok(guard) => guard,
      Err(poisoned) => poisoned.into_inner(),
    };
    (inner.routes.clone(), inner.filters.clone())
  }

  fn write_lock(&self) -> RwLockWriteGuard<'_, Inner> {
    match self.inner.write() {
      Ok(guard) => guard,
      Err(poisoned) => poisoned.into_inner(),
    }
  }
}
