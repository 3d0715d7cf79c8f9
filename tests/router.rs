use futures::future::BoxFuture;
use hyper::Body;
use routemux::http::{header, HeaderValue, Method, StatusCode};
use routemux::serve::error;
use routemux::{Context, Request, Response, ResponseWriter, Router};

fn handler_ok<'a>(
  w: &'a mut ResponseWriter,
  _req: &'a mut Request,
  _ctx: &'a mut Context,
) -> BoxFuture<'a, ()> {
  Box::pin(async move {
    w.write(b"hello world");
  })
}

fn handler_err<'a>(
  w: &'a mut ResponseWriter,
  _req: &'a mut Request,
  _ctx: &'a mut Context,
) -> BoxFuture<'a, ()> {
  Box::pin(async move {
    error(w, StatusCode::BAD_REQUEST);
  })
}

fn handler_whoami<'a>(
  w: &'a mut ResponseWriter,
  _req: &'a mut Request,
  ctx: &'a mut Context,
) -> BoxFuture<'a, ()> {
  Box::pin(async move {
    let last = ctx.params.get("last").unwrap_or("").to_owned();
    let first = ctx.params.get("first").unwrap_or("").to_owned();
    w.write(format!("you are {} {}", first, last).as_bytes());
  })
}

fn handler_file<'a>(
  w: &'a mut ResponseWriter,
  _req: &'a mut Request,
  ctx: &'a mut Context,
) -> BoxFuture<'a, ()> {
  Box::pin(async move {
    let file = ctx.params.get("file").unwrap_or("").to_owned();
    w.write(file.as_bytes());
  })
}

fn handler_name<'a>(
  w: &'a mut ResponseWriter,
  _req: &'a mut Request,
  ctx: &'a mut Context,
) -> BoxFuture<'a, ()> {
  Box::pin(async move {
    let name = ctx.params.get("name").unwrap_or("").to_owned();
    w.write(name.as_bytes());
  })
}

fn handler_first<'a>(
  w: &'a mut ResponseWriter,
  _req: &'a mut Request,
  _ctx: &'a mut Context,
) -> BoxFuture<'a, ()> {
  Box::pin(async move {
    w.write(b"first");
  })
}

fn handler_second<'a>(
  w: &'a mut ResponseWriter,
  _req: &'a mut Request,
  _ctx: &'a mut Context,
) -> BoxFuture<'a, ()> {
  Box::pin(async move {
    w.write(b"second");
  })
}

fn handler_query<'a>(
  w: &'a mut ResponseWriter,
  req: &'a mut Request,
  ctx: &'a mut Context,
) -> BoxFuture<'a, ()> {
  Box::pin(async move {
    let query = req.uri().query().unwrap_or("").to_owned();
    let param = ctx.params.get("param").unwrap_or("").to_owned();
    w.write(format!("param={} query={}", param, query).as_bytes());
  })
}

fn filter_set_password<'a>(
  _w: &'a mut ResponseWriter,
  _req: &'a mut Request,
  ctx: &'a mut Context,
) -> BoxFuture<'a, ()> {
  Box::pin(async move {
    ctx.values.set("password", String::from("z1on"));
  })
}

fn handler_show_password<'a>(
  w: &'a mut ResponseWriter,
  _req: &'a mut Request,
  ctx: &'a mut Context,
) -> BoxFuture<'a, ()> {
  Box::pin(async move {
    let password = ctx
      .values
      .get::<String>("password")
      .cloned()
      .unwrap_or_default();
    w.write(password.as_bytes());
  })
}

fn request(method: Method, uri: &str) -> Request {
  hyper::Request::builder()
    .method(method)
    .uri(uri)
    .body(Body::empty())
    .unwrap()
}

async fn body(response: Response) -> String {
  let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
  String::from_utf8(bytes.to_vec()).unwrap()
}

// The route is handled and the URL parameters are bound into the context,
// out of band from the query string.
#[tokio::test]
async fn route_ok() {
  let router = Router::new();
  router.get("/person/:last/:first", handler_whoami).unwrap();

  let response = router
    .dispatch(request(Method::GET, "/person/anderson/thomas?learn=kungfu"))
    .await;
  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(body(response).await, "you are thomas anderson");
}

// A match must span the entire path, not merely a prefix.
#[tokio::test]
async fn route_must_match_full_path() {
  let router = Router::new();
  router.get("/person/:last/:first", handler_whoami).unwrap();

  let response = router
    .dispatch(request(Method::GET, "/person/anderson/thomas/extra"))
    .await;
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// A custom sub-pattern may capture across slashes.
#[tokio::test]
async fn route_override_capture() {
  let router = Router::new();
  router.get("/files/:file(.+)", handler_file).unwrap();

  let response = router
    .dispatch(request(Method::GET, "/files/a/b/c.txt"))
    .await;
  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(body(response).await, "a/b/c.txt");
}

// A route only answers its registered method.
#[tokio::test]
async fn route_method_exclusive() {
  let router = Router::new();
  router.delete("/person/:last/:first", handler_ok).unwrap();

  let response = router
    .dispatch(request(Method::GET, "/person/anderson/thomas"))
    .await;
  assert_eq!(response.status(), StatusCode::NOT_FOUND);

  let response = router
    .dispatch(request(Method::DELETE, "/person/anderson/thomas"))
    .await;
  assert_eq!(response.status(), StatusCode::OK);
}

// With two overlapping patterns, the earlier registration wins.
#[tokio::test]
async fn route_first_match_wins() {
  let router = Router::new();
  router.get("/overlap/:a", handler_first).unwrap();
  router.get("/overlap/:b", handler_second).unwrap();

  let response = router.dispatch(request(Method::GET, "/overlap/x")).await;
  assert_eq!(body(response).await, "first");
}

// A filter runs before the handler and can hand it request-scoped values.
#[tokio::test]
async fn filter_passes_values_to_handler() {
  let router = Router::new();
  router.filter(filter_set_password);
  router
    .get("/person/:last/:first", handler_show_password)
    .unwrap();

  let response = router
    .dispatch(request(Method::GET, "/person/anderson/thomas"))
    .await;
  assert_eq!(body(response).await, "z1on");
}

// A filter that writes to the response halts execution: no later filter
// and no handler runs.
#[tokio::test]
async fn filter_halts_on_write() {
  let router = Router::new();
  router.filter(handler_err);
  router.filter(handler_second);
  router.get("/person/:last/:first", handler_ok).unwrap();

  let response = router
    .dispatch(request(Method::GET, "/person/anderson/thomas"))
    .await;
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  assert_eq!(body(response).await, "Bad Request");
}

// A parameter filter only fires when the matched route bound the named
// parameter.
#[tokio::test]
async fn filter_param_gates_on_binding() {
  // "codename" is never bound, so the filter stays quiet
  let router = Router::new();
  router.filter_param("codename", handler_err);
  router.get("/:nickname", handler_ok).unwrap();

  let response = router.dispatch(request(Method::GET, "/neo")).await;
  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(body(response).await, "hello world");

  // now the matched route binds "codename" and the filter fires;
  // a leading sigil on the registration is accepted
  let router = Router::new();
  router.filter_param(":codename", handler_err);
  router.get("/:codename", handler_ok).unwrap();

  let response = router.dispatch(request(Method::GET, "/neo")).await;
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  assert_ne!(body(response).await, "hello world");
}

// A path filter fires on a wildcard match against the raw path,
// independent of route parameters.
#[tokio::test]
async fn filter_path_gates_on_pattern() {
  let router = Router::new();
  router.filter_path("/admin*", handler_err).unwrap();
  router.get("/admin/panel", handler_ok).unwrap();
  router.get("/public", handler_ok).unwrap();

  let response = router.dispatch(request(Method::GET, "/admin/panel")).await;
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);

  let response = router.dispatch(request(Method::GET, "/public")).await;
  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(body(response).await, "hello world");
}

// An empty table produces exactly one not-found response.
#[tokio::test]
async fn not_found() {
  let router = Router::new();
  let response = router.dispatch(request(Method::GET, "/")).await;
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
  assert_eq!(body(response).await, "Not Found");
}

// Filters do not run when no route matches.
#[tokio::test]
async fn filters_skipped_without_match() {
  let router = Router::new();
  router.filter(handler_err);

  let response = router.dispatch(request(Method::GET, "/missing")).await;
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// The guard sees bound parameters and rejects with 401 when it returns
// false without writing.
#[tokio::test]
async fn guard_rejects_unauthorized() {
  let router = Router::new();
  router
    .add_guarded(
      Method::GET,
      "/secret/:id",
      |_w: &mut ResponseWriter, _req: &Request, ctx: &Context| ctx.params.get("id") == Some("42"),
      handler_ok,
    )
    .unwrap();

  let response = router.dispatch(request(Method::GET, "/secret/42")).await;
  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(body(response).await, "hello world");

  let response = router.dispatch(request(Method::GET, "/secret/7")).await;
  assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
  assert_eq!(body(response).await, "Unauthorized");
}

// A guard that writes its own response (here a redirect) is authoritative:
// no 401 is layered on top and the handler never runs.
#[tokio::test]
async fn guard_may_write_a_redirect() {
  let router = Router::new();
  router
    .add_guarded(
      Method::GET,
      "/secret",
      |w: &mut ResponseWriter, _req: &Request, _ctx: &Context| {
        w.header(header::LOCATION, HeaderValue::from_static("/login"));
        w.set_status(StatusCode::FOUND);
        false
      },
      handler_ok,
    )
    .unwrap();

  let response = router.dispatch(request(Method::GET, "/secret")).await;
  assert_eq!(response.status(), StatusCode::FOUND);
  assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
  assert_eq!(body(response).await, "");
}

// The guard stops the filter chain too.
#[tokio::test]
async fn guard_runs_before_filters() {
  let router = Router::new();
  router.filter(handler_second);
  router
    .add_guarded(
      Method::GET,
      "/secret",
      |_w: &mut ResponseWriter, _req: &Request, _ctx: &Context| false,
      handler_ok,
    )
    .unwrap();

  let response = router.dispatch(request(Method::GET, "/secret")).await;
  assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
  assert_eq!(body(response).await, "Unauthorized");
}

// Two parameter segments sharing a name is a caller error, but must not
// crash; the later binding wins.
#[tokio::test]
async fn duplicate_param_names_keep_last() {
  let router = Router::new();
  router.get("/:name/:name", handler_name).unwrap();

  let response = router.dispatch(request(Method::GET, "/a/b")).await;
  assert_eq!(body(response).await, "b");
}

// Path parameters never leak into the query string, and vice versa.
#[tokio::test]
async fn query_string_left_untouched() {
  let router = Router::new();
  router.get("/q/:param", handler_query).unwrap();

  let response = router
    .dispatch(request(Method::GET, "/q/path-value?param=query-value"))
    .await;
  assert_eq!(
    body(response).await,
    "param=path-value query=param=query-value"
  );
}

// A malformed override sub-pattern fails at the registration call.
#[tokio::test]
async fn bad_pattern_fails_registration() {
  let router = Router::new();
  let err = router.get("/user/:id([0-9+)", handler_ok).unwrap_err();
  assert!(matches!(err, routemux::Error::Pattern { .. }));

  // the broken route was not registered
  let response = router.dispatch(request(Method::GET, "/user/42")).await;
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// Dispatch is a pure function of the table snapshot and the request.
#[tokio::test]
async fn dispatch_is_repeatable() {
  let router = Router::new();
  router.get("/person/:last/:first", handler_whoami).unwrap();

  for _ in 0..3 {
    let response = router
      .dispatch(request(Method::GET, "/person/anderson/thomas"))
      .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(response).await, "you are thomas anderson");
  }

  // registering more routes never changes the priority of earlier ones
  router.get("/person/:a/:b", handler_second).unwrap();
  let response = router
    .dispatch(request(Method::GET, "/person/anderson/thomas"))
    .await;
  assert_eq!(body(response).await, "you are thomas anderson");
}

mod statics {
  use super::*;
  use std::fs;
  use std::path::PathBuf;

  struct TempDir(PathBuf);

  impl TempDir {
    fn new(label: &str) -> Self {
      let path = std::env::temp_dir().join(format!(
        "routemux-{}-{}",
        label,
        std::process::id()
      ));
      fs::create_dir_all(path.join("css")).unwrap();
      fs::write(path.join("hello.txt"), "static hello").unwrap();
      fs::write(path.join("css/site.css"), "body {}").unwrap();
      TempDir(path)
    }
  }

  impl Drop for TempDir {
    fn drop(&mut self) {
      let _ = fs::remove_dir_all(&self.0);
    }
  }

  #[tokio::test]
  async fn serves_files_from_the_directory() {
    let dir = TempDir::new("serve");
    let router = Router::new();
    router.static_files("/static", dir.0.clone()).unwrap();

    let response = router
      .dispatch(request(Method::GET, "/static/hello.txt"))
      .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
      response.headers().get(header::CONTENT_TYPE).unwrap(),
      "text/plain; charset=utf-8"
    );
    assert_eq!(body(response).await, "static hello");

    let response = router
      .dispatch(request(Method::GET, "/static/css/site.css"))
      .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(response).await, "body {}");
  }

  #[tokio::test]
  async fn missing_file_is_not_found() {
    let dir = TempDir::new("missing");
    let router = Router::new();
    router.static_files("/static/", dir.0.clone()).unwrap();

    let response = router
      .dispatch(request(Method::GET, "/static/nope.txt"))
      .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn traversal_is_rejected() {
    let dir = TempDir::new("traversal");
    let router = Router::new();
    router.static_files("/static", dir.0.clone()).unwrap();

    let response = router
      .dispatch(request(Method::GET, "/static/../secret.txt"))
      .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
  }
}
