use crate::action::Action;
use crate::http::{header, Context, HeaderValue, Request, ResponseWriter, StatusCode};
use crate::serve::error;
use futures::future::BoxFuture;
use std::path::{Component, Path, PathBuf};

/// The parameter name capturing the path remainder on static routes.
pub(crate) const PARAM: &str = "filepath";

/// Serves files from a directory.
///
/// The registered pattern captures everything after the prefix under
/// [`PARAM`]; the captured remainder is resolved against the root
/// directory, and any `..` component is rejected before the filesystem is
/// touched.
pub(crate) struct StaticDir {
  pub(crate) root: PathBuf,
}

impl Action for StaticDir {
  fn call<'a>(
    &'a self,
    w: &'a mut ResponseWriter,
    _req: &'a mut Request,
    ctx: &'a mut Context,
  ) -> BoxFuture<'a, ()> {
    Box::pin(async move {
      let rest = ctx.params.get(PARAM).unwrap_or("");
      let mut relative = PathBuf::new();
      for component in Path::new(rest).components() {
        match component {
          Component::Normal(part) => relative.push(part),
          Component::ParentDir => {
            error(w, StatusCode::FORBIDDEN);
            return;
          }
          Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
      }

      match tokio::fs::read(self.root.join(relative)).await {
        Ok(contents) => {
          if let Some(mime) = content_type(rest) {
            w.header(header::CONTENT_TYPE, HeaderValue::from_static(mime));
          }
          w.write(&contents);
        }
        Err(_) => error(w, StatusCode::NOT_FOUND),
      }
    })
  }
}

fn content_type(path: &str) -> Option<&'static str> {
  let ext = Path::new(path).extension()?.to_str()?;
  let mime = match ext {
    "html" | "htm" => "text/html; charset=utf-8",
    "css" => "text/css; charset=utf-8",
    "js" => "application/javascript",
    "json" => "application/json",
    "png" => "image/png",
    "jpg" | "jpeg" => "image/jpeg",
    "gif" => "image/gif",
    "svg" => "image/svg+xml",
    "txt" => "text/plain; charset=utf-8",
    "wasm" => "application/wasm",
    _ => return None,
  };
  Some(mime)
}
