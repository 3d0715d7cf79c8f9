use crate::action::{Action, BoxedAction};
use crate::error::Error;
use crate::http::{Context, Request, ResponseWriter};
use futures::future::BoxFuture;
use regex::Regex;

/// Runs the wrapped filter only when the named path parameter was bound
/// non-empty for the matched route. Evaluated after parameter binding, so
/// it reacts to whichever route actually matched.
pub(crate) struct ParamGate {
  pub(crate) param: String,
  pub(crate) inner: BoxedAction,
}

impl Action for ParamGate {
  fn call<'a>(
    &'a self,
    w: &'a mut ResponseWriter,
    req: &'a mut Request,
    ctx: &'a mut Context,
  ) -> BoxFuture<'a, ()> {
    let present = ctx
      .params
      .get(&self.param)
      .map_or(false, |value| !value.is_empty());
    if present {
      self.inner.call(w, req, ctx)
    } else {
      Box::pin(async {})
    }
  }
}

/// Runs the wrapped filter only when the raw request path matches the
/// wildcard pattern. The match may land anywhere in the path, which makes
/// prefix and suffix style filters cheap to express.
pub(crate) struct PathGate {
  pub(crate) regex: Regex,
  pub(crate) inner: BoxedAction,
}

impl Action for PathGate {
  fn call<'a>(
    &'a self,
    w: &'a mut ResponseWriter,
    req: &'a mut Request,
    ctx: &'a mut Context,
  ) -> BoxFuture<'a, ()> {
    if self.regex.is_match(req.uri().path()) {
      self.inner.call(w, req, ctx)
    } else {
      Box::pin(async {})
    }
  }
}

/// Expands a wildcard pattern for [`PathGate`]: a `*` matches one or more
/// characters of any kind.
pub(crate) fn wildcard(pattern: &str) -> Result<Regex, Error> {
  Regex::new(&pattern.replace('*', "(.+)")).map_err(|source| Error::Pattern {
    pattern: pattern.to_owned(),
    source,
  })
}
