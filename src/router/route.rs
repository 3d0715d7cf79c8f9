use crate::action::{BoxedAction, Guard};
use crate::http::{Context, Method};
use crate::router::pattern::Pattern;

/// One registered route: a compiled (method, matcher, parameter names,
/// handler) tuple, immutable after registration and held for the lifetime
/// of the router.
pub(crate) struct Route {
  pub(crate) method: Method,
  pub(crate) pattern: Pattern,
  pub(crate) handler: BoxedAction,
  pub(crate) guard: Option<Guard>,
}

impl Route {
  /// Tests the route against a request and, on a match, binds the
  /// captured parameters into the context.
  ///
  /// Binding is positional; if two parameter segments share a name (a
  /// caller error) the later binding overwrites the earlier one.
  pub(crate) fn matches(&self, method: &Method, path: &str, ctx: &mut Context) -> bool {
    if *method != self.method {
      return false;
    }
    let bound = match self.pattern.matches(path) {
      Some(bound) => bound,
      None => return false,
    };
    for (name, value) in bound {
      ctx.params.set(name, value);
    }
    true
  }
}
