use crate::http::{Context, Request, ResponseWriter};
use futures::future::BoxFuture;

/// The call signature shared by route handlers and middleware filters.
///
/// A handler receives the tracked response writer, the in-flight request,
/// and the request-scoped context, and returns a boxed future. Plain
/// functions fit naturally:
///
/// ```
/// use futures::future::BoxFuture;
/// use routemux::{Context, Request, ResponseWriter};
///
/// fn hello<'a>(
///   w: &'a mut ResponseWriter,
///   _req: &'a mut Request,
///   _ctx: &'a mut Context,
/// ) -> BoxFuture<'a, ()> {
///   Box::pin(async move {
///     w.write(b"hello world");
///   })
/// }
/// ```
pub trait Handler:
  for<'a> Fn(&'a mut ResponseWriter, &'a mut Request, &'a mut Context) -> BoxFuture<'a, ()>
  + Send
  + Sync
{
}

impl<F> Handler for F where
  F: for<'a> Fn(&'a mut ResponseWriter, &'a mut Request, &'a mut Context) -> BoxFuture<'a, ()>
    + Send
    + Sync
{
}

/// An erased request action. Routes, filters, and the gate wrappers all
/// run through this object seam.
pub(crate) trait Action: Send + Sync {
  fn call<'a>(
    &'a self,
    w: &'a mut ResponseWriter,
    req: &'a mut Request,
    ctx: &'a mut Context,
  ) -> BoxFuture<'a, ()>;
}

pub(crate) type BoxedAction = Box<dyn Action>;

/// Adapts a [`Handler`] function into an [`Action`] object.
pub(crate) struct FnAction<F>(pub(crate) F);

impl<F: Handler> Action for FnAction<F> {
  fn call<'a>(
    &'a self,
    w: &'a mut ResponseWriter,
    req: &'a mut Request,
    ctx: &'a mut Context,
  ) -> BoxFuture<'a, ()> {
    (self.0)(w, req, ctx)
  }
}

/// A per-route authorization predicate, run after parameter binding and
/// before the filter chain. Returning false rejects the request.
pub(crate) type Guard = Box<dyn Fn(&mut ResponseWriter, &Request, &Context) -> bool + Send + Sync>;
