use crate::config::Config;
use crate::error::Error;
use crate::http::{Request, Response};
use crate::router::Router;
use hyper::service::Service;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

/// Binds a [`Router`] to a hyper server.
pub struct Server {
  config: Config,
  router: Arc<Router>,
}

impl Server {
  pub fn new(router: Router) -> Self {
    Self {
      config: Config::default(),
      router: Arc::new(router),
    }
  }

  pub fn config(mut self, config: Config) -> Self {
    self.config = config;
    self
  }

  /// Accepts connections and dispatches every request through the router
  /// until the process exits.
  pub async fn run(self) -> Result<(), Error> {
    let addr = SocketAddr::new(self.config.address, self.config.port);
    hyper::server::Server::try_bind(&addr)?
      .http1_keepalive(self.config.keep_alive.is_some())
      .http2_keep_alive_interval(self.config.keep_alive.map(Duration::from_secs))
      .tcp_nodelay(self.config.tcp_nodelay)
      .serve(MakeRouterService::new(self.router))
      .await
      .map_err(Error::from)
  }
}

pub(crate) struct MakeRouterService(RouterService);

impl MakeRouterService {
  fn new(router: Arc<Router>) -> Self {
    Self(RouterService(router))
  }
}

impl<T> Service<T> for MakeRouterService {
  type Response = RouterService;
  type Error = hyper::Error;
  type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

  fn poll_ready(&mut self, _: &mut Context) -> Poll<Result<(), Self::Error>> {
    Poll::Ready(Ok(()))
  }

  fn call(&mut self, _: T) -> Self::Future {
    let service = self.0.clone();
    let fut = async move { Ok(service) };
    Box::pin(fut)
  }
}

#[derive(Clone)]
pub(crate) struct RouterService(Arc<Router>);

impl Service<Request> for RouterService {
  type Response = Response;
  type Error = hyper::Error;
  type Future = Pin<Box<dyn Future<Output = hyper::Result<Response>> + Send>>;

  fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
    Poll::Ready(Ok(()))
  }

  fn call(&mut self, req: Request) -> Self::Future {
    let router = self.0.clone();
    Box::pin(async move { Ok(router.dispatch(req).await) })
  }
}
