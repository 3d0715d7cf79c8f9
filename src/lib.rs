//! A simple http routing API built on top of [hyper].
//!
//! Create a new route multiplexer and register routes against it:
//!
//! ```no_run
//! use futures::future::BoxFuture;
//! use routemux::{Config, Context, Request, ResponseWriter, Router, Server};
//!
//! fn whoami<'a>(
//!   w: &'a mut ResponseWriter,
//!   _req: &'a mut Request,
//!   ctx: &'a mut Context,
//! ) -> BoxFuture<'a, ()> {
//!   Box::pin(async move {
//!     let last = ctx.params.get("last").unwrap_or("");
//!     let first = ctx.params.get("first").unwrap_or("");
//!     w.write(format!("you are {} {}", first, last).as_bytes());
//!   })
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), routemux::Error> {
//!   let router = Router::new();
//!   router.get("/:last/:first", whoami)?;
//!   Server::new(router)
//!     .config(Config::builder().port(8080))
//!     .run()
//!     .await
//! }
//! ```
//!
//! Restful parameters in the path are parsed into the request [`Context`],
//! out of band from the query string. More control over a parameter is
//! possible by providing a custom regular expression:
//!
//! ```text
//! router.get("/files/:file(.+)", handler)
//! ```
//!
//! [hyper]: https://hyper.rs

pub mod action;
pub mod config;
pub mod error;
pub mod http;
pub mod router;
pub mod serve;
pub mod server;

pub use action::Handler;
pub use config::Config;
pub use error::Error;
pub use crate::http::{Context, Params, Request, Response, ResponseWriter, Values};
pub use router::Router;
pub use server::Server;
