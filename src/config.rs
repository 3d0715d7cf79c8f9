use std::net::{IpAddr, Ipv4Addr};

/// Configuration for [`Server`](crate::Server).
#[derive(Clone)]
pub struct Config {
  pub(crate) address: IpAddr,
  pub(crate) port: u16,
  pub(crate) keep_alive: Option<u64>,
  pub(crate) tcp_nodelay: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      address: Ipv4Addr::new(127, 0, 0, 1).into(),
      port: 8000,
      keep_alive: Some(5),
      tcp_nodelay: false,
    }
  }
}

impl Config {
  pub fn builder() -> Self {
    Self::default()
  }

  /// Sets the keepalive interval in seconds (default is 5, `None` disables it)
  pub fn keep_alive(mut self, seconds: impl Into<Option<u64>>) -> Self {
    self.keep_alive = seconds.into();
    self
  }

  /// Sets the port to serve on
  pub fn port(mut self, port: u16) -> Self {
    self.port = port;
    self
  }

  /// Sets the IP address to serve on
  pub fn address(mut self, addr: impl Into<IpAddr>) -> Self {
    self.address = addr.into();
    self
  }

  /// Enables TCP_NODELAY on accepted connections
  pub fn tcp_nodelay(mut self, enabled: bool) -> Self {
    self.tcp_nodelay = enabled;
    self
  }
}
