/* src/lib.rs */
//! # myip-foo
//!
//! A lightweight client for the [myip.foo](https://myip.foo) IP lookup API:
//! your public IP, geolocation, connection type and the request headers the
//! service received.
//!
//! ## Features
//!
//! - Async [`Client`] and [`blocking::Client`] with identical behaviour
//! - Typed records for every endpoint via `serde`
//! - Dual-stack IPv4/IPv6 resolution that returns a partial result instead
//!   of failing when one address family is unreachable
//! - Typed errors carrying the URL, timeout or status code involved
//!
//! ## Examples
//!
//! ### Async
//!
//! ```rust,no_run
//! use myip_foo::Client;
//!
//! # #[tokio::main]
//! # async fn main() -> myip_foo::Result<()> {
//! let client = Client::new()?;
//!
//! let data = client.get_ip_data().await?;
//! println!("{} in {}", data.ip, data.location.city);
//!
//! // Never fails: a missing family is simply `None`.
//! let dual = client.get_dual_stack().await;
//! println!("IPv6: {}", dual.ipv6.as_deref().unwrap_or("not available"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Blocking
//!
//! ```rust,no_run
//! use myip_foo::{ClientConfig, blocking};
//! use std::time::Duration;
//!
//! let config = ClientConfig::new()
//!     .with_user_agent("my-tool", "0.1.0")
//!     .with_timeout(Duration::from_secs(3));
//! let client = blocking::Client::with_config(config)?;
//!
//! println!("IP: {}", client.get_ip()?);
//! # Ok::<(), myip_foo::MyIpError>(())
//! ```

pub mod blocking;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod model;
pub mod partial;

mod fetch;

#[cfg(test)]
mod testing;

pub use client::{
    Client, get_connection_type, get_dual_stack, get_headers, get_ip, get_ip_data, get_user_agent,
};
pub use config::ClientConfig;
pub use endpoint::{AddressFamily, Query};
pub use error::{ErrorKind, MyIpError, Result};
pub use model::{Cloudflare, ConnectionTypeData, DualStackData, IpData, Location, Network};
pub use partial::{settle_all, settle_all_blocking};
