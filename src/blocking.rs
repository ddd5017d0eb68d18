/* src/blocking.rs */

//! Blocking flavour of the client.
//!
//! Mirrors [`crate::Client`] call for call. Each call occupies the calling
//! thread; the two dual-stack branches run on their own scoped threads.
//!
//! Do not use this from inside an async runtime, use [`crate::Client`] there.
//!
//! ```rust,no_run
//! let client = myip_foo::blocking::Client::new()?;
//! let dual = client.get_dual_stack();
//! println!("IPv4: {:?}, IPv6: {:?}", dual.ipv4, dual.ipv6);
//! # Ok::<(), myip_foo::MyIpError>(())
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::endpoint::{
    ADDRESS_PATH, Api, ConnectionType, Endpoint, Endpoints, Headers, Plain, Query, UserAgent,
};
use crate::error::Result;
use crate::fetch::{build_blocking_client, decode_error, fetch_blocking};
use crate::model::{ConnectionTypeData, DualStackData, IpData, parse_address};
use crate::partial::settle_all_blocking;

/// Blocking client. Cloning is cheap and clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::blocking::Client,
    config: Arc<ClientConfig>,
    endpoints: Arc<Endpoints>,
}

impl Client {
    /// Create a client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with a custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = build_blocking_client(&config)?;
        Ok(Self::with_http_client(http, config))
    }

    /// Create a client on top of an existing transport, e.g. one configured
    /// with a proxy or custom TLS roots.
    ///
    /// Every request still carries exactly one `User-Agent`, taken from
    /// `config`; a default set on `http` is replaced.
    pub fn with_http_client(http: reqwest::blocking::Client, config: ClientConfig) -> Self {
        Self {
            http,
            config: Arc::new(config),
            endpoints: Arc::new(Endpoints::default()),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Arc::new(endpoints);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run a single-endpoint query with the configured default timeout.
    pub fn query<Q: Query>(&self) -> Result<Q::Output> {
        self.query_with_timeout::<Q>(self.config.timeout)
    }

    /// Run a single-endpoint query with an explicit timeout.
    pub fn query_with_timeout<Q: Query>(&self, timeout: Duration) -> Result<Q::Output> {
        let url = self.endpoints.general.url(Q::PATH);
        let body = fetch_blocking(&self.http, &url, timeout, &self.config.user_agent())?;
        Q::decode(&body).map_err(|reason| decode_error(&url, reason))
    }

    pub fn get_ip(&self) -> Result<String> {
        self.query::<Plain>()
    }

    pub fn get_ip_data(&self) -> Result<IpData> {
        self.query::<Api>()
    }

    pub fn get_connection_type(&self) -> Result<ConnectionTypeData> {
        self.query::<ConnectionType>()
    }

    pub fn get_headers(&self) -> Result<HashMap<String, String>> {
        self.query::<Headers>()
    }

    pub fn get_user_agent(&self) -> Result<String> {
        self.query::<UserAgent>()
    }

    pub fn get_dual_stack(&self) -> DualStackData {
        self.get_dual_stack_with_timeout(self.config.dual_stack_timeout)
    }

    /// Resolve both families in parallel, each with its own `timeout`.
    /// Never fails; an unreachable family is `None`.
    pub fn get_dual_stack_with_timeout(&self, timeout: Duration) -> DualStackData {
        let branches = [&self.endpoints.ipv4, &self.endpoints.ipv6]
            .map(|endpoint| move || self.resolve_family(endpoint, timeout));
        let mut settled = settle_all_blocking(branches).into_iter();

        let dual = DualStackData {
            ipv4: settled.next().flatten(),
            ipv6: settled.next().flatten(),
        };
        debug!(ipv4 = ?dual.ipv4, ipv6 = ?dual.ipv6, "dual-stack resolved");
        dual
    }

    fn resolve_family(&self, endpoint: &Endpoint, timeout: Duration) -> Result<String> {
        let url = endpoint.url(ADDRESS_PATH);
        let body = fetch_blocking(&self.http, &url, timeout, &self.config.user_agent())?;
        parse_address(&body, endpoint.family).map_err(|reason| decode_error(&url, reason))
    }
}

/// Get your IP address using a default blocking client.
pub fn get_ip() -> Result<String> {
    Client::new()?.get_ip()
}

pub fn get_ip_data() -> Result<IpData> {
    Client::new()?.get_ip_data()
}

pub fn get_connection_type() -> Result<ConnectionTypeData> {
    Client::new()?.get_connection_type()
}

pub fn get_headers() -> Result<HashMap<String, String>> {
    Client::new()?.get_headers()
}

pub fn get_user_agent() -> Result<String> {
    Client::new()?.get_user_agent()
}

/// Resolve both address families using a default blocking client.
///
/// If the client cannot be built, both addresses are reported as absent.
pub fn get_dual_stack() -> DualStackData {
    match Client::new() {
        Ok(client) => client.get_dual_stack(),
        Err(e) => {
            warn!(error = %e, "dual-stack lookup skipped");
            DualStackData::default()
        }
    }
}
