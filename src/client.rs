/* src/client.rs */

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::endpoint::{
    ADDRESS_PATH, Api, ConnectionType, Endpoint, Endpoints, Headers, Plain, Query, UserAgent,
};
use crate::error::Result;
use crate::fetch::{build_client, decode_error, fetch};
use crate::model::{ConnectionTypeData, DualStackData, IpData, parse_address};
use crate::partial::settle_all;

/// Non-blocking client. Every call returns a future; the two dual-stack
/// branches run as concurrent tasks on the caller's executor.
///
/// Cloning is cheap and clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
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
        let http = build_client(&config)?;
        Ok(Self::with_http_client(http, config))
    }

    /// Create a client on top of an existing transport, e.g. one configured
    /// with a proxy or custom TLS roots.
    ///
    /// Every request still carries exactly one `User-Agent`, taken from
    /// `config`; a default set on `http` is replaced.
    pub fn with_http_client(http: reqwest::Client, config: ClientConfig) -> Self {
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
    pub async fn query<Q: Query>(&self) -> Result<Q::Output> {
        self.query_with_timeout::<Q>(self.config.timeout).await
    }

    /// Run a single-endpoint query with an explicit timeout. Any fetch or
    /// decode failure is returned to the caller.
    pub async fn query_with_timeout<Q: Query>(&self, timeout: Duration) -> Result<Q::Output> {
        let url = self.endpoints.general.url(Q::PATH);
        let body = fetch(&self.http, &url, timeout, &self.config.user_agent()).await?;
        Q::decode(&body).map_err(|reason| decode_error(&url, reason))
    }

    /// Get your IP address as plain text.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # #[tokio::main]
    /// # async fn main() -> myip_foo::Result<()> {
    /// let client = myip_foo::Client::new()?;
    /// println!("My IP: {}", client.get_ip().await?);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_ip(&self) -> Result<String> {
        self.query::<Plain>().await
    }

    /// Get full IP data including geolocation.
    pub async fn get_ip_data(&self) -> Result<IpData> {
        self.query::<Api>().await
    }

    /// Get the connection type (residential, vpn, datacenter, tor).
    pub async fn get_connection_type(&self) -> Result<ConnectionTypeData> {
        self.query::<ConnectionType>().await
    }

    /// Get all HTTP headers as seen by the server.
    pub async fn get_headers(&self) -> Result<HashMap<String, String>> {
        self.query::<Headers>().await
    }

    /// Get the user agent string as seen by the server.
    pub async fn get_user_agent(&self) -> Result<String> {
        self.query::<UserAgent>().await
    }

    /// Resolve both IPv4 and IPv6 addresses with the configured
    /// dual-stack timeout.
    pub async fn get_dual_stack(&self) -> DualStackData {
        self.get_dual_stack_with_timeout(self.config.dual_stack_timeout)
            .await
    }

    /// Resolve both IPv4 and IPv6 addresses concurrently.
    ///
    /// Each family gets its own `timeout`. A family that fails for any reason
    /// is reported as `None`; this never returns an error.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # #[tokio::main]
    /// # async fn main() -> myip_foo::Result<()> {
    /// use std::time::Duration;
    ///
    /// let client = myip_foo::Client::new()?;
    /// let dual = client.get_dual_stack_with_timeout(Duration::from_secs(2)).await;
    /// println!("IPv4: {}", dual.ipv4.as_deref().unwrap_or("not available"));
    /// println!("IPv6: {}", dual.ipv6.as_deref().unwrap_or("not available"));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_dual_stack_with_timeout(&self, timeout: Duration) -> DualStackData {
        let mut settled = settle_all([
            self.resolve_family(&self.endpoints.ipv4, timeout),
            self.resolve_family(&self.endpoints.ipv6, timeout),
        ])
        .await
        .into_iter();

        let dual = DualStackData {
            ipv4: settled.next().flatten(),
            ipv6: settled.next().flatten(),
        };
        debug!(ipv4 = ?dual.ipv4, ipv6 = ?dual.ipv6, "dual-stack resolved");
        dual
    }

    async fn resolve_family(&self, endpoint: &Endpoint, timeout: Duration) -> Result<String> {
        let url = endpoint.url(ADDRESS_PATH);
        let body = fetch(&self.http, &url, timeout, &self.config.user_agent()).await?;
        parse_address(&body, endpoint.family).map_err(|reason| decode_error(&url, reason))
    }
}

/// Get your IP address using a default client.
///
/// # Examples
///
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let ip = myip_foo::get_ip().await?;
/// println!("My IP: {}", ip);
/// # Ok(())
/// # }
/// ```
pub async fn get_ip() -> Result<String> {
    Client::new()?.get_ip().await
}

/// Get full IP data using a default client.
pub async fn get_ip_data() -> Result<IpData> {
    Client::new()?.get_ip_data().await
}

/// Get the connection type using a default client.
pub async fn get_connection_type() -> Result<ConnectionTypeData> {
    Client::new()?.get_connection_type().await
}

/// Get request headers as seen by the server using a default client.
pub async fn get_headers() -> Result<HashMap<String, String>> {
    Client::new()?.get_headers().await
}

/// Get your user agent string using a default client.
pub async fn get_user_agent() -> Result<String> {
    Client::new()?.get_user_agent().await
}

/// Resolve both address families using a default client.
///
/// If the client cannot be built, both addresses are reported as absent.
pub async fn get_dual_stack() -> DualStackData {
    match Client::new() {
        Ok(client) => client.get_dual_stack().await,
        Err(e) => {
            warn!(error = %e, "dual-stack lookup skipped");
            DualStackData::default()
        }
    }
}
