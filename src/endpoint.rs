/* src/endpoint.rs */

use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;

use crate::model::{ConnectionTypeData, IpData, UserAgentResponse};

/// Base URL of the general endpoints.
pub const BASE_URL: &str = "https://myip.foo";
/// Base URL reachable only over IPv4.
pub const IPV4_URL: &str = "https://ipv4.myip.foo";
/// Base URL reachable only over IPv6.
pub const IPV6_URL: &str = "https://ipv6.myip.foo";

/// Address family an endpoint is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    Any,
    V4,
    V6,
}

impl AddressFamily {
    /// Whether `ip` belongs to this family.
    pub fn matches(&self, ip: &IpAddr) -> bool {
        match self {
            AddressFamily::Any => true,
            AddressFamily::V4 => ip.is_ipv4(),
            AddressFamily::V6 => ip.is_ipv6(),
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::Any => f.write_str("IP"),
            AddressFamily::V4 => f.write_str("IPv4"),
            AddressFamily::V6 => f.write_str("IPv6"),
        }
    }
}

/// A base URL paired with the address family it answers on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Endpoint {
    pub base: String,
    pub family: AddressFamily,
}

impl Endpoint {
    pub fn new(base: impl Into<String>, family: AddressFamily) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            family,
        }
    }

    /// Join `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// The three hosts a client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Endpoints {
    pub general: Endpoint,
    pub ipv4: Endpoint,
    pub ipv6: Endpoint,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            general: Endpoint::new(BASE_URL, AddressFamily::Any),
            ipv4: Endpoint::new(IPV4_URL, AddressFamily::V4),
            ipv6: Endpoint::new(IPV6_URL, AddressFamily::V6),
        }
    }
}

#[cfg(test)]
impl Endpoints {
    /// Point every host at local fixture servers.
    pub fn local(general: &str, ipv4: &str, ipv6: &str) -> Self {
        Self {
            general: Endpoint::new(general, AddressFamily::Any),
            ipv4: Endpoint::new(ipv4, AddressFamily::V4),
            ipv6: Endpoint::new(ipv6, AddressFamily::V6),
        }
    }
}

/// Path of the address-only endpoint on the pinned hosts.
pub(crate) const ADDRESS_PATH: &str = "/ip";

/// A single-endpoint query against the general host.
///
/// Both client flavours drive the same implementations, so a body decodes
/// identically whichever execution mode fetched it.
pub trait Query {
    /// Decoded record handed to the caller.
    type Output;

    /// Path appended to the base URL.
    const PATH: &'static str;

    /// Decode a successful response body.
    fn decode(body: &str) -> Result<Self::Output, String>;
}

/// `/plain`: the caller's IP as trimmed text.
#[derive(Debug, Clone, Copy)]
pub struct Plain;

/// `/api`: full IP data including geolocation.
#[derive(Debug, Clone, Copy)]
pub struct Api;

/// `/api/connection-type`: residential, vpn, datacenter or tor.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionType;

/// `/headers`: request headers as seen by the server.
#[derive(Debug, Clone, Copy)]
pub struct Headers;

/// `/user-agent`: the `User-Agent` the server received.
#[derive(Debug, Clone, Copy)]
pub struct UserAgent;

impl Query for Plain {
    type Output = String;
    const PATH: &'static str = "/plain";

    fn decode(body: &str) -> Result<Self::Output, String> {
        Ok(body.trim().to_string())
    }
}

impl Query for Api {
    type Output = IpData;
    const PATH: &'static str = "/api";

    fn decode(body: &str) -> Result<Self::Output, String> {
        decode_json(body)
    }
}

impl Query for ConnectionType {
    type Output = ConnectionTypeData;
    const PATH: &'static str = "/api/connection-type";

    fn decode(body: &str) -> Result<Self::Output, String> {
        decode_json(body)
    }
}

impl Query for Headers {
    type Output = HashMap<String, String>;
    const PATH: &'static str = "/headers";

    fn decode(body: &str) -> Result<Self::Output, String> {
        decode_json(body)
    }
}

impl Query for UserAgent {
    type Output = String;
    const PATH: &'static str = "/user-agent";

    fn decode(body: &str) -> Result<Self::Output, String> {
        decode_json::<UserAgentResponse>(body).map(|r| r.user_agent)
    }
}

fn decode_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, String> {
    serde_json::from_str(body).map_err(|e| e.to_string())
}
