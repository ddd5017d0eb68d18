/* src/model.rs */

use std::net::IpAddr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::endpoint::AddressFamily;

/// Location information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub country: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub timezone: String,
    #[serde(deserialize_with = "string_or_number")]
    pub latitude: String,
    #[serde(deserialize_with = "string_or_number")]
    pub longitude: String,
}

/// Network operator information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    pub asn: i64,
    pub isp: String,
}

/// Edge node that served the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cloudflare {
    pub colo: String,
    pub ray: String,
}

/// Full IP data including geolocation, returned by `/api`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpData {
    pub ip: String,
    #[serde(rename = "type")]
    pub ip_type: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub connection_type: Option<String>,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub network: Network,
    #[serde(default)]
    pub cloudflare: Cloudflare,
}

/// Connection classification returned by `/api/connection-type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionTypeData {
    pub ip: String,
    #[serde(rename = "type")]
    pub connection_type: String,
}

/// Best-effort IPv4/IPv6 pair. A missing field means that family was not
/// reachable or did not return a usable address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualStackData {
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
}

impl DualStackData {
    /// True when neither family produced an address.
    pub fn is_empty(&self) -> bool {
        self.ipv4.is_none() && self.ipv6.is_none()
    }

    /// The available addresses, IPv4 first.
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.ipv4.iter().chain(self.ipv6.iter()).map(String::as_str)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IpResponse {
    pub ip: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserAgentResponse {
    #[serde(rename = "userAgent")]
    pub user_agent: String,
}

/// Extract an address of the given family from a pinned-endpoint body.
///
/// Accepts either `{"ip": "..."}` or the bare address as text. The address
/// is validated but returned as the server wrote it, minus surrounding
/// whitespace.
pub(crate) fn parse_address(body: &str, family: AddressFamily) -> Result<String, String> {
    let body = body.trim();
    let raw = if body.starts_with('{') {
        serde_json::from_str::<IpResponse>(body)
            .map_err(|e| e.to_string())?
            .ip
    } else {
        body.to_string()
    };

    let raw = raw.trim();
    if raw.is_empty() {
        return Err("empty address".to_string());
    }

    let ip: IpAddr = raw
        .parse()
        .map_err(|_| format!("invalid IP address: {raw:?}"))?;

    if !family.matches(&ip) {
        return Err(format!("expected an {family} address, got {ip}"));
    }

    Ok(raw.to_string())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_data_with_partial_sections() {
        let body = r#"{"ip":"203.0.113.42","type":"residential","location":{"city":"Amsterdam"},"network":{"isp":"Acme"}}"#;
        let data: IpData = serde_json::from_str(body).unwrap();

        assert_eq!(data.ip, "203.0.113.42");
        assert_eq!(data.ip_type, "residential");
        assert_eq!(data.location.city, "Amsterdam");
        assert_eq!(data.network.isp, "Acme");
        assert_eq!(data.network.asn, 0);
        assert_eq!(data.hostname, None);
    }

    #[test]
    fn test_ip_data_full_record() {
        let body = r#"{
            "ip": "2001:db8::1",
            "type": "IPv6",
            "hostname": "host.example.net",
            "connectionType": "datacenter",
            "location": {
                "country": "NL", "city": "Amsterdam", "region": "North Holland",
                "postalCode": "1012", "timezone": "Europe/Amsterdam",
                "latitude": 52.37, "longitude": "4.89"
            },
            "network": {"asn": 64500, "isp": "Acme"},
            "cloudflare": {"colo": "AMS", "ray": "8a1b2c3d4e5f"}
        }"#;
        let data: IpData = serde_json::from_str(body).unwrap();

        assert_eq!(data.connection_type.as_deref(), Some("datacenter"));
        assert_eq!(data.location.postal_code, "1012");
        assert_eq!(data.location.latitude, "52.37");
        assert_eq!(data.location.longitude, "4.89");
        assert_eq!(data.network.asn, 64500);
        assert_eq!(data.cloudflare.colo, "AMS");
    }

    #[test]
    fn test_ip_data_requires_ip() {
        let result = serde_json::from_str::<IpData>(r#"{"type":"IPv4"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_address_json_and_text() {
        assert_eq!(
            parse_address(r#"{"ip":"198.51.100.7"}"#, AddressFamily::V4),
            Ok("198.51.100.7".to_string())
        );
        assert_eq!(
            parse_address("2001:db8::1\n", AddressFamily::V6),
            Ok("2001:db8::1".to_string())
        );
    }

    #[test]
    fn test_parse_address_keeps_server_spelling() {
        assert_eq!(
            parse_address(r#"{"ip":" 2001:DB8:0:0::1 "}"#, AddressFamily::V6),
            Ok("2001:DB8:0:0::1".to_string())
        );
    }

    #[test]
    fn test_parse_address_rejects_bad_values() {
        assert!(parse_address("", AddressFamily::V4).is_err());
        assert!(parse_address(r#"{"ip":""}"#, AddressFamily::V4).is_err());
        assert!(parse_address("not-an-ip", AddressFamily::Any).is_err());
        assert!(parse_address(r#"{"ip":"2001:db8::1"}"#, AddressFamily::V4).is_err());
        assert!(parse_address("{broken", AddressFamily::V4).is_err());
    }

    #[test]
    fn test_dual_stack_helpers() {
        let empty = DualStackData::default();
        assert!(empty.is_empty());
        assert_eq!(empty.addresses().count(), 0);

        let partial = DualStackData {
            ipv4: Some("203.0.113.42".to_string()),
            ipv6: None,
        };
        assert!(!partial.is_empty());
        assert_eq!(partial.addresses().collect::<Vec<_>>(), vec!["203.0.113.42"]);
    }
}
