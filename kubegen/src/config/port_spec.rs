use std::str::FromStr;

use k8s_openapi::api::core::v1::ContainerPort;
use snafu::{ResultExt, Snafu, ensure};

/// A container port given on the command line as `[NAME:]PORT[/PROTOCOL]`,
/// for example `8080`, `http:8080` or `dns:53/udp`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PortSpec {
    pub name: Option<String>,

    pub container_port: u16,

    pub protocol: Option<String>,
}

impl From<PortSpec> for ContainerPort {
    fn from(PortSpec { name, container_port, protocol }: PortSpec) -> Self {
        Self {
            name,
            container_port: i32::from(container_port),
            protocol,
            ..Self::default()
        }
    }
}

impl FromStr for PortSpec {
    type Err = PortSpecError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (rest, protocol) = match input.rsplit_once('/') {
            Some((rest, protocol)) => (rest, Some(parse_protocol(protocol)?)),
            None => (input, None),
        };

        let (name, port) = match rest.split_once(':') {
            Some((name, port)) => {
                ensure!(!name.is_empty(), InvalidFormatSnafu { input });
                (Some(name.to_string()), port)
            }
            None => (None, rest),
        };

        let container_port = port.parse::<u16>().context(InvalidPortSnafu { value: port })?;
        ensure!(container_port != 0, ZeroPortSnafu);

        Ok(Self { name, container_port, protocol })
    }
}

fn parse_protocol(value: &str) -> Result<String, PortSpecError> {
    let protocol = value.to_uppercase();
    ensure!(
        matches!(protocol.as_str(), "TCP" | "UDP" | "SCTP"),
        InvalidProtocolSnafu { value }
    );
    Ok(protocol)
}

#[allow(clippy::enum_variant_names)]
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum PortSpecError {
    #[snafu(display("Invalid format: expected '[NAME:]PORT[/PROTOCOL]', got '{input}'"))]
    InvalidFormat { input: String },

    #[snafu(display("Invalid port value '{value}': {source}"))]
    InvalidPort { value: String, source: std::num::ParseIntError },

    #[snafu(display("Port 0 is not a valid container port"))]
    ZeroPort,

    #[snafu(display("Invalid protocol '{value}': expected TCP, UDP or SCTP"))]
    InvalidProtocol { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_port() {
        let spec: PortSpec = "8080".parse().unwrap();
        assert_eq!(spec, PortSpec { name: None, container_port: 8080, protocol: None });
    }

    #[test]
    fn test_parse_named_port_with_protocol() {
        let spec: PortSpec = "dns:53/udp".parse().unwrap();
        assert_eq!(spec.name.as_deref(), Some("dns"));
        assert_eq!(spec.container_port, 53);
        assert_eq!(spec.protocol.as_deref(), Some("UDP"));
    }

    #[test]
    fn test_into_container_port() {
        let port = ContainerPort::from("http:8080/TCP".parse::<PortSpec>().unwrap());
        assert_eq!(port.container_port, 8080);
        assert_eq!(port.name.as_deref(), Some("http"));
        assert_eq!(port.protocol.as_deref(), Some("TCP"));
        assert_eq!(port.host_port, None);
    }

    #[test]
    fn test_error_invalid_port() {
        let err = "http:web".parse::<PortSpec>().unwrap_err();
        assert!(matches!(err, PortSpecError::InvalidPort { .. }));
        let err = "70000".parse::<PortSpec>().unwrap_err();
        assert!(matches!(err, PortSpecError::InvalidPort { .. }));
        assert_eq!("0".parse::<PortSpec>().unwrap_err(), PortSpecError::ZeroPort);
    }

    #[test]
    fn test_error_invalid_protocol() {
        let err = "8080/http".parse::<PortSpec>().unwrap_err();
        assert!(matches!(err, PortSpecError::InvalidProtocol { .. }));
    }

    #[test]
    fn test_error_empty_name() {
        let err = ":8080".parse::<PortSpec>().unwrap_err();
        assert!(matches!(err, PortSpecError::InvalidFormat { .. }));
    }
}
