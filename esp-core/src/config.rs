//! Konfigurations-Typen
//!
//! Broker-Adresse und Dispatcher-Konfiguration. Beides wird einmal beim
//! Start festgelegt, es gibt keine Rekonfiguration zur Laufzeit.

use core::fmt;

use crate::types::{QoS, SUBSCRIBE_QOS, Topic};

/// Standard-Port für MQTT ohne TLS
pub const DEFAULT_MQTT_PORT: u16 = 1883;

/// Unveränderliche Konfiguration des Command Dispatchers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherConfig {
    pub topic: Topic,
    pub qos: QoS,
}

impl DispatcherConfig {
    /// Konfiguration für ein Topic mit der Standard-QoS (at least once)
    pub const fn new(topic: Topic) -> Self {
        Self {
            topic,
            qos: SUBSCRIBE_QOS,
        }
    }
}

/// Broker-Adresse aus einer URI wie `mqtt://broker.local:1883`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrokerAddress<'a> {
    pub host: &'a str,
    pub port: u16,
}

/// Fehler beim Parsen der Broker-URI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    EmptyUri,
    /// Schema wird nicht unterstützt (z.B. `mqtts://`, TLS ist Sache des Transports)
    UnsupportedScheme,
    MissingHost,
    InvalidPort,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyUri => f.write_str("broker uri is empty"),
            ConfigError::UnsupportedScheme => f.write_str("unsupported uri scheme"),
            ConfigError::MissingHost => f.write_str("broker host missing"),
            ConfigError::InvalidPort => f.write_str("invalid broker port"),
        }
    }
}

impl<'a> BrokerAddress<'a> {
    /// Parst `mqtt://host[:port][/...]`, `tcp://host[:port]` oder `host[:port]`
    ///
    /// Ohne Port wird 1883 verwendet. Ein Pfad hinter dem Host wird ignoriert.
    pub fn parse(uri: &'a str) -> Result<Self, ConfigError> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(ConfigError::EmptyUri);
        }

        let rest = match uri.split_once("://") {
            Some(("mqtt" | "tcp", rest)) => rest,
            Some(_) => return Err(ConfigError::UnsupportedScheme),
            None => uri,
        };

        let authority = rest.split('/').next().unwrap_or_default();

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|_| ConfigError::InvalidPort)?;
                if port == 0 {
                    return Err(ConfigError::InvalidPort);
                }
                (host, port)
            }
            None => (authority, DEFAULT_MQTT_PORT),
        };

        if host.is_empty() {
            return Err(ConfigError::MissingHost);
        }

        Ok(Self { host, port })
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ConfigError::EmptyUri => defmt::write!(fmt, "broker uri is empty"),
            ConfigError::UnsupportedScheme => defmt::write!(fmt, "unsupported uri scheme"),
            ConfigError::MissingHost => defmt::write!(fmt, "broker host missing"),
            ConfigError::InvalidPort => defmt::write!(fmt, "invalid broker port"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_uri() {
        let addr = BrokerAddress::parse("mqtt://broker.local:1884").unwrap();
        assert_eq!(addr.host, "broker.local");
        assert_eq!(addr.port, 1884);
    }

    #[test]
    fn test_parse_default_port() {
        let addr = BrokerAddress::parse("mqtt://test.mosquitto.org").unwrap();
        assert_eq!(addr.host, "test.mosquitto.org");
        assert_eq!(addr.port, DEFAULT_MQTT_PORT);
    }

    #[test]
    fn test_parse_without_scheme() {
        let addr = BrokerAddress::parse("192.168.1.10:1883").unwrap();
        assert_eq!(addr.host, "192.168.1.10");
        assert_eq!(addr.port, 1883);
    }

    #[test]
    fn test_parse_tcp_scheme_with_path() {
        let addr = BrokerAddress::parse("tcp://broker/mqtt").unwrap();
        assert_eq!(addr.host, "broker");
        assert_eq!(addr.port, DEFAULT_MQTT_PORT);
    }

    #[test]
    fn test_parse_rejects_tls_scheme() {
        assert_eq!(
            BrokerAddress::parse("mqtts://broker:8883"),
            Err(ConfigError::UnsupportedScheme)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(BrokerAddress::parse("  "), Err(ConfigError::EmptyUri));
        assert_eq!(BrokerAddress::parse("mqtt://"), Err(ConfigError::MissingHost));
        assert_eq!(BrokerAddress::parse("mqtt://:1883"), Err(ConfigError::MissingHost));
        assert_eq!(
            BrokerAddress::parse("mqtt://broker:abc"),
            Err(ConfigError::InvalidPort)
        );
        assert_eq!(
            BrokerAddress::parse("mqtt://broker:0"),
            Err(ConfigError::InvalidPort)
        );
    }

    #[test]
    fn test_dispatcher_config_default_qos() {
        let config = DispatcherConfig::new(Topic::new("/x/led"));
        assert_eq!(config.qos, QoS::AtLeastOnce);
        assert_eq!(config.topic.as_str(), "/x/led");
    }
}
