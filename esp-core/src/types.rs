//! Core Types für die MQTT-LED-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

use core::fmt;

use crate::logic::{interpret_payload, topic_matches};
use crate::traits::{OutputError, SubscribeError};

/// MQTT Message-ID (Paket-Identifier)
pub type MessageId = u16;

/// Topic auf das der Dispatcher hört
///
/// Wird zur Compile-Zeit festgelegt und ist zur Laufzeit unveränderlich.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic(&'static str);

impl Topic {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Prüft ob ein empfangenes Topic exakt diesem Topic entspricht
    ///
    /// Verglichen wird genau die vom Transport gemeldete Länge.
    /// Kein Wildcard-Matching, keine Groß/Klein-Toleranz.
    pub fn matches(&self, delivered: &[u8]) -> bool {
        topic_matches(delivered, self.0.as_bytes())
    }
}

/// Quality of Service für Subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QoS {
    AtMostOnce,
    AtLeastOnce,
    ExactlyOnce,
}

impl QoS {
    pub const fn as_u8(self) -> u8 {
        match self {
            QoS::AtMostOnce => 0,
            QoS::AtLeastOnce => 1,
            QoS::ExactlyOnce => 2,
        }
    }
}

/// QoS mit der das LED-Topic abonniert wird ("at least once")
pub const SUBSCRIBE_QOS: QoS = QoS::AtLeastOnce;

/// Kommando aus dem Payload einer MQTT-Nachricht
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Payload exakt `"1"`
    TurnOn,
    /// Payload exakt `"0"`
    TurnOff,
    /// Alles andere (leer, mehrere Bytes, andere Zeichen)
    Unrecognized,
}

impl Command {
    pub fn parse(payload: &[u8]) -> Self {
        interpret_payload(payload)
    }

    /// Gewünschter Ausgangspegel, `None` für unbekannte Kommandos
    pub const fn level(self) -> Option<bool> {
        match self {
            Command::TurnOn => Some(true),
            Command::TurnOff => Some(false),
            Command::Unrecognized => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Command::TurnOn => "TurnOn",
            Command::TurnOff => "TurnOff",
            Command::Unrecognized => "Unrecognized",
        }
    }
}

/// Lifecycle- und Daten-Events des MQTT-Transports
///
/// Topic und Payload existieren nur bei `Data` - andere Varianten
/// können diese Felder gar nicht erst lesen. Die Slices gehören dem
/// Transport und gelten nur für die Dauer eines Handler-Aufrufs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MqttEvent<'a> {
    Connected,
    Disconnected,
    Subscribed { message_id: MessageId },
    Data { topic: &'a [u8], payload: &'a [u8] },
    Published { message_id: MessageId },
    Unsubscribed { message_id: MessageId },
    Error,
    /// Vom Transport definiertes Event ohne eigene Variante (roher Event-Code)
    Other(i32),
}

impl MqttEvent<'_> {
    pub const fn kind(&self) -> &'static str {
        match self {
            MqttEvent::Connected => "Connected",
            MqttEvent::Disconnected => "Disconnected",
            MqttEvent::Subscribed { .. } => "Subscribed",
            MqttEvent::Data { .. } => "Data",
            MqttEvent::Published { .. } => "Published",
            MqttEvent::Unsubscribed { .. } => "Unsubscribed",
            MqttEvent::Error => "Error",
            MqttEvent::Other(_) => "Other",
        }
    }
}

/// Verbindungszustand aus Sicht des Dispatchers
///
/// Nur für Observability: `Data` wird in jedem Zustand gleich verarbeitet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    #[default]
    Disconnected,
    SubscriptionPending,
    Active,
}

/// Ergebnis eines Handler-Aufrufs
///
/// Rein informativ - der Dispatcher ist Endverbraucher, nichts davon
/// wird als Fehler nach oben propagiert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Lifecycle-Event ohne Zustandsänderung
    Observed,
    SubscribeRequested(MessageId),
    SubscribeFailed(SubscribeError),
    /// Nachricht für ein anderes Topic
    TopicMismatch,
    /// Kommando wurde auf den Ausgang angewendet
    Applied(Command),
    /// Payload ist kein bekanntes Kommando, kein Hardware-Effekt
    Unrecognized,
    OutputFailed(OutputError),
}

/// Gibt rohe Bytes lesbar aus (druckbares ASCII direkt, sonst `\xNN`)
///
/// Für Log-Ausgaben von Topic und Payload - der Transport garantiert
/// weder UTF-8 noch Null-Terminierung.
#[derive(Clone, Copy)]
pub struct PayloadDisplay<'a>(pub &'a [u8]);

impl fmt::Display for PayloadDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{:02x}", byte)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for PayloadDisplay<'_> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=[u8]:a}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Command {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LinkState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LinkState::Disconnected => defmt::write!(fmt, "Disconnected"),
            LinkState::SubscriptionPending => defmt::write!(fmt, "SubscriptionPending"),
            LinkState::Active => defmt::write!(fmt, "Active"),
        }
    }
}
