//! Hardware- und Transport-Abstraction Traits
//!
//! Diese Traits definieren die Schnittstellen zu GPIO-Treiber und
//! MQTT-Transport ohne konkrete Implementierung.

use core::fmt;

use crate::types::{MessageId, MqttEvent, Outcome, QoS, Topic};

/// Fehler-Typ für GPIO-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    /// Pin konnte nicht als Ausgang konfiguriert werden
    ConfigureFailed,
    /// Pegel konnte nicht gesetzt werden
    WriteFailed,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::ConfigureFailed => f.write_str("configure failed"),
            OutputError::WriteFailed => f.write_str("write failed"),
        }
    }
}

/// Fehler-Typ für Subscribe-Anfragen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeError {
    /// Keine freie Stelle in der Anfrage-Queue des Transports
    QueueFull,
    /// Transport hat keine Verbindung zum Broker
    NotConnected,
}

impl fmt::Display for SubscribeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscribeError::QueueFull => f.write_str("request queue full"),
            SubscribeError::NotConnected => f.write_str("not connected"),
        }
    }
}

/// Trait für einen digitalen Ausgangs-Pin
///
/// # Implementierungen
/// - **Production:** GpioOutputPin (esp-hal Flex Pin)
/// - **Testing:** MockOutputPin (in-memory Mock)
pub trait OutputPin {
    /// Konfiguriert den Pin als Ausgang
    fn configure_as_output(&mut self) -> Result<(), OutputError>;

    /// Setzt den logischen Pegel (`true` = an)
    ///
    /// # Fehlerbehandlung
    /// Gibt `OutputError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn set_level(&mut self, on: bool) -> Result<(), OutputError>;
}

/// Client-Handle des MQTT-Transports, wird mit jedem Event übergeben
///
/// `subscribe` darf nicht blockieren: Implementierungen stellen die
/// Anfrage nur ein, der Transport führt sie später aus.
pub trait MqttClient {
    fn subscribe(&mut self, topic: Topic, qos: QoS) -> Result<MessageId, SubscribeError>;
}

/// Event-Handler, der einmalig beim Transport registriert wird
///
/// Wird für jedes Lifecycle- und Daten-Event aufgerufen. Muss schnell
/// zurückkehren (kein Warten, keine lange I/O).
pub trait MqttEventHandler<C: MqttClient> {
    fn handle_event(&mut self, client: &mut C, event: MqttEvent<'_>) -> Outcome;
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for OutputError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            OutputError::ConfigureFailed => defmt::write!(fmt, "configure failed"),
            OutputError::WriteFailed => defmt::write!(fmt, "write failed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SubscribeError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SubscribeError::QueueFull => defmt::write!(fmt, "request queue full"),
            SubscribeError::NotConnected => defmt::write!(fmt, "not connected"),
        }
    }
}
