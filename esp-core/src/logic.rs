//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use crate::types::Command;

/// Interpretiert den Payload einer Nachricht als Kommando
///
/// Nur exakt ein Byte `'1'` bzw. `'0'` ist gültig. Leerer Payload,
/// mehrere Bytes oder angehängte Daten ergeben `Unrecognized`.
///
/// # Beispiele
///
/// ```
/// # use esp_core::{Command, interpret_payload};
/// assert_eq!(interpret_payload(b"1"), Command::TurnOn);
/// assert_eq!(interpret_payload(b"0"), Command::TurnOff);
/// assert_eq!(interpret_payload(b"10"), Command::Unrecognized);
/// ```
pub fn interpret_payload(payload: &[u8]) -> Command {
    match payload {
        b"1" => Command::TurnOn,
        b"0" => Command::TurnOff,
        _ => Command::Unrecognized,
    }
}

/// Vergleicht ein empfangenes Topic byte-genau mit dem erwarteten
///
/// `delivered` ist bereits auf die vom Transport gemeldete Länge
/// beschnitten - alles dahinter im Puffer wird nie gelesen.
/// Ein Präfix des erwarteten Topics ist kein Treffer.
pub fn topic_matches(delivered: &[u8], expected: &[u8]) -> bool {
    delivered == expected
}
