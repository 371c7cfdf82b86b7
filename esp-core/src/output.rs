//! Output Controller
//!
//! Kapselt den einen digitalen Ausgang. Der zuletzt kommandierte Pegel
//! wird nicht gespeichert - die Hardware ist die einzige Wahrheit.

use crate::traits::{OutputError, OutputPin};

pub struct OutputController<P: OutputPin> {
    pin: P,
}

impl<P: OutputPin> OutputController<P> {
    /// Konfiguriert den Pin als Ausgang und übernimmt ihn
    ///
    /// Ohne erfolgreiche Initialisierung gibt es keinen Controller, also
    /// auch kein `set_output` vorher. Ein Fehler hier ist beim Start fatal.
    pub fn initialize(mut pin: P) -> Result<Self, OutputError> {
        pin.configure_as_output()?;
        info!("LED: Output configured");
        Ok(Self { pin })
    }

    /// Setzt den Ausgang auf den gewünschten Pegel
    ///
    /// Idempotent: derselbe Pegel wird einfach erneut geschrieben.
    pub fn set_output(&mut self, on: bool) -> Result<(), OutputError> {
        self.pin.set_level(on)
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}
