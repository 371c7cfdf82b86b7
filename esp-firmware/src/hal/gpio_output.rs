// GPIO Output Pin - Implementierung des OutputPin Traits
//
// Kapselt den esp-hal Flex-Pin, damit Output Controller und Dispatcher
// aus esp-core ohne Hardware-Abhängigkeit getestet werden können.

use esp_core::{OutputError, OutputPin};
use esp_hal::gpio::{DriveMode, Flex, Level, OutputConfig, Pin};

/// Digitaler Ausgang auf einem ESP32 GPIO
///
/// Nach `new()` ist der Pin noch nicht als Ausgang aktiv - das passiert
/// erst in `configure_as_output()` (via `OutputController::initialize`).
pub struct GpioOutputPin<'d> {
    pin: Flex<'d>,
}

impl<'d> GpioOutputPin<'d> {
    /// Übernimmt das GPIO-Peripheral (z.B. `peripherals.GPIO2`)
    pub fn new(pin: impl Pin + 'd) -> Self {
        Self {
            pin: Flex::new(pin),
        }
    }
}

impl OutputPin for GpioOutputPin<'_> {
    fn configure_as_output(&mut self) -> Result<(), OutputError> {
        // Erst Pegel auf Low, dann Treiber aktivieren (kein Aufblitzen beim Start)
        self.pin.set_level(Level::Low);
        self.pin
            .apply_output_config(&OutputConfig::default().with_drive_mode(DriveMode::PushPull));
        self.pin.set_output_enable(true);
        Ok(())
    }

    fn set_level(&mut self, on: bool) -> Result<(), OutputError> {
        // Register-Write, kann auf dem ESP32 nicht fehlschlagen
        self.pin.set_level(Level::from(on));
        Ok(())
    }
}
