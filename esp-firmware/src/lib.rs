// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von esp-core
pub use esp_core::{
    BrokerAddress, Command, CommandDispatcher, DispatcherConfig, MqttEvent, OutputController,
    OutputError,
};

use crate::hal::GpioOutputPin;

// ============================================================================
// Type-Aliase
// ============================================================================

/// Output Controller auf dem echten GPIO
pub type LedOutput = OutputController<GpioOutputPin<'static>>;

/// Command Dispatcher mit echtem GPIO-Ausgang
/// Wird in main.rs erstellt und an den MQTT-Task übergeben
pub type LedDispatcher = CommandDispatcher<GpioOutputPin<'static>>;
