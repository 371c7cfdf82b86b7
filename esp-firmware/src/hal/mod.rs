// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul implementiert die Traits aus esp-core
// für die echte ESP32-Hardware.

pub mod gpio_output;

pub use gpio_output::GpioOutputPin;
