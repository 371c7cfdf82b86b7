// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

use esp_core::{DispatcherConfig, Topic};

// ============================================================================
// LED Konfiguration
// ============================================================================

/// GPIO-Pin für die LED (digitaler Ausgang)
/// Muss zum Peripheral passen, das in main.rs übergeben wird (GPIO2)
pub const LED_GPIO_PIN: u8 = 2;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Wartezeit nach fehlgeschlagenem Verbindungsversuch
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Wartezeit nach Verbindungsabbruch vor Reconnect
pub const WIFI_RECONNECT_DELAY_SECS: u64 = 2;

/// Polling-Intervall beim Warten auf Link + DHCP
pub const NETWORK_POLL_INTERVAL_MS: u64 = 500;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

/// Anzahl Sockets im embassy-net Stack
/// DHCP (1) + DNS (1) + MQTT (1) + Reserve
pub const NET_STACK_SOCKETS: usize = 4;

// ============================================================================
// MQTT Konfiguration
// ============================================================================

/// MQTT Broker URI, z.B. "mqtt://broker.local:1883"
/// Wird zur Build-Zeit aus der Environment Variable MQTT_BROKER_URL geladen
/// Ohne Port wird 1883 verwendet, `mqtts://` wird nicht unterstützt
pub const MQTT_BROKER_URL: &str = env!(
    "MQTT_BROKER_URL",
    "MQTT Broker URL nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Client ID
/// Eindeutige Kennung für diesen ESP32-C6
pub const MQTT_CLIENT_ID: &str = env!(
    "MQTT_CLIENT_ID",
    "MQTT Client ID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Topic für LED-Kommandos ("1" = an, "0" = aus)
pub const MQTT_TOPIC_LED: Topic = Topic::new("/ifpe/ads/embarcados/esp32/led");

/// Dispatcher-Konfiguration: LED-Topic mit QoS 1
pub const DISPATCHER_CONFIG: DispatcherConfig = DispatcherConfig::new(MQTT_TOPIC_LED);

/// MQTT Keep-Alive in Sekunden (wird beim CONNECT an den Broker gemeldet)
pub const MQTT_KEEP_ALIVE_SECS: u16 = 30;

/// Abstand zwischen zwei PINGREQ
/// Muss deutlich unter MQTT_KEEP_ALIVE_SECS liegen
pub const MQTT_PING_INTERVAL_SECS: u64 = 15;

/// Poll-Intervall für eingehende Pakete (obere Grenze der Kommando-Latenz)
pub const MQTT_POLL_INTERVAL_MS: u64 = 50;

/// MQTT Reconnect Delay in Sekunden
/// Wartezeit nach Verbindungsfehler vor erneutem Versuch
pub const MQTT_RECONNECT_DELAY_SECS: u64 = 5;

/// MQTT Buffer-Größe in Bytes
/// Muss groß genug für MQTT-Pakete sein
pub const MQTT_BUFFER_SIZE: usize = 1024;

/// Maximale Anzahl MQTT v5 Properties pro Paket
pub const MQTT_MAX_PROPERTIES: usize = 5;

/// Kapazität der Subscribe-Queue (ein Topic)
pub const MQTT_SUBSCRIBE_QUEUE_DEPTH: usize = 1;

/// TCP RX/TX Buffer-Größe für die Broker-Verbindung
pub const MQTT_TCP_BUFFER_SIZE: usize = 4096;

/// TCP Socket Timeout in Sekunden
pub const MQTT_SOCKET_TIMEOUT_SECS: u64 = 60;

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Main Loop
// ============================================================================

/// Schlaf-Intervall des Main-Tasks (hält nur die Runtime am Leben)
pub const IDLE_INTERVAL_SECS: u64 = 3600;
