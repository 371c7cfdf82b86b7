//! Gemeinsame Mocks für die Integration Tests
//!
//! Diese Tests laufen auf dem Host (x86_64) ohne ESP32-Hardware.
#![allow(dead_code)]

use std::cell::RefCell;

use esp_core::{
    CommandDispatcher, DispatcherConfig, MessageId, MqttClient, OutputController, OutputError,
    OutputPin, QoS, SubscribeError, Topic,
};
use log::{Level, LevelFilter, Log, Metadata, Record};

pub const LED_TOPIC: Topic = Topic::new("/x/led");

// ============================================================================
// Mock Output Pin
// ============================================================================

#[derive(Default)]
pub struct MockOutputPin {
    /// Zuletzt geschriebener Pegel (für Assertions in Tests)
    pub level: Option<bool>,
    /// Anzahl der set_level() Aufrufe
    pub write_count: usize,
    pub configured: bool,
    /// Simuliere Fehler bei configure_as_output()
    pub fail_configure: bool,
    /// Simuliere Fehler beim nächsten set_level()
    pub fail_next_write: bool,
}

impl MockOutputPin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputPin for MockOutputPin {
    fn configure_as_output(&mut self) -> Result<(), OutputError> {
        if self.fail_configure {
            return Err(OutputError::ConfigureFailed);
        }
        self.configured = true;
        Ok(())
    }

    fn set_level(&mut self, on: bool) -> Result<(), OutputError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(OutputError::WriteFailed);
        }

        self.level = Some(on);
        self.write_count += 1;
        Ok(())
    }
}

// ============================================================================
// Mock MQTT Client
// ============================================================================

#[derive(Default)]
pub struct MockClient {
    pub subscriptions: Vec<(Topic, QoS)>,
    pub next_message_id: MessageId,
    pub reject_next: Option<SubscribeError>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            next_message_id: 1,
            ..Self::default()
        }
    }
}

impl MqttClient for MockClient {
    fn subscribe(&mut self, topic: Topic, qos: QoS) -> Result<MessageId, SubscribeError> {
        if let Some(e) = self.reject_next.take() {
            return Err(e);
        }
        self.subscriptions.push((topic, qos));
        let id = self.next_message_id;
        self.next_message_id += 1;
        Ok(id)
    }
}

pub fn dispatcher() -> CommandDispatcher<MockOutputPin> {
    let output = OutputController::initialize(MockOutputPin::new()).unwrap();
    CommandDispatcher::new(DispatcherConfig::new(LED_TOPIC), output)
}

// ============================================================================
// Capturing Logger
// ============================================================================
//
// Der Test-Harness startet jeden Test in einem eigenen Thread, daher
// werden Log-Records thread-lokal gesammelt.

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()));
        });
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger;

/// Installiert den Logger (mehrfach aufrufbar) und leert die Records
pub fn capture_logs() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
    RECORDS.with(|records| records.borrow_mut().clear());
}

pub fn records_at(level: Level) -> Vec<String> {
    RECORDS.with(|records| {
        records
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg.clone())
            .collect()
    })
}
