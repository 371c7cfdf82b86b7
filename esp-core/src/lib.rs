//! ESP Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, den Output Controller, den Command Dispatcher
//! und Pure Functions.

#![no_std]

// Muss als erstes Modul stehen (Makros gelten nur für nachfolgende Module)
#[macro_use]
mod fmt;

pub mod config;
pub mod dispatcher;
pub mod logic;
pub mod output;
pub mod queue;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use config::{BrokerAddress, ConfigError, DEFAULT_MQTT_PORT, DispatcherConfig};
pub use dispatcher::CommandDispatcher;
pub use logic::{interpret_payload, topic_matches};
pub use output::OutputController;
pub use queue::{SubscribeQueue, SubscribeRequest};
pub use traits::{MqttClient, MqttEventHandler, OutputError, OutputPin, SubscribeError};
pub use types::{
    Command, LinkState, MessageId, MqttEvent, Outcome, PayloadDisplay, QoS, SUBSCRIBE_QOS, Topic,
};
