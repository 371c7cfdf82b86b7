// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Die LED wird ausschließlich aus dem MQTT-Task gesteuert (via Dispatcher).

pub mod mqtt;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use mqtt::mqtt_task;
pub use wifi::{connection_task, dhcp_task, net_task};
