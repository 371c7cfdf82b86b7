//! Subscribe Queue
//!
//! Client-Handle das der Transport an den Event-Handler übergibt.
//! `subscribe()` wird aus dem Handler aufgerufen und darf nicht warten -
//! die Anfrage landet in der Queue und wird vom Transport nach dem
//! Handler-Aufruf ausgeführt.

use heapless::Vec;

use crate::traits::{MqttClient, SubscribeError};
use crate::types::{MessageId, QoS, Topic};

/// Eine vom Handler angefragte Subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscribeRequest {
    pub topic: Topic,
    pub qos: QoS,
    pub message_id: MessageId,
}

/// Begrenzte Queue für Subscribe-Anfragen mit `N` Plätzen
pub struct SubscribeQueue<const N: usize> {
    pending: Vec<SubscribeRequest, N>,
    next_message_id: MessageId,
    connected: bool,
}

impl<const N: usize> SubscribeQueue<N> {
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_message_id: 1,
            connected: false,
        }
    }

    /// Broker-Verbindung steht: ab jetzt werden Anfragen angenommen
    pub fn connect(&mut self) {
        self.connected = true;
    }

    /// Verbindung weg: offene Anfragen verfallen (werden bei `Connected` neu gestellt)
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.pending.clear();
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Nächste offene Anfrage in Eingangsreihenfolge
    pub fn next_pending(&mut self) -> Option<SubscribeRequest> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    /// MQTT Paket-IDs sind nie 0
    fn allocate_message_id(&mut self) -> MessageId {
        let id = self.next_message_id;
        self.next_message_id = self.next_message_id.checked_add(1).unwrap_or(1);
        id
    }
}

impl<const N: usize> Default for SubscribeQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MqttClient for SubscribeQueue<N> {
    fn subscribe(&mut self, topic: Topic, qos: QoS) -> Result<MessageId, SubscribeError> {
        if !self.connected {
            return Err(SubscribeError::NotConnected);
        }
        if self.pending.is_full() {
            return Err(SubscribeError::QueueFull);
        }

        let message_id = self.allocate_message_id();
        self.pending
            .push(SubscribeRequest {
                topic,
                qos,
                message_id,
            })
            .map_err(|_| SubscribeError::QueueFull)?;
        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPIC: Topic = Topic::new("/x/led");

    #[test]
    fn test_first_message_id_is_one() {
        let mut queue = SubscribeQueue::<1>::new();
        queue.connect();
        assert_eq!(queue.subscribe(TOPIC, QoS::AtLeastOnce), Ok(1));
    }

    #[test]
    fn test_next_pending_is_fifo() {
        let mut queue = SubscribeQueue::<2>::new();
        queue.connect();
        queue.subscribe(TOPIC, QoS::AtLeastOnce).unwrap();
        queue.subscribe(TOPIC, QoS::AtMostOnce).unwrap();

        assert_eq!(queue.next_pending().map(|r| r.message_id), Some(1));
        assert_eq!(queue.next_pending().map(|r| r.message_id), Some(2));
        assert_eq!(queue.next_pending(), None);
    }
}
