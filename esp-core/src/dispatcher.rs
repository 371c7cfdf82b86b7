//! Command Dispatcher
//!
//! Event-Handler für den MQTT-Transport: klassifiziert Lifecycle-Events,
//! filtert Daten-Events nach Topic, interpretiert den Payload und steuert
//! den Output Controller. Einziger Aufrufer des Output Controllers.

use crate::config::DispatcherConfig;
use crate::output::OutputController;
use crate::traits::{MqttClient, MqttEventHandler, OutputPin};
use crate::types::{Command, LinkState, MqttEvent, Outcome, PayloadDisplay};

/// Command Dispatcher für genau ein Topic und genau einen Ausgang
///
/// # Zustandsmaschine (pro Verbindung)
/// `Disconnected → (Connected) → SubscriptionPending → (Subscribed) → Active`
///
/// Der Zustand dient nur der Observability. `Data` wird immer gleich
/// verarbeitet, auch vor `Subscribed`.
///
/// # Nebenläufigkeit
/// `handle_event` nimmt `&mut self` - der Transport muss Events also
/// serialisiert ausliefern. Der Ausgang braucht dadurch keinen Lock.
pub struct CommandDispatcher<P: OutputPin> {
    config: DispatcherConfig,
    output: OutputController<P>,
    state: LinkState,
}

impl<P: OutputPin> CommandDispatcher<P> {
    pub fn new(config: DispatcherConfig, output: OutputController<P>) -> Self {
        Self {
            config,
            output,
            state: LinkState::Disconnected,
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn into_output(self) -> OutputController<P> {
        self.output
    }

    /// Abonniert das Topic - bei jedem `Connected`, auch nach Reconnects
    ///
    /// Fehlgeschlagene Subscriptions werden nur gemeldet, nicht wiederholt.
    fn on_connected<C: MqttClient>(&mut self, client: &mut C) -> Outcome {
        info!("MQTT: Connected");
        self.state = LinkState::SubscriptionPending;

        let topic = self.config.topic;
        match client.subscribe(topic, self.config.qos) {
            Ok(message_id) => {
                info!(
                    "MQTT: Subscribe to '{}' sent, msg_id={}",
                    topic.as_str(),
                    message_id
                );
                Outcome::SubscribeRequested(message_id)
            }
            Err(e) => {
                error!("MQTT: Subscribe to '{}' failed: {}", topic.as_str(), e);
                Outcome::SubscribeFailed(e)
            }
        }
    }

    fn on_data(&mut self, topic: &[u8], payload: &[u8]) -> Outcome {
        debug!(
            "MQTT: Data topic='{}' payload='{}'",
            PayloadDisplay(topic),
            PayloadDisplay(payload)
        );

        if !self.config.topic.matches(topic) {
            return Outcome::TopicMismatch;
        }

        let command = Command::parse(payload);
        let Some(level) = command.level() else {
            warn!(
                "LED: Unknown command received: '{}'",
                PayloadDisplay(payload)
            );
            return Outcome::Unrecognized;
        };

        info!("LED: Command {}", command.as_str());
        match self.output.set_output(level) {
            Ok(()) => Outcome::Applied(command),
            Err(e) => {
                error!("LED: Failed to set output: {}", e);
                Outcome::OutputFailed(e)
            }
        }
    }
}

impl<P: OutputPin, C: MqttClient> MqttEventHandler<C> for CommandDispatcher<P> {
    fn handle_event(&mut self, client: &mut C, event: MqttEvent<'_>) -> Outcome {
        debug!("MQTT: Event {}", event.kind());
        match event {
            MqttEvent::Connected => self.on_connected(client),
            MqttEvent::Disconnected => {
                info!("MQTT: Disconnected");
                self.state = LinkState::Disconnected;
                Outcome::Observed
            }
            MqttEvent::Subscribed { message_id } => {
                info!("MQTT: Subscribed, msg_id={}", message_id);
                self.state = LinkState::Active;
                Outcome::Observed
            }
            MqttEvent::Data { topic, payload } => self.on_data(topic, payload),
            MqttEvent::Published { message_id } => {
                info!("MQTT: Published, msg_id={}", message_id);
                Outcome::Observed
            }
            MqttEvent::Unsubscribed { message_id } => {
                info!("MQTT: Unsubscribed, msg_id={}", message_id);
                Outcome::Observed
            }
            MqttEvent::Error => {
                error!("MQTT: Transport error");
                Outcome::Observed
            }
            MqttEvent::Other(code) => {
                info!("MQTT: Other event id={}", code);
                Outcome::Observed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{OutputError, SubscribeError};
    use crate::types::{MessageId, QoS, Topic};

    const LED_TOPIC: Topic = Topic::new("/x/led");

    #[derive(Default)]
    struct TestPin {
        level: Option<bool>,
        writes: usize,
    }

    impl OutputPin for TestPin {
        fn configure_as_output(&mut self) -> Result<(), OutputError> {
            Ok(())
        }

        fn set_level(&mut self, on: bool) -> Result<(), OutputError> {
            self.level = Some(on);
            self.writes += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct TestClient {
        subscribe_calls: usize,
        last: Option<(Topic, QoS)>,
        reject: bool,
    }

    impl MqttClient for TestClient {
        fn subscribe(&mut self, topic: Topic, qos: QoS) -> Result<MessageId, SubscribeError> {
            if self.reject {
                return Err(SubscribeError::NotConnected);
            }
            self.subscribe_calls += 1;
            self.last = Some((topic, qos));
            Ok(self.subscribe_calls as MessageId)
        }
    }

    fn dispatcher() -> CommandDispatcher<TestPin> {
        let output = OutputController::initialize(TestPin::default()).unwrap();
        CommandDispatcher::new(DispatcherConfig::new(LED_TOPIC), output)
    }

    fn data<'a>(topic: &'a [u8], payload: &'a [u8]) -> MqttEvent<'a> {
        MqttEvent::Data { topic, payload }
    }

    #[test]
    fn test_state_machine() {
        let mut d = dispatcher();
        let mut client = TestClient::default();
        assert_eq!(d.state(), LinkState::Disconnected);

        d.handle_event(&mut client, MqttEvent::Connected);
        assert_eq!(d.state(), LinkState::SubscriptionPending);

        d.handle_event(&mut client, MqttEvent::Subscribed { message_id: 1 });
        assert_eq!(d.state(), LinkState::Active);

        d.handle_event(&mut client, MqttEvent::Disconnected);
        assert_eq!(d.state(), LinkState::Disconnected);
    }

    #[test]
    fn test_connected_subscribes_with_qos1() {
        let mut d = dispatcher();
        let mut client = TestClient::default();

        let outcome = d.handle_event(&mut client, MqttEvent::Connected);

        assert_eq!(outcome, Outcome::SubscribeRequested(1));
        assert_eq!(client.last, Some((LED_TOPIC, QoS::AtLeastOnce)));
    }

    #[test]
    fn test_subscribe_failure_is_reported() {
        let mut d = dispatcher();
        let mut client = TestClient {
            reject: true,
            ..Default::default()
        };

        let outcome = d.handle_event(&mut client, MqttEvent::Connected);
        assert_eq!(
            outcome,
            Outcome::SubscribeFailed(SubscribeError::NotConnected)
        );
        assert_eq!(d.state(), LinkState::SubscriptionPending);
    }

    #[test]
    fn test_data_before_subscribed_is_processed() {
        let mut d = dispatcher();
        let mut client = TestClient::default();

        let outcome = d.handle_event(&mut client, data(b"/x/led", b"1"));

        assert_eq!(outcome, Outcome::Applied(Command::TurnOn));
        assert_eq!(d.state(), LinkState::Disconnected);
        assert_eq!(d.output.into_inner().level, Some(true));
    }

    #[test]
    fn test_topic_mismatch_has_no_effect() {
        let mut d = dispatcher();
        let mut client = TestClient::default();

        let outcome = d.handle_event(&mut client, data(b"/other/topic", b"1"));
        assert_eq!(outcome, Outcome::TopicMismatch);

        let pin = d.output.into_inner();
        assert_eq!(pin.writes, 0);
        assert_eq!(pin.level, None);
    }

    #[test]
    fn test_unrecognized_has_no_effect() {
        let mut d = dispatcher();
        let mut client = TestClient::default();

        let outcome = d.handle_event(&mut client, data(b"/x/led", b"on"));
        assert_eq!(outcome, Outcome::Unrecognized);
        assert_eq!(d.output.into_inner().writes, 0);
    }

    #[test]
    fn test_observability_events() {
        let mut d = dispatcher();
        let mut client = TestClient::default();

        for event in [
            MqttEvent::Published { message_id: 3 },
            MqttEvent::Unsubscribed { message_id: 4 },
            MqttEvent::Error,
            MqttEvent::Other(7),
        ] {
            assert_eq!(d.handle_event(&mut client, event), Outcome::Observed);
        }
        assert_eq!(client.subscribe_calls, 0);
        assert_eq!(d.state(), LinkState::Disconnected);
    }
}
