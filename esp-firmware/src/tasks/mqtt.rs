// MQTT Task - Empfängt LED-Kommandos vom Broker
//
// Dieser Task ist die Transport-Integration: er hält die Broker-Verbindung,
// übersetzt alles was passiert in MqttEvents und liefert sie an den
// Command Dispatcher aus esp-core.
use defmt::{Debug2Format, error, info, warn};
use embassy_net::{IpAddress, Stack, dns::DnsQueryType, tcp::TcpSocket};
use embassy_time::{Duration, Instant, Timer, with_timeout};

use esp_core::{BrokerAddress, MqttEvent, MqttEventHandler, QoS, SubscribeQueue};
use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::utils::rng_generator::CountingRng;
use rust_mqtt::utils::types::EncodedString;

use crate::LedDispatcher;
use crate::config::*;
use crate::tasks::wifi::wait_for_network;

/// MQTT Task - läuft parallel zu den WiFi-Tasks
///
/// Besitzt den Dispatcher exklusiv: alle Events werden aus diesem einen
/// Task ausgeliefert und sind dadurch serialisiert.
///
/// - Wartet auf Netzwerk-Verbindung
/// - Verbindet sich mit dem Broker und meldet `Connected`
/// - Führt die dabei angefragte Subscription aus
/// - Liefert empfangene Nachrichten als `Data` aus
/// - Meldet `Error`/`Disconnected` und verbindet neu
///
/// # Parameter
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `broker`: Geparste Broker-Adresse aus `MQTT_BROKER_URL`
/// - `dispatcher`: Command Dispatcher mit initialisiertem LED-Ausgang
#[embassy_executor::task]
pub async fn mqtt_task(
    stack: &'static Stack<'static>,
    broker: BrokerAddress<'static>,
    mut dispatcher: LedDispatcher,
) {
    info!("MQTT: Task started, waiting for network...");
    let mut requests = RequestQueue::new();
    // rust-mqtt kennt nur eine QoS für alle Subscriptions - es gibt nur ein Topic
    let qos = dispatcher.config().qos;

    loop {
        wait_for_network(stack).await;

        match run_session(stack, &broker, qos, &mut dispatcher, &mut requests).await {
            Ok(_) => warn!("MQTT: Connection closed normally"),
            Err(e) => {
                error!("MQTT: Error: {}", e);
                dispatcher.handle_event(&mut requests, MqttEvent::Error);
            }
        }

        requests.disconnect();
        dispatcher.handle_event(&mut requests, MqttEvent::Disconnected);

        info!("MQTT: Reconnecting in {}s...", MQTT_RECONNECT_DELAY_SECS);
        Timer::after(Duration::from_secs(MQTT_RECONNECT_DELAY_SECS)).await;
    }
}

/// Eine Broker-Session vom TCP-Connect bis zum ersten Fehler
///
/// 1. DNS-Auflösung des Broker-Hostnames
/// 2. TCP-Verbindung aufbauen
/// 3. MQTT CONNECT senden → `Connected` an den Handler
/// 4. Angefragte Subscriptions ausführen → `Subscribed` bzw. `Error`
/// 5. Nachrichten empfangen → `Data`, alle `MQTT_PING_INTERVAL_SECS` PINGREQ senden
///
/// Kehrt nur mit einem Fehler zurück; der Aufrufer verbindet neu.
async fn run_session<H: MqttEventHandler<RequestQueue>>(
    stack: &'static Stack<'static>,
    broker: &BrokerAddress<'static>,
    qos: QoS,
    handler: &mut H,
    requests: &mut RequestQueue,
) -> Result<(), MqttError> {
    // DNS Lookup
    info!("MQTT: Resolving '{}'...", broker.host);
    let broker_ip = resolve_hostname(stack, broker.host).await?;
    info!("MQTT: Resolved to {}", Debug2Format(&broker_ip));

    // TCP Connect
    let mut rx_buffer = [0u8; MQTT_TCP_BUFFER_SIZE];
    let mut tx_buffer = [0u8; MQTT_TCP_BUFFER_SIZE];
    let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(MQTT_SOCKET_TIMEOUT_SECS)));

    socket
        .connect((broker_ip, broker.port))
        .await
        .map_err(|_| MqttError::ConnectionFailed)?;
    info!("MQTT: TCP connected");

    // MQTT Client Configuration
    let rng = CountingRng(20000);
    let mut config = ClientConfig::<MQTT_MAX_PROPERTIES, _>::new(MqttVersion::MQTTv5, rng);
    config.client_id = EncodedString {
        string: MQTT_CLIENT_ID,
        len: MQTT_CLIENT_ID.len() as u16,
    };
    config.keep_alive = MQTT_KEEP_ALIVE_SECS;
    config.max_packet_size = MQTT_BUFFER_SIZE as u32;
    config.add_max_subscribe_qos(quality_of_service(qos));

    let mut send_buffer = [0u8; MQTT_BUFFER_SIZE];
    let mut recv_buffer = [0u8; MQTT_BUFFER_SIZE];

    let mut client = MqttClient::<_, MQTT_MAX_PROPERTIES, _>::new(
        socket,
        &mut send_buffer,
        MQTT_BUFFER_SIZE,
        &mut recv_buffer,
        MQTT_BUFFER_SIZE,
        config,
    );

    // MQTT CONNECT
    client.connect_to_broker().await.map_err(|reason| {
        warn!("MQTT: CONNECT rejected: {}", Debug2Format(&reason));
        MqttError::ProtocolError
    })?;
    info!("MQTT: Connected to {}:{}", broker.host, broker.port);

    requests.connect();
    handler.handle_event(requests, MqttEvent::Connected);

    // Subscriptions die der Handler bei `Connected` angefragt hat
    while let Some(request) = requests.next_pending() {
        info!(
            "MQTT: SUBSCRIBE '{}' qos={} msg_id={}",
            request.topic.as_str(),
            request.qos.as_u8(),
            request.message_id
        );
        if request.qos != qos {
            warn!(
                "MQTT: Requested qos={} differs from session qos={}",
                request.qos.as_u8(),
                qos.as_u8()
            );
        }
        match client.subscribe_to_topic(request.topic.as_str()).await {
            Ok(()) => {
                handler.handle_event(
                    requests,
                    MqttEvent::Subscribed {
                        message_id: request.message_id,
                    },
                );
            }
            Err(reason) => {
                // Kein Retry: wird nur gemeldet
                warn!(
                    "MQTT: SUBSCRIBE msg_id={} failed: {}",
                    request.message_id,
                    Debug2Format(&reason)
                );
                handler.handle_event(requests, MqttEvent::Error);
            }
        }
    }

    // Receive Loop
    //
    // Gelesen wird nur wenn Daten anliegen, damit kein Read mitten im Paket
    // abgebrochen wird. PINGREQ nur wenn nichts anliegt: rust-mqtt erwartet
    // direkt danach PINGRESP und verwirft jedes andere Paket.
    let ping_interval = Duration::from_secs(MQTT_PING_INTERVAL_SECS);
    let mut next_ping = Instant::now() + ping_interval;

    loop {
        match client.receive_message_if_ready().await {
            Ok(Some((topic, payload))) => {
                handler.handle_event(
                    requests,
                    MqttEvent::Data {
                        topic: topic.as_bytes(),
                        payload,
                    },
                );
                continue;
            }
            Ok(None) => {}
            Err(reason) => {
                warn!("MQTT: Receive failed: {}", Debug2Format(&reason));
                return Err(MqttError::ReceiveFailed);
            }
        }

        if Instant::now() >= next_ping {
            client.send_ping().await.map_err(|reason| {
                warn!("MQTT: Ping failed: {}", Debug2Format(&reason));
                MqttError::PingFailed
            })?;
            next_ping = Instant::now() + ping_interval;
        }

        Timer::after(Duration::from_millis(MQTT_POLL_INTERVAL_MS)).await;
    }
}

/// Löst Hostname zu IPv4-Adresse auf
///
/// Nutzt embassy-net DNS-Stack mit konfigurierbarem Timeout.
/// IP-Literale werden direkt zurückgegeben.
async fn resolve_hostname(
    stack: &'static Stack<'static>,
    hostname: &str,
) -> Result<embassy_net::Ipv4Address, MqttError> {
    let result = with_timeout(
        Duration::from_secs(DNS_TIMEOUT_SECS),
        stack.dns_query(hostname, DnsQueryType::A),
    )
    .await;

    match result {
        Ok(Ok(addrs)) => addrs
            .iter()
            .find_map(|addr| match addr {
                IpAddress::Ipv4(ipv4) => Some(*ipv4),
                #[allow(unreachable_patterns)]
                _ => None,
            })
            .ok_or(MqttError::DnsResolutionFailed),
        Ok(Err(_)) => Err(MqttError::DnsResolutionFailed),
        Err(_) => Err(MqttError::DnsTimeout),
    }
}

/// Client-Handle das der Dispatcher bei `Connected` bekommt
type RequestQueue = SubscribeQueue<MQTT_SUBSCRIBE_QUEUE_DEPTH>;

fn quality_of_service(qos: QoS) -> QualityOfService {
    match qos {
        QoS::AtMostOnce => QualityOfService::QoS0,
        QoS::AtLeastOnce => QualityOfService::QoS1,
        QoS::ExactlyOnce => QualityOfService::QoS2,
    }
}

/// MQTT Fehler-Typen
///
/// Alle möglichen Fehler die eine Broker-Session beenden können.
#[derive(Debug)]
enum MqttError {
    DnsResolutionFailed,
    DnsTimeout,
    ConnectionFailed,
    ProtocolError,
    ReceiveFailed,
    PingFailed,
}

impl defmt::Format for MqttError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MqttError::DnsResolutionFailed => defmt::write!(fmt, "DNS failed"),
            MqttError::DnsTimeout => defmt::write!(fmt, "DNS timeout"),
            MqttError::ConnectionFailed => defmt::write!(fmt, "Connection failed"),
            MqttError::ProtocolError => defmt::write!(fmt, "Protocol error"),
            MqttError::ReceiveFailed => defmt::write!(fmt, "Receive failed"),
            MqttError::PingFailed => defmt::write!(fmt, "Ping failed"),
        }
    }
}
