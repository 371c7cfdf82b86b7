// WiFi Tasks - Station-Verbindung, Netzwerk-Stack und DHCP
//
// Netzwerk-Aufbau ist kein Teil der LED-Logik: diese Tasks sorgen nur
// dafür, dass der MQTT-Task irgendwann einen Stack mit IP-Adresse hat.
use defmt::{Debug2Format, error, info, warn};
use embassy_net::{Runner, Stack};
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController, WifiDevice, WifiEvent};

use crate::config::{
    NETWORK_POLL_INTERVAL_MS, WIFI_PASSWORD, WIFI_RECONNECT_DELAY_SECS, WIFI_RETRY_DELAY_SECS,
    WIFI_SSID,
};

/// WiFi Connection Task
///
/// Startet den Controller im Station-Modus, verbindet mit dem Access Point
/// und verbindet nach jedem Abbruch neu.
#[embassy_executor::task]
pub async fn connection_task(mut controller: WifiController<'static>) {
    info!("WiFi: Starting connection task");

    loop {
        if matches!(controller.is_started(), Ok(false)) {
            if let Err(e) = start_station(&mut controller).await {
                error!("WiFi: Start failed: {}", Debug2Format(&e));
                Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
                continue;
            }
            info!("WiFi: Station started");
        }

        info!("WiFi: Connecting to '{}'...", WIFI_SSID);
        if let Err(e) = controller.connect_async().await {
            error!("WiFi: Connection failed: {}", Debug2Format(&e));
            Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
            continue;
        }
        info!("WiFi: Connected");

        controller.wait_for_event(WifiEvent::StaDisconnected).await;
        warn!("WiFi: Disconnected from AP, will retry...");
        Timer::after(Duration::from_secs(WIFI_RECONNECT_DELAY_SECS)).await;
    }
}

/// Konfiguriert SSID/Passwort und startet den WiFi-Controller
async fn start_station(
    controller: &mut WifiController<'static>,
) -> Result<(), esp_radio::wifi::WifiError> {
    let client_config = ModeConfig::Client(
        ClientConfig::default()
            .with_ssid(WIFI_SSID.into())
            .with_password(WIFI_PASSWORD.into()),
    );
    controller.set_config(&client_config)?;
    controller.start_async().await
}

/// Network Task
///
/// Treibt den embassy-net Stack (Pakete, TCP/IP, DHCP).
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}

/// DHCP Monitor Task
///
/// Loggt die Netzwerk-Konfiguration sobald eine IP-Adresse vorliegt.
#[embassy_executor::task]
pub async fn dhcp_task(stack: &'static Stack<'static>) {
    wait_for_network(stack).await;

    if let Some(config) = stack.config_v4() {
        info!("WiFi: Got IP address!");
        info!("  IP:      {}", Debug2Format(&config.address.address()));
        info!("  Gateway: {}", Debug2Format(&config.gateway));
        info!("  DNS:     {}", Debug2Format(&config.dns_servers));
    }
}

/// Wartet bis Link up ist und DHCP eine IPv4-Konfiguration geliefert hat
///
/// Wird von DHCP-Monitor und MQTT-Task gemeinsam genutzt.
pub async fn wait_for_network(stack: &'static Stack<'static>) {
    while !(stack.is_link_up() && stack.config_v4().is_some()) {
        Timer::after(Duration::from_millis(NETWORK_POLL_INTERVAL_MS)).await;
    }
}
