// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

// Embassy Async Runtime
use defmt::info;
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_mqtt_led::config::{
    DISPATCHER_CONFIG, EXTRA_HEAP_SIZE, IDLE_INTERVAL_SECS, LED_GPIO_PIN, MQTT_BROKER_URL,
    NET_STACK_SOCKETS, WIFI_HEAP_SIZE,
};
use esp_mqtt_led::hal::GpioOutputPin;
use esp_mqtt_led::tasks::{connection_task, dhcp_task, mqtt_task, net_task};
use esp_mqtt_led::{BrokerAddress, LedDispatcher, LedOutput};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, WiFi, LED-Ausgang, startet Embassy Runtime und
/// spawnt Tasks. Danach schläft main() - alle Arbeit läuft in Tasks.
///
/// Fehler bei der Initialisierung sind fatal (Panic → esp-backtrace).
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    info!("APP: Starting...");

    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren (WiFi braucht dynamischen Speicher!)
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // Broker-URI einmalig parsen (vor jedem Netzwerk-Zugriff)
    let broker = BrokerAddress::parse(MQTT_BROKER_URL).expect("Invalid MQTT_BROKER_URL");
    info!("APP: Broker {}:{}", broker.host, broker.port);

    // LED-Ausgang konfigurieren - muss vor dem ersten Kommando passieren
    info!("LED: Configuring GPIO {} as output", LED_GPIO_PIN);
    // GPIO2 == LED_GPIO_PIN: beim Ändern beide Stellen anpassen
    let output = LedOutput::initialize(GpioOutputPin::new(peripherals.GPIO2))
        .expect("Failed to configure LED output");
    let dispatcher = LedDispatcher::new(DISPATCHER_CONFIG, output);

    // WiFi Hardware initialisieren
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Netzwerk-Stack erstellen
    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    static RESOURCES: static_cell::StaticCell<StackResources<NET_STACK_SOCKETS>> =
        static_cell::StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    // embassy-net erstellt Stack + Runner (nutzt STA interface für Client-Modus)
    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    // Stack muss 'static sein für Tasks
    static STACK: static_cell::StaticCell<Stack<'static>> = static_cell::StaticCell::new();
    let stack = &*STACK.init(stack);

    // Spawn WiFi Tasks
    spawner.spawn(connection_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner.spawn(dhcp_task(stack)).unwrap();

    // Spawn MQTT Task (besitzt den Dispatcher und damit die LED)
    spawner.spawn(mqtt_task(stack, broker, dispatcher)).unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(IDLE_INTERVAL_SECS)).await;
    }
}
