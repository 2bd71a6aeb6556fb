// MQTT Task - Empfängt Drucker-Reports und speist sie in den PrinterContext
use defmt::{Debug2Format, error, info, warn};
use embassy_futures::select::{Either, select};
use embassy_net::{IpAddress, Stack, dns::DnsQueryType, tcp::TcpSocket};
use embassy_time::{Duration, Instant, Timer, with_timeout};

use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::utils::rng_generator::CountingRng;

use crate::{PingSchedule, SharedContext};
use crate::config::*;

/// MQTT Task - läuft parallel zu anderen Tasks
///
/// Dieser Task übernimmt die Verbindung zum Drucker:
/// - Wartet auf Netzwerk-Verbindung
/// - Verbindet sich mit dem Broker (Benutzer `bblp`, Passwort = Access Code)
/// - Abonniert `device/{serial}/report` und fordert einen vollständigen Report an
/// - Merged jeden Report in den geteilten Kontext
/// - Setzt den Link-Status, der Link-Monitor reagiert darauf
/// - Automatisches Reconnect bei Fehlern
///
/// # Parameter
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `ctx`: Geteilter PrinterContext
#[embassy_executor::task]
pub async fn mqtt_task(stack: &'static Stack<'static>, ctx: &'static SharedContext) {
    info!("MQTT: Task started, waiting for network...");
    wait_for_network(stack).await;
    info!("MQTT: Network ready");

    loop {
        match mqtt_connect_and_receive(stack, ctx).await {
            Ok(_) => warn!("MQTT: Connection closed normally"),
            Err(e) => error!("MQTT: Error: {}", e),
        }
        ctx.lock(|cell| cell.borrow_mut().set_link_up(false));

        info!("MQTT: Reconnecting in {}s...", MQTT_RECONNECT_DELAY_SECS);
        Timer::after(Duration::from_secs(MQTT_RECONNECT_DELAY_SECS)).await;
    }
}

/// Wartet bis Netzwerk-Verbindung verfügbar ist
///
/// Prüft kontinuierlich Link-Status und DHCP-Konfiguration.
async fn wait_for_network(stack: &'static Stack<'static>) {
    loop {
        if stack.is_link_up() && stack.config_v4().is_some() {
            break;
        }
        Timer::after(Duration::from_millis(500)).await;
    }
}

/// Verbindet mit dem Broker und verarbeitet Reports
///
/// Ablauf:
/// 1. DNS-Auflösung des Drucker-Hostnames
/// 2. TCP-Verbindung aufbauen
/// 3. MQTT CONNECT mit Zugangsdaten
/// 4. Report-Topic abonnieren, pushall anfordern
/// 5. Reports empfangen, Keep-Alive nach festem Plan und bei Funkstille pingen
///
/// Bei jedem Fehler wird die Funktion beendet und der Haupt-Loop
/// startet automatisch einen Reconnect-Versuch.
async fn mqtt_connect_and_receive(
    stack: &'static Stack<'static>,
    ctx: &'static SharedContext,
) -> Result<(), MqttError> {
    // DNS Lookup
    info!("MQTT: Resolving '{}'...", PRINTER_HOST);
    let broker_ip = resolve_hostname(stack, PRINTER_HOST).await?;
    info!("MQTT: Resolved to {}", Debug2Format(&broker_ip));

    // TCP Connect
    let mut rx_buffer = [0u8; TCP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_TX_BUFFER_SIZE];
    let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(MQTT_SOCKET_TIMEOUT_SECS)));

    socket
        .connect((broker_ip, MQTT_PORT))
        .await
        .map_err(|_| MqttError::ConnectionFailed)?;
    info!("MQTT: TCP connected");

    // MQTT Client Configuration
    let rng = CountingRng(20000);
    let mut config = ClientConfig::<5, _>::new(MqttVersion::MQTTv5, rng);
    config.add_client_id(MQTT_CLIENT_ID);
    config.add_username(MQTT_USERNAME);
    config.add_password(PRINTER_ACCESS_CODE);
    config.keep_alive = MQTT_KEEP_ALIVE_SECS;
    config.max_packet_size = MQTT_RECV_BUFFER_SIZE as u32;

    // MQTT Buffer (Reports sind groß, Sendungen klein)
    let mut send_buffer = [0u8; MQTT_SEND_BUFFER_SIZE];
    let mut recv_buffer = [0u8; MQTT_RECV_BUFFER_SIZE];

    let mut client = MqttClient::<_, 5, _>::new(
        socket,
        &mut send_buffer,
        MQTT_SEND_BUFFER_SIZE,
        &mut recv_buffer,
        MQTT_RECV_BUFFER_SIZE,
        config,
    );

    // MQTT CONNECT
    client
        .connect_to_broker()
        .await
        .map_err(|_| MqttError::ProtocolError)?;
    info!("MQTT: Connected to broker");

    client
        .subscribe_to_topic(MQTT_TOPIC_REPORT)
        .await
        .map_err(|_| MqttError::SubscribeFailed)?;
    info!("MQTT: Subscribed to '{}'", MQTT_TOPIC_REPORT);

    client
        .send_message(
            MQTT_TOPIC_REQUEST,
            MQTT_PUSHALL_REQUEST.as_bytes(),
            QualityOfService::QoS0,
            false,
        )
        .await
        .map_err(|_| MqttError::PublishFailed)?;
    info!("MQTT: Requested full report");

    ctx.lock(|cell| cell.borrow_mut().set_link_up(true));

    // Empfangs-Loop: Reports verarbeiten, Keep-Alive nach Plan pingen
    //
    // Pings laufen zwischen zwei Empfängen, damit kein halb gelesenes Paket
    // abgebrochen wird. Nur nach MQTT_SILENCE_PING_SECS ohne jedes Paket wird
    // der wartende Empfang abgebrochen.
    let mut schedule =
        PingSchedule::new(MQTT_PING_INTERVAL_SECS * 1000, Instant::now().as_millis());
    loop {
        if schedule.due(Instant::now().as_millis()) {
            client
                .send_ping()
                .await
                .map_err(|_| MqttError::PingFailed)?;
            schedule.mark_sent(Instant::now().as_millis());
        }

        match select(
            client.receive_message(),
            Timer::after(Duration::from_secs(MQTT_SILENCE_PING_SECS)),
        )
        .await
        {
            Either::First(Ok((_topic, payload))) => {
                // Kaputte Reports werden im Kontext geloggt und verworfen
                let _ = ctx.lock(|cell| cell.borrow_mut().ingest(payload));
            }
            Either::First(Err(_)) => return Err(MqttError::ReceiveFailed),
            Either::Second(()) => {
                client
                    .send_ping()
                    .await
                    .map_err(|_| MqttError::PingFailed)?;
                schedule.mark_sent(Instant::now().as_millis());
            }
        }
    }
}

/// Löst Hostname zu IPv4-Adresse auf
///
/// Nutzt embassy-net DNS-Stack mit konfigurierbarem Timeout.
/// IP-Adressen in Textform werden direkt geparst.
async fn resolve_hostname(
    stack: &'static Stack<'static>,
    hostname: &str,
) -> Result<embassy_net::Ipv4Address, MqttError> {
    if let Ok(ip) = hostname.parse::<embassy_net::Ipv4Address>() {
        return Ok(ip);
    }

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

/// MQTT Fehler-Typen
///
/// Alle möglichen Fehler die während MQTT-Operationen auftreten können.
#[derive(Debug)]
enum MqttError {
    DnsResolutionFailed,
    DnsTimeout,
    ConnectionFailed,
    ProtocolError,
    SubscribeFailed,
    PublishFailed,
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
            MqttError::SubscribeFailed => defmt::write!(fmt, "Subscribe failed"),
            MqttError::PublishFailed => defmt::write!(fmt, "Publish failed"),
            MqttError::ReceiveFailed => defmt::write!(fmt, "Receive failed"),
            MqttError::PingFailed => defmt::write!(fmt, "Ping failed"),
        }
    }
}
