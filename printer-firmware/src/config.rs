// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

// ============================================================================
// LED-Strip Konfiguration
// ============================================================================

/// GPIO-Pin für die Datenleitung des LED-Strips (WS2812/Neopixel)
pub const LED_GPIO_PIN: u8 = 4;

/// Anzahl der LEDs im Strip
pub const LED_COUNT: usize = 64;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// RMT Buffer-Größe: 24 Pulse pro LED (3 Farben * 8 Bits) + 1 Reset
pub const RMT_BUFFER_SIZE: usize = LED_COUNT * 24 + 1;

/// Render-Intervall in Millisekunden (~100 Frames/s)
pub const RENDER_INTERVAL_MS: u64 = 10;

// ============================================================================
// Status-Anzeige (Link-Gesundheit)
// ============================================================================

/// GPIO-Pin der Status-LED (an = Verbindung steht)
pub const STATUS_LED_GPIO_PIN: u8 = 15;

/// Intervall des Link-Checks in Sekunden
pub const LINK_CHECK_INTERVAL_SECS: u64 = 1;

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

/// Wartezeit nach WiFi-Fehlern in Sekunden
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
/// Der JSON-Decoder parst komplette Drucker-Reports (bis ~16 KB) auf dem Heap
pub const EXTRA_HEAP_SIZE: usize = 73728; // 72 KB

// ============================================================================
// Drucker / MQTT Konfiguration
// ============================================================================

/// Hostname oder IP-Adresse des MQTT Brokers (Drucker oder Bridge)
/// Wird zur Build-Zeit aus der Environment Variable PRINTER_HOST geladen
pub const PRINTER_HOST: &str = env!(
    "PRINTER_HOST",
    "Drucker-Host nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Broker Port
/// Standard: 1883 (unverschlüsselt). Der Drucker selbst spricht nur TLS auf
/// 8883, ohne TLS-Stack braucht es einen Bridge-Broker im LAN.
pub const MQTT_PORT: u16 = 1883;

/// Seriennummer des Druckers (Teil der Topics)
pub const PRINTER_SERIAL: &str = env!(
    "PRINTER_SERIAL",
    "Drucker-Seriennummer nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// LAN Access Code des Druckers (MQTT Passwort)
pub const PRINTER_ACCESS_CODE: &str = env!(
    "PRINTER_ACCESS_CODE",
    "LAN Access Code nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Benutzername (fest beim Drucker)
pub const MQTT_USERNAME: &str = "bblp";

/// MQTT Client ID
pub const MQTT_CLIENT_ID: &str = "printer-rgb";

/// Topic, auf dem der Drucker seine Reports published
pub const MQTT_TOPIC_REPORT: &str = concat!(
    "device/",
    env!("PRINTER_SERIAL", "Drucker-Seriennummer nicht gesetzt!"),
    "/report"
);

/// Topic für Kommandos an den Drucker
pub const MQTT_TOPIC_REQUEST: &str = concat!(
    "device/",
    env!("PRINTER_SERIAL", "Drucker-Seriennummer nicht gesetzt!"),
    "/request"
);

/// Fordert einen vollständigen Report an (sonst kommen nur Deltas)
pub const MQTT_PUSHALL_REQUEST: &str =
    r#"{"pushing":{"sequence_id":"0","command":"pushall"}}"#;

/// MQTT Keep-Alive in Sekunden
/// Eingehende Reports zählen nicht, der Client muss selbst senden.
pub const MQTT_KEEP_ALIVE_SECS: u16 = 600;

/// Spätestens nach dieser Zeit wird gepingt, auch bei laufendem Report-Strom
/// (muss unter Keep-Alive liegen)
pub const MQTT_PING_INTERVAL_SECS: u64 = 300;

/// Ping nach so langer Funkstille (erkennt tote Verbindungen schnell)
pub const MQTT_SILENCE_PING_SECS: u64 = 20;

/// TCP Inaktivitäts-Timeout (über dem Funkstille-Ping, sonst bricht der Socket ab)
pub const MQTT_SOCKET_TIMEOUT_SECS: u64 = 60;

/// MQTT Reconnect Delay in Sekunden
/// Wartezeit nach Verbindungsfehler vor erneutem Versuch
pub const MQTT_RECONNECT_DELAY_SECS: u64 = 5;

/// MQTT Empfangs-Buffer in Bytes
/// Vollständige Reports (pushall) sind mehrere KB groß
pub const MQTT_RECV_BUFFER_SIZE: usize = 16384;

/// MQTT Sende-Buffer in Bytes (nur Subscribe und pushall)
pub const MQTT_SEND_BUFFER_SIZE: usize = 512;

/// TCP Buffer-Größen für den MQTT-Socket
pub const TCP_RX_BUFFER_SIZE: usize = 4096;
pub const TCP_TX_BUFFER_SIZE: usize = 1024;

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;
