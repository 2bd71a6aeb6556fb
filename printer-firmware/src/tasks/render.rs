// Render Task - Treibt den Pattern-Renderer im festen Takt
use defmt::info;
use embassy_time::{Duration, Instant, Ticker};
use esp_hal_smartled::smart_led_buffer;

use crate::config::{LED_COUNT, RENDER_INTERVAL_MS, RMT_CLOCK_MHZ};
use crate::hal::RmtLedStrip;
use crate::{LedStrip, RenderConfig, Renderer, SharedContext};

/// Render Logic - Testbare Schleife ohne Hardware-Abhängigkeit
///
/// Pro Tick wird der Kontext kurz gesperrt und `Renderer::tick()` aufgerufen.
/// Die Zeit ist monoton (Sekunden seit Start), der Renderer entscheidet selbst
/// über Pattern-Wechsel, Hold und ob der Strip neu geschrieben wird.
///
/// # Parameter
/// - `strip`: LED-Strip (Hardware oder Mock)
/// - `ctx`: Geteilter PrinterContext
pub async fn render_logic<L: LedStrip>(strip: L, ctx: &'static SharedContext) -> ! {
    let config = RenderConfig::default().with_led_count(strip.len());
    let mut renderer = Renderer::new(strip, config);
    let start = Instant::now();
    let mut ticker = Ticker::every(Duration::from_millis(RENDER_INTERVAL_MS));

    info!("Render: {} LEDs, {} ms interval", LED_COUNT, RENDER_INTERVAL_MS);

    loop {
        let elapsed = start.elapsed().as_micros() as f64 / 1_000_000.0;
        // Fehler loggt der Renderer selbst, der nächste Tick schreibt erneut
        let _ = ctx.lock(|cell| renderer.tick(&mut cell.borrow_mut(), elapsed));

        // Async Delay: gibt CPU an MQTT und Netzwerk-Tasks zurück
        ticker.next().await;
    }
}

/// Render Task - Embassy Task für parallele Ausführung
///
/// Initialisiert RMT + Strip und ruft dann `render_logic()` auf.
///
/// # Parameter
/// - `gpio4`: GPIO4 Peripheral für die Datenleitung
/// - `rmt_peripheral`: RMT Peripheral für präzises Timing
/// - `ctx`: Geteilter PrinterContext
#[embassy_executor::task]
pub async fn render_task(
    gpio4: esp_hal::peripherals::GPIO4<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    ctx: &'static SharedContext,
) {
    // Buffer für SmartLED Daten (24 Pulse pro LED + Reset)
    let mut rmt_buffer = smart_led_buffer!(LED_COUNT);

    let strip = RmtLedStrip::new(gpio4, rmt_peripheral, RMT_CLOCK_MHZ, &mut rmt_buffer);

    render_logic(strip, ctx).await;
}
