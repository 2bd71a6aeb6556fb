// Link-Monitor Task - Überwacht die MQTT-Verbindung und steuert den Hold
use defmt::{info, warn};
use embassy_time::{Duration, Ticker};

use crate::config::LINK_CHECK_INTERVAL_SECS;
use crate::hal::GpioIndicator;
use crate::{LinkCheck, LinkMonitor, SharedContext, StatusIndicator};

/// Link-Monitor Logic
///
/// Ruft jede Sekunde `LinkMonitor::check()` auf. Bei fehlender Verbindung
/// zeigt der Renderer die Fehlerfarbe, die Status-LED ist aus.
pub async fn link_monitor_logic<I: StatusIndicator>(indicator: I, ctx: &'static SharedContext) -> ! {
    let mut monitor = LinkMonitor::new(indicator);
    let mut ticker = Ticker::every(Duration::from_secs(LINK_CHECK_INTERVAL_SECS));

    loop {
        let check = ctx.lock(|cell| monitor.check(&mut cell.borrow_mut()));

        match check {
            LinkCheck::Down => {}
            LinkCheck::Restored => info!("Link: Hold released"),
            LinkCheck::Healthy { .. } => {
                let free = esp_alloc::HEAP.free();
                if free < 8 * 1024 {
                    warn!("Link: Heap low ({} bytes free)", free);
                }
            }
        }

        ticker.next().await;
    }
}

/// Link-Monitor Task
///
/// # Parameter
/// - `gpio15`: GPIO15 für die Status-LED
/// - `ctx`: Geteilter PrinterContext
#[embassy_executor::task]
pub async fn link_monitor_task(
    gpio15: esp_hal::peripherals::GPIO15<'static>,
    ctx: &'static SharedContext,
) {
    link_monitor_logic(GpioIndicator::new(gpio15), ctx).await;
}
