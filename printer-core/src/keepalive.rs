//! Keep-Alive-Planung für den Transport
//!
//! Der Broker zählt nur Pakete, die der Client sendet. Eingehende Reports
//! verschieben den nächsten Ping deshalb nicht. Zeiten sind Millisekunden
//! einer monotonen Uhr.

/// Wann der nächste Ping fällig ist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingSchedule {
    interval_ms: u64,
    last_sent_ms: u64,
}

impl PingSchedule {
    /// `now_ms` ist der Zeitpunkt des CONNECT (zählt als gesendet)
    pub fn new(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            interval_ms,
            last_sent_ms: now_ms,
        }
    }

    pub fn due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_sent_ms) >= self.interval_ms
    }

    /// Nach jedem erfolgreich gesendeten Paket aufrufen
    pub fn mark_sent(&mut self, now_ms: u64) {
        self.last_sent_ms = now_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_traffic_does_not_postpone_ping() {
        let schedule = PingSchedule::new(20_000, 0);
        // Reports jede Sekunde ändern nichts am Plan
        let due_at = (1..=30u64)
            .map(|s| s * 1000)
            .find(|&now| schedule.due(now));
        assert_eq!(due_at, Some(20_000));
    }

    #[test]
    fn test_mark_sent_restarts_interval() {
        let mut schedule = PingSchedule::new(300_000, 1_000);
        assert!(!schedule.due(300_999));
        assert!(schedule.due(301_000));

        schedule.mark_sent(301_000);
        assert!(!schedule.due(301_001));
        assert!(schedule.due(601_000));
    }

    #[test]
    fn test_clock_before_last_send_is_not_due() {
        let schedule = PingSchedule::new(10, 500);
        assert!(!schedule.due(100));
    }
}
