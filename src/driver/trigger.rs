use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// A periodic timer that can be switched off entirely.
///
/// While disarmed no interval exists, so nothing can fire and `tick` simply
/// never completes. `tick` is cancel-safe and meant for `tokio::select!`.
#[derive(Debug, Default)]
pub struct Trigger {
    interval: Option<Interval>,
    period: Option<Duration>,
}

impl Trigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start firing every `period`, first tick one period from now.
    ///
    /// Re-arming with the period already in use keeps the current phase.
    pub fn arm(&mut self, period: Duration) {
        if self.period == Some(period) {
            return;
        }

        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        self.period = Some(period);
    }

    /// Stop firing. Idempotent.
    pub fn disarm(&mut self) {
        self.interval = None;
        self.period = None;
    }

    /// Arm with `Some(period)`, disarm with `None`
    pub fn apply(&mut self, period: Option<Duration>) {
        match period {
            Some(period) => self.arm(period),
            None => self.disarm(),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Wait for the next tick; pends forever while disarmed
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let mut trigger = Trigger::new();
        let start = Instant::now();

        trigger.arm(Duration::from_millis(100));
        trigger.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(100));

        trigger.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarmed_never_fires() {
        let mut trigger = Trigger::new();
        assert!(!trigger.is_armed());
        assert!(timeout(Duration::from_secs(60), trigger.tick()).await.is_err());

        trigger.arm(Duration::from_millis(10));
        trigger.disarm();
        trigger.disarm();
        assert!(!trigger.is_armed());
        assert_eq!(trigger.period(), None);
        assert!(timeout(Duration::from_secs(60), trigger.tick()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_period_keeps_phase() {
        let mut trigger = Trigger::new();
        let start = Instant::now();

        trigger.arm(Duration::from_millis(100));
        tokio::time::advance(Duration::from_millis(60)).await;
        trigger.arm(Duration::from_millis(100));

        trigger.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_period_restarts() {
        let mut trigger = Trigger::new();
        let start = Instant::now();

        trigger.apply(Some(Duration::from_millis(100)));
        tokio::time::advance(Duration::from_millis(60)).await;
        trigger.apply(Some(Duration::from_millis(50)));
        assert_eq!(trigger.period(), Some(Duration::from_millis(50)));

        trigger.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(110));
    }
}
