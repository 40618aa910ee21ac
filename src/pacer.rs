use std::time::{Duration, Instant};

/// How much work has come due since the last check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Due {
    pub cycles: u32,
    pub ticks: u32,
}

/// # Pacer
/// Keeps the instruction clock and the timer clock apart.
///
/// Both accumulate wall time and hand it out in whole periods, so a 500Hz CPU still sees its
/// timers tick at 60Hz. After a stall at most one second of work is handed out; the rest is
/// dropped rather than replayed.
pub struct Pacer {
    cycle_time: Duration,
    tick_time: Duration,
    max_cycles: u32,
    max_ticks: u32,
    last: Instant,
    cycle_debt: Duration,
    tick_debt: Duration,
}

impl Pacer {
    pub fn new(clock_hz: u32, timer_hz: u32, now: Instant) -> Self {
        Pacer {
            cycle_time: period(clock_hz),
            tick_time: period(timer_hz),
            max_cycles: clock_hz,
            max_ticks: timer_hz,
            last: now,
            cycle_debt: Duration::ZERO,
            tick_debt: Duration::ZERO,
        }
    }

    /// Work due at `now`, with time running `speed` times faster than the wall clock
    pub fn due(&mut self, now: Instant, speed: u32) -> Due {
        let elapsed = now.saturating_duration_since(self.last) * speed;
        self.last = now;
        self.cycle_debt += elapsed;
        self.tick_debt += elapsed;

        Due {
            cycles: take(&mut self.cycle_debt, self.cycle_time, self.max_cycles),
            ticks: take(&mut self.tick_debt, self.tick_time, self.max_ticks),
        }
    }

    /// How long until something new comes due, measured from the last `due`
    pub fn idle_time(&self) -> Duration {
        let cycle = self.cycle_time.saturating_sub(self.cycle_debt);
        let tick = self.tick_time.saturating_sub(self.tick_debt);
        cycle.min(tick)
    }
}

fn period(hz: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(hz.max(1)))
}

fn take(debt: &mut Duration, period: Duration, max: u32) -> u32 {
    let whole = debt.as_nanos() / period.as_nanos();
    if whole >= u128::from(max) {
        *debt = Duration::ZERO;
        return max;
    }
    let whole = whole as u32;
    *debt -= period * whole;
    whole
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_RATE_HZ;

    #[test]
    fn test_nothing_due_immediately() {
        let start = Instant::now();
        let mut pacer = Pacer::new(600, 60, start);
        assert_eq!(pacer.due(start, 1), Due::default());
    }

    #[test]
    fn test_cycles_and_ticks_are_split() {
        let start = Instant::now();
        let mut pacer = Pacer::new(600, 60, start);
        let due = pacer.due(start + Duration::from_millis(100), 1);
        assert_eq!(due, Due { cycles: 60, ticks: 6 });
    }

    #[test]
    fn test_leftover_time_carries_over() {
        let start = Instant::now();
        let mut pacer = Pacer::new(100, 60, start);
        assert_eq!(pacer.due(start + Duration::from_millis(15), 1).cycles, 1);
        assert_eq!(pacer.due(start + Duration::from_millis(20), 1).cycles, 1);
        assert_eq!(pacer.due(start + Duration::from_millis(20), 1).cycles, 0);
    }

    #[test]
    fn test_speed_multiplies_time() {
        let start = Instant::now();
        let mut pacer = Pacer::new(600, 60, start);
        let due = pacer.due(start + Duration::from_millis(50), 2);
        assert_eq!(due, Due { cycles: 60, ticks: 6 });
    }

    #[test]
    fn test_stalls_are_capped_at_one_second() {
        let start = Instant::now();
        let mut pacer = Pacer::new(60, 60, start);
        let due = pacer.due(start + Duration::from_secs(10), 1);
        assert_eq!(due, Due { cycles: 60, ticks: 60 });
        assert_eq!(pacer.due(start + Duration::from_secs(10), 1), Due::default());
    }

    #[test]
    fn test_fastest_clock_has_a_whole_period() {
        let start = Instant::now();
        let mut pacer = Pacer::new(MAX_RATE_HZ, 60, start);
        let due = pacer.due(start + Duration::from_millis(1), 1);
        assert_eq!(due.cycles, 1_000_000);
    }

    #[test]
    fn test_idle_time_until_next_period() {
        let start = Instant::now();
        let mut pacer = Pacer::new(100, 50, start);
        pacer.due(start + Duration::from_millis(4), 1);
        assert_eq!(pacer.idle_time(), Duration::from_millis(6));
    }
}
