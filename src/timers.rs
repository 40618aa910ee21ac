use crate::state::State;

/// # Timers
/// The delay and sound timers count down once per tick and stop at 0.
/// Ticks come from the driver at `TIMER_SPEED`, independent of the instruction clock.
///
/// Returns true when the sound timer runs out on this tick, i.e. it was decremented from 1.
pub fn tick(state: &mut State) -> bool {
    state.delay_timer = state.delay_timer.saturating_sub(1);

    let expired = state.sound_timer == 1;
    state.sound_timer = state.sound_timer.saturating_sub(1);
    expired
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_count_down_independently() {
        let mut state = State::new();
        state.delay_timer = 3;
        state.sound_timer = 5;
        tick(&mut state);
        tick(&mut state);
        assert_eq!(state.delay_timer, 1);
        assert_eq!(state.sound_timer, 3);
    }

    #[test]
    fn test_timers_stop_at_zero() {
        let mut state = State::new();
        state.delay_timer = 1;
        for _ in 0..3 {
            assert!(!tick(&mut state));
        }
        assert_eq!(state.delay_timer, 0);
        assert_eq!(state.sound_timer, 0);
    }

    #[test]
    fn test_sound_timer_expires_once() {
        let mut state = State::new();
        state.sound_timer = 2;
        assert!(!tick(&mut state));
        assert!(tick(&mut state));
        assert!(!tick(&mut state));
        assert_eq!(state.sound_timer, 0);
    }
}
