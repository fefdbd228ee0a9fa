use embedded_hal::delay::DelayNs;

/// A bound on a busy-wait, measured in the time spent inside a [`DelayNs`] provider.
///
/// The driver has no clock of its own, so the only time that passes between two
/// status polls is the time it hands to the delay provider. Charging every wait
/// against the deadline makes the bound independent of the poll cadence, and a
/// no-op delay provider turns every deadline into a fixed number of polls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Deadline {
    remaining_us: u32,
}

impl Deadline {
    pub const fn after_us(timeout_us: u32) -> Self {
        Self {
            remaining_us: timeout_us,
        }
    }

    pub const fn after_ms(timeout_ms: u32) -> Self {
        Self::after_us(timeout_ms.saturating_mul(1000))
    }

    pub const fn is_expired(&self) -> bool {
        self.remaining_us == 0
    }

    /// Wait for `step_us`, or whatever is left of the deadline if that is shorter.
    pub fn wait<D: DelayNs>(&mut self, delay_impl: &mut D, step_us: u32) {
        let step = step_us.max(1).min(self.remaining_us);
        if step > 0 {
            delay_impl.delay_us(step);
            self.remaining_us -= step;
        }
    }
}

#[cfg(test)]
mod test {
    use super::Deadline;
    use embedded_hal::delay::DelayNs;
    use embedded_hal_mock::eh1::delay::NoopDelay;

    #[test]
    fn expires_after_whole_steps() {
        let mut delay = NoopDelay;
        let mut deadline = Deadline::after_us(30);
        let mut polls = 0;
        while !deadline.is_expired() {
            polls += 1;
            deadline.wait(&mut delay, 10);
        }
        assert_eq!(polls, 3);
    }

    #[test]
    fn last_step_is_truncated() {
        let mut delay = NoopDelay;
        let mut deadline = Deadline::after_us(25);
        deadline.wait(&mut delay, 10);
        deadline.wait(&mut delay, 10);
        assert!(!deadline.is_expired());
        deadline.wait(&mut delay, 10);
        assert!(deadline.is_expired());
        // waiting past the deadline is a no-op
        deadline.wait(&mut delay, 10);
        assert!(deadline.is_expired());
    }

    /// Sums the time requested from it.
    struct Tally(u64);

    impl DelayNs for Tally {
        fn delay_ns(&mut self, ns: u32) {
            self.0 += ns as u64;
        }
    }

    #[test]
    fn charged_only_with_delay_time() {
        let mut delay = Tally(0);
        let mut deadline = Deadline::after_ms(1);
        let mut polls = 0u32;
        while !deadline.is_expired() {
            // work between waits is never charged
            polls += 1;
            deadline.wait(&mut delay, 10);
        }
        assert_eq!(polls, 100);
        assert_eq!(delay.0, 1_000_000);
    }

    #[test]
    fn milliseconds() {
        assert_eq!(Deadline::after_ms(10), Deadline::after_us(10_000));
        assert_eq!(Deadline::after_ms(u32::MAX), Deadline::after_us(u32::MAX));
        assert!(Deadline::after_ms(0).is_expired());
    }
}
