use core::cell::Cell;

use embedded_time::clock::Error;
use embedded_time::fraction::Fraction;
use embedded_time::Instant;

/// Millisecond clock that advances by one tick every time it is read.
#[derive(Debug, Default)]
pub(crate) struct TickClock {
    now: Cell<u32>,
}

impl TickClock {
    pub(crate) fn ticks(&self) -> u32 {
        self.now.get()
    }
}

impl embedded_time::Clock for TickClock {
    type T = u32;
    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000);

    fn try_now(&self) -> Result<Instant<Self>, Error> {
        let now = self.now.get();
        self.now.set(now.wrapping_add(1));
        Ok(Instant::new(now))
    }
}
