use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::timer::CountDown;
use embedded_time::duration::Microseconds;

use nb::block;

/// Blocking delay on top of a hardware `CountDown`, for HALs that hand out
/// timers but no `Delay`.
pub struct DelayTimer<CD>
    where
        CD: CountDown,
        CD::Time: From<Microseconds<u32>>,
{
    count_down: CD,
}

impl<CD> DelayTimer<CD>
    where
        CD: CountDown,
        CD::Time: From<Microseconds<u32>>,
{
    pub fn new(count_down: CD) -> Self {
        Self {
            count_down,
        }
    }

    pub fn free(self) -> CD {
        self.count_down
    }
}

impl<CD> DelayUs<u32> for DelayTimer<CD>
    where
        CD: CountDown,
        CD::Time: From<Microseconds<u32>>,
{
    fn delay_us(&mut self, us: u32) {
        if us == 0 {
            return;
        }
        self.count_down.start(Microseconds(us));
        let _ = block!(self.count_down.wait());
    }
}

impl<CD> DelayMs<u32> for DelayTimer<CD>
    where
        CD: CountDown,
        CD::Time: From<Microseconds<u32>>,
{
    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1_000));
    }
}
