/// Tick sources for the game loop
///
/// Both clocks report monotonically increasing elapsed milliseconds since
/// they were created. The game loop only ever reads time through [`Clock`],
/// so tests can drive it with a [`ManualClock`] instead of sleeping.
use std::cell::Cell;
use std::time::Instant;

/// Source of monotonically increasing elapsed time in milliseconds
pub trait Clock {
    fn elapsed_ms(&self) -> u64;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward
    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }
}

impl Clock for ManualClock {
    fn elapsed_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn elapsed_ms(&self) -> u64 {
        (**self).elapsed_ms()
    }
}
