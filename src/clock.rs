/// Fixed-step animation time.
///
/// Time is recomputed from the tick count rather than accumulated, so after
/// `k` ticks it is exactly `origin + step * k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    origin: f32,
    step: f32,
    ticks: u64,
}

impl FrameClock {
    pub fn new(step: f32) -> Self {
        Self::starting_at(0.0, step)
    }

    pub fn starting_at(origin: f32, step: f32) -> Self {
        Self {
            origin,
            step,
            ticks: 0,
        }
    }

    pub fn tick(&mut self) -> f32 {
        self.ticks += 1;
        self.time()
    }

    pub fn time(&self) -> f32 {
        self.origin + self.step * self.ticks as f32
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}
