use std::time::Instant;

/// Time source positioning the playhead. Values are milliseconds.
pub trait Clock {
    fn is_running(&self) -> bool;

    fn value(&self) -> f64;

    /// Jump to `value`, used when the user scrubs.
    fn set_value(&mut self, value: f64);

    /// Start or stop advancing.
    fn set_running(&mut self, running: bool);

    /// Advance by whatever time passed since the last call.
    fn update(&mut self) {}
}

/// Wall-clock stopwatch that accumulates elapsed time while running.
#[derive(Debug, Clone, Default)]
pub struct StopwatchClock {
    value: f64,
    last_update: Option<Instant>,
}

impl StopwatchClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self) {
        if self.last_update.is_none() {
            self.last_update = Some(Instant::now());
        }
    }

    pub fn pause(&mut self) {
        self.update();
        self.last_update = None;
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
        if self.last_update.is_some() {
            self.last_update = Some(Instant::now());
        }
    }

    /// Add `elapsed_ms` as if that much time had passed while running.
    pub fn advance(&mut self, elapsed_ms: f64) {
        if self.last_update.is_some() {
            self.value += elapsed_ms;
        }
    }
}

impl Clock for StopwatchClock {
    fn is_running(&self) -> bool {
        self.last_update.is_some()
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    fn set_running(&mut self, running: bool) {
        if running {
            self.play();
        } else {
            self.pause();
        }
    }

    fn update(&mut self) {
        if let Some(last) = self.last_update {
            let now = Instant::now();
            self.value += now.duration_since(last).as_secs_f64() * 1000.0;
            self.last_update = Some(now);
        }
    }
}
