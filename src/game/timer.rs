/// Abstraction over time sources.
/// Implementations: SystemTimeProvider (production), MockTimeProvider (testing).
pub trait TimeProvider {
    /// Current time in ms from an arbitrary epoch.
    fn now_ms(&self) -> f64;
}

/// System time provider using std::time::Instant.
pub struct SystemTimeProvider {
    start: std::time::Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Mock time provider for deterministic testing.
pub struct MockTimeProvider {
    current_ms: std::cell::Cell<f64>,
}

impl MockTimeProvider {
    pub fn new() -> Self {
        Self {
            current_ms: std::cell::Cell::new(0.0),
        }
    }

    pub fn set_time(&self, ms: f64) {
        self.current_ms.set(ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.current_ms.set(self.current_ms.get() + delta_ms);
    }
}

impl Default for MockTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_ms(&self) -> f64 {
        self.current_ms.get()
    }
}

/// Pausable game clock tracking elapsed play time in ms.
///
/// `stop` records a pause offset so a later `start` resumes where the
/// clock left off; `reset` discards all accumulated time.
pub struct GameTimer<T: TimeProvider = SystemTimeProvider> {
    provider: T,
    started_at: Option<f64>,
    pause_offset: f64,
}

impl GameTimer<SystemTimeProvider> {
    pub fn new() -> Self {
        Self::with_provider(SystemTimeProvider::new())
    }
}

impl Default for GameTimer<SystemTimeProvider> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeProvider> GameTimer<T> {
    pub fn with_provider(provider: T) -> Self {
        Self {
            provider,
            started_at: None,
            pause_offset: 0.0,
        }
    }

    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(self.provider.now_ms() - self.pause_offset);
        }
    }

    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.pause_offset = self.provider.now_ms() - started_at;
        }
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.pause_offset = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Elapsed play time in ms; frozen while stopped.
    pub fn elapsed_ms(&self) -> f64 {
        match self.started_at {
            Some(started_at) => self.provider.now_ms() - started_at,
            None => self.pause_offset,
        }
    }
}
