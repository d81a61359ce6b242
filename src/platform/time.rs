//! Host clock
//!
//! The simulation only ever sees milliseconds handed to it; this is where
//! those come from.

/// Monotonic millisecond clock
#[derive(Debug, Clone)]
pub struct Clock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        Self {}
    }

    /// Milliseconds since the clock was created
    #[cfg(not(target_arch = "wasm32"))]
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    /// Milliseconds since the page loaded
    #[cfg(target_arch = "wasm32")]
    pub fn now_ms(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
}

/// Seed derived from wall-clock time
pub fn time_seed() -> u64 {
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
}
