//! Mouse-trajectory tracking and heuristic human/bot classification
//!
//! The UI layer wires pointer-move and click events into one tracker per
//! captcha session; the tracker itself never attaches listeners. State is a
//! capped FIFO of `(x, y, ms-since-start)` samples plus a click counter.
//!
//! Classification is deliberately forgiving: too few samples to judge passes,
//! clicks are collected but never required, and direction changes are
//! computed for diagnostics but not enforced. The hard rejections are
//! perfectly uniform speed and insufficient spatial spread — the two patterns
//! cheap replay bots actually produce.

use serde::Serialize;
use std::collections::VecDeque;
use wasm_bindgen::prelude::*;

use crate::time::now_ms;

/// Samples kept after FIFO eviction.
const MAX_SAMPLES: usize = 200;
/// Below this many samples the trajectory is unusable.
const MIN_SAMPLES: usize = 3;
/// Below this many samples we presume human (too little data to judge).
const JUDGEMENT_SAMPLES: usize = 5;
/// Speed variance under this is robotic uniform motion.
const MIN_SPEED_VARIANCE: f64 = 1e-4;
/// Both axes under this variance means no real spatial spread.
const MIN_AXIS_VARIANCE: f64 = 10.0;

#[derive(Debug, Clone, Copy)]
struct Sample {
    x: i32,
    y: i32,
    /// Milliseconds since `start()`
    time: u64,
}

/// Per-session trajectory statistics, for the UI layer's diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct TrackerStats {
    pub samples: usize,
    pub clicks: u32,
    pub elapsed_ms: u64,
    pub direction_changes: u32,
}

/// Mouse-trajectory tracker. One instance per logical captcha session;
/// not synchronized — wrap externally if the host offers real parallelism.
#[wasm_bindgen]
pub struct MouseTracker {
    movements: VecDeque<Sample>,
    start_time: u64,
    clicks: u32,
}

#[wasm_bindgen]
impl MouseTracker {
    #[wasm_bindgen(constructor)]
    pub fn new() -> MouseTracker {
        MouseTracker {
            movements: VecDeque::new(),
            start_time: 0,
            clicks: 0,
        }
    }

    /// Begin a tracking session: clears the buffer and click count and
    /// records the session start time.
    pub fn start(&mut self) {
        self.movements.clear();
        self.clicks = 0;
        self.start_time = now_ms();
    }

    /// Record a pointer position. Coordinates are floored; the sample time is
    /// relative to `start()`.
    pub fn track(&mut self, x: f64, y: f64) {
        let rel = now_ms().saturating_sub(self.start_time);
        self.push_sample(x.floor() as i32, y.floor() as i32, rel);
    }

    /// Record a click. Collected for diagnostics; never required to pass
    /// (users may type the answer without clicking).
    pub fn record_click(&mut self) {
        self.clicks += 1;
    }

    /// Heuristic human/bot verdict over the recorded trajectory.
    ///
    /// Under 3 samples: `false` (nothing to judge). Under 5: `true`
    /// (presumed human, documented shortcut). Otherwise reject uniform-speed
    /// motion and trajectories with no spatial spread on either axis.
    pub fn validate(&self) -> bool {
        if self.movements.len() < MIN_SAMPLES {
            return false;
        }
        if self.movements.len() < JUDGEMENT_SAMPLES {
            return true;
        }

        let speed_variance = variance(&self.step_speeds());
        if speed_variance < MIN_SPEED_VARIANCE {
            log::debug!("🤖 trajectory rejected: uniform speed (variance {speed_variance:e})");
            return false;
        }

        let xs: Vec<f64> = self.movements.iter().map(|m| m.x as f64).collect();
        let ys: Vec<f64> = self.movements.iter().map(|m| m.y as f64).collect();
        if variance(&xs) < MIN_AXIS_VARIANCE && variance(&ys) < MIN_AXIS_VARIANCE {
            log::debug!("🤖 trajectory rejected: no spatial spread");
            return false;
        }

        // Direction changes are computed (see stats) but intentionally not
        // enforced: short human gestures can be monotonic.
        true
    }

    /// Return to idle: drops samples, clicks and the session start time.
    pub fn reset(&mut self) {
        self.movements.clear();
        self.clicks = 0;
        self.start_time = 0;
    }

    /// Trajectory statistics as a JS object.
    #[wasm_bindgen(js_name = stats)]
    pub fn stats_js(&self) -> std::result::Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.stats()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl MouseTracker {
    fn push_sample(&mut self, x: i32, y: i32, time: u64) {
        self.movements.push_back(Sample { x, y, time });
        if self.movements.len() > MAX_SAMPLES {
            self.movements.pop_front();
        }
    }

    fn step_speeds(&self) -> Vec<f64> {
        let mut speeds = Vec::new();
        for pair in self
            .movements
            .iter()
            .zip(self.movements.iter().skip(1))
        {
            let (a, b) = pair;
            let dt = b.time.saturating_sub(a.time) as f64;
            if dt > 0.0 {
                let dx = (b.x - a.x) as f64;
                let dy = (b.y - a.y) as f64;
                speeds.push((dx * dx + dy * dy).sqrt() / dt);
            }
        }
        speeds
    }

    fn direction_changes(&self) -> u32 {
        let m: Vec<&Sample> = self.movements.iter().collect();
        let mut changes = 0;
        for w in m.windows(3) {
            let dx1 = w[1].x - w[0].x;
            let dx2 = w[2].x - w[1].x;
            let dy1 = w[1].y - w[0].y;
            let dy2 = w[2].y - w[1].y;
            if dx1 * dx2 < 0 || dy1 * dy2 < 0 {
                changes += 1;
            }
        }
        changes
    }

    /// Trajectory statistics (native-facing twin of [`Self::stats_js`]).
    pub fn stats(&self) -> TrackerStats {
        TrackerStats {
            samples: self.movements.len(),
            clicks: self.clicks,
            elapsed_ms: self
                .movements
                .back()
                .map(|s| s.time)
                .unwrap_or(0),
            direction_changes: self.direction_changes(),
        }
    }
}

impl Default for MouseTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Population variance.
fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}
