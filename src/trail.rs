use std::collections::VecDeque;

use crate::core::Point;

/// One historical cursor position.
#[derive(Clone, Copy, Debug)]
pub struct TrailSample {
    pub pos: Point,
    /// Milliseconds since sketch start.
    pub at_ms: u64,
}

/// Time-windowed cursor history, oldest first. One sample is appended per
/// frame and everything older than the lifetime is dropped, so the buffer
/// stays a handful of entries long.
#[derive(Clone, Debug)]
pub struct TrailBuffer {
    samples: VecDeque<TrailSample>,
    lifetime_ms: u64,
}

impl TrailBuffer {
    pub fn new(lifetime_ms: u64) -> Self {
        Self {
            samples: VecDeque::new(),
            lifetime_ms,
        }
    }

    pub fn lifetime_ms(&self) -> u64 {
        self.lifetime_ms
    }

    /// Record the cursor for this frame and drop expired samples.
    pub fn push(&mut self, pos: Point, now_ms: u64) {
        self.samples.push_back(TrailSample { pos, at_ms: now_ms });
        self.prune(now_ms);
    }

    pub fn prune(&mut self, now_ms: u64) {
        while let Some(front) = self.samples.front() {
            if now_ms.saturating_sub(front.at_ms) > self.lifetime_ms {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Oldest-first samples with their fade factor: 1.0 for a sample taken
    /// this frame, approaching 0.0 at end of life.
    pub fn iter_faded(&self, now_ms: u64) -> impl Iterator<Item = (TrailSample, f64)> + '_ {
        let lifetime = self.lifetime_ms as f64;
        self.samples.iter().map(move |s| {
            let age = now_ms.saturating_sub(s.at_ms) as f64;
            (*s, (1.0 - age / lifetime).clamp(0.0, 1.0))
        })
    }
}
