//! Append-only lap record for the stopwatch.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Lap {
    /// 1-based, in recording order.
    pub id: u32,
    /// Time since the previous lap, or since start for the first one.
    pub split_ms: u64,
    /// Elapsed stopwatch time when the lap was recorded.
    pub total_ms: u64,
}

/// Laps are stored oldest first; iteration and `head` are newest first.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct LapLedger {
    laps: Vec<Lap>,
}

impl LapLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from laps listed newest first, as returned by
    /// [`LapLedger::to_vec`]. Returns `None` if the list could not have
    /// been produced by recording laps.
    pub fn from_newest_first(laps: &[Lap]) -> Option<Self> {
        let mut ledger = Self::new();
        for lap in laps.iter().rev() {
            let expected_id = ledger.laps.len() as u32 + 1;
            let prev_total = ledger.total_ms();
            if lap.id != expected_id
                || lap.total_ms < prev_total
                || lap.split_ms != lap.total_ms - prev_total
            {
                return None;
            }
            ledger.laps.push(*lap);
        }
        Some(ledger)
    }

    /// Record a lap at cumulative elapsed time `total_ms`.
    pub fn record(&mut self, total_ms: u64) -> Lap {
        let lap = Lap {
            id: self.laps.len() as u32 + 1,
            split_ms: total_ms.saturating_sub(self.total_ms()),
            total_ms,
        };
        self.laps.push(lap);
        lap
    }

    pub fn clear(&mut self) {
        self.laps.clear();
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    /// Most recent lap.
    pub fn head(&self) -> Option<&Lap> {
        self.laps.last()
    }

    /// Total of the most recent lap, zero when empty.
    pub fn total_ms(&self) -> u64 {
        self.head().map(|lap| lap.total_ms).unwrap_or(0)
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Lap> + '_ {
        self.laps.iter().rev()
    }

    pub fn to_vec(&self) -> Vec<Lap> {
        self.iter().copied().collect()
    }

    /// Lap with the smallest split. Needs at least two laps to compare.
    pub fn best(&self) -> Option<&Lap> {
        self.pick(|candidate, current| candidate < current)
    }

    /// Lap with the largest split. Needs at least two laps to compare.
    pub fn worst(&self) -> Option<&Lap> {
        self.pick(|candidate, current| candidate > current)
    }

    // Scans oldest to newest; a strict comparison keeps the lowest id on ties.
    fn pick(&self, better: impl Fn(u64, u64) -> bool) -> Option<&Lap> {
        if self.laps.len() < 2 {
            return None;
        }
        let mut found = &self.laps[0];
        for lap in &self.laps[1..] {
            if better(lap.split_ms, found.split_ms) {
                found = lap;
            }
        }
        Some(found)
    }
}
