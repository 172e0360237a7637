//! Generation tokens for discarding stale fetch results.

/// Marker stamped on a fetch cycle when it is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Single-writer source of generations; only the latest one is current.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    latest: u64,
    retired: bool,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new generation, superseding every earlier one.
    pub fn issue(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    /// Returns `true` when results stamped with `generation` may still be applied.
    pub fn is_current(&self, generation: Generation) -> bool {
        !self.retired && generation.0 == self.latest
    }

    /// Makes every issued generation stale, e.g. when the page is torn down.
    pub fn retire(&mut self) {
        self.retired = true;
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_generation_is_current() {
        let mut counter = GenerationCounter::new();
        let first = counter.issue();
        let second = counter.issue();
        assert!(first < second);
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
    }

    #[test]
    fn retiring_invalidates_in_flight_generations() {
        let mut counter = GenerationCounter::new();
        let generation = counter.issue();
        counter.retire();
        assert!(!counter.is_current(generation));
        assert!(counter.is_retired());
    }
}
