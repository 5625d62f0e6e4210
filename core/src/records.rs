use alloc::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::*;

/// What `record` did with a winning time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BestTimeUpdate {
    /// No time was stored for this grid size before.
    FirstRecord,
    Improved { previous: Seconds },
    NotImproved { best: Seconds },
}

impl BestTimeUpdate {
    pub const fn is_record(self) -> bool {
        match self {
            Self::FirstRecord => true,
            Self::Improved { .. } => true,
            Self::NotImproved { .. } => false,
        }
    }
}

/// Durable table of the fastest winning time per grid size.
///
/// Only strictly faster times replace a stored one; ties keep the earlier
/// record.
pub trait BestTimeStore {
    fn get(&self, grid_size: GridSize) -> Option<Seconds>;

    fn set(&mut self, grid_size: GridSize, seconds: Seconds);

    fn record(&mut self, grid_size: GridSize, seconds: Seconds) -> BestTimeUpdate {
        match self.get(grid_size) {
            None => {
                self.set(grid_size, seconds);
                BestTimeUpdate::FirstRecord
            }
            Some(best) if seconds < best => {
                self.set(grid_size, seconds);
                BestTimeUpdate::Improved { previous: best }
            }
            Some(best) => BestTimeUpdate::NotImproved { best },
        }
    }
}

/// In-memory best-time table. Callers that need durability persist the whole
/// table and restore it at session start.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestTimes {
    by_grid_size: BTreeMap<GridSize, Seconds>,
}

impl BestTimes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_grid_size.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridSize, Seconds)> + '_ {
        self.by_grid_size.iter().map(|(&size, &secs)| (size, secs))
    }
}

impl BestTimeStore for BestTimes {
    fn get(&self, grid_size: GridSize) -> Option<Seconds> {
        self.by_grid_size.get(&grid_size).copied()
    }

    fn set(&mut self, grid_size: GridSize, seconds: Seconds) {
        self.by_grid_size.insert(grid_size, seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_win_is_always_recorded() {
        let mut times = BestTimes::new();

        assert_eq!(times.record(3, 40), BestTimeUpdate::FirstRecord);
        assert_eq!(times.get(3), Some(40));
    }

    #[test]
    fn only_strictly_faster_times_replace_the_record() {
        let mut times = BestTimes::new();
        times.record(3, 30);

        assert_eq!(
            times.record(3, 25),
            BestTimeUpdate::Improved { previous: 30 }
        );
        assert_eq!(
            times.record(3, 31),
            BestTimeUpdate::NotImproved { best: 25 }
        );
        assert_eq!(times.get(3), Some(25));
    }

    #[test]
    fn equal_time_keeps_the_earlier_record() {
        let mut times = BestTimes::new();
        times.record(4, 18);

        let update = times.record(4, 18);

        assert_eq!(update, BestTimeUpdate::NotImproved { best: 18 });
        assert!(!update.is_record());
        assert_eq!(times.get(4), Some(18));
    }

    #[test]
    fn records_are_kept_per_grid_size() {
        let mut times = BestTimes::new();
        times.record(2, 9);
        times.record(5, 120);

        assert_eq!(times.get(2), Some(9));
        assert_eq!(times.get(5), Some(120));
        assert_eq!(times.get(3), None);
        assert_eq!(times.iter().count(), 2);
    }

    #[test]
    fn table_round_trips_through_serde() {
        let mut times = BestTimes::new();
        times.record(2, 9);
        times.record(3, 33);

        let json = serde_json::to_string(&times).unwrap();
        let restored: BestTimes = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, times);
    }
}
