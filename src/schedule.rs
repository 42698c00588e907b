// Date range helpers shared by pricing and the occupancy engine
use chrono::NaiveDate;

/// Whether two inclusive date ranges share at least one day.
///
/// Ranges that only touch on a boundary date overlap: a stay ending on the
/// 10th collides with one starting on the 10th.
pub fn overlaps(
    start_a: NaiveDate,
    stop_a: NaiveDate,
    start_b: NaiveDate,
    stop_b: NaiveDate,
) -> bool {
    start_a <= stop_b && start_b <= stop_a
}

/// Every calendar date from `start` to `stop`, both included.
///
/// A reversed range yields no dates.
pub fn days_between(start: NaiveDate, stop: NaiveDate) -> Vec<NaiveDate> {
    if start > stop {
        return Vec::new();
    }
    start.iter_days().take_while(|day| *day <= stop).collect()
}

// Number of billable days; a same-day stay counts as one
pub fn stay_length(start: NaiveDate, stop: NaiveDate) -> usize {
    if start > stop {
        return 0;
    }
    (stop - start).num_days() as usize + 1
}

pub fn contains(start: NaiveDate, stop: NaiveDate, date: NaiveDate) -> bool {
    start <= date && date <= stop
}
