//! Pure attendance statistics over record slices.

use crate::model::attendance::AttendanceRecord;

/// Share of present marks among `records`, as a percentage.
///
/// Returns `0.0` when no record matches. The result is not rounded.
pub fn presence_percentage<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let (present, total) = records
        .into_iter()
        .fold((0u64, 0u64), |(present, total), record| {
            (present + u64::from(record.present), total + 1)
        });

    if total == 0 {
        return 0.0;
    }
    present as f64 * 100.0 / total as f64
}
