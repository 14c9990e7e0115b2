use crate::dataset::Dataset;

use super::ScatterMark;

/// Shows marks whose row year equals `year` and hides all others.
///
/// Only the visibility flag changes, so repeated calls with the same year
/// leave the marks untouched. Returns the number of visible marks.
pub fn apply_year_filter(marks: &mut [ScatterMark], dataset: &Dataset, year: &str) -> usize {
    let mut visible = 0;
    for mark in marks.iter_mut() {
        mark.visible = dataset
            .get(mark.row)
            .is_some_and(|record| record.year == year);
        visible += usize::from(mark.visible);
    }
    visible
}
