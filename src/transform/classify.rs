//! Column classification by numeric label.

use std::collections::BTreeSet;

/// Returns the labels that parse as integers strictly greater than `threshold`.
///
/// Labels that do not parse as integers (`"All ages"`, `"90+"`) are excluded, never an
/// error: a wide demographic table mixes single-year-of-age columns with summary columns,
/// and classification is how callers pick out just the numeric band they want.
///
/// The result is ordered (a [`BTreeSet`]) so that downstream aggregation groups built from
/// it are deterministic.
///
/// # Examples
///
/// ```rust
/// use table_reshape::transform::classify_numeric_labels;
///
/// let labels = ["17", "18", "85", "All ages"];
/// let over_17 = classify_numeric_labels(labels, 17);
/// assert_eq!(over_17.into_iter().collect::<Vec<_>>(), vec!["18", "85"]);
/// ```
pub fn classify_numeric_labels<'a, I>(labels: I, threshold: i64) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    labels
        .into_iter()
        .filter(|label| {
            label
                .trim()
                .parse::<i64>()
                .is_ok_and(|value| value > threshold)
        })
        .map(str::to_owned)
        .collect()
}
