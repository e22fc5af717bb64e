use std::io::Write;

use cohort_match::Cohort;
use tempfile::NamedTempFile;

/// Header row used by the subject table fixtures
pub const SUBJECT_HEADER: &str = "subject_id,relapse,age,sex\n";

/// Build a cohort with identifiers `{prefix}{index}`
#[must_use]
pub fn cohort(name: &str, prefix: &str, ages: &[f64]) -> Cohort {
    Cohort::from_pairs(
        name,
        ages.iter()
            .enumerate()
            .map(|(i, &age)| (format!("{prefix}{i}"), age)),
    )
    .unwrap()
}

/// Write `contents` to a temporary file that lives as long as the handle
#[must_use]
pub fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Subject table fixture with the standard header
#[must_use]
pub fn subject_table(rows: &str) -> NamedTempFile {
    temp_file(&format!("{SUBJECT_HEADER}{rows}"))
}

/// Minimum total cost over every one-to-one pairing of size min(|a|, |b|)
#[must_use]
pub fn brute_force_min_total(a: &[f64], b: &[f64]) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let mut used = vec![false; large.len()];
    search(small, large, 0, &mut used)
}

fn search(small: &[f64], large: &[f64], i: usize, used: &mut [bool]) -> f64 {
    if i == small.len() {
        return 0.0;
    }
    let mut best = f64::INFINITY;
    for j in 0..large.len() {
        if used[j] {
            continue;
        }
        used[j] = true;
        let total = (small[i] - large[j]).abs() + search(small, large, i + 1, used);
        used[j] = false;
        best = best.min(total);
    }
    best
}
