/// "mm:ss" with both fields zero-padded to two digits.
pub fn format_clock(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Percent of the session touched so far, rounded to the nearest integer.
pub fn progress_percent(current_index: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (((current_index + 1) as f64 / total as f64) * 100.0).round() as u8
}

/// Literal "x/y" counter shown next to the progress bar.
pub fn progress_counter(current_index: usize, total: usize) -> String {
    format!("{}/{}", current_index + 1, total)
}

/// Recommended answer window in whole minutes (floor, ceil) from seconds.
pub fn recommended_minutes(recommended_secs: u32) -> (u32, u32) {
    let min = recommended_secs / 60;
    let max = recommended_secs.div_ceil(60);
    (min, max)
}
