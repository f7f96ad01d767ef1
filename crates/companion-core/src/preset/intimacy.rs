//! Intimacy scale.
//!
//! A preset carries a continuous score in `[-100, 100]` and a coarse label
//! `"1"`..`"10"` shown in the UI. The score is authoritative; the label is
//! derived from it whenever presets are loaded.

pub const MIN_SCORE: f32 = -100.0;
pub const MAX_SCORE: f32 = 100.0;

/// Lower bound of each label, highest first.
const LABEL_THRESHOLDS: [(f32, &str); 9] = [
    (81.0, "10"),
    (61.0, "9"),
    (41.0, "8"),
    (21.0, "7"),
    (1.0, "6"),
    (-20.0, "5"),
    (-40.0, "4"),
    (-60.0, "3"),
    (-80.0, "2"),
];

/// Clamps `score` into the valid range. NaN reads as neutral.
pub fn clamp_score(score: f32) -> f32 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Label for a score.
pub fn label_for_score(score: f32) -> &'static str {
    let score = clamp_score(score);
    LABEL_THRESHOLDS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map_or("1", |(_, label)| *label)
}

/// Representative score for a manually chosen label; unknown labels are neutral.
pub fn score_for_label(label: &str) -> f32 {
    match label.trim() {
        "1" => -90.0,
        "2" => -70.0,
        "3" => -50.0,
        "4" => -30.0,
        "5" => -10.0,
        "6" => 10.0,
        "7" => 30.0,
        "8" => 50.0,
        "9" => 70.0,
        "10" => 90.0,
        _ => 0.0,
    }
}
