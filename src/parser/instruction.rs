use once_cell::sync::Lazy;
use regex::Regex;

static STEP_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.)]\s*").expect("step number pattern"));

/// Strip a leading `<digits>.` or `<digits>)` step marker.
///
/// Returns `None` when nothing but the marker was on the line.
pub fn parse_step(line: &str) -> Option<String> {
    let line = line.trim();
    let step = STEP_NUMBER.replace(line, "");
    let step = step.trim();
    (!step.is_empty()).then(|| step.to_string())
}
