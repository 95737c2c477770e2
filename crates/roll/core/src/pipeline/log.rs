use super::Tally;

/// Names of the ten pipeline steps, in execution order.
pub const STEP_NAMES: [&str; 10] = [
    "count raw faces",
    "delayed effects",
    "rerolls",
    "effects",
    "base snapshot",
    "subtract",
    "divide",
    "effect add",
    "multiply",
    "add and counts-as",
];

/// Formats the audit line of one step.
///
/// Lists `type before → after` for every changed type, or "no change".
/// `detail` is appended in brackets when non-empty.
pub fn step_line(step: usize, before: &Tally, after: &Tally, detail: &str) -> String {
    let name = STEP_NAMES.get(step.wrapping_sub(1)).copied().unwrap_or("unknown");
    let changes: Vec<String> = before
        .iter()
        .zip(after.iter())
        .filter(|((_, old), (_, new))| old != new)
        .map(|((ty, old), (_, new))| format!("{ty} {old} → {new}"))
        .collect();

    let mut line = format!("Step {step} ({name}): ");
    if changes.is_empty() {
        line.push_str("no change");
    } else {
        line.push_str(&changes.join(", "));
    }
    if !detail.is_empty() {
        line.push_str(" [");
        line.push_str(detail);
        line.push(']');
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_only_changed_types() {
        let before = Tally {
            melee: 3,
            save: 2,
            ..Tally::new()
        };
        let after = Tally {
            melee: 1,
            save: 2,
            ..Tally::new()
        };
        assert_eq!(
            step_line(6, &before, &after, "Palsy: -2 to melee"),
            "Step 6 (subtract): melee 3 → 1 [Palsy: -2 to melee]"
        );
        assert_eq!(step_line(3, &after, &after, ""), "Step 3 (rerolls): no change");
    }
}
