use crate::seat::Seat;

/// The label as shown in the tree: opponents' calls are parenthesized.
pub fn display_label(label: &str, by: Seat) -> String {
    if by.is_opponent() {
        format!("({})", label)
    } else {
        label.to_string()
    }
}

/// Joins labels, cutting the result at `max_chars` characters and marking
/// the cut with "...".
pub fn join_truncated<I, S>(labels: I, max_chars: usize) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let text = labels
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("1S", Seat::North), "1S");
        assert_eq!(display_label("1S", Seat::East), "(1S)");
    }

    #[test]
    fn test_join_truncated() {
        assert_eq!(join_truncated(["1C", "(1D)"], 100), "1C, (1D)");
        let long: Vec<String> = (0..60).map(|i| format!("{}", i % 10)).collect();
        let text = join_truncated(&long, 100);
        assert_eq!(text.chars().count(), 103);
        assert!(text.ends_with("..."));
    }

    #[test]
    fn test_join_truncated_counts_chars_not_bytes() {
        let labels = ["迫叫".repeat(30)];
        let text = join_truncated(&labels, 10);
        assert_eq!(text, format!("{}...", "迫叫".repeat(5)));
    }
}
