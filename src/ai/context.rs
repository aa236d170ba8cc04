//! Bounded conversation history for chat prompts.

use crate::constants::{ASSISTANT_NAME, CONTEXT_WINDOW_TURNS};
use crate::journal_core::PriorExchange;

/// Renders the most recent exchanges as prompt context.
///
/// Keeps at most [`CONTEXT_WINDOW_TURNS`] exchanges from the end of `history`,
/// oldest first, each as a `User:` line followed by an assistant line, with blocks
/// separated by a blank line. Returns an empty string for empty history. Messages
/// are not shortened or deduplicated.
///
/// # Examples
///
/// ```
/// use moodlog::ai::build_context_window;
/// use moodlog::journal_core::PriorExchange;
///
/// let history = vec![PriorExchange::new("I can't sleep", "That sounds exhausting.")];
/// assert_eq!(
///     build_context_window(&history),
///     "User: I can't sleep\nSage: That sounds exhausting."
/// );
/// ```
pub fn build_context_window(history: &[PriorExchange]) -> String {
    let start = history.len().saturating_sub(CONTEXT_WINDOW_TURNS);

    history[start..]
        .iter()
        .map(|exchange| {
            format!(
                "User: {}\n{}: {}",
                exchange.user_text, ASSISTANT_NAME, exchange.assistant_text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(count: usize) -> Vec<PriorExchange> {
        (1..=count)
            .map(|i| PriorExchange::new(format!("message {}", i), format!("reply {}", i)))
            .collect()
    }

    #[test]
    fn test_empty_history_renders_nothing() {
        assert_eq!(build_context_window(&[]), "");
    }

    #[test]
    fn test_keeps_last_ten_in_order() {
        let rendered = build_context_window(&history(15));

        for i in 1..=5 {
            assert!(
                !rendered.contains(&format!("User: message {}\n", i)),
                "exchange {} should have been dropped",
                i
            );
        }

        let positions: Vec<usize> = (6..=15)
            .map(|i| rendered.find(&format!("User: message {}\n", i)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(rendered.starts_with("User: message 6\n"));
        assert!(rendered.ends_with("Sage: reply 15"));
    }

    #[test]
    fn test_blocks_are_separated_by_blank_lines() {
        let rendered = build_context_window(&history(2));
        assert_eq!(
            rendered,
            "User: message 1\nSage: reply 1\n\nUser: message 2\nSage: reply 2"
        );
    }

    #[test]
    fn test_short_history_is_kept_whole() {
        let rendered = build_context_window(&history(3));
        assert_eq!(rendered.matches("User: ").count(), 3);
    }
}
