//! Post-processing of model replies.
//!
//! The model is told to end every non-final turn with a markdown list of
//! `[label](suggestion:value)` links. Those links become buttons; the rest of
//! the reply is shown as text.

use serde::Serialize;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)] // constant pattern
static SUGGESTION_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(.*?)\]\(suggestion:(.*?)\)").expect("suggestion pattern is valid")
});

/// One selectable option offered by the assistant
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Button text. Clicking the button sends this text as the next message.
    pub label: String,
    /// The `suggestion:` target the model attached to the link
    pub value: String,
}

/// A model reply split into display text and suggestions
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssistantReply {
    /// Reply with every suggestion link removed
    pub text: String,
    /// Suggestions in order of appearance
    pub suggestions: Vec<Suggestion>,
}

impl AssistantReply {
    /// A reply without suggestions ends the conversation (the final summary).
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.suggestions.is_empty()
    }
}

/// Split a raw model reply into text and suggestions.
#[must_use]
pub fn parse_reply(raw: &str) -> AssistantReply {
    let suggestions = SUGGESTION_LINK
        .captures_iter(raw)
        .map(|caps| Suggestion {
            label: caps[1].to_string(),
            value: caps[2].to_string(),
        })
        .collect();

    let stripped = SUGGESTION_LINK.replace_all(raw, "");
    let text = stripped
        .lines()
        .filter(|line| !is_bare_list_marker(line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    AssistantReply { text, suggestions }
}

/// Lines such as `- ` that are left behind once their link is removed.
fn is_bare_list_marker(line: &str) -> bool {
    matches!(line.trim(), "-" | "*" | "+")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extracts_labels_and_values_in_order() {
        let raw = "Great choice! Which mode do you prefer?\n\n\
                   - [Online Events](suggestion:Register for Online Events)\n\
                   - [Offline Events](suggestion:Register for Offline Events)";

        let reply = parse_reply(raw);

        assert_eq!(reply.text, "Great choice! Which mode do you prefer?");
        assert_eq!(
            reply.suggestions,
            vec![
                Suggestion {
                    label: "Online Events".to_string(),
                    value: "Register for Online Events".to_string(),
                },
                Suggestion {
                    label: "Offline Events".to_string(),
                    value: "Register for Offline Events".to_string(),
                },
            ]
        );
        assert!(!reply.is_final());
    }

    #[test]
    fn test_reply_without_links_is_final() {
        let raw = "  Thank you for registering! Have a great day!  ";
        let reply = parse_reply(raw);

        assert_eq!(reply.text, "Thank you for registering! Have a great day!");
        assert!(reply.is_final());
    }

    #[test]
    fn test_ordinary_links_are_kept() {
        let raw = "See [the schedule](https://example.edu/schedule).\n- [Yes](suggestion:Yes)";
        let reply = parse_reply(raw);

        assert_eq!(reply.text, "See [the schedule](https://example.edu/schedule).");
        assert_eq!(reply.suggestions.len(), 1);
    }

    #[test]
    fn test_inline_links_leave_surrounding_text() {
        let raw = "Pick [A](suggestion:a) or [B](suggestion:b) to continue";
        let reply = parse_reply(raw);

        assert_eq!(reply.text, "Pick  or  to continue");
        assert_eq!(reply.suggestions[1].label, "B");
    }

    #[test]
    fn test_empty_label_and_value() {
        let reply = parse_reply("[](suggestion:)");
        assert_eq!(reply.suggestions[0].label, "");
        assert_eq!(reply.suggestions[0].value, "");
        assert_eq!(reply.text, "");
    }

    proptest! {
        #[test]
        fn prop_text_is_trimmed_and_free_of_markers(raw in "(.{0,40}\n){0,5}") {
            let reply = parse_reply(&raw);
            prop_assert_eq!(reply.text.trim(), reply.text.as_str());
            prop_assert!(reply.text.lines().all(|line| !is_bare_list_marker(line)));
        }

        #[test]
        fn prop_every_generated_link_is_found(
            labels in proptest::collection::vec("[A-Za-z ]{1,12}", 0..6)
        ) {
            let raw: String = labels
                .iter()
                .map(|l| format!("- [{l}](suggestion:{l})\n"))
                .collect();

            let reply = parse_reply(&raw);
            let found: Vec<_> = reply.suggestions.iter().map(|s| s.label.clone()).collect();
            prop_assert_eq!(found, labels);
            prop_assert_eq!(reply.text, "");
        }
    }
}
