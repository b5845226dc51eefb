//! Shared text shaping and truncation policies for compact labels.

use alloc::{format, string::String};

use crate::story::Panel;

pub const TILE_MAX_WORDS: usize = 12;
pub const TILE_MAX_CHARS: usize = 60;

/// Keeps at most `max_words` words and `max_chars` characters, collapsing
/// whitespace and appending `...` when anything was cut.
pub fn preview_limited(source: &str, max_words: usize, max_chars: usize) -> String {
    let mut out = String::new();
    let mut char_count = 0usize;
    let mut truncated = false;

    for (word_count, word) in source.split_whitespace().enumerate() {
        if word_count >= max_words {
            truncated = true;
            break;
        }

        if word_count > 0 {
            if char_count >= max_chars {
                truncated = true;
                break;
            }
            out.push(' ');
            char_count += 1;
        }

        for ch in word.chars() {
            if char_count >= max_chars {
                truncated = true;
                break;
            }
            out.push(ch);
            char_count += 1;
        }

        if truncated {
            break;
        }
    }

    if out.is_empty() {
        return out;
    }

    if truncated {
        out.truncate(out.trim_end().len());
        out.push_str("...");
    }
    out
}

/// Position label shown next to the progress bar, e.g. `3 / 7`.
pub fn counter_label(panel_index: usize, panel_total: usize) -> String {
    format!("{} / {}", panel_index.saturating_add(1), panel_total)
}

/// Gallery tile text: the panel title, else its content, else its number.
pub fn panel_tile_label(panel: &Panel, index: usize) -> String {
    let text = panel
        .title
        .as_deref()
        .filter(|title| !title.trim().is_empty())
        .or_else(|| {
            panel
                .content
                .as_deref()
                .filter(|content| !content.trim().is_empty())
        });

    match text {
        Some(text) => preview_limited(text, TILE_MAX_WORDS, TILE_MAX_CHARS),
        None => format!("Panel {}", index.saturating_add(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::PanelKind;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(preview_limited("  fresh   bread ", 5, 40), "fresh bread");
    }

    #[test]
    fn word_limit_appends_ellipsis() {
        assert_eq!(preview_limited("one two three four", 2, 40), "one two...");
    }

    #[test]
    fn char_limit_cuts_mid_word() {
        assert_eq!(preview_limited("harbour walk", 5, 6), "harbou...");
        assert_eq!(preview_limited("ab cd", 5, 2), "ab...");
    }

    #[test]
    fn counter_is_one_based() {
        assert_eq!(counter_label(0, 4), "1 / 4");
        assert_eq!(counter_label(3, 4), "4 / 4");
    }

    #[test]
    fn tile_label_falls_back() {
        let titled = Panel::new("a", PanelKind::Text, 0).with_title("Docks");
        assert_eq!(panel_tile_label(&titled, 0), "Docks");

        let body = Panel::new("b", PanelKind::Quote, 1).with_content("Warm bread");
        assert_eq!(panel_tile_label(&body, 1), "Warm bread");

        let bare = Panel::new("c", PanelKind::Image, 2).with_title("  ");
        assert_eq!(panel_tile_label(&bare, 2), "Panel 3");
    }
}
