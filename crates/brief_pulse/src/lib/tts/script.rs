//! Assembles the spoken script for one briefing: a fixed intro, a title
//! line plus summary text per story, and a fixed outro. Long summaries are
//! split to fit the speech service's per-request input ceiling.

use crate::Summary;

pub const INTRO_TEXT: &str =
    "Good morning, and welcome to your AI briefing. Here is the latest news.";
pub const OUTRO_TEXT: &str = "And that's all for your briefing today. Thanks for listening.";

/// Per-request input ceiling of the speech service.
pub const MAX_CHUNK_CHARS: usize = 4800;

/// Builds the ordered list of text units to synthesize. Empty and
/// whitespace-only units are dropped so no zero-length segment is produced.
pub fn build_script(summaries: &[Summary]) -> Vec<String> {
    let mut units = vec![INTRO_TEXT.to_string()];

    for summary in summaries {
        units.push(format!("The next story is titled: {}.", summary.title));
        units.extend(chunk_text(&summary.text, MAX_CHUNK_CHARS));
    }

    units.push(OUTRO_TEXT.to_string());
    units.retain(|unit| !unit.trim().is_empty());
    units
}

/// Splits `text` into pieces of at most `max_chars` characters, on char
/// boundaries. Concatenating the pieces reproduces `text` exactly.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in text.chars() {
        if count == max_chars {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(title: &str, text: &str) -> Summary {
        Summary {
            title: title.into(),
            text: text.into(),
        }
    }

    #[test]
    fn chunks_reconstruct_the_original_text() {
        let text = "abcdefgh".repeat(1000);
        let chunks = chunk_text(&text, MAX_CHUNK_CHARS);

        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn chunking_respects_multibyte_boundaries() {
        let text = "héllo wörld ünïcode".repeat(3);
        let chunks = chunk_text(&text, 7);

        assert!(chunks.iter().all(|c| c.chars().count() <= 7));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", MAX_CHUNK_CHARS).is_empty());
    }

    #[test]
    fn script_orders_intro_stories_outro() {
        let units = build_script(&[summary("First", "Alpha."), summary("Second", "Beta.")]);

        assert_eq!(
            units,
            vec![
                INTRO_TEXT.to_string(),
                "The next story is titled: First.".to_string(),
                "Alpha.".to_string(),
                "The next story is titled: Second.".to_string(),
                "Beta.".to_string(),
                OUTRO_TEXT.to_string(),
            ]
        );
    }

    #[test]
    fn whitespace_only_units_are_dropped() {
        let units = build_script(&[summary("Silent", "   ")]);

        assert_eq!(
            units,
            vec![
                INTRO_TEXT.to_string(),
                "The next story is titled: Silent.".to_string(),
                OUTRO_TEXT.to_string(),
            ]
        );
    }

    #[test]
    fn long_summaries_are_split_into_multiple_units() {
        let long = "x".repeat(MAX_CHUNK_CHARS + 1);
        let units = build_script(&[summary("Long", &long)]);

        // intro, title, two chunks, outro
        assert_eq!(units.len(), 5);
        assert_eq!(format!("{}{}", units[2], units[3]), long);
    }
}
