use crate::finder::PhraseMatches;

/// Wrap every matched span of `text` in `<tag>...</tag>`.
///
/// Spans from all phrases are merged and applied left to right. A span
/// starting inside an already highlighted region is skipped, so tags never
/// nest or overlap.
pub fn highlight(text: &str, matches: &PhraseMatches, tag: &str) -> String {
    let chars: Vec<char> = text.chars().collect();

    let mut spans: Vec<[usize; 2]> = matches.values().flatten().copied().collect();
    spans.sort_unstable();

    let mut out = String::with_capacity(text.len() + spans.len() * (2 * tag.len() + 5));
    let mut cursor = 0;

    for [start, end] in spans {
        if start < cursor || end >= chars.len() {
            continue;
        }
        out.extend(&chars[cursor..start]);
        out.push('<');
        out.push_str(tag);
        out.push('>');
        out.extend(&chars[start..=end]);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        cursor = end + 1;
    }
    out.extend(&chars[cursor..]);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_highlight_repeated_word() {
        let text = "Его мама любит любит апельсины";
        let matches = fixtures::finder()
            .find_phrases(text, &["любить"], Some("ru"))
            .unwrap();
        assert_eq!(
            highlight(text, &matches, "b"),
            "Его мама <b>любит</b> <b>любит</b> апельсины"
        );
    }

    #[test]
    fn test_highlight_merges_phrases() {
        let text = "Клара у карла украла кораллы";
        let matches = fixtures::finder()
            .find_phrases(text, &["коралл", "украсть"], Some("ru"))
            .unwrap();
        assert_eq!(
            highlight(text, &matches, "mark"),
            "Клара у карла <mark>украла</mark> <mark>кораллы</mark>"
        );
    }

    #[test]
    fn test_overlapping_spans_are_skipped() {
        let mut matches = PhraseMatches::new();
        matches.insert("a b".to_string(), vec![[0, 2]]);
        matches.insert("b".to_string(), vec![[2, 2]]);
        assert_eq!(highlight("a b c", &matches, "b"), "<b>a b</b> c");
    }

    #[test]
    fn test_no_matches() {
        assert_eq!(highlight("текст", &PhraseMatches::new(), "b"), "текст");
    }
}
