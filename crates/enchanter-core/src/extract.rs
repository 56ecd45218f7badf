//! Brace-depth scanner used to pull JSON objects out of free-form model
//! replies.
//!
//! The scanner tracks string literals and backslash escapes so braces
//! inside quoted text do not affect the depth count. Spans are returned in
//! order of appearance and never overlap.

/// Every top-level balanced `{…}` span in `text`, in order of appearance.
///
/// Runs in a single pass. A `{` that never closes does not hide the
/// balanced objects after it, and a stray `}` is ignored.
pub fn balanced_object_spans(text: &str) -> Vec<&str> {
    let mut open: Vec<usize> = Vec::new();
    // Closed spans not yet known to sit inside a larger one.
    let mut closed: Vec<(usize, usize)> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (idx, byte) in text.bytes().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => open.push(idx),
            b'}' => {
                let Some(start) = open.pop() else {
                    continue;
                };
                while closed.last().is_some_and(|&(inner, _)| inner > start) {
                    closed.pop();
                }
                closed.push((start, idx + 1));
            }
            _ => {}
        }
    }

    closed.into_iter().map(|(start, end)| &text[start..end]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(text: &str) -> Option<&str> {
        balanced_object_spans(text).into_iter().next()
    }

    #[test]
    fn finds_object_between_chatter() {
        let text = r#"Sure! Here you go: {"a":1} hope that helps"#;
        assert_eq!(first(text), Some(r#"{"a":1}"#));
    }

    #[test]
    fn keeps_nested_objects_together() {
        let text = r#"x {"a":{"b":{"c":2}},"d":[{"e":3}]} y"#;
        assert_eq!(
            first(text),
            Some(r#"{"a":{"b":{"c":2}},"d":[{"e":3}]}"#)
        );
    }

    #[test]
    fn ignores_braces_inside_string_literals() {
        let text = r#"{"enhancedPrompt":"use {placeholders} and }","tags":["\"}"]} trailing }"#;
        assert_eq!(
            first(text),
            Some(r#"{"enhancedPrompt":"use {placeholders} and }","tags":["\"}"]}"#)
        );
    }

    #[test]
    fn handles_escaped_backslash_before_quote() {
        let text = r#"{"path":"C:\\"} rest"#;
        assert_eq!(first(text), Some(r#"{"path":"C:\\"}"#));
    }

    #[test]
    fn yields_multiple_spans_in_order() {
        let spans = balanced_object_spans("{a} and {b {c}} end");
        assert_eq!(spans, vec!["{a}", "{b {c}}"]);
    }

    #[test]
    fn skips_unbalanced_opening_brace() {
        let spans = balanced_object_spans("{ broken then {\"ok\":true}");
        assert_eq!(spans, vec!["{\"ok\":true}"]);
    }

    #[test]
    fn returns_none_without_braces() {
        assert_eq!(first("no json here"), None);
        assert_eq!(first("} only closing {"), None);
    }

    #[test]
    fn handles_multibyte_text() {
        let text = "Voilà ✨ {\"tag\":\"café\"} ✨";
        assert_eq!(first(text), Some("{\"tag\":\"café\"}"));
    }

    #[test]
    fn long_runs_of_unclosed_braces_are_scanned_once() {
        let mut text = "{".repeat(200_000);
        text.push_str(r#"{"ok":true} trailing"#);

        assert_eq!(balanced_object_spans(&text), vec![r#"{"ok":true}"#]);
        assert!(balanced_object_spans(&"{".repeat(200_000)).is_empty());
    }

    #[test]
    fn stray_closing_braces_are_ignored() {
        assert_eq!(balanced_object_spans("}} {\"a\":1} }"), vec!["{\"a\":1}"]);
    }
}
