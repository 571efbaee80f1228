//! Line-oriented classification of answer text.
//!
//! Answers are loosely markdown-shaped. Each line is classified by its shape
//! only; nothing here validates the markup, and unmatched `*` delimiters are
//! kept as literal text.

use serde::Serialize;

/// Lines at most this long, written in capitals, read as headings.
const CAPS_HEADING_MAX_CHARS: usize = 60;

/// Inline run of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Span {
    Plain(String),
    Strong(String),
    Emphasis(String),
    /// `***x***`
    #[serde(rename = "strong-emphasis")]
    StrongEmphasis(String),
}

/// A classified answer line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Line {
    Heading { text: String },
    Bullet { marker: String, spans: Vec<Span> },
    Text { spans: Vec<Span> },
}

/// A blank-line separated group of lines.
pub type Paragraph = Vec<Line>;

/// Split answer text into paragraphs of classified lines.
pub fn parse_answer(text: &str) -> Vec<Paragraph> {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .map(|block| {
            block
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(classify_line)
                .collect::<Paragraph>()
        })
        .filter(|p| !p.is_empty())
        .collect()
}

/// Classify one trimmed, non-empty line.
pub fn classify_line(line: &str) -> Line {
    if let Some(rest) = line.strip_prefix('#') {
        return Line::Heading {
            text: rest.trim_start_matches('#').trim().to_string(),
        };
    }
    if let Some((marker, rest)) = bullet_marker(line) {
        return Line::Bullet {
            marker,
            spans: parse_spans(rest),
        };
    }
    if is_caps_heading(line) {
        return Line::Heading {
            text: line.to_string(),
        };
    }
    Line::Text {
        spans: parse_spans(line),
    }
}

fn is_caps_heading(line: &str) -> bool {
    line.chars().count() <= CAPS_HEADING_MAX_CHARS
        && line.chars().any(char::is_alphabetic)
        && !line.chars().any(char::is_lowercase)
}

/// Leading `-`, `•`, `*` (followed by a space) or `N.`.
fn bullet_marker(line: &str) -> Option<(String, &str)> {
    for marker in ["- ", "• ", "* "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some((marker.trim().to_string(), rest.trim_start()));
        }
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(after) = rest.strip_prefix('.') {
            if after.starts_with(' ') {
                return Some((line[..=digits].to_string(), after.trim_start()));
            }
        }
    }
    None
}

/// Split a line into plain, `***both***`, `**strong**` and `*emphasis*` spans.
pub fn parse_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = line;

    while let Some(pos) = rest.find('*') {
        plain.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match delimited_span(tail) {
            Some((span, consumed)) => {
                if !plain.is_empty() {
                    spans.push(Span::Plain(std::mem::take(&mut plain)));
                }
                spans.push(span);
                rest = &tail[consumed..];
            }
            None => {
                // Unmatched: keep the delimiter literally.
                plain.push('*');
                rest = &tail[1..];
            }
        }
    }

    plain.push_str(rest);
    if !plain.is_empty() {
        spans.push(Span::Plain(plain));
    }
    spans
}

/// Match a delimited span at the start of `tail`, longest delimiter first.
fn delimited_span(tail: &str) -> Option<(Span, usize)> {
    let kinds: [(&str, fn(String) -> Span); 3] = [
        ("***", Span::StrongEmphasis),
        ("**", Span::Strong),
        ("*", Span::Emphasis),
    ];
    kinds.iter().find_map(|&(delim, make)| {
        let inner = tail.strip_prefix(delim)?;
        let end = inner.find(delim).filter(|&end| end > 0)?;
        Some((make(inner[..end].to_string()), 2 * delim.len() + end))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        assert_eq!(
            classify_line("## Newton's Laws"),
            Line::Heading { text: "Newton's Laws".into() }
        );
        assert_eq!(
            classify_line("KEY CONCEPTS"),
            Line::Heading { text: "KEY CONCEPTS".into() }
        );
        // Long capitals are not a heading.
        let shout = "A".repeat(61);
        assert!(matches!(classify_line(&shout), Line::Text { .. }));
        // Digits only are not a heading.
        assert!(matches!(classify_line("42"), Line::Text { .. }));
    }

    #[test]
    fn test_bullets() {
        assert_eq!(
            classify_line("- first point"),
            Line::Bullet { marker: "-".into(), spans: vec![Span::Plain("first point".into())] }
        );
        assert!(matches!(classify_line("• dot"), Line::Bullet { .. }));
        assert!(matches!(classify_line("* star"), Line::Bullet { .. }));
        assert_eq!(
            classify_line("12. twelfth"),
            Line::Bullet { marker: "12.".into(), spans: vec![Span::Plain("twelfth".into())] }
        );
        assert!(matches!(classify_line("3.14 is pi"), Line::Text { .. }));
        assert!(matches!(classify_line("- DNA"), Line::Bullet { .. }));
    }

    #[test]
    fn test_strong_and_emphasis() {
        assert_eq!(
            parse_spans("a **bold** and *soft* word"),
            vec![
                Span::Plain("a ".into()),
                Span::Strong("bold".into()),
                Span::Plain(" and ".into()),
                Span::Emphasis("soft".into()),
                Span::Plain(" word".into()),
            ]
        );
    }

    #[test]
    fn test_triple_delimiter_is_strong_emphasis() {
        assert_eq!(
            parse_spans("note ***this*** well"),
            vec![
                Span::Plain("note ".into()),
                Span::StrongEmphasis("this".into()),
                Span::Plain(" well".into()),
            ]
        );
        assert_eq!(
            parse_spans("***x** y"),
            vec![Span::Strong("*x".into()), Span::Plain(" y".into())]
        );
    }

    #[test]
    fn test_unmatched_delimiters_are_literal() {
        assert_eq!(parse_spans("2 * 3 = 6"), vec![Span::Plain("2 * 3 = 6".into())]);
        assert_eq!(parse_spans("**open"), vec![Span::Plain("**open".into())]);
    }

    #[test]
    fn test_paragraph_split() {
        let text = "# Title\nIntro line\n\n- one\n- two\n\n\nClosing **note**";
        let paragraphs = parse_answer(text);
        assert_eq!(paragraphs.len(), 3);
        assert!(matches!(paragraphs[0][0], Line::Heading { .. }));
        assert_eq!(paragraphs[1].len(), 2);
        assert_eq!(
            paragraphs[2][0],
            Line::Text {
                spans: vec![Span::Plain("Closing ".into()), Span::Strong("note".into())]
            }
        );
    }
}
