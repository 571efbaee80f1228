//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use topiclens_core::render::markup::{Line, Span};
use topiclens_core::render::{ResultView, View};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest line we wrap to, even on very wide terminals.
const MAX_TEXT_WIDTH: usize = 100;

const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Plain,
    Strong,
    Emphasis,
    StrongEmphasis,
}

/// Print the result header followed by each selected view.
pub fn print_result(view: &ResultView, views: &[View]) {
    print_header(view);
    for which in views {
        print_view(view, *which);
    }
    println!();
}

fn print_header(view: &ResultView) {
    let width = text_width();
    println!();
    println!("{} {}", "Q:".cyan().bold(), truncate_visual(&view.question, width.saturating_sub(3)).bold());
    println!(
        "{}: {}   {}: {}",
        "Topic".bold(),
        view.topic.green(),
        "Asked".bold(),
        view.timestamp.dimmed()
    );
    println!(
        "{}: {} {}%",
        "Comprehension".bold(),
        comprehension_bar(view.comprehension_level, BAR_WIDTH).cyan(),
        view.comprehension_level
    );
}

/// Print a single view.
pub fn print_view(view: &ResultView, which: View) {
    let width = text_width();
    println!();
    println!("{}", which.title().cyan().bold());
    println!("{}", "─".repeat(width.min(60)).dimmed());

    match which {
        View::Answer => print_answer(view, width),
        View::Visualization => {
            println!("{}", view.visualization.blue().underline());
            println!("{}", "Open the link in a browser to see the diagram.".dimmed());
        }
        View::KeyPoints => {
            if view.units.is_empty() {
                println!("{}", "No units identified.".dimmed());
            }
            for (i, unit) in view.units.iter().enumerate() {
                println!("  {}. {}", (i + 1).to_string().bold(), unit);
            }
        }
        View::Insights => {
            for tip in &view.insights {
                print_wrapped("  • ", &[(tip.clone(), Style::Plain)], width);
            }
        }
    }
}

fn print_answer(view: &ResultView, width: usize) {
    for (i, paragraph) in view.paragraphs.iter().enumerate() {
        if i > 0 {
            println!();
        }
        for line in paragraph {
            match line {
                Line::Heading { text } => println!("{}", text.bold().underline()),
                Line::Bullet { marker, spans } => {
                    print_wrapped(&format!("  {} ", marker), &styled_words(spans), width)
                }
                Line::Text { spans } => print_wrapped("", &styled_words(spans), width),
            }
        }
    }
}

fn print_wrapped(prefix: &str, words: &[(String, Style)], width: usize) {
    let indent = " ".repeat(UnicodeWidthStr::width(prefix));
    let avail = width.saturating_sub(indent.len()).max(20);
    for (i, line) in wrap_tokens(words, avail).into_iter().enumerate() {
        let rendered: Vec<String> = line
            .iter()
            .map(|(word, style)| paint(word, *style).to_string())
            .collect();
        let lead = if i == 0 { prefix } else { indent.as_str() };
        println!("{}{}", lead, rendered.join(" "));
    }
}

fn paint(word: &str, style: Style) -> ColoredString {
    match style {
        Style::Plain => word.normal(),
        Style::Strong => word.bold(),
        Style::Emphasis => word.italic(),
        Style::StrongEmphasis => word.bold().italic(),
    }
}

fn styled_words(spans: &[Span]) -> Vec<(String, Style)> {
    spans
        .iter()
        .flat_map(|span| {
            let (text, style) = match span {
                Span::Plain(t) => (t, Style::Plain),
                Span::Strong(t) => (t, Style::Strong),
                Span::Emphasis(t) => (t, Style::Emphasis),
                Span::StrongEmphasis(t) => (t, Style::StrongEmphasis),
            };
            text.split_whitespace().map(move |w| (w.to_string(), style))
        })
        .collect()
}

/// Greedy word wrap by visual width. Words wider than `width` get a line of
/// their own.
fn wrap_tokens<T: Clone>(words: &[(String, T)], width: usize) -> Vec<Vec<(String, T)>> {
    let mut lines = Vec::new();
    let mut current: Vec<(String, T)> = Vec::new();
    let mut current_width = 0;

    for (word, tag) in words {
        let w = UnicodeWidthStr::width(word.as_str());
        let needed = if current.is_empty() { w } else { current_width + 1 + w };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current_width += if current.is_empty() { w } else { 1 + w };
        current.push((word.clone(), tag.clone()));
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// A fixed-width bar filled to `level` percent.
fn comprehension_bar(level: u8, width: usize) -> String {
    let filled = (usize::from(level.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Get terminal width for text, defaulting to 80.
fn text_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
        .min(MAX_TEXT_WIDTH)
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 3 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("...");
    result
}
