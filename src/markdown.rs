//! Markdown-to-terminal rendering shared by the notes preview and the help
//! overlay.

use pulldown_cmark::{Event as MdEvent, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::theme;

/// Render markdown into styled lines. Headings are bold, inline and block
/// code use the accent color, list items get indentation-aware bullets.
pub fn render_markdown(raw: &str) -> Text<'static> {
    let parser = Parser::new_ext(raw, Options::all());

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut bold = 0usize;
    let mut italic = 0usize;
    let mut in_code_block = false;
    let mut list_depth = 0usize;
    let mut ordered: Vec<Option<u64>> = Vec::new();

    let flush = |current: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>| {
        lines.push(Line::from(std::mem::take(current)));
    };

    for event in parser {
        match event {
            MdEvent::Start(tag) => match tag {
                Tag::Strong => bold += 1,
                Tag::Emphasis => italic += 1,
                Tag::Heading { .. } => bold += 1,
                Tag::CodeBlock(_) => in_code_block = true,
                Tag::List(start) => {
                    list_depth += 1;
                    ordered.push(start);
                }
                Tag::Item => {
                    let indent = "  ".repeat(list_depth.saturating_sub(1));
                    let bullet = match ordered.last_mut() {
                        Some(Some(n)) => {
                            let label = format!("{indent}{n}. ");
                            *n += 1;
                            label
                        }
                        _ => format!("{indent}- "),
                    };
                    current.push(Span::raw(bullet));
                }
                _ => {}
            },
            MdEvent::End(tag) => match tag {
                TagEnd::Strong => bold = bold.saturating_sub(1),
                TagEnd::Emphasis => italic = italic.saturating_sub(1),
                TagEnd::Heading(_) => {
                    bold = bold.saturating_sub(1);
                    flush(&mut current, &mut lines);
                    lines.push(Line::default());
                }
                TagEnd::CodeBlock => {
                    in_code_block = false;
                    lines.push(Line::default());
                }
                TagEnd::Paragraph => {
                    flush(&mut current, &mut lines);
                    if list_depth == 0 {
                        lines.push(Line::default());
                    }
                }
                TagEnd::Item => {
                    if !current.is_empty() {
                        flush(&mut current, &mut lines);
                    }
                }
                TagEnd::List(_) => {
                    list_depth = list_depth.saturating_sub(1);
                    ordered.pop();
                    if list_depth == 0 {
                        lines.push(Line::default());
                    }
                }
                _ => {}
            },
            MdEvent::Text(text) => {
                let mut style = Style::default();
                if bold > 0 {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if italic > 0 {
                    style = style.add_modifier(Modifier::ITALIC);
                }
                if in_code_block {
                    style = Style::default().fg(theme::accent());
                    for segment in text.split('\n') {
                        if !current.is_empty() {
                            flush(&mut current, &mut lines);
                        }
                        if !segment.is_empty() {
                            current.push(Span::styled(segment.to_string(), style));
                        }
                    }
                    continue;
                }
                current.push(Span::styled(text.to_string(), style));
            }
            MdEvent::Code(text) => {
                current.push(Span::styled(
                    text.to_string(),
                    Style::default().fg(theme::accent()),
                ));
            }
            MdEvent::SoftBreak => current.push(Span::raw(" ")),
            MdEvent::HardBreak => flush(&mut current, &mut lines),
            MdEvent::Rule => lines.push(Line::from("─".repeat(24))),
            _ => {}
        }
    }

    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    if lines.is_empty() {
        lines.push(Line::default());
    }
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn rendered_strings(raw: &str) -> Vec<String> {
        render_markdown(raw)
            .lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn headings_and_paragraphs_become_separate_lines() {
        let lines = rendered_strings(indoc! {"
            # Title

            Body text here.
        "});
        assert!(lines.iter().any(|l| l == "Title"));
        assert!(lines.iter().any(|l| l == "Body text here."));
    }

    #[test]
    fn list_items_get_bullets_and_numbers() {
        let lines = rendered_strings(indoc! {"
            - alpha
            - beta

            1. one
            2. two
        "});
        assert!(lines.iter().any(|l| l == "- alpha"));
        assert!(lines.iter().any(|l| l == "- beta"));
        assert!(lines.iter().any(|l| l == "1. one"));
        assert!(lines.iter().any(|l| l == "2. two"));
    }

    #[test]
    fn code_blocks_split_on_newlines() {
        let lines = rendered_strings(indoc! {"
            ```
            let a = 1;
            let b = 2;
            ```
        "});
        assert!(lines.iter().any(|l| l == "let a = 1;"));
        assert!(lines.iter().any(|l| l == "let b = 2;"));
    }
}
