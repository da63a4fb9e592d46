use crate::units::Px;

/// Fixed-advance text metrics: every non-whitespace character advances by `advance`, every
/// collapsed space between words by `space_advance`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub advance: Px,
    pub space_advance: Px,
    pub line_height: Px,
}

impl TextStyle {
    /// Metrics where spaces are as wide as any other character
    pub fn monospace(advance: Px, line_height: Px) -> TextStyle {
        TextStyle {
            advance,
            space_advance: advance,
            line_height,
        }
    }
}

/// A single laid out line of text
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub width: Px,
}

/// Calculate the width of a given string of text given the style
pub fn width_of_text(text: &str, style: &TextStyle) -> Px {
    text.chars()
        .map(|ch| {
            if ch.is_whitespace() {
                style.space_advance
            } else {
                style.advance
            }
        })
        .sum()
}

/// The widest unbreakable run of text, below which the content overflows its box
pub fn min_content_width(text: &str, style: &TextStyle) -> Px {
    text.split_whitespace()
        .map(|word| width_of_text(word, style))
        .fold(Px::ZERO, Px::max)
}

/// The width of the whole text set on one line, with whitespace collapsed
pub fn max_content_width(text: &str, style: &TextStyle) -> Px {
    let mut words = 0usize;
    let mut width = Px::ZERO;
    for word in text.split_whitespace() {
        width += width_of_text(word, style);
        words += 1;
    }
    if words > 1 {
        width += style.space_advance * (words - 1) as f32;
    }
    width
}

/// Lays out text with greedy whitespace wrapping inside `available` width.
///
/// Runs of whitespace (including newlines) collapse to a single break opportunity, like
/// `white-space: normal`. Words are never split: a word wider than `available` sits alone on
/// its line and overflows it.
pub fn wrap_lines(text: &str, style: &TextStyle, available: Px) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    let mut current = String::new();
    let mut width = Px::ZERO;

    for word in text.split_whitespace() {
        let word_width = width_of_text(word, style);
        if current.is_empty() {
            current.push_str(word);
            width = word_width;
            continue;
        }

        let extended = width + style.space_advance + word_width;
        if extended <= available {
            current.push(' ');
            current.push_str(word);
            width = extended;
        } else {
            lines.push(Line {
                text: std::mem::take(&mut current),
                width,
            });
            current.push_str(word);
            width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(Line {
            text: current,
            width,
        });
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: TextStyle = TextStyle {
        advance: Px(10.0),
        space_advance: Px(5.0),
        line_height: Px(20.0),
    };

    #[test]
    fn content_widths() {
        assert_eq!(min_content_width("a bbb cc", &STYLE), Px(30.0));
        assert_eq!(max_content_width("a  bbb\ncc", &STYLE), Px(70.0));
        assert_eq!(max_content_width("   ", &STYLE), Px::ZERO);
    }

    #[test]
    fn wraps_at_whitespace() {
        let lines = wrap_lines("aa bb cc", &STYLE, Px(45.0));
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["aa bb", "cc"]);
        assert_eq!(lines[0].width, Px(45.0));
    }

    #[test]
    fn long_words_overflow_instead_of_splitting() {
        let lines = wrap_lines("abcdefgh ij", &STYLE, Px(30.0));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "abcdefgh");
        assert_eq!(lines[0].width, Px(80.0));
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap_lines(" \n ", &STYLE, Px(100.0)).is_empty());
    }
}
