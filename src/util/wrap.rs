//! Soft wrapping of displayed element text into visual lines.
//!
//! Wrapping is presentation only: it never changes the displayed or raw
//! text. Concatenating the returned lines (re-inserting the explicit `\n`
//! breaks) gives back the original text.

enum Token<'a> {
    Word(&'a str),
    Newline,
}

/// Split into words that keep their trailing space, plus explicit newlines
fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        match ch {
            ' ' => {
                tokens.push(Token::Word(&text[start..idx + 1]));
                start = idx + 1;
            }
            '\n' => {
                if start < idx {
                    tokens.push(Token::Word(&text[start..idx]));
                }
                tokens.push(Token::Newline);
                start = idx + 1;
            }
            _ => {}
        }
    }
    if start < text.len() {
        tokens.push(Token::Word(&text[start..]));
    }
    tokens
}

/// Wrap `text` to at most `width` characters per line.
///
/// Lines break before a word that would overflow. Words longer than `width`
/// are split hard. A `width` of zero disables wrapping (only explicit
/// newlines break). Always returns at least one line.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.split('\n').map(str::to_string).collect();
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut x = 0usize;
    let mut ends_with_break = false;

    for token in tokenize(text) {
        let word = match token {
            Token::Newline => {
                lines.push(std::mem::take(&mut line));
                x = 0;
                ends_with_break = true;
                continue;
            }
            Token::Word(word) => word,
        };
        ends_with_break = false;

        let mut w = word.chars().count();
        if x + w > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            x = 0;
        }

        if w > width {
            let mut rest: Vec<char> = word.chars().collect();
            while rest.len() > width {
                let tail = rest.split_off(width);
                lines.push(rest.into_iter().collect());
                rest = tail;
            }
            w = rest.len();
            line = rest.into_iter().collect();
            x = w;
        } else {
            line.push_str(word);
            x += w;
        }
    }

    if !line.is_empty() || lines.is_empty() || ends_with_break {
        lines.push(line);
    }
    lines
}
