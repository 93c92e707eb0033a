use crate::application::ports::util::SlugGenerator;
use crate::domain::slug::config::NormalizerOptions;
use deunicode::deunicode_char;
use slug::slugify;

const APOSTROPHES: [char; 4] = ['\'', '\u{2018}', '\u{2019}', '\u{02BC}'];

#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str, preserve_unicode: bool, options: &NormalizerOptions) -> String {
        normalize(input, preserve_unicode, options)
    }
}

/// Lowercase, substitute, optionally transliterate, then hyphenate.
///
/// The result only contains lowercase alphanumerics separated by single
/// hyphens, with no hyphen at either end. Text with nothing left after
/// stripping yields an empty string.
pub fn normalize(input: &str, preserve_unicode: bool, options: &NormalizerOptions) -> String {
    let mut text = input.to_lowercase();

    for (from, to) in &options.substitutions {
        let from = from.to_lowercase();
        if !from.is_empty() {
            text = text.replace(&from, &to.to_lowercase());
        }
    }

    text.retain(|c| !APOSTROPHES.contains(&c));

    if preserve_unicode {
        hyphenate_unicode(&text)
    } else {
        slugify(transliterate(&text))
    }
}

/// Letters and decimal digits of any script. Numeric symbols such as
/// fractions, superscripts and circled numbers are separators.
fn is_word_char(ch: char) -> bool {
    if ch.is_alphabetic() || ch.is_ascii_digit() {
        return true;
    }
    ch.is_numeric()
        && !matches!(
            ch,
            '\u{00B2}'
                | '\u{00B3}'
                | '\u{00B9}'
                | '\u{00BC}'..='\u{00BE}'
                | '\u{2070}'..='\u{218F}'
                | '\u{2460}'..='\u{24FF}'
                | '\u{2776}'..='\u{2793}'
                | '\u{3251}'..='\u{325F}'
                | '\u{32B1}'..='\u{32BF}'
        )
}

/// ASCII romanization of word characters only; every other non-ASCII
/// character becomes a separator instead of being spelled out.
fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii() {
            out.push(ch);
            continue;
        }
        match deunicode_char(ch).filter(|_| is_word_char(ch)) {
            Some(ascii) => out.extend(
                ascii
                    .chars()
                    .filter(|c| !APOSTROPHES.contains(c))
                    .flat_map(char::to_lowercase),
            ),
            None => out.push(' '),
        }
    }
    out
}

fn hyphenate_unicode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if is_word_char(ch) {
            for lower in ch.to_lowercase().filter(|c| is_word_char(*c)) {
                if pending_dash && !out.is_empty() {
                    out.push('-');
                }
                pending_dash = false;
                out.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }

    out
}
