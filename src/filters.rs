//! Shared byte-level filters used by the single-byte and Latin-1 probers
//! before they ever look at character order or bigram statistics.
//!
//! All three filters are pure and allocate only for their output buffer,
//! and are idempotent: running a filter twice produces the same result as
//! running it once (§8 property 5).

/// Keeps only runs of bytes that are ASCII letters or high bytes
/// (`0x80..=0xFF`), where the run contains at least one high byte.
/// Everything else acts as a marker; a run of one or more markers
/// collapses to a single ASCII space.
pub fn filter_international_words(buf: &[u8]) -> Vec<u8> {
    let mut filtered = Vec::with_capacity(buf.len());
    let mut in_word = false;
    let mut prev_marker = true;

    for &byte in buf {
        let is_alpha = byte.is_ascii_alphabetic();
        let is_international = (0x80..=0xFF).contains(&byte);

        if is_alpha || is_international {
            if prev_marker && !in_word {
                in_word = true;
            }
            if in_word {
                filtered.push(byte);
            }
        } else {
            if in_word {
                in_word = false;
                if !prev_marker {
                    filtered.push(b' ');
                }
            }
            prev_marker = true;
            continue;
        }
        prev_marker = false;
    }

    filtered
}

/// Looser variant used on every single-byte model, including ones that
/// keep ASCII letters. A maximal run of plain ASCII letters collapses to a
/// single space unless it directly borders a high byte on either side —
/// borrowed words embedded in international text are common (e.g. a product
/// name), but a run with no adjacent high byte is treated as unrelated
/// boilerplate and dropped. See spec.md §9's open question: this is the
/// upstream-documented behavior rather than a re-derivation.
pub fn filter_with_english_letters(buf: &[u8]) -> Vec<u8> {
    let mut filtered = Vec::with_capacity(buf.len());
    let mut i = 0;
    while i < buf.len() {
        let byte = buf[i];
        if byte.is_ascii_alphabetic() {
            let start = i;
            while i < buf.len() && buf[i].is_ascii_alphabetic() {
                i += 1;
            }
            let borders_international = (start > 0 && buf[start - 1] >= 0x80)
                || (i < buf.len() && buf[i] >= 0x80);
            if borders_international {
                filtered.extend_from_slice(&buf[start..i]);
            } else {
                filtered.push(b' ');
            }
        } else {
            filtered.push(byte);
            i += 1;
        }
    }
    filtered
}

/// Drops bytes between an unescaped `<` and the next `>`, including the
/// delimiters themselves.
pub fn remove_xml_tags(buf: &[u8]) -> Vec<u8> {
    let mut filtered = Vec::with_capacity(buf.len());
    let mut in_tag = false;
    for &byte in buf {
        match byte {
            b'<' => in_tag = true,
            b'>' => in_tag = false,
            _ if !in_tag => filtered.push(byte),
            _ => {}
        }
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn international_words_collapses_pure_ascii_runs() {
        let input = b"hello \xc3\xa9world foo bar \xc3\xa9baz";
        let out = filter_international_words(input);
        // "hello" has no high byte neighbor and is dropped entirely, only
        // the words touching a high byte survive, separated by spaces.
        assert!(out.windows(2).all(|w| w != b"  "));
        assert!(out.contains(&0xA9));
    }

    #[test]
    fn international_words_idempotent() {
        let input = b"Some \xff Text here \xfe and more";
        let once = filter_international_words(input);
        let twice = filter_international_words(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn english_letters_keeps_border_runs() {
        let input = [b'A', b'B', 0xC3, b'C', b'D'];
        let out = filter_with_english_letters(&input);
        assert_eq!(out, vec![b'A', b'B', 0xC3, b'C', b'D']);
    }

    #[test]
    fn english_letters_collapses_isolated_runs() {
        let input = b"the \xc3\xa9 cat sat";
        let out = filter_with_english_letters(input);
        // "the" and "cat" and "sat" have no adjacent high byte -> collapsed.
        assert!(!out.windows(3).any(|w| w == b"cat"));
    }

    #[test]
    fn remove_xml_tags_strips_tag_bodies() {
        let input = b"before<tag attr=\"x\">middle</tag>after";
        let out = remove_xml_tags(input);
        assert_eq!(out, b"beforemiddleafter".to_vec());
    }

    #[test]
    fn remove_xml_tags_idempotent() {
        let input = b"a<b>c<d>e";
        let once = remove_xml_tags(input);
        let twice = remove_xml_tags(&once);
        assert_eq!(once, twice);
    }
}
