//! Markup stripper - default Sanitizer implementation.
//!
//! Removes `<script>` and `<style>` elements together with their contents,
//! then every remaining tag. A `<` that cannot start a tag (`a < b`, `<3`)
//! is left alone. Stripping repeats until nothing changes, so nested
//! fragments such as `<<b>script>` cannot reassemble into a tag.

use crate::ports::Sanitizer;

/// Elements whose contents are dropped along with the tags.
const ACTIVE_ELEMENTS: [&str; 2] = ["script", "style"];

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupStripper;

impl MarkupStripper {
    pub fn new() -> Self {
        Self
    }
}

impl Sanitizer for MarkupStripper {
    fn sanitize(&self, text: &str) -> String {
        let mut current = text.to_string();
        loop {
            let next = strip_once(&current);
            if next == current {
                return next;
            }
            current = next;
        }
    }
}

fn starts_tag(next: Option<u8>) -> bool {
    matches!(next, Some(b) if b.is_ascii_alphabetic() || b == b'/' || b == b'!' || b == b'?')
}

fn tag_name(inner: &str) -> &str {
    let inner = inner.trim_start_matches('/');
    let end = inner
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(inner.len());
    &inner[..end]
}

fn strip_once(text: &str) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let lower = text.to_ascii_lowercase();
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < text.len() {
        let Some(offset) = text[i..].find('<') else {
            out.push_str(&text[i..]);
            break;
        };
        let start = i + offset;
        out.push_str(&text[i..start]);

        if !starts_tag(bytes.get(start + 1).copied()) {
            out.push('<');
            i = start + 1;
            continue;
        }

        let Some(close) = text[start..].find('>') else {
            out.push_str(&text[start..]);
            break;
        };
        let end = start + close + 1;
        let inner = &lower[start + 1..end - 1];
        let name = tag_name(inner);

        i = if !inner.starts_with('/') && ACTIVE_ELEMENTS.contains(&name) {
            let closing = format!("</{}", name);
            match lower[end..].find(&closing) {
                Some(c) => {
                    let closing_start = end + c;
                    text[closing_start..]
                        .find('>')
                        .map(|g| closing_start + g + 1)
                        .unwrap_or(text.len())
                }
                None => text.len(),
            }
        } else {
            end
        };
    }

    out
}
