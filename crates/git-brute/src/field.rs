//! Locating, creating, and widening the nonce field.
//!
//! The field is a header line `<name> <value>` in the object's content. Only
//! header lines are considered: everything before the first blank line. A
//! body line that happens to start with the field name is never touched.
//!
//! Offsets in a [`FieldDescriptor`] are relative to the start of the content,
//! so they survive the length header gaining digits.

use bstr::ByteSlice;
use git_object::ObjectBuffer;

use crate::{Alphabet, BruteError};

/// Header names git itself writes in commits and tags. Brute-forcing one of
/// these would rewrite real object metadata.
const RESERVED_NAMES: &[&str] = &[
    "tree",
    "parent",
    "author",
    "committer",
    "encoding",
    "gpgsig",
    "gpgsig-sha256",
    "mergetag",
    "object",
    "type",
    "tag",
    "tagger",
];

/// Position of a field's value within an object's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    start: usize,
    width: usize,
}

impl FieldDescriptor {
    /// Content offset of the value's first (most significant) position.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Content offset of the value's rightmost (least significant) position,
    /// or `None` for an empty value.
    pub fn rightmost(&self) -> Option<usize> {
        (self.width > 0).then(|| self.start + self.width - 1)
    }

    pub fn value<'a>(&self, buf: &'a ObjectBuffer) -> &'a [u8] {
        &buf.content()[self.start..self.start + self.width]
    }

    pub fn value_mut<'a>(&self, buf: &'a mut ObjectBuffer) -> &'a mut [u8] {
        &mut buf.content_mut()[self.start..self.start + self.width]
    }
}

/// Check that `name` can be used as a header field name.
pub fn validate_name(name: &str) -> Result<(), BruteError> {
    let invalid = |reason| BruteError::InvalidFieldName {
        name: name.to_owned(),
        reason,
    };
    if name.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if !name.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(invalid("must be printable ASCII without spaces"));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(invalid("is a header git writes itself"));
    }
    Ok(())
}

/// Content offset of the newline that ends the last header line.
fn header_end(content: &[u8]) -> Result<usize, BruteError> {
    content
        .find(b"\n\n")
        .ok_or(BruteError::MalformedTemplate("no blank line between headers and body"))
}

/// Find the header line `<name> <value>` and describe its value.
pub fn locate(buf: &ObjectBuffer, name: &str) -> Result<Option<FieldDescriptor>, BruteError> {
    let content = buf.content();
    let headers = &content[..header_end(content)?];
    let name = name.as_bytes();

    let mut line_start = 0;
    for line in headers.split_str("\n") {
        if line.starts_with(name) && line.get(name.len()) == Some(&b' ') {
            let value_len = line.len() - name.len() - 1;
            return Ok(Some(FieldDescriptor {
                start: line_start + name.len() + 1,
                width: value_len,
            }));
        }
        line_start += line.len() + 1;
    }
    Ok(None)
}

/// Find the field, or add `<name> <zero>` as the last header line.
pub fn locate_or_create(
    buf: &mut ObjectBuffer,
    name: &str,
    alphabet: &Alphabet,
) -> Result<FieldDescriptor, BruteError> {
    if let Some(field) = locate(buf, name)? {
        return Ok(field);
    }

    let at = header_end(buf.content())?;
    let mut line = Vec::with_capacity(name.len() + 3);
    line.push(b'\n');
    line.extend_from_slice(name.as_bytes());
    line.push(b' ');
    line.push(alphabet.zero());
    buf.insert(at, &line);

    tracing::debug!(field = name, "added nonce field");
    Ok(FieldDescriptor {
        start: at + 1 + name.len() + 1,
        width: 1,
    })
}

/// Widen the field by one position, inserted right after `<name> `.
///
/// The new position holds the zero symbol; every other byte keeps its
/// value and the rightmost position moves one to the right.
pub fn grow(buf: &mut ObjectBuffer, field: FieldDescriptor, alphabet: &Alphabet) -> FieldDescriptor {
    buf.insert(field.start, &[alphabet.zero()]);
    FieldDescriptor {
        start: field.start,
        width: field.width + 1,
    }
}

/// Write `value` into the field, widening it until the value fits.
///
/// Each attempt rewrites the whole value, so nothing from a narrower
/// rendering survives. Terminates because the width only grows and a `u64`
/// needs at most 64 positions.
pub fn render(
    buf: &mut ObjectBuffer,
    mut field: FieldDescriptor,
    alphabet: &Alphabet,
    value: u64,
) -> FieldDescriptor {
    while !alphabet.write(value, field.value_mut(buf)) {
        field = grow(buf, field, alphabet);
    }
    field
}
