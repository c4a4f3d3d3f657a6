use bstr::ByteSlice;
use git_hash::hasher::Hasher;
use git_hash::{HashAlgorithm, ObjectId};

use crate::{ObjectError, ObjectType};

/// `"<type> <len>\0"`.
fn frame(obj_type: ObjectType, len: usize) -> Vec<u8> {
    let name = obj_type.as_str().as_bytes();
    let len = len.to_string();
    let mut header = Vec::with_capacity(name.len() + len.len() + 2);
    header.extend_from_slice(name);
    header.push(b' ');
    header.extend_from_slice(len.as_bytes());
    header.push(0);
    header
}

/// Split the `"<type> <len>\0"` header off `data`.
///
/// Returns the type, the declared length, and the header's own length
/// including the NUL.
fn split_header(data: &[u8]) -> Result<(ObjectType, usize, usize), ObjectError> {
    let invalid = |reason: String| ObjectError::InvalidHeader(reason);
    let nul = data
        .find_byte(0)
        .ok_or_else(|| invalid("missing null terminator".into()))?;
    let (name, len) = data[..nul]
        .split_once_str(" ")
        .ok_or_else(|| invalid("missing space in header".into()))?;
    let obj_type = ObjectType::from_bytes(name)?;

    if len.is_empty() || !len.iter().all(u8::is_ascii_digit) {
        return Err(invalid(format!("invalid size: {}", len.as_bstr())));
    }
    let declared = len
        .to_str()
        .ok()
        .and_then(|len| len.parse().ok())
        .ok_or_else(|| invalid(format!("size out of range: {}", len.as_bstr())))?;
    Ok((obj_type, declared, nul + 1))
}

/// An owned object in its hashed form: `"<type> <len>\0<content>"`.
///
/// The declared length always equals the content length. Every operation
/// that changes the content's length rewrites the header before returning,
/// so [`as_bytes`](ObjectBuffer::as_bytes) can be hashed at any time.
///
/// Content offsets taken by [`insert`](ObjectBuffer::insert) and
/// [`content_mut`](ObjectBuffer::content_mut) are relative to the start of
/// the content, so they stay valid when the header gains a digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectBuffer {
    obj_type: ObjectType,
    data: Vec<u8>,
    header_len: usize,
}

impl ObjectBuffer {
    /// Frame `content` as an object of type `obj_type`.
    pub fn new(obj_type: ObjectType, content: &[u8]) -> Self {
        let mut data = frame(obj_type, content.len());
        let header_len = data.len();
        data.extend_from_slice(content);
        Self {
            obj_type,
            data,
            header_len,
        }
    }

    /// Take ownership of already-framed bytes, checking the declared length.
    pub fn parse(data: Vec<u8>) -> Result<Self, ObjectError> {
        let (obj_type, declared, header_len) = split_header(&data)?;
        let actual = data.len() - header_len;
        if declared != actual {
            return Err(ObjectError::LengthMismatch { declared, actual });
        }
        Ok(Self {
            obj_type,
            data,
            header_len,
        })
    }

    pub fn obj_type(&self) -> ObjectType {
        self.obj_type
    }

    /// The full framed bytes, header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn header_len(&self) -> usize {
        self.header_len
    }

    pub fn content(&self) -> &[u8] {
        &self.data[self.header_len..]
    }

    /// Mutable view of the content. Its length is fixed, so the header stays valid.
    pub fn content_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.header_len..]
    }

    /// Insert `bytes` at content offset `at`, shifting the rest right, and reframe.
    ///
    /// # Panics
    ///
    /// Panics if `at` is past the end of the content.
    pub fn insert(&mut self, at: usize, bytes: &[u8]) {
        let pos = self.header_len + at;
        assert!(pos <= self.data.len(), "insert offset {at} past end of content");
        self.data.splice(pos..pos, bytes.iter().copied());
        self.reframe();
    }

    /// Digest of the framed bytes.
    pub fn object_id(&self, algo: HashAlgorithm) -> ObjectId {
        Hasher::digest(algo, &self.data)
    }

    /// Strip the header, leaving what `git hash-object --stdin` expects.
    pub fn into_content(mut self) -> Vec<u8> {
        self.data.drain(..self.header_len);
        self.data
    }

    fn reframe(&mut self) {
        let header = frame(self.obj_type, self.data.len() - self.header_len);
        let new_len = header.len();
        self.data.splice(..self.header_len, header);
        self.header_len = new_len;
    }
}
