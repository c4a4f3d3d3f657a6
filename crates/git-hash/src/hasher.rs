use digest::Digest;

use crate::{HashAlgorithm, ObjectId};

#[derive(Clone)]
enum HasherInner {
    Sha1(sha1::Sha1),
    Sha256(sha2::Sha256),
}

/// Streaming, reusable hash computation.
///
/// Wraps SHA-1 and SHA-256 behind one interface. Feed data with
/// [`update`](Hasher::update), then take the digest with
/// [`finalize_reset`](Hasher::finalize_reset) to keep the hasher for the next
/// object. Finalizing never fails.
#[derive(Clone)]
pub struct Hasher {
    inner: HasherInner,
}

impl Hasher {
    pub fn new(algo: HashAlgorithm) -> Self {
        let inner = match algo {
            HashAlgorithm::Sha1 => HasherInner::Sha1(sha1::Sha1::new()),
            HashAlgorithm::Sha256 => HasherInner::Sha256(sha2::Sha256::new()),
        };
        Self { inner }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        match self.inner {
            HasherInner::Sha1(_) => HashAlgorithm::Sha1,
            HasherInner::Sha256(_) => HashAlgorithm::Sha256,
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match &mut self.inner {
            HasherInner::Sha1(h) => Digest::update(h, data),
            HasherInner::Sha256(h) => Digest::update(h, data),
        }
    }

    /// Take the digest of everything fed so far and reset to the empty state.
    pub fn finalize_reset(&mut self) -> ObjectId {
        match &mut self.inner {
            HasherInner::Sha1(h) => {
                let mut bytes = [0u8; 20];
                bytes.copy_from_slice(Digest::finalize_reset(h).as_slice());
                ObjectId::Sha1(bytes)
            }
            HasherInner::Sha256(h) => {
                let mut bytes = [0u8; 32];
                bytes.copy_from_slice(Digest::finalize_reset(h).as_slice());
                ObjectId::Sha256(bytes)
            }
        }
    }

    pub fn finalize(mut self) -> ObjectId {
        self.finalize_reset()
    }

    /// Hash `data` in one call.
    pub fn digest(algo: HashAlgorithm, data: &[u8]) -> ObjectId {
        let mut h = Self::new(algo);
        h.update(data);
        h.finalize()
    }

    /// Hash a git object: `"{type} {len}\0{content}"`.
    pub fn hash_object(algo: HashAlgorithm, obj_type: &str, content: &[u8]) -> ObjectId {
        let header = format!("{} {}\0", obj_type, content.len());
        let mut h = Self::new(algo);
        h.update(header.as_bytes());
        h.update(content);
        h.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalize_reset_starts_over() {
        let mut h = Hasher::new(HashAlgorithm::Sha1);
        h.update(b"stale input");
        let _ = h.finalize_reset();
        h.update(b"hello world");
        assert_eq!(
            h.finalize_reset(),
            Hasher::digest(HashAlgorithm::Sha1, b"hello world")
        );
    }

    #[test]
    fn incremental_matches_one_shot() {
        let mut h = Hasher::new(HashAlgorithm::Sha256);
        h.update(b"hello ");
        h.update(b"world");
        assert_eq!(h.finalize(), Hasher::digest(HashAlgorithm::Sha256, b"hello world"));
    }

    #[test]
    fn reports_algorithm() {
        assert_eq!(Hasher::new(HashAlgorithm::Sha256).algorithm(), HashAlgorithm::Sha256);
    }
}
