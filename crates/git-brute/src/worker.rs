//! One lane of the search: render, hash, test, repeat.

use crossbeam::channel::{Receiver, Sender};
use git_hash::hasher::Hasher;
use git_hash::{HashAlgorithm, ObjectId};
use git_object::ObjectBuffer;

use crate::field::{self, FieldDescriptor};
use crate::{Alphabet, CancellationGate, Pattern, Winner};

/// A search lane that exclusively owns its copy of the object.
pub struct SearchWorker {
    id: usize,
    buffer: ObjectBuffer,
    field: FieldDescriptor,
    alphabet: Alphabet,
    pattern: Pattern,
    hasher: Hasher,
}

impl SearchWorker {
    /// `buffer` must already contain the field described by `field`.
    pub fn new(
        id: usize,
        buffer: ObjectBuffer,
        field: FieldDescriptor,
        alphabet: Alphabet,
        pattern: Pattern,
        algo: HashAlgorithm,
    ) -> Self {
        Self {
            id,
            buffer,
            field,
            alphabet,
            pattern,
            hasher: Hasher::new(algo),
        }
    }

    pub fn buffer(&self) -> &ObjectBuffer {
        &self.buffer
    }

    pub fn field(&self) -> FieldDescriptor {
        self.field
    }

    /// Write `candidate` into the field, widening it if needed.
    pub fn render(&mut self, candidate: u64) {
        let width = self.field.width();
        self.field = field::render(&mut self.buffer, self.field, &self.alphabet, candidate);
        if self.field.width() != width {
            tracing::debug!(worker = self.id, width = self.field.width(), "widened nonce field");
        }
    }

    /// Id of the buffer as it currently stands.
    pub fn digest(&mut self) -> ObjectId {
        self.hasher.update(self.buffer.as_bytes());
        self.hasher.finalize_reset()
    }

    /// Render and hash `candidate`; the id is returned only if it matches.
    pub fn try_candidate(&mut self, candidate: u64) -> Option<ObjectId> {
        self.render(candidate);
        let oid = self.digest();
        self.pattern.matches(&oid).then_some(oid)
    }

    /// Pull candidates until one matches, the gate closes, or the queue ends.
    ///
    /// A match is published on `winners` only if this worker wins the
    /// gate's claim; the gate is closed either way.
    pub fn run(mut self, candidates: Receiver<u64>, gate: CancellationGate, winners: Sender<Winner>) {
        for candidate in candidates.iter() {
            if gate.is_closed() {
                return;
            }
            let Some(oid) = self.try_candidate(candidate) else {
                continue;
            };
            if gate.claim() {
                let winner = Winner {
                    buffer: self.buffer,
                    oid,
                    candidate,
                    worker: self.id,
                };
                // A dropped receiver means the caller stopped waiting.
                let _ = winners.send(winner);
            }
            gate.close();
            return;
        }
    }
}
