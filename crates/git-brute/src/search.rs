//! The worker pool.

use std::num::NonZeroUsize;
use std::thread;
use std::time::Instant;

use crossbeam::channel::bounded;
use git_hash::{HashAlgorithm, ObjectId};
use git_object::ObjectBuffer;

use crate::field::{self, FieldDescriptor};
use crate::worker::SearchWorker;
use crate::{
    explore, Alphabet, BruteError, CancellationGate, Pattern, Result, DEFAULT_ALPHABET,
    DEFAULT_PATTERN,
};

/// Candidate queue depth unless configured otherwise.
pub const DEFAULT_QUEUE_CAPACITY: usize = 512;

/// Search settings as supplied by the caller.
///
/// Validated once by [`Search::new`]; workers only ever see the compiled
/// result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Regex over the lowercase hex object id.
    pub pattern: String,
    /// Number of workers.
    pub parallelism: usize,
    /// Header field that carries the nonce.
    pub field_name: String,
    /// Symbols used to render nonce values.
    pub alphabet: String,
    /// Hash the object is identified by.
    pub algorithm: HashAlgorithm,
    /// Depth of the candidate queue.
    pub queue_capacity: usize,
    /// Last candidate to try. `None` runs until the counter wraps.
    pub ceiling: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_owned(),
            parallelism: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            field_name: "nonce".to_owned(),
            alphabet: DEFAULT_ALPHABET.to_owned(),
            algorithm: HashAlgorithm::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            ceiling: None,
        }
    }
}

/// The object whose id matched.
#[derive(Debug, Clone)]
pub struct Winner {
    /// The full framed object.
    pub buffer: ObjectBuffer,
    pub oid: ObjectId,
    /// Candidate value rendered into the nonce field.
    pub candidate: u64,
    /// Index of the worker that found it.
    pub worker: usize,
}

impl Winner {
    /// The content to hand to `git hash-object`, header stripped.
    pub fn into_content(self) -> Vec<u8> {
        self.buffer.into_content()
    }
}

/// A validated search, ready to run against any number of templates.
#[derive(Debug, Clone)]
pub struct Search {
    pattern: Pattern,
    alphabet: Alphabet,
    field_name: String,
    parallelism: usize,
    algorithm: HashAlgorithm,
    queue_capacity: usize,
    ceiling: Option<u64>,
}

impl Search {
    pub fn new(config: SearchConfig) -> Result<Self> {
        if config.parallelism == 0 {
            return Err(BruteError::NoWorkers);
        }
        field::validate_name(&config.field_name)?;
        Ok(Self {
            pattern: Pattern::new(&config.pattern)?,
            alphabet: Alphabet::new(&config.alphabet)?,
            field_name: config.field_name,
            parallelism: config.parallelism,
            algorithm: config.algorithm,
            queue_capacity: config.queue_capacity,
            ceiling: config.ceiling,
        })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Copy `template` and make sure it carries the nonce field.
    ///
    /// Fails on a template without a blank line after its headers; this is
    /// the only way a search can fail before any worker starts.
    pub fn prepare(&self, template: &ObjectBuffer) -> Result<(ObjectBuffer, FieldDescriptor)> {
        let mut buffer = template.clone();
        let field = field::locate_or_create(&mut buffer, &self.field_name, &self.alphabet)?;
        Ok((buffer, field))
    }

    /// Search until some worker finds an object whose id matches.
    ///
    /// Returns as soon as the winner is published; the remaining workers
    /// notice the closed gate on their next candidate and exit on their own.
    /// Fails with [`BruteError::Exhausted`] if the candidates run out first.
    pub fn run(&self, template: &ObjectBuffer) -> Result<Winner> {
        let (buffer, field) = self.prepare(template)?;

        tracing::info!(
            workers = self.parallelism,
            pattern = self.pattern.as_str(),
            field = %self.field_name,
            alphabet = %self.alphabet,
            algorithm = %self.algorithm,
            "starting search"
        );
        let started = Instant::now();

        let gate = CancellationGate::new();
        let candidates =
            explore::spawn(self.queue_capacity, self.ceiling, gate.clone()).map_err(BruteError::Spawn)?;
        let (winner_tx, winner_rx) = bounded(1);

        for id in 0..self.parallelism {
            let worker = SearchWorker::new(
                id,
                buffer.clone(),
                field,
                self.alphabet.clone(),
                self.pattern.clone(),
                self.algorithm,
            );
            let candidates = candidates.clone();
            let gate_handle = gate.clone();
            let winner_tx = winner_tx.clone();
            let spawned = thread::Builder::new()
                .name(format!("gitbrute-worker-{id}"))
                .spawn(move || worker.run(candidates, gate_handle, winner_tx));
            if let Err(e) = spawned {
                gate.close();
                return Err(BruteError::Spawn(e));
            }
        }
        // Only workers may keep the channels open, so running out of
        // candidates disconnects the winner channel.
        drop(candidates);
        drop(winner_tx);

        let Ok(winner) = winner_rx.recv() else {
            tracing::info!(elapsed = ?started.elapsed(), "search exhausted");
            return Err(BruteError::Exhausted);
        };
        gate.close();

        let elapsed = started.elapsed();
        tracing::info!(
            oid = %winner.oid,
            candidate = winner.candidate,
            worker = winner.worker,
            ?elapsed,
            rate = (winner.candidate as f64 / elapsed.as_secs_f64().max(1e-9)) as u64,
            "found matching object"
        );
        Ok(winner)
    }
}
