use git_object::ObjectError;

/// Errors produced by the nonce search.
#[derive(Debug, thiserror::Error)]
pub enum BruteError {
    #[error("pattern {pattern:?} is not a valid regexp: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("invalid nonce alphabet {alphabet:?}: {reason}")]
    InvalidAlphabet {
        alphabet: String,
        reason: &'static str,
    },

    #[error("invalid nonce field name {name:?}: {reason}")]
    InvalidFieldName { name: String, reason: &'static str },

    #[error("search needs at least one worker")]
    NoWorkers,

    #[error("malformed template: {0}")]
    MalformedTemplate(&'static str),

    #[error("candidate space exhausted without a match")]
    Exhausted,

    #[error("failed to spawn search thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error(transparent)]
    Object(#[from] ObjectError),
}
