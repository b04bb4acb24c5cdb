//! Error type shared by every stage of tree generation.

use thiserror::Error;

/// Everything that can abort a generation request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    /// A `]` was reached while the state stack was empty.
    ///
    /// The symbol sequence has unbalanced brackets, which means the preset or
    /// rule set that produced it is broken.
    #[error("malformed grammar output: unmatched ']' at symbol {index}")]
    MalformedGrammarOutput { index: usize },

    /// A `[` would push the state stack past [`TreeConfig::max_stack_depth`](crate::TreeConfig).
    #[error("branch nesting too deep at symbol {index} (limit {limit})")]
    NestingTooDeep { index: usize, limit: usize },

    /// A [`GenerationParams`](crate::GenerationParams) field is out of range.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParams {
        field: &'static str,
        reason: &'static str,
    },

    /// A textual production could not be parsed.
    #[error("invalid rule on line {line}: {reason}")]
    InvalidRule { line: usize, reason: &'static str },

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
}
