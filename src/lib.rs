//! # symbios-tree
//!
//! Procedural trees from L-System grammars, as engine-agnostic geometry.
//!
//! A [`Preset`] (or any [`Grammar`]) is rewritten by [`expand`], then walked by
//! a [`TreeInterpreter`] that emits a [`TreeModel`]: branch segments, leaf
//! placements and fruit placements. Turning those records into meshes,
//! materials and scene groups is left to the host.
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use symbios_tree::{GenerationParams, Preset, RngSource, generate};
//!
//! let params = GenerationParams { iterations: 2, ..Default::default() };
//! let tree = generate(Preset::Standard, &params, RngSource::new(StdRng::seed_from_u64(1))).unwrap();
//! assert!(!tree.branches.is_empty());
//! ```

pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod model;
pub mod params;
pub mod preset;
pub mod random;
pub mod turtle;

pub use error::*;
pub use grammar::*;
pub use interpreter::*;
pub use model::*;
pub use params::*;
pub use preset::*;
pub use random::*;
pub use turtle::*;

/// Generates a tree from a built-in preset with the default [`TreeConfig`].
pub fn generate<R: RandomSource>(
    preset: Preset,
    params: &GenerationParams,
    rng: R,
) -> Result<TreeModel, TreeError> {
    generate_with(&preset.grammar(), params, &TreeInterpreter::default(), rng)
}

/// Validates `params`, expands `grammar` and interprets the result.
///
/// With `leaf_thickened` set, `l -> ll` is added to the grammar's rules for
/// this request only.
pub fn generate_with<R: RandomSource>(
    grammar: &Grammar,
    params: &GenerationParams,
    interpreter: &TreeInterpreter,
    rng: R,
) -> Result<TreeModel, TreeError> {
    params.validate()?;

    let symbols = if params.leaf_thickened {
        let rules = grammar.rules.clone().with_rule('l', "ll");
        expand(&grammar.axiom, params.iterations as usize, &rules)
    } else {
        grammar.expand(params.iterations as usize)
    };

    interpreter.interpret(&symbols, params, rng)
}
