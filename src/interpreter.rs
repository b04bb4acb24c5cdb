//! Interpreter that converts an L-System symbol sequence into a [`TreeModel`].
//!
//! The entry point is [`TreeInterpreter`]. Configure it with a [`TreeConfig`],
//! then call [`TreeInterpreter::interpret`] with an expanded string, or
//! register symbol IDs via [`TreeInterpreter::populate_standard_symbols`] and
//! call [`TreeInterpreter::interpret_state`] with a [`symbios::SymbiosState`].
//!
//! Both paths drive the same [`TurtleMachine`].

use crate::error::TreeError;
use crate::model::{Branch, Fruit, Leaf, LeafRotation, TreeModel};
use crate::params::GenerationParams;
use crate::random::RandomSource;
use crate::turtle::{SavedState, TreeOp, TreeTurtleState};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use symbios::{SymbiosState, SymbolTable};
use tracing::{debug, trace, warn};

/// Placement constants for tree interpretation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// How far below the turtle a fruit hangs.
    pub fruit_drop: f32,
    /// Fixed fruit scale.
    pub fruit_scale: f32,
    /// Range of the per-run leaf size factor.
    pub leaf_factor_range: (f32, f32),
    /// Range of leaf rotation about X, in degrees.
    pub leaf_roll_range: (f32, f32),
    /// Range of leaf rotation about Y, in degrees.
    pub leaf_yaw_range: (f32, f32),
    /// Range of the per-branch length jitter.
    pub branch_jitter_range: (f32, f32),
    /// Maximum stack depth for push/pop operations.
    pub max_stack_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            fruit_drop: 0.8,
            fruit_scale: 0.1,
            leaf_factor_range: (1.0, 1.3),
            leaf_roll_range: (-60.0, 60.0),
            leaf_yaw_range: (0.0, 360.0),
            branch_jitter_range: (0.7, 1.2),
            max_stack_depth: 1024,
        }
    }
}

impl TreeConfig {
    /// Rejects non-finite constants and empty or inverted ranges.
    pub fn validate(&self) -> Result<(), TreeError> {
        finite("fruit_drop", self.fruit_drop)?;
        finite("fruit_scale", self.fruit_scale)?;
        range("leaf_factor_range", self.leaf_factor_range)?;
        range("leaf_roll_range", self.leaf_roll_range)?;
        range("leaf_yaw_range", self.leaf_yaw_range)?;
        range("branch_jitter_range", self.branch_jitter_range)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), TreeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TreeError::InvalidParams {
            field,
            reason: "must be finite",
        })
    }
}

fn range(field: &'static str, (lo, hi): (f32, f32)) -> Result<(), TreeError> {
    finite(field, lo)?;
    finite(field, hi)?;
    if lo > hi {
        return Err(TreeError::InvalidParams {
            field,
            reason: "lower bound exceeds upper bound",
        });
    }
    Ok(())
}

/// A single interpretation run.
///
/// Owns the turtle, the branch stack and the output accumulators; nothing is
/// shared with other runs. Feed it operations with [`step`](Self::step) and
/// collect the result with [`finish`](Self::finish).
pub struct TurtleMachine<'a, R: RandomSource> {
    params: &'a GenerationParams,
    config: &'a TreeConfig,
    rng: R,
    turtle: TreeTurtleState,
    stack: Vec<SavedState>,
    model: TreeModel,
    leaf_factor: f32,
    index: usize,
}

impl<'a, R: RandomSource> TurtleMachine<'a, R> {
    /// Starts a run at the origin, heading `+Y`, at level 1.
    ///
    /// When leaves are enabled the run's leaf size factor is drawn here, before
    /// any symbol is processed.
    pub fn new(params: &'a GenerationParams, config: &'a TreeConfig, mut rng: R) -> Self {
        let leaf_factor = if params.leaves_enabled {
            let (lo, hi) = config.leaf_factor_range;
            rng.uniform(lo, hi)
        } else {
            1.0
        };
        Self {
            params,
            config,
            rng,
            turtle: TreeTurtleState::default(),
            stack: Vec::new(),
            model: TreeModel::default(),
            leaf_factor,
            index: 0,
        }
    }

    pub fn state(&self) -> &TreeTurtleState {
        &self.turtle
    }

    /// Number of saved states, i.e. currently open brackets.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Records emitted so far.
    pub fn model(&self) -> &TreeModel {
        &self.model
    }

    /// Applies one operation and advances the cursor.
    pub fn step(&mut self, op: TreeOp) -> Result<(), TreeError> {
        let index = self.index;
        self.index += 1;
        let turn = self.params.turn_angle_degrees;

        match op {
            TreeOp::Branch => self.draw_branch(),
            TreeOp::Leaf => {
                if self.params.leaves_enabled {
                    self.maybe_leaf();
                }
            }
            TreeOp::Fruit => {
                if self.params.apples_enabled {
                    self.maybe_fruit();
                }
            }
            TreeOp::Yaw(s) => self.turtle.angle_z += turn * f32::from(s),
            TreeOp::Pitch(s) => self.turtle.angle_x += turn * f32::from(s),
            TreeOp::Push => {
                if self.stack.len() >= self.config.max_stack_depth {
                    return Err(TreeError::NestingTooDeep {
                        index,
                        limit: self.config.max_stack_depth,
                    });
                }
                self.stack.push(self.turtle.save());
                self.turtle.level += 1;
            }
            TreeOp::Pop => {
                let saved = self
                    .stack
                    .pop()
                    .ok_or(TreeError::MalformedGrammarOutput { index })?;
                self.turtle.restore(saved);
                self.turtle.level -= 1;
            }
            TreeOp::Ignore => {}
        }
        Ok(())
    }

    /// Ends the run and hands over the accumulated geometry.
    ///
    /// Brackets still open at the end are tolerated.
    pub fn finish(self) -> TreeModel {
        if !self.stack.is_empty() {
            warn!(
                open = self.stack.len(),
                "symbol sequence ended with unclosed branches"
            );
        }
        let stats = self.model.stats();
        debug!(
            symbols = self.index,
            branches = stats.branches,
            leaves = stats.leaves,
            fruits = stats.fruits,
            "interpreted tree"
        );
        self.model
    }

    fn draw_branch(&mut self) {
        let (lo, hi) = self.config.branch_jitter_range;
        let jitter = self.rng.uniform(lo, hi);

        let length = self.params.step_length;
        let direction = self.turtle.heading();
        self.model.branches.push(Branch {
            start: self.turtle.position,
            direction,
            length,
            radius: length / self.turtle.level as f32,
            level: self.turtle.level,
            jitter,
        });
        self.turtle.position += direction * length;
    }

    /// Emits with probability `(level - 1) / level`: never on the trunk, more
    /// often the deeper the branch.
    fn maybe_leaf(&mut self) {
        let level = self.turtle.level;
        let draw = self.rng.below(level);
        trace!(level, draw, "leaf gate");
        if draw == 0 {
            return;
        }
        let (roll_lo, roll_hi) = self.config.leaf_roll_range;
        let (yaw_lo, yaw_hi) = self.config.leaf_yaw_range;
        let roll = self.rng.uniform(roll_lo, roll_hi);
        let yaw = self.rng.uniform(yaw_lo, yaw_hi);
        self.model.leaves.push(Leaf {
            position: self.turtle.position,
            scale: self.params.leaf_scale * self.leaf_factor,
            rotation: LeafRotation { roll, yaw },
        });
    }

    /// Emits with probability `1 / level`: always on the trunk, rarer deeper in.
    fn maybe_fruit(&mut self) {
        let level = self.turtle.level;
        let draw = self.rng.below(level);
        trace!(level, draw, "fruit gate");
        if draw != 0 {
            return;
        }
        self.model.fruits.push(Fruit {
            position: self.turtle.position - Vec3::Y * self.config.fruit_drop,
            scale: self.config.fruit_scale,
        });
    }
}

/// Interprets L-System output to build a [`TreeModel`].
#[derive(Clone, Debug, Default)]
pub struct TreeInterpreter {
    op_map: Vec<TreeOp>,
    config: TreeConfig,
}

impl TreeInterpreter {
    /// Creates a new interpreter with the given configuration and an empty
    /// symbol-ID map.
    ///
    /// The ID map only matters for [`interpret_state`](Self::interpret_state);
    /// [`interpret`](Self::interpret) decodes characters directly.
    pub fn new(config: TreeConfig) -> Self {
        Self {
            op_map: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Replaces the entire symbol-ID-to-operation map in one step (builder pattern).
    ///
    /// Any ID that falls outside the slice is treated as [`TreeOp::Ignore`].
    pub fn with_map(mut self, map: Vec<TreeOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns a single [`TreeOp`] to a symbol ID.
    ///
    /// The map is grown automatically; gaps are filled with [`TreeOp::Ignore`].
    pub fn set_op(&mut self, sym_id: u16, op: TreeOp) {
        let idx = sym_id as usize;
        if idx >= self.op_map.len() {
            self.op_map.resize(idx + 1, TreeOp::Ignore);
        }
        self.op_map[idx] = op;
    }

    /// Registers [`TreeOp::STANDARD_SYMBOLS`] for every symbol `interner` knows.
    ///
    /// Symbols that are not present in the interner are silently skipped.
    pub fn populate_standard_symbols(&mut self, interner: &SymbolTable) {
        for (sym, op) in TreeOp::STANDARD_SYMBOLS {
            if let Some(id) = interner.resolve_id(sym) {
                self.set_op(id, op);
            }
        }
    }

    /// Walks `symbols` left to right and returns the emitted geometry.
    ///
    /// Fails on invalid `params` or config, on a `]` with nothing to restore, or when
    /// nesting exceeds [`TreeConfig::max_stack_depth`].
    pub fn interpret<R: RandomSource>(
        &self,
        symbols: &str,
        params: &GenerationParams,
        rng: R,
    ) -> Result<TreeModel, TreeError> {
        params.validate()?;
        self.config.validate()?;
        let mut machine = TurtleMachine::new(params, &self.config, rng);
        for symbol in symbols.chars() {
            machine.step(TreeOp::from_symbol(symbol))?;
        }
        Ok(machine.finish())
    }

    /// Same as [`interpret`](Self::interpret), over a Symbios derivation.
    ///
    /// Module parameters are ignored; only symbol IDs are mapped.
    pub fn interpret_state<R: RandomSource>(
        &self,
        state: &SymbiosState,
        params: &GenerationParams,
        rng: R,
    ) -> Result<TreeModel, TreeError> {
        params.validate()?;
        self.config.validate()?;
        let mut machine = TurtleMachine::new(params, &self.config, rng);
        for i in 0..state.len() {
            let view = match state.get_view(i) {
                Some(v) => v,
                None => break,
            };
            let op = self
                .op_map
                .get(view.sym as usize)
                .copied()
                .unwrap_or(TreeOp::Ignore);
            machine.step(op)?;
        }
        Ok(machine.finish())
    }
}
