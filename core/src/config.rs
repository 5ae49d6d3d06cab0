//! Tuning surface for every stage of the generation pipeline.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Aggregated tuning knobs controlling every adjustable aspect of the generator.
///
/// Every section implements [`Default`] with the values the game ships with,
/// and deserialisation fills missing keys from those defaults so partial
/// configuration files are accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Controls how many extra connectors are opened after the perfect carve.
    pub loops: LoopTuning,
    /// Controls the winding dead-end branches carved off existing corridors.
    pub branches: BranchTuning,
    /// Controls the dead-end cleanup pass.
    pub pruning: PruningTuning,
    /// Controls how the goal cell is chosen.
    pub goal: GoalTuning,
    /// Number of full pipeline attempts before generation gives up.
    pub max_attempts: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            loops: LoopTuning::default(),
            branches: BranchTuning::default(),
            pruning: PruningTuning::default(),
            goal: GoalTuning::default(),
            max_attempts: 64,
        }
    }
}

impl GeneratorConfig {
    /// Checks every knob, returning the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.loops.validate()?;
        self.branches.validate()?;
        self.pruning.validate()?;
        self.goal.validate()?;
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }
}

/// Loop injection parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoopTuning {
    /// Fraction of the perfect-maze path cells used as the loop attempt budget.
    pub density: f64,
}

impl Default for LoopTuning {
    fn default() -> Self {
        Self { density: 0.025 }
    }
}

impl LoopTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        probability("loops.density", self.density)
    }
}

/// Branch injection parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BranchTuning {
    /// Branch attempts per grid cell; the budget scales with `rows * columns`.
    pub density: f64,
    /// Shortest branch carved, also the length of the straight wall lookahead.
    pub min_length: usize,
    /// Exclusive upper bound on the branch length.
    pub max_length: usize,
    /// Probability of keeping the current heading when it is admissible.
    pub straight_bias: f64,
    /// Per-step probability of sprouting a side branch.
    pub side_branch_chance: f64,
    /// Number of branch steps that must be carved before side branches may sprout.
    pub side_branch_delay: usize,
    /// Maximum number of cells a side branch grows past its first cell.
    pub side_branch_max_extension: usize,
    /// Probability of joining a finished branch tip to a nearby path.
    pub reconnect_chance: f64,
}

impl Default for BranchTuning {
    fn default() -> Self {
        Self {
            density: 0.4 / 15.0,
            min_length: 4,
            max_length: 10,
            straight_bias: 0.7,
            side_branch_chance: 0.2,
            side_branch_delay: 3,
            side_branch_max_extension: 2,
            reconnect_chance: 0.3,
        }
    }
}

impl BranchTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        probability("branches.density", self.density)?;
        probability("branches.straight_bias", self.straight_bias)?;
        probability("branches.side_branch_chance", self.side_branch_chance)?;
        probability("branches.reconnect_chance", self.reconnect_chance)?;
        if self.min_length == 0 || self.min_length >= self.max_length {
            return Err(ConfigError::InvalidBranchLengths {
                min: self.min_length,
                max: self.max_length,
            });
        }
        Ok(())
    }
}

/// Dead-end pruning parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PruningTuning {
    /// Probability of lengthening a degenerate dead end instead of removing it.
    pub extension_chance: f64,
    /// Probability of growing an extension by one more cell, rolled per cell.
    pub continue_chance: f64,
}

impl Default for PruningTuning {
    fn default() -> Self {
        Self {
            extension_chance: 0.2,
            continue_chance: 0.5,
        }
    }
}

impl PruningTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        probability("pruning.extension_chance", self.extension_chance)?;
        probability("pruning.continue_chance", self.continue_chance)
    }
}

/// Strategy used to choose the goal cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStrategy {
    /// Best Manhattan distance among a fixed number of random samples.
    #[default]
    Sampled,
    /// Exact farthest open cell by walking distance from the start.
    Farthest,
}

/// Goal placement parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GoalTuning {
    /// Placement strategy.
    pub strategy: GoalStrategy,
    /// Number of random cells drawn by [`GoalStrategy::Sampled`].
    pub samples: u32,
}

impl Default for GoalTuning {
    fn default() -> Self {
        Self {
            strategy: GoalStrategy::Sampled,
            samples: 50,
        }
    }
}

impl GoalTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.strategy == GoalStrategy::Sampled && self.samples == 0 {
            return Err(ConfigError::ZeroGoalSamples);
        }
        Ok(())
    }
}

fn probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}
