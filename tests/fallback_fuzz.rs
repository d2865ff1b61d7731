//! Randomized stress tests for fallback resolution.
//!
//! The harness generates random dimension configurations with seeded
//! randomness: one to three axes, each a random specialization tree,
//! optionally sprinkled with combination constraints that punch holes
//! into the subspace. For every allowed point it then walks the
//! primary generalization chain and checks the structural invariants
//! the resolver relies on:
//!
//! - the chain terminates within subspace-size steps
//! - every step stays inside the allowed subspace
//! - the normalized weight strictly decreases per step
//! - the terminal point is a root of the variation graph
//! - the origin classifies as a specialization of the terminal
//!
//! Two modes:
//! - `fallback_fuzz_deterministic_seeds`: fixed seeds, runs in CI
//! - `fallback_fuzz_thorough`: 200 seeds, run with `--ignored`

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use manifold::dimension::{
    ContentDimensionSource, DimensionConfiguration, DimensionsConfiguration, ValueConfiguration,
};
use manifold::dimensionspace::{InterDimensionalVariationGraph, VariantType};

// =============================================================================
// Harness
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct FuzzConfig {
    seed: u64,
    maximum_axes: usize,
    include_constraints: bool,
}

/// An invariant the generated graph failed to uphold.
#[derive(Debug)]
#[allow(dead_code)]
enum InvariantViolation {
    ChainDidNotTerminate { origin: String },
    LeftTheSubspace { origin: String, step: String },
    WeightDidNotDecrease { origin: String, step: String },
    TerminalIsNotARoot { origin: String, terminal: String },
    WrongVariantType { origin: String, terminal: String },
}

#[derive(Debug)]
#[allow(dead_code)]
struct FuzzFailure {
    violation: InvariantViolation,
    seed: u64,
}

/// Summary of a clean run.
#[derive(Debug)]
#[allow(dead_code)]
struct FuzzReport {
    points_checked: usize,
    chain_steps_walked: usize,
    seed: u64,
}

struct FallbackFuzzHarness {
    rng: StdRng,
    config: FuzzConfig,
}

impl FallbackFuzzHarness {
    fn new(config: FuzzConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
        }
    }

    fn run(&mut self) -> Result<FuzzReport, FuzzFailure> {
        let configuration = self.random_configuration();
        let source = ContentDimensionSource::from_configuration(&configuration)
            .expect("generated configurations are structurally valid");
        let graph = InterDimensionalVariationGraph::new(source);

        let base = graph.weight_normalization_base();
        let subspace_size = graph.dimension_space_points().len();
        let mut points_checked = 0;
        let mut chain_steps_walked = 0;

        for weighted in graph.weighted_dimension_space_points() {
            let origin = weighted.dimension_space_point();
            let mut current = origin;
            let mut previous_weight = weighted.weight().normalize(base);
            let mut steps = 0usize;

            while let Some(next) = graph.primary_generalization(current) {
                steps += 1;
                if steps > subspace_size {
                    return Err(self.failure(InvariantViolation::ChainDidNotTerminate {
                        origin: origin.to_json(),
                    }));
                }
                if !graph.dimension_space_points().contains(next) {
                    return Err(self.failure(InvariantViolation::LeftTheSubspace {
                        origin: origin.to_json(),
                        step: next.to_json(),
                    }));
                }
                let next_weight = graph
                    .weighted_dimension_space_point(next)
                    .map(|weighted| weighted.weight().normalize(base));
                match next_weight {
                    Some(weight) if weight < previous_weight => previous_weight = weight,
                    _ => {
                        return Err(self.failure(InvariantViolation::WeightDidNotDecrease {
                            origin: origin.to_json(),
                            step: next.to_json(),
                        }))
                    }
                }
                current = next;
            }

            if !graph.root_generalizations().contains(&current) {
                return Err(self.failure(InvariantViolation::TerminalIsNotARoot {
                    origin: origin.to_json(),
                    terminal: current.to_json(),
                }));
            }
            let expected = if steps == 0 {
                VariantType::Same
            } else {
                VariantType::Specialization
            };
            if graph.variant_type(origin, current) != expected {
                return Err(self.failure(InvariantViolation::WrongVariantType {
                    origin: origin.to_json(),
                    terminal: current.to_json(),
                }));
            }

            points_checked += 1;
            chain_steps_walked += steps;
        }

        Ok(FuzzReport {
            points_checked,
            chain_steps_walked,
            seed: self.config.seed,
        })
    }

    fn failure(&self, violation: InvariantViolation) -> FuzzFailure {
        FuzzFailure {
            violation,
            seed: self.config.seed,
        }
    }

    fn random_configuration(&mut self) -> DimensionsConfiguration {
        let axis_count = self.rng.random_range(1..=self.config.maximum_axes);
        let axis_ids: Vec<String> = (0..axis_count).map(|axis| format!("d{axis}")).collect();
        let dimensions = (0..axis_count)
            .map(|axis| self.random_axis(axis, &axis_ids))
            .collect();
        DimensionsConfiguration { dimensions }
    }

    /// A random specialization tree over `v0..v{n-1}`: every value
    /// after the first attaches below an earlier one, so the result is
    /// a tree rooted at `v0`.
    fn random_axis(&mut self, axis_index: usize, axis_ids: &[String]) -> DimensionConfiguration {
        let value_count = self.rng.random_range(2..=6);
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); value_count];
        for value in 1..value_count {
            let parent = self.rng.random_range(0..value);
            children[parent].push(value);
        }

        let own_id = axis_ids[axis_index].clone();
        let other_axes: Vec<String> = axis_ids
            .iter()
            .filter(|id| **id != own_id)
            .cloned()
            .collect();
        DimensionConfiguration {
            id: own_id,
            default: "v0".to_string(),
            values: vec![self.build_value(0, &children, &other_axes)],
        }
    }

    fn build_value(
        &mut self,
        index: usize,
        children: &[Vec<usize>],
        other_axes: &[String],
    ) -> ValueConfiguration {
        let mut value = ValueConfiguration::leaf(format!("v{index}"));
        if self.config.include_constraints && !other_axes.is_empty() && self.rng.random_bool(0.2) {
            let target = other_axes[self.rng.random_range(0..other_axes.len())].clone();
            let banned = format!("v{}", self.rng.random_range(0..3));
            value
                .constraints
                .insert(target, BTreeMap::from([(banned, false)]));
        }
        value.specializations = children[index]
            .iter()
            .map(|child| self.build_value(*child, children, other_axes))
            .collect();
        value
    }
}

// =============================================================================
// Tests
// =============================================================================

/// Quick mode: fixed seeds covering trees with and without constraint
/// holes.
#[test]
fn fallback_fuzz_deterministic_seeds() {
    let seeds = [42, 12345, 98765, 11111, 55555];

    for seed in seeds {
        let mut harness = FallbackFuzzHarness::new(FuzzConfig {
            seed,
            maximum_axes: 3,
            include_constraints: true,
        });
        harness.run().unwrap_or_else(|failure| {
            panic!(
                "seed {} violated a fallback invariant: {:?}",
                seed, failure.violation
            );
        });
    }
}

/// Unconstrained trees always produce a single all-roots point every
/// chain ends on.
#[test]
fn fallback_fuzz_unconstrained_reaches_the_double_root() {
    for seed in [7, 1999, 424242] {
        let mut harness = FallbackFuzzHarness::new(FuzzConfig {
            seed,
            maximum_axes: 2,
            include_constraints: false,
        });
        let report = harness.run().unwrap_or_else(|failure| {
            panic!(
                "seed {} violated a fallback invariant: {:?}",
                seed, failure.violation
            );
        });
        assert!(report.points_checked > 0);
    }
}

/// Thorough mode for local runs: `cargo test -- --ignored`.
#[test]
#[ignore]
fn fallback_fuzz_thorough() {
    for seed in 0..200 {
        let mut harness = FallbackFuzzHarness::new(FuzzConfig {
            seed,
            maximum_axes: 3,
            include_constraints: true,
        });
        harness.run().unwrap_or_else(|failure| {
            panic!(
                "seed {} violated a fallback invariant: {:?}",
                seed, failure.violation
            );
        });
    }
}
