use super::generator::{self, GrowthPolicy};
use super::hall_of_fame::{EliteProgram, HallOfFame};
use super::individual::Individual;
use super::operators;
use super::primitive_set::PrimitiveSet;
use super::program::ProgramTree;
use super::progress::ProgressCallback;
use crate::config::evolution::EvolutionConfig;
use crate::config::traits::ConfigSection;
use crate::engines::evaluation::FitnessOracle;
use crate::error::Result;
use crate::types::Fitness;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::Arc;

/// Drives the generational loop: evaluate, archive, select, vary, replace.
///
/// The loop itself is sequential; the evaluate phase fans out over rayon
/// since every evaluation only touches the read-only oracle. All randomness
/// flows through one seeded `StdRng` confined to the engine thread, so a
/// fixed seed replays a run exactly.
pub struct EvolutionEngine<O: FitnessOracle> {
    config: EvolutionConfig,
    primitives: Arc<PrimitiveSet>,
    oracle: O,
    hall_of_fame: HallOfFame,
    rng: StdRng,
}

impl<O: FitnessOracle> EvolutionEngine<O> {
    /// Fails fast with a configuration error before any generation runs.
    pub fn new(config: EvolutionConfig, primitives: Arc<PrimitiveSet>, oracle: O) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let hall_of_fame = HallOfFame::new(config.hall_of_fame_size);

        Ok(Self {
            config,
            primitives,
            oracle,
            hall_of_fame,
            rng,
        })
    }

    /// Run the configured number of generations and return the archive
    /// contents, best first.
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<Vec<EliteProgram>> {
        let mut population = self.initialize_population()?;

        for generation in 0..self.config.num_generations {
            callback.on_generation_start(generation);

            self.evaluate_population(&mut population)?;

            for individual in &population {
                self.hall_of_fame.try_add(individual)?;
            }

            let scores: Vec<f64> = population
                .iter()
                .filter_map(|ind| ind.fitness.as_ref().map(Fitness::score))
                .collect();
            let best = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            callback.on_generation_complete(generation, best, mean, self.hall_of_fame.len());

            if generation + 1 == self.config.num_generations {
                break;
            }

            population = self.vary_population(&population)?;
        }

        Ok(self.hall_of_fame.get_all().to_vec())
    }

    fn initialize_population(&mut self) -> Result<Vec<Individual>> {
        let set = Arc::clone(&self.primitives);
        let policy = self.config.init_policy;
        let min_depth = self.config.tree_min_depth;
        let max_depth = self.config.tree_max_depth;

        (0..self.config.population_size)
            .map(|_| {
                generator::generate(&set, policy, min_depth, max_depth, &mut self.rng)
                    .map(Individual::new)
            })
            .collect()
    }

    /// Score every individual whose fitness is unset. Unchanged carryovers
    /// keep their previous fitness and are skipped. Evaluations run in
    /// parallel and are written back by index, so scheduling order cannot
    /// change the outcome.
    fn evaluate_population(&self, population: &mut [Individual]) -> Result<()> {
        let fresh = population
            .par_iter()
            .enumerate()
            .filter(|(_, individual)| individual.fitness.is_none())
            .map(|(index, individual)| {
                self.oracle
                    .evaluate(&individual.program)
                    .map(|fitness| (index, fitness))
            })
            .collect::<Result<Vec<_>>>()?;

        for (index, fitness) in fresh {
            population[index].fitness = Some(fitness);
        }
        Ok(())
    }

    fn vary_population(&mut self, population: &[Individual]) -> Result<Vec<Individual>> {
        let set = Arc::clone(&self.primitives);
        let config = self.config.clone();
        let mut next = Vec::with_capacity(config.population_size);

        while next.len() < config.population_size {
            let parent_a =
                operators::tournament_selection(population, config.tournament_size, &mut self.rng)?
                    .clone();
            let parent_b =
                operators::tournament_selection(population, config.tournament_size, &mut self.rng)?
                    .clone();

            let (mut child_a, mut child_b) = if self.rng.gen::<f64>() < config.crossover_rate {
                let (program_a, program_b) =
                    operators::crossover(&parent_a.program, &parent_b.program, &mut self.rng)?;
                (
                    self.cap_offspring(program_a, &parent_a),
                    self.cap_offspring(program_b, &parent_b),
                )
            } else {
                (parent_a, parent_b)
            };

            for child in [&mut child_a, &mut child_b] {
                if self.rng.gen::<f64>() < config.mutation_rate {
                    let mutated = operators::subtree_mutation(
                        &child.program,
                        &set,
                        GrowthPolicy::Full,
                        config.mutation_min_depth,
                        config.mutation_max_depth,
                        &mut self.rng,
                    )?;
                    let capped = self.cap_offspring(mutated, child);
                    *child = capped;
                }
            }

            next.push(child_a);
            if next.len() < config.population_size {
                next.push(child_b);
            }
        }

        Ok(next)
    }

    /// Koza-style static limit: an offspring deeper than the configured cap
    /// is dropped in favor of the parent it came from.
    fn cap_offspring(&self, program: ProgramTree, parent: &Individual) -> Individual {
        match self.config.max_program_depth {
            Some(cap) if program.depth() > cap => parent.clone(),
            _ => Individual::new(program),
        }
    }

    pub fn hall_of_fame(&self) -> &HallOfFame {
        &self.hall_of_fame
    }
}
