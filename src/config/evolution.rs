use super::traits::ConfigSection;
use crate::engines::generation::generator::GrowthPolicy;
use crate::error::EvotrailError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub tournament_size: usize,
    /// Policy used to build the initial population.
    pub init_policy: GrowthPolicy,
    pub tree_min_depth: usize,
    pub tree_max_depth: usize,
    /// Depth bounds for subtrees grafted in by mutation.
    pub mutation_min_depth: usize,
    pub mutation_max_depth: usize,
    /// Hard depth cap on offspring. `None` leaves tree growth unbounded
    /// across generations, the known bloat pathology of subtree crossover.
    pub max_program_depth: Option<usize>,
    pub hall_of_fame_size: usize,
    /// Fixed seed for fully reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            num_generations: 40,
            crossover_rate: 0.5,
            mutation_rate: 0.2,
            tournament_size: 7,
            init_policy: GrowthPolicy::Full,
            tree_min_depth: 1,
            tree_max_depth: 2,
            mutation_min_depth: 0,
            mutation_max_depth: 2,
            max_program_depth: None,
            hall_of_fame_size: 1,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), EvotrailError> {
        if self.population_size == 0 {
            return Err(EvotrailError::Configuration(
                "Population size must be non-zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(EvotrailError::Configuration(
                "Crossover rate must be between 0 and 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvotrailError::Configuration(
                "Mutation rate must be between 0 and 1".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(EvotrailError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if self.tree_max_depth < self.tree_min_depth {
            return Err(EvotrailError::Configuration(
                "Tree max depth must not be below tree min depth".to_string(),
            ));
        }
        if self.mutation_max_depth < self.mutation_min_depth {
            return Err(EvotrailError::Configuration(
                "Mutation max depth must not be below mutation min depth".to_string(),
            ));
        }
        if self.hall_of_fame_size == 0 {
            return Err(EvotrailError::Configuration(
                "Hall of fame capacity must be at least 1".to_string(),
            ));
        }
        if let Some(cap) = self.max_program_depth {
            if cap < self.tree_max_depth {
                return Err(EvotrailError::Configuration(
                    "Program depth cap must cover the initial tree depth".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_population_rejected() {
        let config = EvolutionConfig {
            population_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EvotrailError::Configuration(_))
        ));
    }

    #[test]
    fn out_of_range_rates_rejected() {
        let config = EvolutionConfig {
            crossover_rate: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EvolutionConfig {
            mutation_rate: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_depth_bounds_rejected() {
        let config = EvolutionConfig {
            tree_min_depth: 5,
            tree_max_depth: 2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn depth_cap_below_initial_depth_rejected() {
        let config = EvolutionConfig {
            tree_max_depth: 4,
            max_program_depth: Some(3),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
