use evotrail::config::EvolutionConfig;
use evotrail::engines::evaluation::{AntOracle, FitnessOracle, TrailMap};
use evotrail::engines::generation::{
    EvolutionEngine, GrowthPolicy, ProgramNode, ProgramTree, SilentProgressCallback,
};
use evotrail::types::Fitness;
use std::sync::Arc;

/// Small broken trail: a food run east of the start, a corner, and a gap.
const TEST_MAP: &str = "\
S####...........
....#...........
....#...........
....####.#####..
............#...
............#...
................
................";

fn small_config(seed: u64) -> EvolutionConfig {
    EvolutionConfig {
        population_size: 40,
        num_generations: 8,
        crossover_rate: 0.5,
        mutation_rate: 0.2,
        tournament_size: 7,
        init_policy: GrowthPolicy::Full,
        tree_min_depth: 1,
        tree_max_depth: 2,
        mutation_min_depth: 0,
        mutation_max_depth: 2,
        max_program_depth: Some(8),
        hall_of_fame_size: 3,
        seed: Some(seed),
    }
}

fn run_once(config: EvolutionConfig, map_text: &str, move_limit: usize) -> (String, Fitness) {
    let set = Arc::new(AntOracle::primitive_set().unwrap());
    let map = TrailMap::parse(map_text).unwrap();
    let oracle = AntOracle::new(&set, map, move_limit).unwrap();

    let mut engine = EvolutionEngine::new(config, Arc::clone(&set), oracle).unwrap();
    let elites = engine.run(SilentProgressCallback).unwrap();

    let best = elites
        .first()
        .expect("run should archive at least one individual");
    (best.program.expression(&set), best.fitness.clone())
}

#[test]
fn same_seed_reproduces_the_run_exactly() {
    let (expression_a, fitness_a) = run_once(small_config(42), TEST_MAP, 100);
    let (expression_b, fitness_b) = run_once(small_config(42), TEST_MAP, 100);
    assert_eq!(expression_a, expression_b);
    assert_eq!(fitness_a, fitness_b);
}

#[test]
fn evolution_finds_food_on_the_small_trail() {
    let (_, fitness) = run_once(small_config(7), TEST_MAP, 100);
    assert!(
        fitness.score() > 0.0,
        "best of 8 generations should eat something, got {}",
        fitness
    );
}

#[test]
fn single_move_forward_program_consumes_exactly_the_budget() {
    let set = AntOracle::primitive_set().unwrap();
    let program = ProgramTree::new(ProgramNode::leaf(set.id_of("move_forward").unwrap()));
    let map = TrailMap::parse(TEST_MAP).unwrap();

    // four food cells sit in the start row; the third budget unit ends the
    // walk one cell short, the fourth eats the last one, and a lapping walk
    // never eats a visited cell twice
    for (move_limit, expected) in [(3, 3.0), (4, 4.0), (600, 4.0)] {
        let oracle = AntOracle::new(&set, map.clone(), move_limit).unwrap();
        let fitness = oracle.evaluate(&program).unwrap();
        assert_eq!(
            fitness.values(),
            &[expected],
            "budget {} should eat {}",
            move_limit,
            expected
        );
    }
}

#[test]
fn reevaluating_an_unchanged_individual_is_idempotent() {
    let set = AntOracle::primitive_set().unwrap();
    let map = TrailMap::parse(TEST_MAP).unwrap();
    let oracle = AntOracle::new(&set, map, 100).unwrap();

    let program = ProgramTree::new(ProgramNode::new(
        set.id_of("if_food_ahead").unwrap(),
        vec![
            ProgramNode::leaf(set.id_of("move_forward").unwrap()),
            ProgramNode::leaf(set.id_of("turn_right").unwrap()),
        ],
    ));

    let first = oracle.evaluate(&program).unwrap();
    let second = oracle.evaluate(&program).unwrap();
    assert_eq!(first, second);
}

#[test]
fn santa_fe_map_loads_with_expected_layout() {
    let map = TrailMap::load("data/santafe_trail.txt").unwrap();
    assert_eq!((map.rows(), map.cols()), (32, 32));
    assert_eq!(map.food_count(), 89);
    assert_eq!(map.start(), (0, 0));
}

#[test]
fn santa_fe_seeded_run_is_deterministic() {
    let santa_fe = std::fs::read_to_string("data/santafe_trail.txt").unwrap();
    let config = EvolutionConfig {
        population_size: 100,
        num_generations: 5,
        max_program_depth: Some(17),
        ..small_config(2)
    };
    let (expression_a, fitness_a) = run_once(config.clone(), &santa_fe, 600);
    let (expression_b, fitness_b) = run_once(config, &santa_fe, 600);
    assert_eq!(expression_a, expression_b);
    assert_eq!(fitness_a, fitness_b);
}

#[test]
#[ignore = "Koza-scale run, takes minutes in debug builds"]
fn santa_fe_full_scenario_is_deterministic() {
    let santa_fe = std::fs::read_to_string("data/santafe_trail.txt").unwrap();
    let config = EvolutionConfig {
        population_size: 300,
        num_generations: 40,
        max_program_depth: Some(17),
        hall_of_fame_size: 1,
        ..small_config(2)
    };
    let (expression_a, fitness_a) = run_once(config.clone(), &santa_fe, 600);
    let (expression_b, fitness_b) = run_once(config, &santa_fe, 600);
    assert_eq!(expression_a, expression_b);
    assert_eq!(fitness_a, fitness_b);
    assert!(fitness_a.score() > 0.0);
}
