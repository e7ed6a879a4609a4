use anyhow::Context;
use evotrail::config::{AppConfig, ConfigManager};
use evotrail::engines::evaluation::{AntOracle, TrailMap};
use evotrail::engines::generation::{ConsoleProgressCallback, EvolutionEngine};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let manager = ConfigManager::new();
            manager
                .load_from_file(&path)
                .with_context(|| format!("loading config from {}", path))?;
            manager.get()
        }
        None => AppConfig::default(),
    };
    config.validate()?;

    let map = TrailMap::load(&config.simulation.map_path)
        .with_context(|| format!("loading trail map from {}", config.simulation.map_path))?;
    log::info!(
        "Loaded {}x{} map with {} food cells",
        map.rows(),
        map.cols(),
        map.food_count()
    );

    let primitives = Arc::new(AntOracle::primitive_set()?);
    let oracle = AntOracle::new(&primitives, map, config.simulation.move_limit)?;

    let mut engine = EvolutionEngine::new(config.evolution, Arc::clone(&primitives), oracle)?;
    let elites = engine.run(ConsoleProgressCallback)?;

    match elites.first() {
        Some(best) => {
            log::info!("Best individual: {}", best.program.expression(&primitives));
            log::info!("Best fitness: {}", best.fitness);
        }
        None => log::warn!("Run produced no archived individuals"),
    }

    Ok(())
}
