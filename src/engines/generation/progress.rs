/// Per-generation observer for evolution runs.
pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(
        &mut self,
        generation: usize,
        best_score: f64,
        mean_score: f64,
        hall_size: usize,
    );
}

pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting", generation + 1);
    }

    fn on_generation_complete(
        &mut self,
        generation: usize,
        best_score: f64,
        mean_score: f64,
        hall_size: usize,
    ) {
        log::info!(
            "Generation {:>3} complete. Best: {:.1}, mean: {:.2}, hall of fame: {}",
            generation + 1,
            best_score,
            mean_score,
            hall_size
        );
    }
}

/// Discards all progress events; handy for tests and benchmarks.
pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(
        &mut self,
        _generation: usize,
        _best_score: f64,
        _mean_score: f64,
        _hall_size: usize,
    ) {
    }
}
