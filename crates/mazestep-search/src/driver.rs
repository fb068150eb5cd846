//! Manual and timed stepping over whichever engine a [`SearchConfig`] names.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use log::{debug, info};
use mazestep_core::{Connectivity, Grid};

use crate::bidirectional::Bidirectional;
use crate::config::{Algorithm, Mode, SearchConfig};
use crate::dijkstra::UniformCost;
use crate::error::{InvalidState, SearchError};
use crate::first::FirstSearch;
use crate::state::{Snapshot, Status, Step};
use crate::traits::Search;

/// Cooperative stop flag for [`StepDriver::run`], shareable with observers
/// and other threads.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the run loop to stop before its next tick.
    #[inline]
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn rearm(&self) {
        self.stopped.store(false, Ordering::Relaxed);
    }
}

/// Build the engine `config` describes on `grid`.
pub fn build(grid: Arc<Grid>, config: &SearchConfig) -> Box<dyn Search + Send> {
    let connectivity = config.connectivity;
    match config.variant() {
        Some(variant) => Box::new(FirstSearch::new(grid, variant, connectivity)),
        None => match config.algorithm {
            Algorithm::Bidirectional => Box::new(Bidirectional::new(grid, connectivity)),
            _ => Box::new(UniformCost::new(grid, connectivity)),
        },
    }
}

/// Owns the current grid, configuration and engine.
///
/// Configuration setters only record the new value; it is applied the next
/// time the engine is built by [`initialize`](Self::initialize) or
/// [`reset`](Self::reset).
#[derive(Default)]
pub struct StepDriver {
    grid: Option<Arc<Grid>>,
    config: SearchConfig,
    engine: Option<Box<dyn Search + Send>>,
    stop: StopHandle,
}

impl StepDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `grid` and build a fresh engine for `config`.
    ///
    /// `config` replaces everything recorded by the setters; use
    /// [`load`](Self::load) to build with the recorded configuration instead.
    pub fn initialize(&mut self, grid: Arc<Grid>, config: SearchConfig) {
        info!(
            "initialising {} search on a {}x{} grid ({:?}-connected)",
            config.algorithm,
            grid.height(),
            grid.width(),
            config.connectivity
        );
        self.stop.stop();
        self.config = config;
        self.engine = Some(build(Arc::clone(&grid), &config));
        self.grid = Some(grid);
    }

    /// Load `grid` and build a fresh engine with the recorded configuration.
    pub fn load(&mut self, grid: Arc<Grid>) {
        self.initialize(grid, self.config);
    }

    /// Parse a text layout and [`load`](Self::load) it. On a malformed
    /// layout the current grid and engine are kept.
    pub fn load_text(&mut self, layout: &str) -> Result<(), SearchError> {
        let grid = Grid::parse(layout)?;
        self.load(Arc::new(grid));
        Ok(())
    }

    /// Configuration the next build will use.
    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.config.algorithm = algorithm;
    }

    pub fn set_connectivity(&mut self, connectivity: Connectivity) {
        self.config.connectivity = connectivity;
    }

    pub fn set_max_depth(&mut self, max_depth: Option<u32>) {
        self.config.max_depth = max_depth;
    }

    pub fn set_check_path_to_start(&mut self, check: bool) {
        self.config.check_path_to_start = check;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.config.mode = mode;
    }

    pub fn engine(&self) -> Option<&(dyn Search + Send)> {
        self.engine.as_deref()
    }

    pub fn snapshot(&self) -> Option<Snapshot<'_>> {
        self.engine.as_ref().map(|e| e.snapshot())
    }

    /// Status of the current engine, `None` before initialisation.
    pub fn status(&self) -> Option<Status> {
        self.engine.as_ref().map(|e| e.status())
    }

    fn engine_mut(&mut self) -> Result<&mut (dyn Search + Send + 'static), InvalidState> {
        self.engine.as_deref_mut().ok_or(InvalidState::NotInitialized)
    }

    /// One engine step.
    pub fn step(&mut self) -> Result<Step, SearchError> {
        self.engine_mut()?.step()
    }

    /// Stop any run and rebuild the engine on the current grid with the
    /// current configuration.
    pub fn reset(&mut self) -> Result<(), SearchError> {
        self.stop.stop();
        let grid = self.grid.clone().ok_or(InvalidState::NotInitialized)?;
        info!("resetting {} search", self.config.algorithm);
        self.engine = Some(build(grid, &self.config));
        Ok(())
    }

    /// Step every `interval` until the engine is terminal or the stop flag
    /// is raised, calling `on_tick` after each step.
    ///
    /// The flag is checked before each tick, so a step that has started
    /// always completes. Returns the status when the loop ends.
    pub fn run<F>(&mut self, interval: Duration, mut on_tick: F) -> Result<Status, SearchError>
    where
        F: FnMut(&Snapshot<'_>),
    {
        let stop = self.stop.clone();
        stop.rearm();
        let engine = self.engine_mut()?;
        info!("running at {interval:?} per step");

        while !stop.is_stopped() && !engine.is_terminal() {
            engine.step()?;
            on_tick(&engine.snapshot());
            if engine.is_terminal() || stop.is_stopped() {
                break;
            }
            if !interval.is_zero() {
                thread::sleep(interval);
            }
        }

        let status = engine.status();
        if stop.is_stopped() && !status.is_terminal() {
            info!("run stopped after {} steps", engine.snapshot().steps);
        } else {
            debug!("run finished: {}", engine.snapshot().stats());
        }
        Ok(status)
    }

    /// Raise the stop flag of the current or next run.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// A clone of the stop flag, for observers and other threads.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazestep_core::{Cell, GridError};

    fn open_grid() -> Arc<Grid> {
        Arc::new(Grid::parse("S..\n...\n..G").unwrap())
    }

    #[test]
    fn step_before_initialize_fails() {
        let mut d = StepDriver::new();
        assert_eq!(
            d.step(),
            Err(SearchError::InvalidState(InvalidState::NotInitialized))
        );
        assert_eq!(
            d.reset(),
            Err(SearchError::InvalidState(InvalidState::NotInitialized))
        );
        assert!(d.run(Duration::ZERO, |_| {}).is_err());
        assert!(d.snapshot().is_none());
    }

    #[test]
    fn builds_every_algorithm() {
        for algorithm in Algorithm::ALL {
            let mut d = StepDriver::new();
            d.initialize(open_grid(), SearchConfig::new(algorithm));
            let status = d.run(Duration::ZERO, |_| {}).unwrap();
            assert_eq!(status, Status::Reached, "{algorithm}");
        }
    }

    #[test]
    fn run_to_completion_observes_every_step() {
        let mut d = StepDriver::new();
        d.initialize(open_grid(), SearchConfig::default());
        let mut ticks = Vec::new();
        let status = d
            .run(Duration::ZERO, |snap| ticks.push(snap.steps))
            .unwrap();
        assert_eq!(status, Status::Reached);
        // Eight expansions, then the goal pop which doesn't count.
        assert_eq!(ticks, vec![1, 2, 3, 4, 5, 6, 7, 8, 8]);
        assert!(d.snapshot().unwrap().reached_goal);
    }

    #[test]
    fn observer_can_stop_the_run() {
        let mut d = StepDriver::new();
        d.initialize(open_grid(), SearchConfig::default());
        let handle = d.stop_handle();
        let mut ticks = 0;
        let status = d
            .run(Duration::ZERO, |_| {
                ticks += 1;
                if ticks == 3 {
                    handle.stop();
                }
            })
            .unwrap();
        assert_eq!(status, Status::Running);
        assert_eq!(ticks, 3);
        assert_eq!(d.snapshot().unwrap().steps, 3);

        // A new run picks up where the last one stopped.
        assert_eq!(d.run(Duration::ZERO, |_| {}).unwrap(), Status::Reached);
    }

    #[test]
    fn stop_from_another_thread() {
        let layout = format!("S{}G", ".".repeat(200));
        let mut d = StepDriver::new();
        d.initialize(
            Arc::new(Grid::parse(&layout).unwrap()),
            SearchConfig::default(),
        );
        let handle = d.stop_handle();
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.stop();
        });
        let status = d.run(Duration::from_millis(1), |_| {}).unwrap();
        stopper.join().unwrap();
        assert_eq!(status, Status::Running);
        assert!(d.snapshot().unwrap().steps < 201);
    }

    #[test]
    fn run_after_terminal_returns_status() {
        let mut d = StepDriver::new();
        d.initialize(open_grid(), SearchConfig::default());
        d.run(Duration::ZERO, |_| {}).unwrap();
        let mut ticks = 0;
        assert_eq!(
            d.run(Duration::ZERO, |_| ticks += 1).unwrap(),
            Status::Reached
        );
        assert_eq!(ticks, 0);
    }

    #[test]
    fn setters_apply_on_reset() {
        let mut d = StepDriver::new();
        d.initialize(open_grid(), SearchConfig::default());
        d.step().unwrap();
        d.set_connectivity(Connectivity::Eight);
        d.set_algorithm(Algorithm::DepthFirst);
        d.set_max_depth(Some(1));

        // The running engine keeps its configuration: BFS pops (1, 0) next.
        assert_eq!(d.step(), Ok(Step::Expanded(Cell::new(1, 0))));

        d.reset().unwrap();
        assert_eq!(d.snapshot().unwrap().steps, 0);
        assert_eq!(d.step(), Ok(Step::Expanded(Cell::new(0, 0))));
        // Eight-connected DFS pops the last pushed neighbor, the diagonal.
        assert_eq!(d.step(), Ok(Step::Expanded(Cell::new(1, 1))));
        assert_eq!(d.config().max_depth, Some(1));
    }

    #[test]
    fn load_keeps_recorded_settings() {
        let mut d = StepDriver::new();
        d.set_connectivity(Connectivity::Eight);
        d.set_algorithm(Algorithm::DepthFirst);
        d.load(open_grid());
        assert_eq!(d.config().connectivity, Connectivity::Eight);
        assert_eq!(d.step(), Ok(Step::Expanded(Cell::new(0, 0))));
        assert_eq!(d.step(), Ok(Step::Expanded(Cell::new(1, 1))));

        // An explicit configuration replaces the recorded one.
        d.initialize(open_grid(), SearchConfig::default());
        assert_eq!(d.config().connectivity, Connectivity::Four);
    }

    #[test]
    fn load_text_reports_grid_errors() {
        let mut d = StepDriver::new();
        assert_eq!(
            d.load_text("S..\n..."),
            Err(SearchError::Config(GridError::MissingMarker("goal")))
        );
        assert!(d.engine().is_none());

        d.load_text("S.G").unwrap();
        assert_eq!(d.run(Duration::ZERO, |_| {}).unwrap(), Status::Reached);

        // A bad layout leaves the loaded maze in place.
        assert!(matches!(
            d.load_text("S#X\n..G"),
            Err(SearchError::Config(GridError::InvalidChar { ch: 'X', .. }))
        ));
        assert_eq!(d.engine().map(|e| e.grid().width()), Some(3));
    }

    #[test]
    fn path_check_and_mode_setters() {
        let mut d = StepDriver::new();
        d.initialize(open_grid(), SearchConfig::new(Algorithm::DepthFirst));
        d.set_mode(Mode::Tree);
        d.set_check_path_to_start(true);
        d.reset().unwrap();
        assert_eq!(d.config().mode, Mode::Tree);
        assert_eq!(d.run(Duration::ZERO, |_| {}).unwrap(), Status::Reached);
        assert!(d.snapshot().unwrap().visited.is_empty());
    }
}
