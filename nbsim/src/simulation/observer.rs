//! Per-step hooks: the only way state leaves the driver during a run
//!
//! An observer gets a read-only view of the system and the current time
//! after every completed step that ends before the run's end time.
//! Returning an error halts the run.
//! Rendering, recording and wall-clock pacing all live here, outside the
//! physics.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::simulation::states::System;

pub trait StepObserver {
    fn on_step(&mut self, sys: &System, time: f64) -> Result<()>;
}

impl<F> StepObserver for F
where
    F: FnMut(&System, f64) -> Result<()>,
{
    fn on_step(&mut self, sys: &System, time: f64) -> Result<()> {
        self(sys, time)
    }
}

/// Runs several borrowed observers in order; stops at the first error
#[derive(Default)]
pub struct Fanout<'a> {
    observers: Vec<&'a mut dyn StepObserver>,
}

impl<'a> Fanout<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: &'a mut dyn StepObserver) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl StepObserver for Fanout<'_> {
    fn on_step(&mut self, sys: &System, time: f64) -> Result<()> {
        for o in self.observers.iter_mut() {
            o.on_step(sys, time)?;
        }
        Ok(())
    }
}

// =========================================================================================
// Recording
// =========================================================================================

/// Positions of every body at one recorded instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub step: usize,
    pub t: f64,
    pub positions: Vec<[f64; 3]>,
}

/// Keeps every `every`-th frame in memory; can dump them as YAML
#[derive(Debug, Clone)]
pub struct TrajectoryRecorder {
    every: usize,
    seen: usize,
    frames: Vec<Frame>,
}

impl TrajectoryRecorder {
    /// `every = 0` is treated as 1
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
            seen: 0,
            frames: Vec::new(),
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    pub fn write_yaml(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("creating trajectory file {}", path.display()))?;
        serde_yaml::to_writer(BufWriter::new(file), &self.frames)?;
        info!("wrote {} frames to {}", self.frames.len(), path.display());
        Ok(())
    }
}

impl StepObserver for TrajectoryRecorder {
    fn on_step(&mut self, sys: &System, time: f64) -> Result<()> {
        self.seen += 1;
        if self.seen % self.every == 0 {
            self.frames.push(Frame {
                step: self.seen,
                t: time,
                positions: sys.positions().iter().map(|p| [p.x, p.y, p.z]).collect(),
            });
        }
        Ok(())
    }
}

// =========================================================================================
// Progress logging
// =========================================================================================

/// Logs time and relative energy drift every `every` steps.
///
/// Drift is measured against the energy of the state the logger was built
/// from, so the first step's error is included.
#[allow(non_snake_case)]
pub struct ProgressLogger {
    every: usize,
    seen: usize,
    G: f64,
    softening: f64,
    e0: f64,
}

impl ProgressLogger {
    #[allow(non_snake_case)]
    pub fn new(every: usize, G: f64, softening: f64, initial: &System) -> Self {
        Self {
            every: every.max(1),
            seen: 0,
            G,
            softening,
            e0: initial.total_energy(G, softening),
        }
    }

    /// Energy of the initial state
    pub fn baseline(&self) -> f64 {
        self.e0
    }

    /// Relative drift `(E - E0) / |E0|`, absolute when `E0` is zero
    pub fn drift(&self, sys: &System) -> f64 {
        let e = sys.total_energy(self.G, self.softening);
        if self.e0 != 0.0 {
            (e - self.e0) / self.e0.abs()
        } else {
            e - self.e0
        }
    }
}

impl StepObserver for ProgressLogger {
    fn on_step(&mut self, sys: &System, time: f64) -> Result<()> {
        self.seen += 1;
        if self.seen % self.every != 0 {
            return Ok(());
        }

        info!(
            "step {:6}  t = {:10.4}  E = {:+.6e}  dE/E0 = {:+.3e}  |P| = {:.3e}",
            self.seen,
            time,
            sys.total_energy(self.G, self.softening),
            self.drift(sys),
            sys.total_momentum().norm()
        );
        Ok(())
    }
}

// =========================================================================================
// Wall-clock pacing
// =========================================================================================

/// Sleeps for a fixed frame interval after the wrapped observer runs.
///
/// This is display throttling only; the simulation clock is unaffected.
pub struct Paced<O> {
    inner: O,
    frame: Duration,
}

impl<O: StepObserver> Paced<O> {
    pub fn new(inner: O, frame: Duration) -> Self {
        Self { inner, frame }
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: StepObserver> StepObserver for Paced<O> {
    fn on_step(&mut self, sys: &System, time: f64) -> Result<()> {
        self.inner.on_step(sys, time)?;
        if !self.frame.is_zero() {
            thread::sleep(self.frame);
        }
        Ok(())
    }
}
