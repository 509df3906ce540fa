// File: crates/bargraph-core/src/scheduler.rs
// Summary: Sequences measure -> project -> draw on mount, resize and data changes.

use tracing::{debug, trace, warn};

use crate::error::{ChartError, Result};
use crate::projection::project;
use crate::series::Field;
use crate::surface::DrawSurface;
use crate::types::{CanvasDims, GraphConfig, RenderId, Size};

/// Lifecycle of a scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// No surface attached yet, or the container has not been measurable.
    Uninitialized,
    /// Surface initialised; triggers re-project and redraw.
    Initialized,
    /// A draw pass is running. Held only inside a single draw call, which
    /// borrows the scheduler mutably, so callers never observe it.
    Rendering,
    /// Torn down; every trigger is ignored.
    Detached,
}

/// Why a trigger did not produce a draw call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    SurfaceNotReady,
    /// Container measured with a zero or non-finite side.
    ZeroArea,
    /// Inputs identical to the previous pass.
    Unchanged,
    Detached,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Drawn(RenderId),
    Skipped(SkipReason),
}

impl RenderOutcome {
    pub fn is_drawn(&self) -> bool {
        matches!(self, RenderOutcome::Drawn(_))
    }
}

/// Owns the draw surface of one graph and decides when to redraw it.
pub struct RenderScheduler<T, S> {
    state: SchedulerState,
    surface: Option<S>,
    /// Latest container measurement.
    size: Size,
    /// Size the surface was last set up for by `init` or `resize`.
    surface_size: Option<Size>,
    config: GraphConfig,
    data: Vec<T>,
    x: Field<T>,
    y: Field<T>,
    last_dims: Option<CanvasDims>,
}

impl<T, S> RenderScheduler<T, S> {
    pub fn new(data: Vec<T>, x: Field<T>, y: Field<T>, config: GraphConfig) -> Self {
        Self {
            state: SchedulerState::Uninitialized,
            surface: None,
            size: Size::default(),
            surface_size: None,
            config,
            data,
            x,
            y,
            last_dims: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Dims used by the most recent draw pass.
    pub fn last_dims(&self) -> Option<&CanvasDims> {
        self.last_dims.as_ref()
    }

    /// Stop reacting to triggers and hand the surface back.
    pub fn detach(&mut self) -> Option<S> {
        if self.state != SchedulerState::Detached {
            debug!("render scheduler detached");
        }
        self.state = SchedulerState::Detached;
        self.surface_size = None;
        self.surface.take()
    }
}

impl<T, S: DrawSurface> RenderScheduler<T, S> {
    /// Attach `surface` to a container measured at `bounds`.
    ///
    /// If the container is measurable the surface is initialised and drawn
    /// immediately; otherwise initialisation waits for the first measurable
    /// [`resize`](Self::resize).
    pub fn attach(&mut self, surface: S, bounds: Size) -> Result<RenderOutcome> {
        match self.state {
            SchedulerState::Detached => {
                trace!("attach after teardown ignored");
                return Ok(RenderOutcome::Skipped(SkipReason::Detached));
            }
            SchedulerState::Initialized | SchedulerState::Rendering => {
                debug!("replacing attached surface");
                self.state = SchedulerState::Uninitialized;
            }
            SchedulerState::Uninitialized => {}
        }
        self.surface = Some(surface);
        self.surface_size = None;
        self.size = bounds;
        self.initialize()
    }

    /// React to a new container measurement.
    ///
    /// A size only counts as applied once the surface was resized and drawn at
    /// it, so a failed pass is retried by the next notification of that size.
    pub fn resize(&mut self, bounds: Size) -> Result<RenderOutcome> {
        match self.state {
            SchedulerState::Detached => Ok(skip(SkipReason::Detached)),
            SchedulerState::Uninitialized => {
                self.size = bounds;
                if self.surface.is_none() {
                    return Ok(skip(SkipReason::SurfaceNotReady));
                }
                self.initialize()
            }
            SchedulerState::Initialized | SchedulerState::Rendering => {
                if bounds == self.size && self.drawn_size() == Some(bounds) {
                    return Ok(skip(SkipReason::Unchanged));
                }
                self.size = bounds;
                if !bounds.is_measurable() {
                    return Ok(skip(SkipReason::ZeroArea));
                }
                let dims = CanvasDims::measure(bounds, &self.config);
                self.draw(dims)
            }
        }
    }

    /// Replace the series and redraw.
    pub fn set_data(&mut self, data: Vec<T>) -> Result<RenderOutcome> {
        self.data = data;
        self.redraw()
    }

    /// Replace the field selectors; redraws only when either one changed.
    pub fn set_fields(&mut self, x: Field<T>, y: Field<T>) -> Result<RenderOutcome> {
        if x == self.x && y == self.y {
            return Ok(skip(SkipReason::Unchanged));
        }
        self.x = x;
        self.y = y;
        self.redraw()
    }

    /// Re-project the current inputs at the current size.
    pub fn redraw(&mut self) -> Result<RenderOutcome> {
        match self.state {
            SchedulerState::Initialized | SchedulerState::Rendering => {}
            SchedulerState::Uninitialized => return Ok(skip(SkipReason::SurfaceNotReady)),
            SchedulerState::Detached => return Ok(skip(SkipReason::Detached)),
        }
        if !self.size.is_measurable() {
            return Ok(skip(SkipReason::ZeroArea));
        }
        let dims = CanvasDims::measure(self.size, &self.config);
        self.draw(dims)
    }

    fn initialize(&mut self) -> Result<RenderOutcome> {
        if !self.size.is_measurable() {
            return Ok(skip(SkipReason::ZeroArea));
        }
        let Some(surface) = self.surface.as_mut() else {
            return Ok(skip(SkipReason::SurfaceNotReady));
        };
        let dims = CanvasDims::measure(self.size, &self.config);
        surface.init(&dims).map_err(surface_error)?;
        self.surface_size = Some(self.size);
        self.state = SchedulerState::Initialized;
        debug!(width = dims.width, height = dims.height, "draw surface initialised");
        self.draw(dims)
    }

    fn draw(&mut self, dims: CanvasDims) -> Result<RenderOutcome> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(skip(SkipReason::SurfaceNotReady));
        };
        let size = Size::new(dims.width, dims.height);
        if self.surface_size != Some(size) {
            surface.resize(&dims).map_err(surface_error)?;
            self.surface_size = Some(size);
        }
        self.state = SchedulerState::Rendering;
        let result = project(&self.data, &self.x, &self.y, &dims)
            .and_then(|projection| surface.render(&projection).map_err(surface_error));
        self.state = SchedulerState::Initialized;
        result?;

        let id = dims.render_id;
        debug!(
            render_id = %id,
            points = self.data.len(),
            x = self.x.name(),
            y = self.y.name(),
            "bar graph drawn"
        );
        self.last_dims = Some(dims);
        Ok(RenderOutcome::Drawn(id))
    }

    fn drawn_size(&self) -> Option<Size> {
        self.last_dims.as_ref().map(|d| Size::new(d.width, d.height))
    }
}

fn skip(reason: SkipReason) -> RenderOutcome {
    trace!(?reason, "render cycle skipped");
    RenderOutcome::Skipped(reason)
}

fn surface_error(err: anyhow::Error) -> ChartError {
    warn!(error = %err, "draw surface call failed");
    ChartError::Surface(err)
}
