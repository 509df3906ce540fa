// File: crates/bargraph-core/src/surface.rs
// Summary: Collaborator traits for the drawing backend and the host container.

use anyhow::Result;

use crate::types::{CanvasDims, Projection, Size};

/// Drawing backend for a bar graph.
///
/// The scheduler calls `init` once when the container first becomes
/// measurable, `resize` on later size changes, and `render` after every
/// projection. Pixel-level drawing is entirely up to the implementation.
pub trait DrawSurface {
    fn init(&mut self, dims: &CanvasDims) -> Result<()>;

    fn resize(&mut self, _dims: &CanvasDims) -> Result<()> {
        Ok(())
    }

    fn render(&mut self, projection: &Projection) -> Result<()>;
}

impl<S: DrawSurface + ?Sized> DrawSurface for Box<S> {
    fn init(&mut self, dims: &CanvasDims) -> Result<()> {
        (**self).init(dims)
    }
    fn resize(&mut self, dims: &CanvasDims) -> Result<()> {
        (**self).resize(dims)
    }
    fn render(&mut self, projection: &Projection) -> Result<()> {
        (**self).render(projection)
    }
}

/// Host element whose bounding box sizes the graph.
pub trait Container {
    fn bounding_box(&self) -> Size;
}

/// Container with a fixed size, useful for headless rendering.
#[derive(Clone, Copy, Debug)]
pub struct FixedContainer(pub Size);

impl Container for FixedContainer {
    fn bounding_box(&self) -> Size {
        self.0
    }
}

impl<C: Container + ?Sized> Container for std::rc::Rc<C> {
    fn bounding_box(&self) -> Size {
        (**self).bounding_box()
    }
}

impl Container for std::cell::Cell<Size> {
    fn bounding_box(&self) -> Size {
        self.get()
    }
}
