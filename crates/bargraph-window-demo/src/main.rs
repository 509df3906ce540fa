// File: crates/bargraph-window-demo/src/main.rs
// Summary: Minimal windowed demo; window resizes feed the resize channel and each drawn frame
// is blitted to the window via softbuffer. Any key rotates the data, Tab cycles gradients.

use std::cell::Cell;
use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use bargraph_core::{BarGraph, GraphConfig, Observation, ResizeChannel, Size};
use bargraph_skia::{Gradient, SkiaOptions, SkiaSurface};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Bar Graph - Window Demo")
        .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 350.0))
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow!("softbuffer context: {e}"))?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow!("softbuffer surface: {e}"))?;

    // The graph fills the whole client area.
    let size = window.inner_size();
    let container = Rc::new(Cell::new(Size::new(size.width as f64, size.height as f64)));
    let channel = ResizeChannel::new();

    let mut data = weekly_sales();
    let mut graph = BarGraph::new(
        container.clone(),
        data.clone(),
        Observation::x_field(),
        Observation::y_field(),
        GraphConfig::default(),
    );
    let gradients = Gradient::presets();
    let mut gradient_idx = 1usize;
    graph
        .mount(&channel, skia_surface(gradients[gradient_idx]))
        .context("initial render")?;

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *cf = ControlFlow::Exit;
                }
                WindowEvent::Resized(new_size) => {
                    container.set(Size::new(new_size.width as f64, new_size.height as f64));
                    channel.notify(Size::new(new_size.width as f64, new_size.height as f64));
                    if let Some(err) = graph.take_error() {
                        warn!(error = %err, "resize render failed");
                    }
                    window.request_redraw();
                }
                WindowEvent::KeyboardInput {
                    input: KeyboardInput { state: ElementState::Pressed, virtual_keycode, .. },
                    ..
                } => {
                    let outcome = if virtual_keycode == Some(VirtualKeyCode::Tab) {
                        gradient_idx = (gradient_idx + 1) % gradients.len();
                        info!(gradient = gradients[gradient_idx].name, "switching gradient");
                        graph.mount(&channel, skia_surface(gradients[gradient_idx]))
                    } else {
                        data.rotate_left(1);
                        graph.set_data(data.clone())
                    };
                    if let Err(err) = outcome {
                        warn!(error = %err, "render failed");
                    }
                    window.request_redraw();
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                if let Err(err) = present(&graph, &mut surface) {
                    warn!(error = %err, "present failed");
                }
            }
            Event::LoopDestroyed => {
                info!("window closed");
            }
            _ => {}
        }
    });
}

fn skia_surface(gradient: Gradient) -> SkiaSurface {
    SkiaSurface::new(SkiaOptions { gradient, ..SkiaOptions::default() })
}

/// Blit the graph's last frame into the window buffer.
fn present(
    graph: &BarGraph<Observation, SkiaSurface>,
    surface: &mut softbuffer::Surface,
) -> Result<()> {
    let (rgba, w, h, _) = graph
        .with_surface(|s| s.to_rgba8())
        .ok_or_else(|| anyhow!("graph has no surface"))??;
    let (Some(nw), Some(nh)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else {
        return Ok(());
    };
    surface.resize(nw, nh).map_err(|e| anyhow!("resize buffer: {e}"))?;

    let mut frame = surface.buffer_mut().map_err(|e| anyhow!("frame: {e}"))?;
    let max_px = frame.len().min(rgba.len() / 4);
    for (i, px) in rgba.chunks_exact(4).take(max_px).enumerate() {
        let r = px[0] as u32;
        let g = px[1] as u32;
        let b = px[2] as u32;
        frame[i] = (r << 16) | (g << 8) | b;
    }
    frame.present().map_err(|e| anyhow!("present: {e}"))?;
    Ok(())
}

fn weekly_sales() -> Vec<Observation> {
    [31.0, 44.0, 38.0, 52.0, 61.0, 27.0, 19.0, 35.0, 48.0, 57.0, 63.0, 40.0, 22.0, 18.0]
        .iter()
        .enumerate()
        .map(|(i, &v)| Observation::new(i as f64 + 1.0, v))
        .collect()
}
