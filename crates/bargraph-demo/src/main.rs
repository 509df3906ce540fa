// File: crates/bargraph-demo/src/main.rs
// Summary: Loads a two-column CSV, mounts a bar graph on a Skia surface, replays resizes and a
// data change, and writes one PNG per drawn frame.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use bargraph_core::types::CONTAINER_HEIGHT;
use bargraph_core::{observations, BarGraph, GraphConfig, Observation, ResizeChannel, Size};
use bargraph_skia::{format_compact, Gradient, SkiaOptions, SkiaSurface};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Container widths replayed as window resizes after mount.
const WIDTHS: [f64; 3] = [1024.0, 480.0, 720.0];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Args: [csv path] [x column] [y column] [gradient]
    let mut args = std::env::args().skip(1);
    let input = args.next();
    let x_col = args.next().unwrap_or_else(|| "day".to_string());
    let y_col = args.next().unwrap_or_else(|| "sales".to_string());
    let gradient = Gradient::find(&args.next().unwrap_or_default());

    let (data, stem) = match &input {
        Some(raw) => {
            let path = Path::new(raw);
            let data = load_xy_csv(path, &x_col, &y_col)
                .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("graph").to_string();
            (data, stem)
        }
        None => {
            info!("no CSV given; using a generated month of sales");
            (sample_month(), "sample".to_string())
        }
    };
    if data.is_empty() {
        anyhow::bail!("no rows loaded; check the '{x_col}' and '{y_col}' headers");
    }

    let total: f64 = data.iter().map(|o| o.y).sum();
    info!(rows = data.len(), total = %format_compact(total, ""), "series loaded");

    let channel = ResizeChannel::new();
    let container = Rc::new(Cell::new(Size::new(800.0, CONTAINER_HEIGHT)));
    let mut graph = BarGraph::new(
        container.clone(),
        data.clone(),
        Observation::x_field(),
        Observation::y_field(),
        GraphConfig::default(),
    );

    let surface = SkiaSurface::new(SkiaOptions { gradient, ..SkiaOptions::default() });
    graph.mount(&channel, surface).context("initial render")?;
    let mut frame = 0usize;
    write_frame(&graph, &stem, &mut frame)?;

    for width in WIDTHS {
        container.set(Size::new(width, CONTAINER_HEIGHT));
        channel.notify(Size::new(width, 768.0));
        if let Some(err) = graph.take_error() {
            warn!(error = %err, width, "resize render failed");
            continue;
        }
        write_frame(&graph, &stem, &mut frame)?;
    }

    // Second half of the series only, as a data change.
    let half = data[data.len() / 2..].to_vec();
    if graph.set_data(half).context("data change")?.is_drawn() {
        write_frame(&graph, &stem, &mut frame)?;
    }

    let surface = graph.unmount();
    info!(frames = surface.map(|s| s.frames_drawn()).unwrap_or(0), "graph unmounted");
    Ok(())
}

fn write_frame(graph: &BarGraph<Observation, SkiaSurface>, stem: &str, frame: &mut usize) -> Result<()> {
    let out = out_name_with(stem, *frame);
    graph
        .with_surface(|s| s.write_png(&out))
        .context("surface detached")??;
    info!(path = %out.display(), "wrote frame");
    *frame += 1;
    Ok(())
}

/// Produce output file name like target/out/bars_<stem>_<n>.png
fn out_name_with(stem: &str, frame: usize) -> PathBuf {
    PathBuf::from("target/out").join(format!("bars_{stem}_{frame:02}.png"))
}

/// Load `x_col` / `y_col` from a CSV with a header row. Rows whose y does not parse are
/// skipped; a non-numeric x falls back to the row index.
fn load_xy_csv(path: &Path, x_col: &str, y_col: &str) -> Result<Vec<Observation>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    let find = |name: &str| headers.iter().position(|h| h == &name.to_lowercase());
    let i_x = find(x_col);
    let i_y = find(y_col).with_context(|| format!("column '{y_col}' not found in {headers:?}"))?;
    if i_x.is_none() {
        warn!(column = x_col, "x column missing; using row index");
    }

    let mut pairs = Vec::new();
    let mut skipped = 0usize;
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let parse = |i: usize| rec.get(i).and_then(|s| s.trim().parse::<f64>().ok());
        let Some(y) = parse(i_y) else {
            skipped += 1;
            continue;
        };
        let x = i_x.and_then(parse).unwrap_or(row as f64);
        pairs.push((x, y));
    }
    if skipped > 0 {
        warn!(skipped, "rows without a numeric y were skipped");
    }
    Ok(observations(&pairs))
}

fn sample_month() -> Vec<Observation> {
    (1..=31)
        .map(|day| {
            let d = day as f64;
            let weekly = (d / 7.0 * std::f64::consts::TAU).sin() * 40_000.0;
            Observation::new(d, 160_000.0 + weekly + (d * 1_250.0))
        })
        .collect()
}
