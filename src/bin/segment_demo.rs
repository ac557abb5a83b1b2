//! Segments a synthetic terrain and prints a summary.
//!
//! Usage: `segment_demo [config.json]`. Without a config the demo uses a
//! 20x20 m area at 0.5 m resolution and the default parameters. The terrain
//! is a flat plain with a raised plateau and a ramp, four samples per cell.

use dem_segmenter::config::{load_config, OutputConfig, RuntimeConfig};
use dem_segmenter::snapshot::write_json_file;
use dem_segmenter::{Dem, DemPipeline, SegmentationOutcome, SegmentationParams};
use nalgebra::Vector2;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let (mut dem, params, output) = match env::args().nth(1) {
        Some(path) => {
            let config = load_config(Path::new(&path))?;
            let (minimum, maximum, resolution) = config
                .bounds::<2>()
                .map_err(|e| format!("Bad config geometry: {e}"))?;
            let dem = Dem::<2>::new(minimum, maximum, resolution)
                .map_err(|e| format!("Bad grid bounds: {e}"))?;
            (dem, config.segmentation, config.output)
        }
        None => {
            let config = default_config();
            let (minimum, maximum, resolution) = config
                .bounds::<2>()
                .map_err(|e| format!("Bad config geometry: {e}"))?;
            let dem = Dem::<2>::new(minimum, maximum, resolution)
                .map_err(|e| format!("Bad grid bounds: {e}"))?;
            (dem, config.segmentation, config.output)
        }
    };

    sample_synthetic_terrain(&mut dem).map_err(|e| format!("Sampling failed: {e}"))?;

    let pipeline = DemPipeline::new(params);
    let outcome = pipeline
        .process(&dem)
        .map_err(|e| format!("Segmentation failed: {e}"))?;

    print_text_summary(&outcome);

    if let Some(path) = &output.report_out {
        write_json_file(path, &outcome.report)?;
        println!("JSON report written to {}", path.display());
    }
    if let Some(path) = &output.snapshot_out {
        write_json_file(path, &dem.snapshot())?;
        println!("Snapshot written to {}", path.display());
    }
    Ok(())
}

fn default_config() -> RuntimeConfig {
    RuntimeConfig {
        minimum: vec![0.0, 0.0],
        maximum: vec![20.0, 20.0],
        resolution: vec![0.5, 0.5],
        segmentation: SegmentationParams {
            k: 5.0,
            ..Default::default()
        },
        output: OutputConfig::default(),
    }
}

/// Flat plain at 0 m, a 6x6 m plateau at 2 m, and a ramp rising eastward.
/// Four deterministic sub-cell samples per cell.
fn sample_synthetic_terrain(dem: &mut Dem<2>) -> Result<(), dem_segmenter::DemError> {
    let [nx, ny] = *dem.num_cells();
    let res = *dem.resolution();
    let min = *dem.minimum();
    for iy in 0..ny {
        for ix in 0..nx {
            let cx = min[0] + (ix as f64 + 0.5) * res[0];
            let cy = min[1] + (iy as f64 + 0.5) * res[1];
            let height = terrain_height(cx, cy);
            for (dx, dy) in [(-0.2, -0.2), (0.2, -0.2), (-0.2, 0.2), (0.2, 0.2)] {
                let point = Vector2::new(cx + dx * res[0], cy + dy * res[1]);
                dem.add_sample(&point, height)?;
            }
        }
    }
    Ok(())
}

fn terrain_height(x: f64, y: f64) -> f64 {
    if (6.0..12.0).contains(&x) && (6.0..12.0).contains(&y) {
        2.0
    } else if x >= 15.0 {
        (x - 15.0) * 0.8
    } else {
        0.0
    }
}

fn print_text_summary(outcome: &SegmentationOutcome) {
    let report = &outcome.report;
    println!("Segmentation summary");
    println!("  k: {}", report.k);
    println!("  occupied cells: {}", report.occupied_cells);
    println!("  edges: {}", report.edges);
    println!("  components: {}", report.components);
    println!("  largest component: {}", report.largest_component);
    println!(
        "  timings: graph {:.3} ms, segment {:.3} ms, total {:.3} ms",
        report.graph_ms, report.segment_ms, report.latency_ms
    );

    let mut sizes: Vec<(u32, usize, f64)> = outcome
        .components
        .iter()
        .map(|c| (c.id.0, c.size(), c.internal_difference))
        .collect();
    sizes.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for (id, size, internal) in sizes.iter().take(8) {
        println!("  component {id}: {size} cells, internal difference {internal:.3}");
    }
    if sizes.len() > 8 {
        println!("  ... {} more", sizes.len() - 8);
    }
}
