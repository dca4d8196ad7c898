//! Builds a scene from a preset or a JSON configuration and grows it to
//! completion.
//!
//! ```text
//! cargo run --example surface_demo -- twin-loop
//! cargo run --example surface_demo -- path/to/config.json
//! RUST_LOG=debug cargo run --example surface_demo -- knot
//! ```

use std::path::Path;

use spiro::{init_logging, Preset, Result, Scene, SpiroConfig};

const MAX_STEPS: usize = 10_000;

fn load_config(arg: &str) -> Result<SpiroConfig> {
    if Path::new(arg).extension().is_some_and(|ext| ext == "json") {
        SpiroConfig::from_json_file(arg)
    } else {
        arg.parse::<Preset>()?.config()
    }
}

fn main() -> Result<()> {
    init_logging();

    let arg = std::env::args()
        .nth(1)
        .unwrap_or_else(|| Preset::TwinLoop.name().to_string());
    let config = load_config(&arg)?;

    let mut scene = Scene::build(config)?;
    let reports = scene.grow_until_finished(MAX_STEPS)?;
    for report in &reports {
        log::info!(
            "step {:>4}: {:>3} edges, +{} triangles",
            report.step,
            report.edges_examined,
            report.triangles_added
        );
    }

    let feed = scene.render_feed();
    let summary = serde_json::json!({
        "source": arg,
        "stats": scene.stats(),
        "bounding_box": [scene.bounding_box().0, scene.bounding_box().1],
        "length_scale": scene.length_scale(),
        "floats": {
            "points": feed.point_floats().len(),
            "surface": feed.surface_floats().len(),
            "trace": feed.trace_floats().len(),
            "joints": feed.joint_floats().len(),
        },
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
