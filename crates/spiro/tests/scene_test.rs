//! Integration tests for building and growing scenes.

use std::collections::HashSet;

use spiro::*;

fn twin_loop_chain() -> Chain {
    Chain::new(vec![
        FrameLink::new(Vec3::new(0.0, 0.01, 0.0), 1.0),
        FrameLink::new(Vec3::new(0.0, 0.0, 1.0), 1.0),
    ])
    .expect("valid chain")
}

fn twin_loop_config() -> SpiroConfig {
    let mut config = SpiroConfig::new(twin_loop_chain());
    config.trace = TraceParams {
        steps: 20_000,
        step_delta: 0.1,
        start_time: 0.001,
    };
    config.surface.point_radius = 0.09;
    config.surface.trim_search = SearchStrategy::Indexed;
    config.surface.adjacency_search = SearchStrategy::Indexed;
    config
}

#[test]
fn test_twin_loop_seed_and_first_step() {
    init_logging();
    let mut scene = Scene::build(twin_loop_config()).expect("build failed");

    assert_eq!(scene.trace().len(), 20_000);
    let trimmed = scene.trimmed_points().len();
    assert!(trimmed > 1_000 && trimmed < 20_000, "trimmed to {trimmed}");
    assert_eq!(scene.vertices().len(), trimmed);

    // One seed triangle whose vertices are pairwise adjacent.
    assert_eq!(scene.phase(), GrowthPhase::Growing);
    assert_eq!(scene.mesh().len(), 1);
    let seed = scene.mesh().triangles()[0];
    let [v0, v1, v2] = seed.vertices;
    let vertices = scene.vertices();
    assert!(vertices.are_adjacent(v0, v1));
    assert!(vertices.are_adjacent(v1, v2));
    assert!(vertices.are_adjacent(v2, v0));

    let centroid = vertices.positions().sum::<Vec3>() / vertices.len() as f32;
    let normal = seed.normal(vertices);
    assert!(normal.dot(seed.center(vertices) - centroid) >= 0.0);

    let report = scene.grow().expect("grow failed");
    assert_eq!(report.step, 1);
    assert_eq!(report.edges_examined, 3);
    assert!(report.triangles_added <= 3);
    assert_eq!(scene.mesh().len(), 1 + report.triangles_added);
}

#[test]
fn test_strategies_build_identical_scenes() {
    let mut linear = twin_loop_config();
    linear.trace.steps = 4_000;
    linear.surface.trim_search = SearchStrategy::Linear;
    linear.surface.adjacency_search = SearchStrategy::Linear;
    let mut indexed = linear.clone();
    indexed.surface.trim_search = SearchStrategy::Indexed;
    indexed.surface.adjacency_search = SearchStrategy::Indexed;

    let a = Scene::build(linear).expect("linear build failed");
    let b = Scene::build(indexed).expect("indexed build failed");
    assert_eq!(a.trimmed_points(), b.trimmed_points());
    assert_eq!(a.vertices(), b.vertices());
    assert_eq!(a.mesh().triangles(), b.mesh().triangles());
}

#[test]
fn test_build_is_deterministic() {
    let a = Scene::build(twin_loop_config()).expect("build failed");
    let b = Scene::build(twin_loop_config()).expect("build failed");
    let bits = |scene: &Scene| -> Vec<u32> {
        scene
            .trace()
            .points()
            .iter()
            .flat_map(|p| p.to_array().map(f32::to_bits))
            .collect()
    };
    assert_eq!(bits(&a), bits(&b));
    assert_eq!(a.trimmed_points(), b.trimmed_points());
    assert_eq!(a.mesh().triangles(), b.mesh().triangles());
}

#[test]
fn test_growth_runs_to_completion() {
    let mut scene = Scene::build(twin_loop_config()).expect("build failed");
    let mut previous = scene.mesh().len();
    let reports = scene.grow_until_finished(10_000).expect("grow failed");

    assert_eq!(scene.phase(), GrowthPhase::Finished);
    assert_eq!(reports.last().map(|r| r.front_size), Some(0));
    for (i, report) in reports.iter().enumerate() {
        assert_eq!(report.step, i + 1);
        assert!(report.triangles_added <= report.edges_examined);
        previous += report.triangles_added;
    }
    assert_eq!(scene.mesh().len(), previous);
    assert!(scene.mesh().len() > 100);

    let faces: HashSet<_> = scene
        .mesh()
        .triangles()
        .iter()
        .map(Triangle::face_key)
        .collect();
    assert_eq!(faces.len(), scene.mesh().len());

    // Further steps are no-ops.
    let finished = scene.mesh().len();
    let report = scene.grow().expect("grow failed");
    assert_eq!(report.triangles_added, 0);
    assert_eq!(scene.mesh().len(), finished);
}

#[test]
fn test_render_feed_sizes() {
    let mut scene = Scene::build(twin_loop_config()).expect("build failed");
    for _ in 0..3 {
        scene.grow().expect("grow failed");
    }
    let feed = scene.render_feed();
    let stats = scene.stats();

    assert_eq!(feed.point_floats().len(), stats.trimmed_points * 6);
    assert_eq!(feed.surface_floats().len(), stats.triangles * 3 * 9);
    assert_eq!(feed.trace_floats().len(), stats.trace_samples * 6);
    assert_eq!(feed.joint_floats().len(), (stats.links + 1) * 6);
    assert_eq!(&feed.point_floats()[3..6], &POINT_COLOR);
    assert_eq!(&feed.surface_floats()[6..9], &SURFACE_COLOR);
    assert_eq!(&feed.joint_floats()[0..6], &[0.0; 6]);

    // The arm tip sits on the last trace sample.
    let joints = feed.joint_floats();
    let trace = feed.trace_floats();
    assert_eq!(
        &joints[joints.len() - 6..joints.len() - 3],
        &trace[trace.len() - 6..trace.len() - 3]
    );
}

#[test]
fn test_extents_cover_trace() {
    let scene = Scene::build(twin_loop_config()).expect("build failed");
    let (min, max) = scene.bounding_box();
    assert!(scene.length_scale() > 0.0);
    assert!((scene.length_scale() - (max - min).length()).abs() < 1e-6);
    for p in scene.trace().points() {
        assert!(p.cmpge(min).all() && p.cmple(max).all());
    }
    let center = scene.center();
    assert!(center.cmpge(min).all() && center.cmple(max).all());
}

#[test]
fn test_config_json_round_trip() {
    let config = twin_loop_config();
    let json = config.to_json().expect("serialize failed");
    let loaded = SpiroConfig::from_json_str(&json).expect("parse failed");
    assert_eq!(loaded, config);

    // Omitted sections fall back to defaults.
    let minimal = r#"{"chain": [{"axis": [0.0, 0.0, 1.0], "length": 1.0}]}"#;
    let loaded = SpiroConfig::from_json_str(minimal).expect("parse failed");
    assert_eq!(loaded.trace, TraceParams::default());
    assert_eq!(loaded.surface, SurfaceOptions::default());
}

#[test]
fn test_config_rejects_invalid_values() {
    let zero_axis = r#"{"chain": [{"axis": [0.0, 0.0, 0.0], "length": 1.0}]}"#;
    assert!(matches!(
        SpiroConfig::from_json_str(zero_axis),
        Err(SpiroError::JsonError(_))
    ));

    let bad_radius = r#"{
        "chain": [{"axis": [0.0, 0.0, 1.0], "length": 1.0}],
        "surface": {"point_radius": -1.0}
    }"#;
    assert!(matches!(
        SpiroConfig::from_json_str(bad_radius),
        Err(SpiroError::InvalidOption {
            name: "point_radius",
            ..
        })
    ));

    let mut config = twin_loop_config();
    config.trace.steps = 0;
    assert!(matches!(
        Scene::build(config),
        Err(SpiroError::InvalidOption { name: "steps", .. })
    ));
}

#[test]
fn test_config_file_errors() {
    assert!(matches!(
        SpiroConfig::from_json_file("/nonexistent/spiro.json"),
        Err(SpiroError::IoError(_))
    ));
}

#[test]
fn test_every_preset_seeds() {
    for preset in Preset::ALL {
        let scene = Scene::build(preset.config().expect("preset config"))
            .unwrap_or_else(|e| panic!("{preset} failed to build: {e}"));
        assert_eq!(scene.mesh().len(), 1, "{preset}");
        assert_eq!(scene.stats().links, preset.links().len());
    }
}

#[test]
fn test_stats_serialize() {
    let scene = Scene::build(twin_loop_config()).expect("build failed");
    let value = serde_json::to_value(scene.stats()).expect("serialize failed");
    assert_eq!(value["trace_samples"], 20_000);
    assert_eq!(value["triangles"], 1);
    assert_eq!(value["phase"], "Growing");
}
