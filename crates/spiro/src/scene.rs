//! The scene context that owns every stage of a reconstruction.

use glam::Vec3;
use serde::Serialize;

use spiro_core::{
    trim_points, GrowthPhase, GrowthReport, Mesh, RenderFeed, Result, SpiroConfig, Trace,
    VertexArena,
};

/// A chain, its trace, the trimmed points, their adjacency and the growing
/// mesh.
///
/// Everything up to the seed triangle is computed once by [`Scene::build`];
/// afterwards the mesh grows by one step per call to [`Scene::grow`].
#[derive(Debug, Clone)]
pub struct Scene {
    config: SpiroConfig,
    trace: Trace,
    trimmed: Vec<Vec3>,
    vertices: VertexArena,
    mesh: Mesh,

    /// Axis-aligned bounding box of the trace.
    bounding_box: (Vec3, Vec3),

    /// Representative length scale (bounding box diagonal).
    length_scale: f32,
}

/// Counts describing the current state of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SceneStats {
    pub links: usize,
    pub trace_samples: usize,
    pub trimmed_points: usize,
    pub adjacency_links: usize,
    pub triangles: usize,
    pub front_size: usize,
    pub growth_steps: usize,
    pub phase: GrowthPhase,
}

impl Scene {
    /// Generates the trace, trims it, links neighbours and seeds the mesh.
    pub fn build(config: SpiroConfig) -> Result<Self> {
        config.validate()?;
        let surface = &config.surface;

        let trace = Trace::generate(&config.chain, &config.trace);
        log::info!(
            "trace: {} samples from a {}-link chain",
            trace.len(),
            config.chain.len()
        );

        let trimmed = trim_points(
            trace.points(),
            surface.point_radius,
            surface.residual_threshold,
            surface.trim_search,
        );
        let vertices = VertexArena::build(
            &trimmed,
            surface.adjacency_radius(),
            surface.adjacency_search,
        );

        let mut mesh = Mesh::new(surface);
        mesh.seed(&vertices)?;

        let mut scene = Self {
            config,
            trace,
            trimmed,
            vertices,
            mesh,
            bounding_box: (Vec3::ZERO, Vec3::ONE),
            length_scale: 1.0,
        };
        scene.update_extents();
        Ok(scene)
    }

    /// Grows the mesh by one step.
    pub fn grow(&mut self) -> Result<GrowthReport> {
        self.mesh.grow(&self.vertices)
    }

    /// Grows until the mesh is finished or `max_steps` steps have been taken.
    pub fn grow_until_finished(&mut self, max_steps: usize) -> Result<Vec<GrowthReport>> {
        let mut reports = Vec::new();
        while !self.mesh.is_finished() && reports.len() < max_steps {
            reports.push(self.grow()?);
        }
        if !self.mesh.is_finished() {
            log::warn!(
                "mesh still growing after {max_steps} steps ({} triangles)",
                self.mesh.len()
            );
        }
        Ok(reports)
    }

    #[must_use]
    pub fn config(&self) -> &SpiroConfig {
        &self.config
    }

    #[must_use]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Points that survived trimming, in trace order.
    #[must_use]
    pub fn trimmed_points(&self) -> &[Vec3] {
        &self.trimmed
    }

    #[must_use]
    pub fn vertices(&self) -> &VertexArena {
        &self.vertices
    }

    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    #[must_use]
    pub fn phase(&self) -> GrowthPhase {
        self.mesh.phase()
    }

    #[must_use]
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        self.bounding_box
    }

    #[must_use]
    pub fn length_scale(&self) -> f32 {
        self.length_scale
    }

    /// Computes the center of the bounding box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.bounding_box.0 + self.bounding_box.1) * 0.5
    }

    #[must_use]
    pub fn stats(&self) -> SceneStats {
        let links: usize = self.vertices.iter().map(|(_, v)| v.nearby.len()).sum();
        SceneStats {
            links: self.config.chain.len(),
            trace_samples: self.trace.len(),
            trimmed_points: self.trimmed.len(),
            adjacency_links: links / 2,
            triangles: self.mesh.len(),
            front_size: self.mesh.active_front().len(),
            growth_steps: self.mesh.steps(),
            phase: self.mesh.phase(),
        }
    }

    /// Vertex arrays for the current state. The arm is posed at the final
    /// trace sample, so its tip lies on the last trace point.
    #[must_use]
    pub fn render_feed(&self) -> RenderFeed {
        RenderFeed::build(
            &self.config.chain,
            self.trace.points(),
            self.trace.last_time().unwrap_or(self.trace.end_time()),
            &self.vertices,
            &self.mesh,
        )
    }

    fn update_extents(&mut self) {
        if let Some((min, max)) = self.trace.bounding_box() {
            self.bounding_box = (min, max);
            self.length_scale = (max - min).length();
        } else {
            self.bounding_box = (Vec3::ZERO, Vec3::ONE);
            self.length_scale = 1.0;
        }
    }
}
