//! Advancing-front triangulation over a [`VertexArena`].
//!
//! A mesh starts from a single seed triangle on the outside of the point set
//! and grows outward in discrete steps. Each step visits every edge of the
//! triangles added by the previous step (the active front) and attaches at
//! most one new triangle per edge, picking the closest common neighbour of the
//! edge's endpoints that lies ahead of the edge and does not fold back over
//! an existing face. When a step adds nothing the mesh is finished.
//!
//! There is no global self-intersection test; the local constraints and the
//! face-identity check are the only guards.

use std::collections::HashSet;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::adjacency::{VertexArena, VertexId};
use crate::error::{Result, SpiroError};
use crate::geometry::{angle_cos, centroid};
use crate::options::SurfaceOptions;

/// Handle to a triangle in a [`Mesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TriangleId(pub usize);

impl TriangleId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Three vertex handles. Geometry is derived from the arena on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub vertices: [VertexId; 3],
}

impl Triangle {
    #[must_use]
    pub fn new(v0: VertexId, v1: VertexId, v2: VertexId) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Unit normal following the winding order, or zero for a degenerate
    /// triangle.
    #[must_use]
    pub fn normal(&self, arena: &VertexArena) -> Vec3 {
        let [p0, p1, p2] = self.positions(arena);
        (p1 - p0).cross(p2 - p1).normalize_or_zero()
    }

    #[must_use]
    pub fn center(&self, arena: &VertexArena) -> Vec3 {
        let [p0, p1, p2] = self.positions(arena);
        (p0 + p1 + p2) / 3.0
    }

    #[must_use]
    pub fn positions(&self, arena: &VertexArena) -> [Vec3; 3] {
        self.vertices.map(|v| arena.position(v))
    }

    /// Directed edges `(v0, v1)`, `(v1, v2)`, `(v2, v0)`.
    #[must_use]
    pub fn edges(&self) -> [(VertexId, VertexId); 3] {
        let [v0, v1, v2] = self.vertices;
        [(v0, v1), (v1, v2), (v2, v0)]
    }

    /// Reverses the winding by swapping the first two vertices.
    pub fn flip_vertex_order(&mut self) {
        self.vertices.swap(0, 1);
    }

    /// The vertex set ignoring winding, used to detect repeated faces.
    #[must_use]
    pub fn face_key(&self) -> [VertexId; 3] {
        let mut key = self.vertices;
        key.sort_unstable();
        key
    }

    #[must_use]
    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }
}

/// Where a mesh is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthPhase {
    /// No triangle yet.
    #[default]
    Seeding,
    /// The active front is non-empty.
    Growing,
    /// The last step added nothing; further steps are no-ops.
    Finished,
}

/// Summary of one seeding or growth step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthReport {
    /// Number of growth steps taken, including this one. Zero for the seed.
    pub step: usize,
    pub edges_examined: usize,
    pub triangles_added: usize,
    /// Size of the active front after the step.
    pub front_size: usize,
}

/// Append-only triangle mesh grown by an advancing front.
#[derive(Debug, Clone)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    front: Vec<TriangleId>,
    /// Per vertex, the triangles using it.
    connected: Vec<Vec<TriangleId>>,
    faces: HashSet<[VertexId; 3]>,
    phase: GrowthPhase,
    steps: usize,
    point_radius: f32,
    seed_reach: f32,
    candidate_reach: f32,
    min_direction_cos: f32,
}

impl Mesh {
    /// Creates an empty, unseeded mesh.
    pub fn new(options: &SurfaceOptions) -> Self {
        Self {
            triangles: Vec::new(),
            front: Vec::new(),
            connected: Vec::new(),
            faces: HashSet::new(),
            phase: GrowthPhase::Seeding,
            steps: 0,
            point_radius: options.point_radius,
            seed_reach: options.point_radius * options.seed_reach_multiplier,
            candidate_reach: options.point_radius * options.candidate_reach_multiplier,
            min_direction_cos: options.min_direction_cos(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> GrowthPhase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == GrowthPhase::Finished
    }

    /// Number of growth steps taken after seeding.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[must_use]
    pub fn point_radius(&self) -> f32 {
        self.point_radius
    }

    /// Every triangle in insertion order.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Triangles added by the most recent step.
    #[must_use]
    pub fn active_front(&self) -> &[TriangleId] {
        &self.front
    }

    /// Triangles that use `v`.
    #[must_use]
    pub fn connected_triangles(&self, v: VertexId) -> &[TriangleId] {
        self.connected.get(v.0).map_or(&[], Vec::as_slice)
    }

    /// Returns true if a triangle with the same three vertices exists.
    #[must_use]
    pub fn contains_face(&self, triangle: &Triangle) -> bool {
        self.faces.contains(&triangle.face_key())
    }

    /// Seeds if the mesh is unseeded, otherwise grows by one step.
    pub fn step(&mut self, arena: &VertexArena) -> Result<GrowthReport> {
        match self.phase {
            GrowthPhase::Seeding => {
                self.seed(arena)?;
                Ok(GrowthReport {
                    step: 0,
                    edges_examined: 0,
                    triangles_added: 1,
                    front_size: self.front.len(),
                })
            }
            GrowthPhase::Growing | GrowthPhase::Finished => self.grow(arena),
        }
    }

    /// Places the seed triangle on the outside of the point set.
    ///
    /// The apex is the vertex farthest from the centroid. Its second vertex is
    /// the nearby vertex lying most in the outward direction, and the third is
    /// the common neighbour of both lying most outward from the centroid. The
    /// triangle is wound so that its normal points away from the centroid.
    pub fn seed(&mut self, arena: &VertexArena) -> Result<TriangleId> {
        if self.phase != GrowthPhase::Seeding {
            log::warn!("mesh is already seeded");
            return Ok(TriangleId(0));
        }
        if arena.len() < 3 {
            return Err(SpiroError::InsufficientPoints {
                required: 3,
                actual: arena.len(),
            });
        }
        let center = centroid(arena.positions()).ok_or(SpiroError::InsufficientPoints {
            required: 3,
            actual: 0,
        })?;

        let mut apex = VertexId(0);
        let mut farthest = f32::NEG_INFINITY;
        for (id, vertex) in arena.iter() {
            let d = vertex.position.distance(center);
            if d > farthest {
                farthest = d;
                apex = id;
            }
        }
        let apex_pos = arena.position(apex);

        let outward = (apex_pos - center).normalize_or_zero();
        if outward == Vec3::ZERO {
            return Err(SpiroError::DegenerateSeed(format!(
                "apex {} coincides with the centroid",
                apex.0
            )));
        }

        let second = most_aligned(
            arena
                .nearby(apex)
                .iter()
                .copied()
                .filter(|&v| arena.position(v).distance(apex_pos) <= self.seed_reach),
            |v| angle_cos(arena.position(v) - apex_pos, outward),
        )
        .ok_or(SpiroError::SeedNotFound("second"))?;

        let refined = ((apex_pos + arena.position(second)) * 0.5 - center).normalize_or_zero();
        if refined == Vec3::ZERO {
            return Err(SpiroError::DegenerateSeed(format!(
                "edge {}-{} is centred on the centroid",
                apex.0, second.0
            )));
        }

        let third = most_aligned(
            arena.common_neighbors(apex, second).into_iter(),
            |v| angle_cos(arena.position(v) - center, refined),
        )
        .ok_or(SpiroError::SeedNotFound("third"))?;

        let mut triangle = Triangle::new(second, apex, third);
        if angle_cos(triangle.center(arena) - center, triangle.normal(arena)) < 0.0 {
            triangle.flip_vertex_order();
        }

        self.connected = vec![Vec::new(); arena.len()];
        let id = self.insert(triangle);
        self.front = vec![id];
        self.phase = GrowthPhase::Growing;
        log::info!(
            "seeded mesh with triangle {:?} (apex {}, centroid {center})",
            triangle.vertices,
            apex.0
        );
        Ok(id)
    }

    /// Attaches at most one triangle to every edge of the active front.
    ///
    /// New triangles become visible to later edges of the same step. The
    /// active front is replaced by the triangles added; if there are none the
    /// mesh is finished.
    pub fn grow(&mut self, arena: &VertexArena) -> Result<GrowthReport> {
        match self.phase {
            GrowthPhase::Seeding => return Err(SpiroError::NotSeeded),
            GrowthPhase::Finished => {
                return Ok(GrowthReport {
                    step: self.steps,
                    ..GrowthReport::default()
                })
            }
            GrowthPhase::Growing => {}
        }

        let front = std::mem::take(&mut self.front);
        let mut next = Vec::new();
        let mut edges_examined = 0;

        for &current in &front {
            let triangle = self.triangles[current.0];
            let normal = triangle.normal(arena);
            for (a, b) in triangle.edges() {
                edges_examined += 1;
                if let Some(c) = self.best_candidate(arena, current, normal, a, b) {
                    next.push(self.insert(Triangle::new(a, c, b)));
                }
            }
        }

        self.steps += 1;
        self.front = next;
        if self.front.is_empty() {
            self.phase = GrowthPhase::Finished;
            log::info!(
                "mesh finished after {} steps with {} triangles",
                self.steps,
                self.triangles.len()
            );
        }

        let report = GrowthReport {
            step: self.steps,
            edges_examined,
            triangles_added: self.front.len(),
            front_size: self.front.len(),
        };
        log::debug!("{report:?}");
        Ok(report)
    }

    /// The closest acceptable vertex to attach across edge `(a, b)`.
    fn best_candidate(
        &self,
        arena: &VertexArena,
        current: TriangleId,
        normal: Vec3,
        a: VertexId,
        b: VertexId,
    ) -> Option<VertexId> {
        let (pa, pb) = (arena.position(a), arena.position(b));
        let mid = (pa + pb) * 0.5;
        let edge_normal = (pb - pa).cross(normal).normalize_or_zero();

        let mut best = None;
        let mut closest = self.candidate_reach;
        for c in arena.common_neighbors(a, b) {
            let pc = arena.position(c);
            let ahead = angle_cos(pc - mid, edge_normal) > self.min_direction_cos;
            if !ahead {
                continue;
            }
            if self.folds(current, normal, a, b, pc, arena) {
                continue;
            }
            if self.faces.contains(&Triangle::new(a, c, b).face_key()) {
                continue;
            }
            let d = mid.distance(pc);
            if d < closest {
                closest = d;
                best = Some(c);
            }
        }
        best
    }

    /// Returns true if edge `(a, b)` already borders another triangle and a
    /// triangle through `pc` would face the same way as the current one.
    fn folds(
        &self,
        current: TriangleId,
        normal: Vec3,
        a: VertexId,
        b: VertexId,
        pc: Vec3,
        arena: &VertexArena,
    ) -> bool {
        let shared = self
            .connected_triangles(a)
            .iter()
            .any(|&t| t != current && self.triangles[t.0].contains(b));
        if !shared {
            return false;
        }
        let (pa, pb) = (arena.position(a), arena.position(b));
        let new_normal = (pc - pa).cross(pb - pc).normalize_or_zero();
        angle_cos(new_normal, normal) > 0.0
    }

    fn insert(&mut self, triangle: Triangle) -> TriangleId {
        let id = TriangleId(self.triangles.len());
        for v in triangle.vertices {
            if let Some(list) = self.connected.get_mut(v.0) {
                list.push(id);
            }
        }
        self.faces.insert(triangle.face_key());
        self.triangles.push(triangle);
        id
    }
}

/// The item with the largest score; the first one wins ties and NaN scores
/// never win.
fn most_aligned(
    items: impl Iterator<Item = VertexId>,
    score: impl Fn(VertexId) -> f32,
) -> Option<VertexId> {
    let mut best = None;
    let mut best_score = f32::NEG_INFINITY;
    for item in items {
        let s = score(item);
        if s > best_score {
            best_score = s;
            best = Some(item);
        }
    }
    best
}
