//! Neighbourhood graph over the trimmed points.

use glam::Vec3;

use crate::axis::Axis;
use crate::options::SearchStrategy;
use crate::spatial_index::AxisTree;

/// Handle to a vertex in a [`VertexArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

impl VertexId {
    /// Index of the vertex in its arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A trimmed point and the vertices within the adjacency radius of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    /// Neighbours in ascending id order. Never contains the vertex itself.
    pub nearby: Vec<VertexId>,
}

/// Owns every vertex of a reconstruction.
///
/// Neighbour lists are symmetric: `b` is near `a` exactly when `a` is near `b`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexArena {
    vertices: Vec<Vertex>,
    radius: f32,
}

impl VertexArena {
    /// Links every pair of points at most `radius` apart.
    pub fn build(points: &[Vec3], radius: f32, strategy: SearchStrategy) -> Self {
        let nearby = match strategy {
            SearchStrategy::Linear => neighbors_linear(points, radius),
            SearchStrategy::Indexed => neighbors_indexed(points, radius),
        };
        let vertices: Vec<Vertex> = points
            .iter()
            .zip(nearby)
            .map(|(&position, nearby)| Vertex { position, nearby })
            .collect();

        let links: usize = vertices.iter().map(|v| v.nearby.len()).sum();
        log::info!(
            "adjacency: {} vertices, {} links (radius {radius}, {strategy:?})",
            vertices.len(),
            links / 2
        );
        Self { vertices, radius }
    }

    /// The radius the graph was built with.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the vertex behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this arena.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    /// Position of `id`. Panics if `id` does not belong to this arena.
    #[must_use]
    pub fn position(&self, id: VertexId) -> Vec3 {
        self.vertices[id.0].position
    }

    /// Neighbours of `id`. Panics if `id` does not belong to this arena.
    #[must_use]
    pub fn nearby(&self, id: VertexId) -> &[VertexId] {
        &self.vertices[id.0].nearby
    }

    #[must_use]
    pub fn are_adjacent(&self, a: VertexId, b: VertexId) -> bool {
        self.nearby(a).binary_search(&b).is_ok()
    }

    /// Vertices adjacent to both `a` and `b`, in `a`'s list order.
    #[must_use]
    pub fn common_neighbors(&self, a: VertexId, b: VertexId) -> Vec<VertexId> {
        let of_b = self.nearby(b);
        self.nearby(a)
            .iter()
            .copied()
            .filter(|c| of_b.binary_search(c).is_ok())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId(i), v))
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| v.position)
    }
}

fn neighbors_linear(points: &[Vec3], radius: f32) -> Vec<Vec<VertexId>> {
    let mut nearby = vec![Vec::new(); points.len()];
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if points[i].distance(points[j]) <= radius {
                nearby[i].push(VertexId(j));
                nearby[j].push(VertexId(i));
            }
        }
    }
    nearby
}

fn neighbors_indexed(points: &[Vec3], radius: f32) -> Vec<Vec<VertexId>> {
    let tree = AxisTree::new(points, Axis::X);
    let reach = radius * 1.001;
    let mut nearby = vec![Vec::new(); points.len()];
    for (i, p) in points.iter().enumerate() {
        tree.range(p.x - reach, p.x + reach, |j| {
            if j > i && p.distance(points[j]) <= radius {
                nearby[i].push(VertexId(j));
                nearby[j].push(VertexId(i));
            }
        });
    }
    for list in &mut nearby {
        list.sort_unstable();
    }
    nearby
}
