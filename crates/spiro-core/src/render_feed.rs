//! Flat vertex arrays for an external renderer.
//!
//! Nothing here touches a GPU. Every vertex type is `#[repr(C)]` and
//! [`bytemuck::Pod`], so a slice of vertices can be reinterpreted as a flat
//! `&[f32]` or `&[u8]` and uploaded as-is.

use glam::Vec3;

use crate::adjacency::VertexArena;
use crate::chain::Chain;
use crate::mesh::Mesh;

/// Default color of trimmed points.
pub const POINT_COLOR: [f32; 3] = [0.0, 0.5, 0.8];
/// Default color of surface triangles.
pub const SURFACE_COLOR: [f32; 3] = [0.1, 0.7, 0.3];
/// Default color of the trace line and the arm joints.
pub const LINE_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

/// A colored point. Six floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl PointVertex {
    #[must_use]
    pub fn new(position: Vec3, color: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// A colored, lit triangle corner. Nine floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    /// Face normal, shared by all three corners.
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// One vertex per trimmed point.
#[must_use]
pub fn point_vertices(arena: &VertexArena, color: [f32; 3]) -> Vec<PointVertex> {
    arena.positions().map(|p| PointVertex::new(p, color)).collect()
}

/// Three vertices per triangle, in winding order. Normals are recomputed.
#[must_use]
pub fn surface_vertices(mesh: &Mesh, arena: &VertexArena, color: [f32; 3]) -> Vec<SurfaceVertex> {
    let mut vertices = Vec::with_capacity(mesh.len() * 3);
    for triangle in mesh.triangles() {
        let normal = triangle.normal(arena).to_array();
        vertices.extend(triangle.positions(arena).map(|p| SurfaceVertex {
            position: p.to_array(),
            normal,
            color,
        }));
    }
    vertices
}

/// The trace as a line strip.
#[must_use]
pub fn trace_vertices(points: &[Vec3], color: [f32; 3]) -> Vec<PointVertex> {
    points.iter().map(|&p| PointVertex::new(p, color)).collect()
}

/// The arm polyline of `chain` at time `t`, from the anchor to the tip.
#[must_use]
pub fn joint_vertices(chain: &Chain, time: f32, color: [f32; 3]) -> Vec<PointVertex> {
    chain
        .joints(time)
        .into_iter()
        .map(|p| PointVertex::new(p, color))
        .collect()
}

/// Every array a frame needs, built in one go.
#[derive(Debug, Clone, Default)]
pub struct RenderFeed {
    pub points: Vec<PointVertex>,
    pub surface: Vec<SurfaceVertex>,
    pub trace: Vec<PointVertex>,
    pub joints: Vec<PointVertex>,
}

impl RenderFeed {
    /// Builds the feed with the default colors, posing the arm at `arm_time`.
    #[must_use]
    pub fn build(
        chain: &Chain,
        trace: &[Vec3],
        arm_time: f32,
        arena: &VertexArena,
        mesh: &Mesh,
    ) -> Self {
        Self {
            points: point_vertices(arena, POINT_COLOR),
            surface: surface_vertices(mesh, arena, SURFACE_COLOR),
            trace: trace_vertices(trace, LINE_COLOR),
            joints: joint_vertices(chain, arm_time, LINE_COLOR),
        }
    }

    #[must_use]
    pub fn point_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    #[must_use]
    pub fn surface_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.surface)
    }

    #[must_use]
    pub fn trace_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.trace)
    }

    #[must_use]
    pub fn joint_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.joints)
    }
}
