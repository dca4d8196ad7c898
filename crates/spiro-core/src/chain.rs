//! Chains of rotating reference frames.
//!
//! A [`Chain`] is an ordered list of [`FrameLink`]s. Link 0 is the innermost
//! arm, anchored at the origin; every further link hangs off the tip of the
//! previous one. At rest each arm lies along +X with its own length. At time
//! `t` link `i` rotates everything outboard of its joint by the axis-angle
//! `axis_i * t`, so the axis length is the angular velocity.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpiroError};
use crate::geometry::rotation_matrix;

/// One arm of a spirograph chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameLink {
    /// Rotation axis; its length is the angular velocity in radians per time unit.
    pub axis: Vec3,
    /// Arm length.
    pub length: f32,
}

impl FrameLink {
    /// Creates a new link.
    pub fn new(axis: Vec3, length: f32) -> Self {
        Self { axis, length }
    }

    /// The arm vector at rest.
    #[must_use]
    pub fn arm(&self) -> Vec3 {
        Vec3::new(self.length, 0.0, 0.0)
    }
}

/// A validated, immutable chain of links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FrameLink>", into = "Vec<FrameLink>")]
pub struct Chain {
    links: Vec<FrameLink>,
}

impl Chain {
    /// Creates a chain, rejecting empty chains, zero axes and non-finite values.
    pub fn new(links: Vec<FrameLink>) -> Result<Self> {
        if links.is_empty() {
            return Err(SpiroError::EmptyChain);
        }
        for (link, l) in links.iter().enumerate() {
            if !l.axis.is_finite() || !l.length.is_finite() {
                return Err(SpiroError::NonFiniteLink { link });
            }
            if l.axis.length_squared() == 0.0 {
                return Err(SpiroError::ZeroAxis { link });
            }
        }
        Ok(Self { links })
    }

    /// Returns the links, innermost first.
    #[must_use]
    pub fn links(&self) -> &[FrameLink] {
        &self.links
    }

    /// Returns the number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Always false; a chain has at least one link.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Total reach of the chain (sum of arm lengths).
    #[must_use]
    pub fn reach(&self) -> f32 {
        self.links.iter().map(|l| l.length.abs()).sum()
    }

    /// Position of the chain's tip at time `t`.
    ///
    /// Links are applied from the outermost to the innermost. For each link
    /// the point is moved into the frame of that link's joint, rotated and
    /// moved back. Reversing the order produces a different curve.
    #[must_use]
    pub fn sample(&self, time: f32) -> Vec3 {
        let rest = self.links.iter().map(FrameLink::arm).sum();
        self.transform(rest, self.links.len(), time)
    }

    /// Positions of every joint at time `t`, from the anchor to the tip.
    ///
    /// Joint `j` only moves with the `j` links inboard of it. The last entry
    /// equals [`Chain::sample`].
    #[must_use]
    pub fn joints(&self, time: f32) -> Vec<Vec3> {
        let mut joints = Vec::with_capacity(self.links.len() + 1);
        let mut rest = Vec3::ZERO;
        joints.push(rest);
        for j in 1..=self.links.len() {
            rest += self.links[j - 1].arm();
            joints.push(self.transform(rest, j, time));
        }
        joints
    }

    /// Applies links `count - 1` down to `0` to a rest-pose point.
    fn transform(&self, rest: Vec3, count: usize, time: f32) -> Vec3 {
        let mut origin: Vec3 = self.links[..count].iter().map(FrameLink::arm).sum();
        let mut head = rest;
        for link in self.links[..count].iter().rev() {
            origin -= link.arm();
            let rotation = rotation_matrix(link.axis * time);
            head = rotation * (head - origin) + origin;
        }
        head
    }
}

impl TryFrom<Vec<FrameLink>> for Chain {
    type Error = SpiroError;

    fn try_from(links: Vec<FrameLink>) -> Result<Self> {
        Self::new(links)
    }
}

impl From<Chain> for Vec<FrameLink> {
    fn from(chain: Chain) -> Self {
        chain.links
    }
}
