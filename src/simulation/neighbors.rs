//! Neighbour lookup used by the pressure field and the pairwise force
//!
//! Callers only ask `query_neighbors(point, radius)` and must accept a
//! superset of the particles inside `radius`: every formula downstream is
//! exact for far-away particles too (the kernel is zero there), so a
//! spatial index can replace the brute-force scan without changing results.

use super::states::NVec2;

pub trait NeighborSearch {
    /// Indices of (at least) every particle within `radius` of `point`,
    /// in ascending index order
    fn query_neighbors<'a>(&'a self, point: &NVec2, radius: f64) -> Box<dyn Iterator<Item = usize> + 'a>;
}

/// Naive O(N) scan over every particle
pub struct AllParticles {
    n: usize,
}

impl AllParticles {
    pub fn new(positions: &[NVec2]) -> Self {
        Self { n: positions.len() }
    }
}

impl NeighborSearch for AllParticles {
    fn query_neighbors<'a>(&'a self, _point: &NVec2, _radius: f64) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(0..self.n)
    }
}

/// Which neighbour search to build over each step's snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborSearchKind {
    #[default]
    BruteForce,
}

impl NeighborSearchKind {
    pub fn build(self, positions: &[NVec2]) -> Box<dyn NeighborSearch> {
        match self {
            NeighborSearchKind::BruteForce => Box::new(AllParticles::new(positions)),
        }
    }
}
