//! Built-in data for the `dirichlet` command on the unit square.

use std::f64::consts::PI;

use nalgebra::Point2;
use trigrid::algo::dirichlet::BoundaryCondition;
use trigrid::mesh::TriMesh;

/// `u = cos(x) cos(y)` on the edges `x = 1` and `y = 1`; no condition elsewhere.
pub struct CosineTopRight;

impl CosineTopRight {
    fn value(p: &Point2<f64>) -> f64 {
        p.x.cos() * p.y.cos()
    }
}

impl BoundaryCondition for CosineTopRight {
    fn evaluate(&self, mesh: &TriMesh, [a, b]: [usize; 2]) -> Option<[f64; 2]> {
        let (pa, pb) = (mesh.vertex(a), mesh.vertex(b));
        let top = pa.y == 1.0 && pb.y == 1.0;
        let right = pa.x == 1.0 && pb.x == 1.0;
        (top || right).then(|| [Self::value(pa), Self::value(pb)])
    }
}

/// `sin(pi x) exp(y)`, sampled on the base grid and carried up by refinement.
pub fn sine_exp(p: &Point2<f64>) -> f64 {
    (PI * p.x).sin() * p.y.exp()
}
