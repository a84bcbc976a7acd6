//! Per-tick forces.
//!
//! Each force reads positions and adds to node velocities, except the
//! center shift which translates positions directly. Coincident nodes are
//! separated by a tiny deterministic jiggle.

use crate::model::{GraphEdge, GraphNode, Point};

/// Minimum squared distance used by the many-body force.
const DISTANCE_MIN2: f64 = 1.0;

/// Linear congruential generator for jiggle values.
#[derive(Debug, Clone)]
pub(crate) struct Lcg(u64);

impl Lcg {
    const A: u64 = 1_664_525;
    const C: u64 = 1_013_904_223;
    const M: u64 = 1 << 32;

    pub(crate) fn new() -> Self {
        Self(1)
    }

    fn next(&mut self) -> f64 {
        self.0 = (Self::A * self.0 + Self::C) % Self::M;
        self.0 as f64 / Self::M as f64
    }

    fn jiggle(&mut self) -> f64 {
        (self.next() - 0.5) * 1e-6
    }
}

/// Link bias per edge: the share of the correction applied to the target.
pub(crate) fn link_bias(nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<f64> {
    let mut degree = vec![0usize; nodes.len()];
    for edge in edges {
        degree[edge.source] += 1;
        degree[edge.target] += 1;
    }
    edges
        .iter()
        .map(|e| {
            let source = degree[e.source] as f64;
            source / (source + degree[e.target] as f64)
        })
        .collect()
}

/// Springs pulling linked nodes toward `distance`.
pub(crate) fn apply_link(
    nodes: &mut [GraphNode],
    edges: &[GraphEdge],
    bias: &[f64],
    distance: f64,
    strength: f64,
    alpha: f64,
    rng: &mut Lcg,
) {
    for (edge, &b) in edges.iter().zip(bias) {
        let (s, t) = (edge.source, edge.target);
        if s == t {
            continue;
        }

        let mut x = nodes[t].x + nodes[t].vx - nodes[s].x - nodes[s].vx;
        let mut y = nodes[t].y + nodes[t].vy - nodes[s].y - nodes[s].vy;
        if x == 0.0 {
            x = rng.jiggle();
        }
        if y == 0.0 {
            y = rng.jiggle();
        }

        let len = (x * x + y * y).sqrt();
        let l = (len - distance) / len * alpha * strength;
        x *= l;
        y *= l;

        nodes[t].vx -= x * b;
        nodes[t].vy -= y * b;
        nodes[s].vx += x * (1.0 - b);
        nodes[s].vy += y * (1.0 - b);
    }
}

/// Pairwise many-body force (repulsion for negative strength).
pub(crate) fn apply_charge(nodes: &mut [GraphNode], strength: f64, alpha: f64, rng: &mut Lcg) {
    let n = nodes.len();
    for i in 0..n {
        let (mut dvx, mut dvy) = (0.0, 0.0);
        for j in 0..n {
            if i == j {
                continue;
            }
            let mut x = nodes[j].x - nodes[i].x;
            let mut y = nodes[j].y - nodes[i].y;
            let mut l = x * x + y * y;
            if x == 0.0 {
                x = rng.jiggle();
                l += x * x;
            }
            if y == 0.0 {
                y = rng.jiggle();
                l += y * y;
            }
            if l < DISTANCE_MIN2 {
                l = (DISTANCE_MIN2 * l).sqrt();
            }
            let w = strength * alpha / l;
            dvx += x * w;
            dvy += y * w;
        }
        nodes[i].vx += dvx;
        nodes[i].vy += dvy;
    }
}

/// Translate every node so the mean position sits on `center`.
pub(crate) fn apply_center_shift(nodes: &mut [GraphNode], center: Point) {
    if nodes.is_empty() {
        return;
    }
    let n = nodes.len() as f64;
    let sx = nodes.iter().map(|node| node.x).sum::<f64>() / n - center.x;
    let sy = nodes.iter().map(|node| node.y).sum::<f64>() / n - center.y;
    for node in nodes {
        node.x -= sx;
        node.y -= sy;
    }
}

/// Push overlapping nodes apart so their circles of `radius` do not intersect.
pub(crate) fn apply_collide(nodes: &mut [GraphNode], radius: f64, rng: &mut Lcg) {
    let r = radius + radius;
    let n = nodes.len();
    for i in 0..n {
        let xi = nodes[i].x + nodes[i].vx;
        let yi = nodes[i].y + nodes[i].vy;
        for j in (i + 1)..n {
            let mut x = xi - nodes[j].x - nodes[j].vx;
            let mut y = yi - nodes[j].y - nodes[j].vy;
            let mut l = x * x + y * y;
            if l >= r * r {
                continue;
            }
            if x == 0.0 {
                x = rng.jiggle();
                l += x * x;
            }
            if y == 0.0 {
                y = rng.jiggle();
                l += y * y;
            }
            let len = l.sqrt();
            let k = (r - len) / len;
            x *= k;
            y *= k;
            // equal radii share the correction evenly
            nodes[i].vx += x * 0.5;
            nodes[i].vy += y * 0.5;
            nodes[j].vx -= x * 0.5;
            nodes[j].vy -= y * 0.5;
        }
    }
}

/// Weak pull of every node toward `target` on both axes.
pub(crate) fn apply_position(nodes: &mut [GraphNode], target: Point, strength: f64, alpha: f64) {
    for node in nodes {
        node.vx += (target.x - node.x) * strength * alpha;
        node.vy += (target.y - node.y) * strength * alpha;
    }
}

/// Deterministic phyllotaxis placement around `center`.
pub(crate) fn place_initial(nodes: &mut [GraphNode], center: Point) {
    const INITIAL_RADIUS: f64 = 10.0;
    let angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());

    for (i, node) in nodes.iter_mut().enumerate() {
        let i = i as f64;
        let radius = INITIAL_RADIUS * (0.5 + i).sqrt();
        node.x = center.x + radius * (i * angle).cos();
        node.y = center.y + radius * (i * angle).sin();
        node.vx = 0.0;
        node.vy = 0.0;
    }
}
