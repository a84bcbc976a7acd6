//! Force-directed layout simulation with pinning and bounded placement.

use crate::forces::{self, Lcg};
use crate::model::{ImpactGraph, Point};
use crate::params::LayoutParams;

/// Lifecycle of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    /// Ticks move nodes.
    Active,
    /// Energy decayed below `alpha_min`; ticks are no-ops until reheated.
    Resting,
    /// Replaced or shut down; never moves nodes again.
    Stopped,
}

/// Result of a single [`Simulation::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing moved.
    Idle,
    /// Nodes moved.
    Moved,
    /// Nodes moved and the simulation came to rest on this tick.
    Rested,
}

/// Cooperative force simulation over an [`ImpactGraph`].
///
/// The host calls [`Simulation::tick`] at its own cadence. Alpha starts at 1
/// and decays toward `alpha_target`; the simulation rests once alpha falls
/// below `alpha_min` while nothing holds it warm.
#[derive(Debug, Clone)]
pub struct Simulation {
    graph: ImpactGraph,
    params: LayoutParams,
    width: f64,
    height: f64,
    center: Point,
    alpha: f64,
    alpha_target: f64,
    status: SimulationStatus,
    /// Ticks left before a recenter releases its alpha target.
    recenter_left: u32,
    /// Nodes currently held by a drag gesture.
    dragging: usize,
    link_bias: Vec<f64>,
    rng: Lcg,
}

impl Simulation {
    pub fn new(mut graph: ImpactGraph, width: f64, height: f64, params: LayoutParams) -> Self {
        let (width, height) = params.canvas(width, height);
        let center = Point::new(width / 2.0, height / 2.0);
        forces::place_initial(&mut graph.nodes, center);
        let link_bias = forces::link_bias(&graph.nodes, &graph.edges);

        let status = if graph.is_empty() {
            SimulationStatus::Resting
        } else {
            SimulationStatus::Active
        };

        let mut simulation = Self {
            graph,
            params,
            width,
            height,
            center,
            alpha: 1.0,
            alpha_target: 0.0,
            status,
            recenter_left: 0,
            dragging: 0,
            link_bias,
            rng: Lcg::new(),
        };
        simulation.clamp_all();
        simulation
    }

    pub fn graph(&self) -> &ImpactGraph {
        &self.graph
    }

    pub fn status(&self) -> SimulationStatus {
        self.status
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn alpha_target(&self) -> f64 {
        self.alpha_target
    }

    /// Target the centering forces pull toward.
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != SimulationStatus::Active {
            return TickOutcome::Idle;
        }

        self.step();

        if self.recenter_left > 0 {
            self.recenter_left -= 1;
            if self.recenter_left == 0 {
                self.alpha_target = self.idle_target();
            }
        }

        if self.alpha < self.params.alpha_min {
            self.status = SimulationStatus::Resting;
            log::debug!("Layout came to rest");
            return TickOutcome::Rested;
        }
        TickOutcome::Moved
    }

    fn step(&mut self) {
        let p = &self.params;
        self.alpha += (self.alpha_target - self.alpha) * p.alpha_decay;
        let alpha = self.alpha;
        let nodes = &mut self.graph.nodes;

        forces::apply_link(
            nodes,
            &self.graph.edges,
            &self.link_bias,
            p.link_distance,
            p.link_strength,
            alpha,
            &mut self.rng,
        );
        forces::apply_charge(nodes, p.charge_strength, alpha, &mut self.rng);
        forces::apply_center_shift(nodes, self.center);
        forces::apply_collide(nodes, p.collide_radius, &mut self.rng);
        forces::apply_position(nodes, self.center, p.center_strength, alpha);

        let keep = 1.0 - p.velocity_decay;
        for node in nodes.iter_mut() {
            match node.pinned {
                Some(pin) => {
                    node.x = pin.x;
                    node.y = pin.y;
                    node.vx = 0.0;
                    node.vy = 0.0;
                }
                None => {
                    node.vx *= keep;
                    node.vy *= keep;
                    node.x += node.vx;
                    node.y += node.vy;
                }
            }
        }

        self.clamp_all();
        log::trace!("tick alpha={:.4} target={:.2}", self.alpha, self.alpha_target);
    }

    /// Grab a node: pin it at its current position and reheat.
    pub fn drag_start(&mut self, id: &str) -> bool {
        let Some(index) = self.index_if_running(id) else {
            return false;
        };
        let node = &mut self.graph.nodes[index];
        if node.pinned.is_none() {
            node.pinned = Some(node.position());
            self.dragging += 1;
        }
        self.alpha_target = self.params.drag_alpha_target;
        self.restart();
        true
    }

    /// Move a grabbed node; the pin is kept inside the canvas bounds.
    pub fn drag_move(&mut self, id: &str, x: f64, y: f64) -> bool {
        let Some(index) = self.index_if_running(id) else {
            return false;
        };
        if self.graph.nodes[index].pinned.is_none() || !x.is_finite() || !y.is_finite() {
            return false;
        }
        let pin = self.clamp_point(Point::new(x, y));
        self.graph.nodes[index].pinned = Some(pin);
        true
    }

    /// Release a grabbed node; it resumes free motion.
    pub fn drag_end(&mut self, id: &str) -> bool {
        let Some(index) = self.index_if_running(id) else {
            return false;
        };
        if self.graph.nodes[index].pinned.take().is_none() {
            return false;
        }
        self.dragging = self.dragging.saturating_sub(1);
        if self.dragging == 0 && self.recenter_left == 0 {
            self.alpha_target = 0.0;
        }
        true
    }

    /// Pull the graph toward the current canvas center for a while.
    pub fn recenter(&mut self) {
        if self.status == SimulationStatus::Stopped {
            return;
        }
        self.center = Point::new(self.width / 2.0, self.height / 2.0);
        self.alpha_target = self.params.recenter_alpha_target;
        self.recenter_left = self.params.recenter_ticks.max(1);
        self.restart();
    }

    /// Update the canvas size; nodes, pins and the center target are clamped
    /// into the new bounds.
    pub fn resize(&mut self, width: f64, height: f64) {
        if self.status == SimulationStatus::Stopped {
            return;
        }
        let (width, height) = self.params.canvas(width, height);
        self.width = width;
        self.height = height;
        self.center = self.clamp_point(self.center);
        for node in &mut self.graph.nodes {
            if let Some(pin) = node.pinned {
                let (x, y) = clamp_into(pin, width, height, self.params.margin);
                node.pinned = Some(Point::new(x, y));
            }
        }
        self.clamp_all();
    }

    /// Shut the simulation down for good.
    pub fn stop(&mut self) {
        self.status = SimulationStatus::Stopped;
        self.alpha_target = 0.0;
        self.recenter_left = 0;
    }

    fn restart(&mut self) {
        if self.status == SimulationStatus::Resting && !self.graph.is_empty() {
            self.status = SimulationStatus::Active;
        }
    }

    fn idle_target(&self) -> f64 {
        if self.dragging > 0 {
            self.params.drag_alpha_target
        } else {
            0.0
        }
    }

    fn index_if_running(&self, id: &str) -> Option<usize> {
        if self.status == SimulationStatus::Stopped {
            return None;
        }
        self.graph.index_of(id)
    }

    fn clamp_point(&self, point: Point) -> Point {
        let (x, y) = clamp_into(point, self.width, self.height, self.params.margin);
        Point::new(x, y)
    }

    fn clamp_all(&mut self) {
        let (width, height, margin) = (self.width, self.height, self.params.margin);
        for node in &mut self.graph.nodes {
            let (x, y) = clamp_into(node.position(), width, height, margin);
            node.x = x;
            node.y = y;
        }
    }
}

/// Clamp into `[margin, size - margin]`; the margin shrinks on tiny canvases.
fn clamp_into(point: Point, width: f64, height: f64, margin: f64) -> (f64, f64) {
    let clamp_axis = |value: f64, size: f64| {
        let margin = if margin.is_finite() {
            margin.clamp(0.0, size / 2.0)
        } else {
            0.0
        };
        if value.is_finite() {
            value.clamp(margin, size - margin)
        } else {
            size / 2.0
        }
    };
    (clamp_axis(point.x, width), clamp_axis(point.y, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_report::normalize_report;
    use serde_json::json;

    fn simulation() -> Simulation {
        let items = normalize_report(&json!([
            { "changedMember": "A.a", "actionableImpacts": [{ "name": "x" }, { "name": "y" }] },
            { "changedMember": "B.b", "actionableImpacts": [{ "name": "y" }, { "name": "z" }] }
        ]));
        Simulation::new(ImpactGraph::from_items(&items), 800.0, 600.0, LayoutParams::default())
    }

    fn run_until_rest(sim: &mut Simulation, limit: usize) -> usize {
        for tick in 1..=limit {
            if sim.tick() == TickOutcome::Rested {
                return tick;
            }
        }
        limit
    }

    #[test]
    fn test_rests_after_alpha_decays() {
        let mut sim = simulation();
        let ticks = run_until_rest(&mut sim, 1000);
        assert!((299..=301).contains(&ticks), "rested after {ticks} ticks");
        assert_eq!(sim.status(), SimulationStatus::Resting);
        assert_eq!(sim.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_drag_reheats_and_release_cools() {
        let mut sim = simulation();
        run_until_rest(&mut sim, 1000);

        assert!(sim.drag_start("module:y"));
        assert_eq!(sim.status(), SimulationStatus::Active);
        assert_eq!(sim.alpha_target(), 0.3);

        assert!(sim.drag_end("module:y"));
        assert_eq!(sim.alpha_target(), 0.0);
        assert!(!sim.drag_end("module:y"));
    }

    #[test]
    fn test_drag_move_requires_grab() {
        let mut sim = simulation();
        assert!(!sim.drag_move("module:x", 100.0, 100.0));
        assert!(!sim.drag_start("module:missing"));
    }

    #[test]
    fn test_pin_is_clamped_into_bounds() {
        let mut sim = simulation();
        sim.drag_start("module:x");
        sim.drag_move("module:x", -50.0, 5000.0);
        let pin = sim.graph().node("module:x").and_then(|n| n.pinned);
        assert_eq!(pin, Some(Point::new(80.0, 520.0)));
    }

    #[test]
    fn test_recenter_releases_target_after_bounded_ticks() {
        let mut sim = simulation();
        sim.recenter();
        assert_eq!(sim.alpha_target(), 0.35);
        for _ in 0..47 {
            sim.tick();
        }
        assert_eq!(sim.alpha_target(), 0.35);
        sim.tick();
        assert_eq!(sim.alpha_target(), 0.0);
    }

    #[test]
    fn test_stopped_simulation_never_moves() {
        let mut sim = simulation();
        sim.stop();
        let before = sim.graph().clone();
        assert_eq!(sim.tick(), TickOutcome::Idle);
        sim.recenter();
        assert!(!sim.drag_start("module:x"));
        assert_eq!(sim.tick(), TickOutcome::Idle);
        assert_eq!(sim.graph(), &before);
        assert_eq!(sim.status(), SimulationStatus::Stopped);
    }

    #[test]
    fn test_empty_graph_is_resting() {
        let mut sim = Simulation::new(ImpactGraph::default(), 10.0, 10.0, LayoutParams::default());
        assert_eq!(sim.status(), SimulationStatus::Resting);
        assert_eq!(sim.size(), (300.0, 200.0));
        sim.recenter();
        assert_eq!(sim.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_clamp_into_small_canvas() {
        assert_eq!(clamp_into(Point::new(0.0, 0.0), 100.0, 60.0, 80.0), (50.0, 30.0));
        assert_eq!(clamp_into(Point::new(f64::NAN, 10.0), 300.0, 200.0, 80.0), (150.0, 80.0));
    }
}
