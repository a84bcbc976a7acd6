//! Tunable parameters of the force layout.

/// Force and canvas parameters of a [`crate::Simulation`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    /// Rest length of method/module springs.
    pub link_distance: f64,
    pub link_strength: f64,
    /// Many-body strength; negative values repel.
    pub charge_strength: f64,
    pub collide_radius: f64,
    /// Strength of the pull toward the center target on each axis.
    pub center_strength: f64,
    /// Distance nodes keep from the canvas edges.
    pub margin: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub alpha_min: f64,
    pub alpha_decay: f64,
    /// Fraction of velocity lost per tick.
    pub velocity_decay: f64,
    /// Alpha target held while a node is dragged.
    pub drag_alpha_target: f64,
    /// Alpha target held while recentering.
    pub recenter_alpha_target: f64,
    /// Number of ticks the recenter target is held.
    pub recenter_ticks: u32,
}

impl LayoutParams {
    /// Decay that takes alpha from 1 to `alpha_min` in `ticks` ticks.
    pub fn decay_for(alpha_min: f64, ticks: u32) -> f64 {
        1.0 - alpha_min.powf(1.0 / f64::from(ticks.max(1)))
    }

    /// Canvas size clamped to the configured minimum.
    pub fn canvas(&self, width: f64, height: f64) -> (f64, f64) {
        (at_least(width, self.min_width), at_least(height, self.min_height))
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        let alpha_min = 0.001;
        Self {
            link_distance: 140.0,
            link_strength: 1.0,
            charge_strength: -400.0,
            collide_radius: 40.0,
            center_strength: 0.05,
            margin: 80.0,
            min_width: 300.0,
            min_height: 200.0,
            alpha_min,
            alpha_decay: Self::decay_for(alpha_min, 300),
            velocity_decay: 0.4,
            drag_alpha_target: 0.3,
            recenter_alpha_target: 0.35,
            recenter_ticks: 48,
        }
    }
}

fn at_least(value: f64, min: f64) -> f64 {
    if value.is_finite() {
        value.max(min)
    } else {
        min
    }
}
