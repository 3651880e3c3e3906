use serde::{Deserialize, Serialize};

/// A rectangular region of the 2-D input plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Window {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Window {
        Window { x_min, x_max, y_min, y_max }
    }

    /// Evenly spaced coordinates from `min` to `max` inclusive.
    fn ticks(min: f64, max: f64, resolution: usize) -> Vec<f64> {
        match resolution {
            0 => Vec::new(),
            1 => vec![(min + max) / 2.0],
            n => (0..n).map(|i| min + (max - min) * i as f64 / (n - 1) as f64).collect(),
        }
    }

    pub fn x_ticks(&self, resolution: usize) -> Vec<f64> {
        Window::ticks(self.x_min, self.x_max, resolution)
    }

    pub fn y_ticks(&self, resolution: usize) -> Vec<f64> {
        Window::ticks(self.y_min, self.y_max, resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_include_both_edges() {
        let w = Window::new(0.0, 1.0, -1.0, 1.0);
        assert_eq!(w.x_ticks(3), vec![0.0, 0.5, 1.0]);
        assert_eq!(w.y_ticks(1), vec![0.0]);
        assert!(w.y_ticks(0).is_empty());
    }
}
