use serde::Serialize;

/// Ordinary least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit a line through `(x, y)` points.
    ///
    /// Returns `None` for fewer than two points or when every `x` is equal.
    pub fn new(points: &[[f64; 2]]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p[0]).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p[1]).sum::<f64>() / n;

        let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), [x, y]| {
            let dx = x - mean_x;
            (sxx + dx * dx, sxy + dx * (y - mean_y))
        });
        if sxx == 0.0 {
            return None;
        }
        let slope = sxy / sxx;
        Some(LinearFit {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Two end points of the fitted line across `[x_min, x_max]`.
    pub fn segment(&self, x_min: f64, x_max: f64) -> [[f64; 2]; 2] {
        [[x_min, self.predict(x_min)], [x_max, self.predict(x_max)]]
    }
}
