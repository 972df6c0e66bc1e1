use crate::{Error, Result};

/// Previous smoothed pointer location, persisted across frames
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub loc_x: f64,
    pub loc_y: f64,
}

impl PointerState {
    #[must_use]
    pub const fn new(loc_x: f64, loc_y: f64) -> Self {
        Self { loc_x, loc_y }
    }
}

/// Single-pole exponential smoother: `loc += (target - loc) / factor`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoother {
    factor: f64,
}

impl Smoother {
    /// # Errors
    ///
    /// Returns an error if `factor` is below 1 or not finite
    pub fn new(factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor < 1.0 {
            return Err(Error::InvalidInput(format!(
                "Smoothing factor must be >= 1, got {factor}"
            )));
        }
        Ok(Self { factor })
    }

    #[must_use]
    pub const fn factor(&self) -> f64 {
        self.factor
    }

    /// Advance `state` one step toward `target` and return the new location
    pub fn apply(&self, state: &mut PointerState, (target_x, target_y): (f64, f64)) -> (f64, f64) {
        state.loc_x += (target_x - state.loc_x) / self.factor;
        state.loc_y += (target_y - state.loc_y) / self.factor;
        (state.loc_x, state.loc_y)
    }
}
