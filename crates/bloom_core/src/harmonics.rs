//! Small numeric primitives shared across the pipeline.

/// Damped accumulator with golden-ratio weighting.
///
/// Each iteration folds the new input into the running output at a fixed
/// 0.618 / 0.382 split, so recent signals dominate without erasing
/// history. The bus uses one to track feedback resonance across
/// loop-backs.
#[derive(Clone, Copy, Debug, Default)]
pub struct GoldenLoop {
    output: f32,
}

impl GoldenLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one input into the accumulator and return the new output.
    pub fn iterate(&mut self, input: f32) -> f32 {
        self.output = (self.output * 0.618) + (input * 0.382);
        self.output
    }

    pub fn output(&self) -> f32 {
        self.output
    }
}

/// Drift-damped stabilization of a signal/state pair.
///
/// `drift` is expected in [0, 1]; at 0 the reading is the plain sum, at 1
/// the reading is fully suppressed.
pub fn stabilize(signal: f32, state: f32, drift: f32) -> f32 {
    (signal + state) * (1.0 - drift)
}

/// Round to 3 decimal places, the manifest-facing precision.
pub(crate) fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

/// Round to 2 decimal places, used for recursion windows.
pub(crate) fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
