//! Bloom Post-Processing Configuration
//!
//! Bloom settings as a pure data structure. The bloom pass reads these
//! parameters every frame; a render backend implements the actual
//! threshold/blur/composite chain.

/// Bloom post-processing configuration.
///
/// Thresholded bloom: pixels whose luminance exceeds `luminance_threshold`
/// (softened over `luminance_smoothing`) are spread and added back to the
/// composited result scaled by `intensity`.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomSettings {
    /// Whether the bloom pass runs at all.
    pub enabled: bool,

    /// Luminance above which pixels contribute to bloom.
    ///
    /// Default: `0.6`
    luminance_threshold: f32,

    /// Width of the soft knee around the threshold, in [0, 1].
    ///
    /// Default: `0.9`
    luminance_smoothing: f32,

    /// How much the bloom contributes to the final image.
    ///
    /// Default: `2.0`
    intensity: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            luminance_threshold: 0.6,
            luminance_smoothing: 0.9,
            intensity: 2.0,
        }
    }
}

impl BloomSettings {
    /// Creates new bloom settings with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn luminance_threshold(&self) -> f32 {
        self.luminance_threshold
    }

    #[inline]
    #[must_use]
    pub fn luminance_smoothing(&self) -> f32 {
        self.luminance_smoothing
    }

    #[inline]
    #[must_use]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Sets whether bloom is enabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Sets the luminance threshold, clamped to [0, 1].
    pub fn set_luminance_threshold(&mut self, threshold: f32) {
        self.luminance_threshold = threshold.clamp(0.0, 1.0);
    }

    /// Sets the luminance smoothing, clamped to [0, 1].
    pub fn set_luminance_smoothing(&mut self, smoothing: f32) {
        self.luminance_smoothing = smoothing.clamp(0.0, 1.0);
    }

    /// Sets the bloom intensity. A value of 0.0 effectively disables bloom.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.max(0.0);
    }
}
