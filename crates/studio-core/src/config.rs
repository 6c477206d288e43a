//! Scroll/overlay configuration.
//!
//! A page can embed a partial JSON override; it is merged over the defaults
//! and validated. An invalid result never reaches the controllers: the merge
//! logs a warning and hands back the default configuration instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("scroll thresholds must be strictly ascending (got {0:?})")]
    ThresholdsNotAscending([f64; 4]),
    #[error("timing `{name}` must be non-negative (got {value})")]
    NegativeTiming { name: &'static str, value: f64 },
    #[error("wheel threshold must be positive (got {0})")]
    WheelThreshold(f64),
    #[error("wheel decay factor must be within (0, 1] (got {0})")]
    DecayFactor(f64),
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Virtual scroll offsets (px) used by the touch path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollThresholds {
    pub intro_warning: f64,
    pub developer_info: f64,
    pub monitor_guidance: f64,
    pub play: f64,
}

impl Default for ScrollThresholds {
    fn default() -> Self {
        Self {
            intro_warning: 50.0,
            developer_info: 250.0,
            monitor_guidance: 400.0,
            play: 550.0,
        }
    }
}

impl ScrollThresholds {
    /// Offset that must be reached to leave `stage_index` forwards.
    pub fn forward_at(&self, stage_index: u8) -> Option<f64> {
        match stage_index {
            0 => Some(self.developer_info),
            1 => Some(self.monitor_guidance),
            2 => Some(self.play),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayTimings {
    pub warning_delay_ms: f64,
    pub overlay_delay_ms: f64,
    pub guidance_delay_ms: f64,
    pub settle_ms: f64,
    pub auto_hide_delay_ms: f64,
    pub transition_duration_ms: f64,
    pub warning_read_ms: f64,
    pub intro_read_ms: f64,
}

impl Default for OverlayTimings {
    fn default() -> Self {
        Self {
            warning_delay_ms: 400.0,
            overlay_delay_ms: 600.0,
            guidance_delay_ms: 800.0,
            settle_ms: 50.0,
            auto_hide_delay_ms: 5000.0,
            transition_duration_ms: 300.0,
            warning_read_ms: 2000.0,
            intro_read_ms: 2500.0,
        }
    }
}

impl OverlayTimings {
    fn named(&self) -> [(&'static str, f64); 8] {
        [
            ("warningDelayMs", self.warning_delay_ms),
            ("overlayDelayMs", self.overlay_delay_ms),
            ("guidanceDelayMs", self.guidance_delay_ms),
            ("settleMs", self.settle_ms),
            ("autoHideDelayMs", self.auto_hide_delay_ms),
            ("transitionDurationMs", self.transition_duration_ms),
            ("warningReadMs", self.warning_read_ms),
            ("introReadMs", self.intro_read_ms),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelConfig {
    pub threshold: f64,
    pub cooldown_ms: f64,
    pub decay_factor: f64,
    pub decay_interval_ms: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            threshold: 200.0,
            cooldown_ms: 800.0,
            decay_factor: 0.8,
            decay_interval_ms: 100.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayMessages {
    pub warning: String,
    pub intro_title: String,
    pub introduction: String,
    pub monitor_guidance: String,
}

impl Default for OverlayMessages {
    fn default() -> Self {
        Self {
            warning: "⚠️ Read carefully".to_string(),
            intro_title: "⚠️ SYSTEM ACCESS GRANTED".to_string(),
            introduction: "Welcome to REDI's retro development studio. Navigate carefully \
                           through this interactive experience to discover my coding journey \
                           and projects."
                .to_string(),
            monitor_guidance: "👆 Focus on the monitor area to explore my work!".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    pub thresholds: ScrollThresholds,
    pub timings: OverlayTimings,
    pub wheel: WheelConfig,
    pub messages: OverlayMessages,
}

// ---------------- Partial overrides ----------------

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThresholdOverrides {
    pub intro_warning: Option<f64>,
    pub developer_info: Option<f64>,
    pub monitor_guidance: Option<f64>,
    pub play: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimingOverrides {
    pub warning_delay_ms: Option<f64>,
    pub overlay_delay_ms: Option<f64>,
    pub guidance_delay_ms: Option<f64>,
    pub settle_ms: Option<f64>,
    pub auto_hide_delay_ms: Option<f64>,
    pub transition_duration_ms: Option<f64>,
    pub warning_read_ms: Option<f64>,
    pub intro_read_ms: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WheelOverrides {
    pub threshold: Option<f64>,
    pub cooldown_ms: Option<f64>,
    pub decay_factor: Option<f64>,
    pub decay_interval_ms: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageOverrides {
    pub warning: Option<String>,
    pub intro_title: Option<String>,
    pub introduction: Option<String>,
    pub monitor_guidance: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScrollConfigOverrides {
    pub thresholds: ThresholdOverrides,
    pub timings: TimingOverrides,
    pub wheel: WheelOverrides,
    pub messages: MessageOverrides,
}

fn pick<T: Clone>(over: &Option<T>, base: &T) -> T {
    over.clone().unwrap_or_else(|| base.clone())
}

impl ScrollConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        let ordered = [t.intro_warning, t.developer_info, t.monitor_guidance, t.play];
        if !ordered.windows(2).all(|w| w[1] > w[0]) {
            return Err(ConfigError::ThresholdsNotAscending(ordered));
        }
        for (name, value) in self.timings.named() {
            if !(value >= 0.0) {
                return Err(ConfigError::NegativeTiming { name, value });
            }
        }
        for (name, value) in [
            ("cooldownMs", self.wheel.cooldown_ms),
            ("decayIntervalMs", self.wheel.decay_interval_ms),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::NegativeTiming { name, value });
            }
        }
        if !(self.wheel.threshold > 0.0) {
            return Err(ConfigError::WheelThreshold(self.wheel.threshold));
        }
        let d = self.wheel.decay_factor;
        if !(d > 0.0 && d <= 1.0) {
            return Err(ConfigError::DecayFactor(d));
        }
        Ok(())
    }

    /// Overlays `o` on the defaults without validating.
    pub fn apply(o: &ScrollConfigOverrides) -> Self {
        let d = ScrollConfig::default();
        ScrollConfig {
            thresholds: ScrollThresholds {
                intro_warning: pick(&o.thresholds.intro_warning, &d.thresholds.intro_warning),
                developer_info: pick(&o.thresholds.developer_info, &d.thresholds.developer_info),
                monitor_guidance: pick(
                    &o.thresholds.monitor_guidance,
                    &d.thresholds.monitor_guidance,
                ),
                play: pick(&o.thresholds.play, &d.thresholds.play),
            },
            timings: OverlayTimings {
                warning_delay_ms: pick(&o.timings.warning_delay_ms, &d.timings.warning_delay_ms),
                overlay_delay_ms: pick(&o.timings.overlay_delay_ms, &d.timings.overlay_delay_ms),
                guidance_delay_ms: pick(
                    &o.timings.guidance_delay_ms,
                    &d.timings.guidance_delay_ms,
                ),
                settle_ms: pick(&o.timings.settle_ms, &d.timings.settle_ms),
                auto_hide_delay_ms: pick(
                    &o.timings.auto_hide_delay_ms,
                    &d.timings.auto_hide_delay_ms,
                ),
                transition_duration_ms: pick(
                    &o.timings.transition_duration_ms,
                    &d.timings.transition_duration_ms,
                ),
                warning_read_ms: pick(&o.timings.warning_read_ms, &d.timings.warning_read_ms),
                intro_read_ms: pick(&o.timings.intro_read_ms, &d.timings.intro_read_ms),
            },
            wheel: WheelConfig {
                threshold: pick(&o.wheel.threshold, &d.wheel.threshold),
                cooldown_ms: pick(&o.wheel.cooldown_ms, &d.wheel.cooldown_ms),
                decay_factor: pick(&o.wheel.decay_factor, &d.wheel.decay_factor),
                decay_interval_ms: pick(&o.wheel.decay_interval_ms, &d.wheel.decay_interval_ms),
            },
            messages: OverlayMessages {
                warning: pick(&o.messages.warning, &d.messages.warning),
                intro_title: pick(&o.messages.intro_title, &d.messages.intro_title),
                introduction: pick(&o.messages.introduction, &d.messages.introduction),
                monitor_guidance: pick(&o.messages.monitor_guidance, &d.messages.monitor_guidance),
            },
        }
    }

    /// Merge and validate; an invalid result is replaced by the defaults.
    pub fn merge(o: &ScrollConfigOverrides) -> Self {
        let merged = Self::apply(o);
        match merged.validate() {
            Ok(()) => merged,
            Err(e) => {
                log::warn!("[config] {}. Using defaults.", e);
                ScrollConfig::default()
            }
        }
    }

    pub fn try_from_json(json: &str) -> Result<Self, ConfigError> {
        let overrides: ScrollConfigOverrides = serde_json::from_str(json)?;
        let merged = Self::apply(&overrides);
        merged.validate()?;
        Ok(merged)
    }

    /// Lenient JSON entry point used by the page loader.
    pub fn from_json(json: &str) -> Self {
        match Self::try_from_json(json) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("[config] {}. Using defaults.", e);
                ScrollConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(ScrollConfig::default().validate().is_ok());
    }

    #[test]
    fn camel_case_keys_are_accepted() {
        let c = ScrollConfig::from_json(r#"{"wheel":{"cooldownMs":500}}"#);
        assert_eq!(c.wheel.cooldown_ms, 500.0);
        assert_eq!(c.wheel.threshold, 200.0);
    }

    #[test]
    fn nan_timing_is_rejected() {
        let mut c = ScrollConfig::default();
        c.timings.settle_ms = f64::NAN;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::NegativeTiming { name: "settleMs", .. })
        ));
    }
}
