use std::{collections::BTreeMap, path::Path};

use crate::{
    animation::spring::SpringParams,
    foundation::core::StepCount,
    foundation::error::{ReelError, ReelResult},
    showcase::{Showcase, ShowcaseKind},
    stage::layout::LANDING_CARDS,
    viewport::gate::GateMargins,
    viewport::stepper::CardStack,
};

/// Section entrance settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Viewport margins for the first-entry check.
    pub margins: GateMargins,
    /// Entrance animation length.
    pub duration_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            margins: GateMargins::uniform(-0.1),
            duration_ms: 800,
        }
    }
}

/// Video wall marquee settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarqueeConfig {
    /// Time for one full loop.
    pub duration_ms: u64,
    /// Width of one repeat of the row content.
    pub unit_width: f64,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            duration_ms: 50_000,
            unit_width: 3_392.0,
        }
    }
}

/// Tunable constants of the page choreography.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageConfig {
    /// Margins of the showcase visibility gates.
    pub gate: GateMargins,
    /// Section reveal settings.
    pub reveal: RevealConfig,
    /// Number of workflow steps (and panels) on the landing page.
    pub workflow_steps: StepCount,
    /// Scale lost per card behind the front of the advantages stack.
    pub card_scale_step: f64,
    /// Sticky offset between stacked cards.
    pub card_offset_px: f64,
    /// Spring used by the workflow panel stack.
    pub panel_spring: SpringParams,
    /// Video wall marquee.
    pub marquee: MarqueeConfig,
    /// Per-showcase cue hold overrides, applied cue for cue from the first.
    pub timings: BTreeMap<ShowcaseKind, Vec<u64>>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            gate: GateMargins::default(),
            reveal: RevealConfig::default(),
            workflow_steps: StepCount::FOUR,
            card_scale_step: 0.05,
            card_offset_px: 25.0,
            panel_spring: SpringParams::default(),
            marquee: MarqueeConfig::default(),
            timings: BTreeMap::new(),
        }
    }
}

fn check_margins(name: &str, m: GateMargins) -> ReelResult<()> {
    for (edge, v) in [("top", m.top), ("bottom", m.bottom)] {
        if !v.is_finite() || !(-0.5..=1.0).contains(&v) {
            return Err(ReelError::config(format!(
                "{name}.{edge} must be finite and within [-0.5, 1]"
            )));
        }
    }
    Ok(())
}

impl StageConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| ReelError::serde(format!("stage config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ReelError::config(format!("read '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_json_str(&text)?;
        tracing::debug!(overrides = cfg.timings.len(), "stage config loaded");
        Ok(cfg)
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> ReelResult<()> {
        check_margins("gate", self.gate)?;
        check_margins("reveal.margins", self.reveal.margins)?;
        self.card_stack()?;
        self.panel_spring
            .validate()
            .map_err(|e| ReelError::config(format!("panel_spring: {e}")))?;
        if self.marquee.duration_ms == 0 {
            return Err(ReelError::config("marquee.duration_ms must be > 0"));
        }
        if !self.marquee.unit_width.is_finite() || self.marquee.unit_width < 0.0 {
            return Err(ReelError::config(
                "marquee.unit_width must be finite and >= 0",
            ));
        }
        for (kind, holds) in &self.timings {
            Showcase::new(*kind, holds)
                .map_err(|e| ReelError::config(format!("timings.{kind}: {e}")))?;
        }
        Ok(())
    }

    /// Hold overrides for `kind` (empty when none are configured).
    pub fn holds(&self, kind: ShowcaseKind) -> &[u64] {
        self.timings.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Card stack geometry for `count` cards.
    pub fn card_stack_of(&self, count: StepCount) -> ReelResult<CardStack> {
        CardStack::new(count, self.card_scale_step, self.card_offset_px)
    }

    fn card_stack(&self) -> ReelResult<CardStack> {
        StepCount::new(LANDING_CARDS.len())
            .and_then(|count| self.card_stack_of(count))
            .map_err(|e| ReelError::config(format!("card stack: {e}")))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
