use crate::{
    animation::interp::ScrollTransform,
    foundation::core::{Span, StepCount},
    foundation::error::{ReelError, ReelResult},
    showcase::ShowcaseKind,
    stage::marquee::MarqueeDirection,
    viewport::scroll::ScrollAnchors,
};

/// What drives a parallax layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollSource {
    /// Raw document scroll offset in pixels.
    Page,
    /// The section's own progress between two anchors.
    Section(ScrollAnchors),
}

/// When a layer accepts pointer input.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interactivity {
    /// Always.
    #[default]
    Always,
    /// While the source value is below the threshold.
    Below(f64),
    /// While the source value is above the threshold.
    Above(f64),
}

impl Interactivity {
    /// Whether a layer is interactive at source value `v`.
    pub fn at(self, v: f64) -> bool {
        match self {
            Self::Always => true,
            Self::Below(t) => v < t,
            Self::Above(t) => v > t,
        }
    }
}

/// One scroll-linked layer inside a parallax section. Missing transforms leave the style at
/// identity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerLayout {
    /// Element name reported in styles.
    pub element: String,
    /// Vertical offset in pixels.
    #[serde(default)]
    pub translate_y: Option<ScrollTransform>,
    /// Uniform scale.
    #[serde(default)]
    pub scale: Option<ScrollTransform>,
    /// Opacity.
    #[serde(default)]
    pub opacity: Option<ScrollTransform>,
    /// Blur radius in pixels.
    #[serde(default)]
    pub blur: Option<ScrollTransform>,
    /// Pointer input gating.
    #[serde(default)]
    pub interactive: Interactivity,
}

impl LayerLayout {
    fn named(element: &str) -> Self {
        Self {
            element: element.to_owned(),
            translate_y: None,
            scale: None,
            opacity: None,
            blur: None,
            interactive: Interactivity::Always,
        }
    }
}

/// A showcase box and where it sits in the document.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanelLayout {
    /// Box extent in flow.
    pub span: Span,
    /// Choreography shown in it.
    pub showcase: ShowcaseKind,
}

/// A showcase shown inside one stepper panel while that panel is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StepShowcase {
    /// Panel index.
    pub step: usize,
    /// Choreography shown in it.
    pub showcase: ShowcaseKind,
}

/// Behavior of a page section.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionKind {
    /// Only the one-shot entrance.
    Reveal,
    /// Scroll-linked layers.
    Parallax {
        /// Value the layer transforms read.
        source: ScrollSource,
        /// Layers, in paint order.
        layers: Vec<LayerLayout>,
    },
    /// Independent showcase boxes, each behind its own visibility gate.
    Showcases {
        /// Boxes in document order.
        panels: Vec<PanelLayout>,
    },
    /// Sticky cards that shrink as the section scrolls by, each with a showcase.
    CardStack {
        /// Cards in document order.
        panels: Vec<PanelLayout>,
    },
    /// Pinned section whose scroll progress picks one of `steps` panels.
    Stepper {
        /// Number of steps.
        steps: StepCount,
        /// Panel showcases, at most one per step.
        #[serde(default)]
        showcases: Vec<StepShowcase>,
    },
    /// Endless video wall rows.
    Marquee {
        /// One entry per row.
        rows: Vec<MarqueeDirection>,
    },
}

/// One section of the page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionLayout {
    /// Anchor id.
    pub id: String,
    /// Document extent.
    pub span: Span,
    /// Behavior.
    pub kind: SectionKind,
    /// Whether the navigation bar highlights this section.
    #[serde(default)]
    pub nav: bool,
}

/// Measured page layout, in document pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageLayout {
    /// Viewport height the layout was measured at.
    pub viewport_h: f64,
    /// Sections in document order.
    pub sections: Vec<SectionLayout>,
}

/// Showcases of the advantages card stack, front card first.
pub const LANDING_CARDS: [ShowcaseKind; 4] = [
    ShowcaseKind::BatchProduction,
    ShowcaseKind::Consistency,
    ShowcaseKind::Editing,
    ShowcaseKind::IntegratedEditing,
];

fn transform(from: (f64, f64), to: (f64, f64)) -> ReelResult<Option<ScrollTransform>> {
    ScrollTransform::between(from, to).map(Some)
}

impl PageLayout {
    /// The StoryReel landing page measured at viewport height `vh`, with `steps` workflow panels.
    ///
    /// The export settings walkthrough plays on the last workflow panel.
    pub fn landing(vh: f64, steps: StepCount) -> ReelResult<Self> {
        if !vh.is_finite() || vh <= 0.0 {
            return Err(ReelError::validation("viewport height must be finite and > 0"));
        }
        let at = |start: f64, len: f64| Span::new(start * vh, len * vh);

        let hero = SectionKind::Parallax {
            source: ScrollSource::Page,
            layers: vec![
                LayerLayout {
                    translate_y: transform((0.0, 0.0), (1000.0, 150.0))?,
                    ..LayerLayout::named("background")
                },
                LayerLayout {
                    opacity: transform((0.0, 1.0), (400.0, 0.0))?,
                    ..LayerLayout::named("headline")
                },
            ],
        };
        let features = SectionKind::Showcases {
            panels: vec![
                PanelLayout {
                    span: at(2.1, 0.7),
                    showcase: ShowcaseKind::AutoMode,
                },
                PanelLayout {
                    span: at(2.9, 0.7),
                    showcase: ShowcaseKind::ManualEdit,
                },
            ],
        };
        let advantages = SectionKind::CardStack {
            panels: LANDING_CARDS
                .into_iter()
                .enumerate()
                .map(|(i, showcase)| PanelLayout {
                    span: at(3.8 + i as f64, 1.0),
                    showcase,
                })
                .collect(),
        };
        let workflow = SectionKind::Stepper {
            steps,
            showcases: vec![StepShowcase {
                step: steps.get() - 1,
                showcase: ShowcaseKind::ExportSettings,
            }],
        };
        let pricing = SectionKind::Parallax {
            source: ScrollSource::Section(ScrollAnchors::STICKY),
            layers: vec![
                LayerLayout {
                    opacity: transform((0.3, 1.0), (0.5, 0.0))?,
                    scale: transform((0.3, 1.0), (0.5, 0.9))?,
                    translate_y: transform((0.3, 0.0), (0.5, -100.0))?,
                    blur: transform((0.3, 0.0), (0.5, 20.0))?,
                    interactive: Interactivity::Below(0.45),
                    ..LayerLayout::named("membership")
                },
                LayerLayout {
                    opacity: transform((0.5, 0.0), (0.7, 1.0))?,
                    scale: transform((0.5, 0.9), (0.7, 1.0))?,
                    translate_y: transform((0.5, 100.0), (0.7, 0.0))?,
                    blur: transform((0.5, 20.0), (0.7, 0.0))?,
                    interactive: Interactivity::Above(0.45),
                    ..LayerLayout::named("credits")
                },
            ],
        };
        let invite = SectionKind::Parallax {
            source: ScrollSource::Section(ScrollAnchors::PASS_THROUGH),
            layers: vec![LayerLayout {
                translate_y: transform((0.0, 0.0), (1.0, 200.0))?,
                ..LayerLayout::named("background")
            }],
        };

        let section = |id: &str, span: Span, kind: SectionKind, nav: bool| SectionLayout {
            id: id.to_owned(),
            span,
            kind,
            nav,
        };
        Ok(Self {
            viewport_h: vh,
            sections: vec![
                section("hero", at(0.0, 1.0), hero, false),
                section(
                    "gallery",
                    at(1.0, 0.8),
                    SectionKind::Marquee {
                        rows: vec![MarqueeDirection::Right, MarqueeDirection::Left],
                    },
                    true,
                ),
                section("features", at(1.8, 2.0), features, true),
                section("advantages", at(3.8, 4.0), advantages, false),
                section("tech_specs", at(7.8, 1.0), SectionKind::Reveal, false),
                section("workflow", at(8.8, 4.0), workflow, false),
                section("pricing", at(12.8, 2.5), pricing, true),
                section("invite", at(15.3, 1.0), invite, true),
            ],
        })
    }

    /// Bottom of the last section.
    pub fn page_height(&self) -> f64 {
        self.sections
            .iter()
            .map(|s| s.span.end())
            .fold(0.0, f64::max)
    }

    /// Check that the layout can be staged.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.viewport_h.is_finite() || self.viewport_h <= 0.0 {
            return Err(ReelError::validation("viewport height must be finite and > 0"));
        }
        for s in &self.sections {
            if !(s.span.start.is_finite() && s.span.len.is_finite()) || s.span.len < 0.0 {
                return Err(ReelError::validation(format!(
                    "section '{}' has an invalid span",
                    s.id
                )));
            }
            if let SectionKind::CardStack { panels } = &s.kind
                && panels.is_empty()
            {
                return Err(ReelError::validation(format!(
                    "card stack '{}' has no cards",
                    s.id
                )));
            }
            if let SectionKind::Stepper { steps, showcases } = &s.kind {
                for (i, sc) in showcases.iter().enumerate() {
                    if sc.step >= steps.get() {
                        return Err(ReelError::validation(format!(
                            "stepper '{}' has no step {}",
                            s.id, sc.step
                        )));
                    }
                    if showcases[..i].iter().any(|o| o.step == sc.step) {
                        return Err(ReelError::validation(format!(
                            "stepper '{}' has two showcases on step {}",
                            s.id, sc.step
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/layout.rs"]
mod tests;
