use crate::{
    animation::interp::ScrollTransform,
    config::StageConfig,
    foundation::core::{Millis, Progress, Span, StepCount, Vec2},
    foundation::error::{ReelError, ReelResult},
    showcase::workflow::{ScriptEntrance, script_entrance},
    showcase::{Showcase, ShowcaseFrame, ShowcaseKind},
    stage::layout::{LayerLayout, PageLayout, ScrollSource, SectionKind},
    stage::marquee::Marquee,
    stage::nav::{NavState, nav_state},
    stage::panels::{PanelPose, PanelStack, PanelTag},
    timeline::clock::{Routed, Wakeup},
    timeline::timers::TimerQueue,
    viewport::gate::{GateEdge, RevealGate, RevealStyle, VisibilityGate},
    viewport::scroll::{ScrollAnchors, ScrollBus, ScrollFrame, ScrollTrack, sticky_span},
    viewport::stepper::{CardStack, Stepper},
};

/// Style of one animated element.
///
/// `translate` is in pixels, `translate_pct` in percent of the element's own size.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StyleRecord {
    /// Element name, unique within its section.
    pub element: String,
    /// Translation in pixels.
    pub translate: Vec2,
    /// Translation in percent.
    pub translate_pct: Vec2,
    /// Uniform scale.
    pub scale: f64,
    /// Opacity.
    pub opacity: f64,
    /// Brightness filter.
    pub brightness: f64,
    /// Grayscale filter.
    pub grayscale: f64,
    /// Blur radius in pixels.
    pub blur: f64,
    /// Stacking order.
    pub z_index: i32,
    /// Sticky offset below the stack's pin line, in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky_top: Option<f64>,
    /// Dim overlay on top of the element.
    pub overlay: bool,
    /// Whether the element takes pointer input.
    pub interactive: bool,
    /// Showcase drawn inside the element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showcase: Option<ShowcaseFrame>,
    /// One-shot pointer entrance, on the first workflow panel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrance: Option<ScriptEntrance>,
}

impl StyleRecord {
    /// Identity style for `element`.
    pub fn identity(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            translate: Vec2::ZERO,
            translate_pct: Vec2::ZERO,
            scale: 1.0,
            opacity: 1.0,
            brightness: 1.0,
            grayscale: 0.0,
            blur: 0.0,
            z_index: 0,
            sticky_top: None,
            overlay: false,
            interactive: true,
            showcase: None,
            entrance: None,
        }
    }

    fn from_panel(element: String, pose: PanelPose) -> Self {
        Self {
            translate_pct: Vec2::new(0.0, pose.y_pct),
            scale: pose.scale,
            opacity: pose.opacity,
            brightness: pose.brightness,
            grayscale: pose.grayscale,
            z_index: pose.z_index,
            overlay: pose.overlay,
            interactive: pose.interactive,
            ..Self::identity(element)
        }
    }

    fn with_layer(self, layer: &LayerLayout, v: f64) -> Self {
        let eval = |t: &Option<ScrollTransform>, default: f64| t.as_ref().map_or(default, |t| t.sample(v));
        Self {
            translate: Vec2::new(0.0, eval(&layer.translate_y, 0.0)),
            scale: eval(&layer.scale, 1.0),
            opacity: eval(&layer.opacity, 1.0),
            blur: eval(&layer.blur, 0.0),
            interactive: layer.interactive.at(v),
            ..self
        }
    }
}

/// Card position inside a sticky stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardSlot {
    /// Stack geometry.
    pub stack: CardStack,
    /// Card index.
    pub index: usize,
}

/// Style of a showcase card computed from inputs alone.
///
/// `elapsed_ms` is the time since the card's gate opened and is ignored when `visible` is false.
/// A [`Stage`] produces the same record for the same inputs.
pub fn showcase_style(
    kind: ShowcaseKind,
    holds: &[u64],
    slot: Option<CardSlot>,
    elapsed_ms: u64,
    progress: Progress,
    visible: bool,
) -> ReelResult<StyleRecord> {
    let showcase = Showcase::new(kind, holds)?;
    let frame = showcase.sample(visible.then_some(elapsed_ms));
    Ok(card_record(kind, slot, progress, frame))
}

fn card_record(
    kind: ShowcaseKind,
    slot: Option<CardSlot>,
    progress: Progress,
    frame: ShowcaseFrame,
) -> StyleRecord {
    let mut record = StyleRecord::identity(kind.name());
    if let Some(CardSlot { stack, index }) = slot {
        record.scale = stack.scale(index, progress);
        record.sticky_top = Some(stack.top_offset_px(index));
        record.z_index = i32::try_from(index).unwrap_or(i32::MAX);
    }
    record.showcase = Some(frame);
    record
}

/// Styles of one section.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionStyle {
    /// Section id.
    pub id: String,
    /// Entrance style.
    pub reveal: RevealStyle,
    /// Section scroll progress, for scroll-driven sections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    /// Active step, for stepper sections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<usize>,
    /// Animated elements.
    pub elements: Vec<StyleRecord>,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameStyles {
    /// Host time of the frame.
    pub now: Millis,
    /// Scroll state of the frame.
    pub scroll: ScrollFrame,
    /// Navigation bar.
    pub nav: NavState,
    /// Sections in document order.
    pub sections: Vec<SectionStyle>,
}

/// Stacked cards stick this fraction of the viewport below its top.
const STICKY_TOP_FRACTION: f64 = 0.1;

struct ShowcaseSlot {
    showcase: Showcase,
    /// `None` for stepper panels, which run while their panel is active.
    gate: Option<VisibilityGate>,
    natural: Span,
    /// Sticky container and stack offset, for stacked cards.
    sticky: Option<(Span, f64)>,
    opened_at: Option<Millis>,
}

impl ShowcaseSlot {
    fn span(&self, frame: ScrollFrame) -> Span {
        match self.sticky {
            Some((container, offset)) => {
                let top = STICKY_TOP_FRACTION * frame.viewport_h + offset;
                sticky_span(self.natural, container, frame.scroll_y, top)
            }
            None => self.natural,
        }
    }
}

enum Runtime {
    Reveal,
    Parallax {
        track: Option<ScrollTrack>,
        layers: Vec<LayerLayout>,
    },
    Showcases {
        slots: Vec<usize>,
    },
    CardStack {
        track: ScrollTrack,
        stack: CardStack,
        slots: Vec<usize>,
    },
    Stepper {
        track: ScrollTrack,
        stepper: Stepper,
        panels: PanelStack,
        /// `(step, showcase slot)` pairs.
        slots: Vec<(usize, usize)>,
    },
    Marquee {
        rows: Vec<Marquee>,
    },
}

struct Section {
    id: String,
    span: Span,
    reveal: RevealGate,
    runtime: Runtime,
}

/// Composition root: owns the scroll bus, the timer queue and every gate, clock and stack of
/// one page, and turns (time, scroll) samples into styles.
///
/// Single-threaded and host-driven: call [`Stage::frame`] once per animation frame.
pub struct Stage {
    config: StageConfig,
    layout: PageLayout,
    bus: ScrollBus,
    timers: TimerQueue<(usize, Wakeup)>,
    showcases: Vec<ShowcaseSlot>,
    sections: Vec<Section>,
    last_now: Option<Millis>,
    marquee_paused: bool,
}

impl Stage {
    /// Build a stage for `layout`. Nothing runs until the first frame.
    pub fn new(config: StageConfig, layout: PageLayout) -> ReelResult<Self> {
        config.validate()?;
        layout.validate()?;

        let mut bus = ScrollBus::new(ScrollFrame::new(0.0, layout.viewport_h));
        let mut showcases = Vec::new();
        let mut sections = Vec::with_capacity(layout.sections.len());

        for s in &layout.sections {
            let runtime = match &s.kind {
                SectionKind::Reveal => Runtime::Reveal,
                SectionKind::Parallax { source, layers } => Runtime::Parallax {
                    track: match source {
                        ScrollSource::Page => None,
                        ScrollSource::Section(anchors) => Some(bus.track(s.span, *anchors)),
                    },
                    layers: layers.clone(),
                },
                SectionKind::Showcases { panels } => {
                    let mut slots = Vec::with_capacity(panels.len());
                    for p in panels {
                        slots.push(showcases.len());
                        showcases.push(ShowcaseSlot {
                            showcase: Showcase::new(p.showcase, config.holds(p.showcase))?,
                            gate: Some(VisibilityGate::new(config.gate)),
                            natural: p.span,
                            sticky: None,
                            opened_at: None,
                        });
                    }
                    Runtime::Showcases { slots }
                }
                SectionKind::CardStack { panels } => {
                    let count = StepCount::new(panels.len())?;
                    let stack = config.card_stack_of(count)?;
                    let mut slots = Vec::with_capacity(panels.len());
                    for (i, p) in panels.iter().enumerate() {
                        slots.push(showcases.len());
                        showcases.push(ShowcaseSlot {
                            showcase: Showcase::new(p.showcase, config.holds(p.showcase))?,
                            gate: Some(VisibilityGate::new(config.gate)),
                            natural: p.span,
                            sticky: Some((s.span, stack.top_offset_px(i))),
                            opened_at: None,
                        });
                    }
                    Runtime::CardStack {
                        track: bus.track(s.span, ScrollAnchors::STICKY),
                        stack,
                        slots,
                    }
                }
                SectionKind::Stepper {
                    steps,
                    showcases: panels,
                } => {
                    let mut slots = Vec::with_capacity(panels.len());
                    for p in panels {
                        slots.push((p.step, showcases.len()));
                        showcases.push(ShowcaseSlot {
                            showcase: Showcase::new(p.showcase, config.holds(p.showcase))?,
                            gate: None,
                            natural: s.span,
                            sticky: None,
                            opened_at: None,
                        });
                    }
                    Runtime::Stepper {
                        track: bus.track(s.span, ScrollAnchors::STICKY),
                        stepper: Stepper::new(*steps),
                        panels: PanelStack::new(*steps, config.panel_spring)?,
                        slots,
                    }
                }
                SectionKind::Marquee { rows } => Runtime::Marquee {
                    rows: rows
                        .iter()
                        .map(|d| {
                            Marquee::new(
                                config.marquee.unit_width,
                                config.marquee.duration_ms,
                                *d,
                            )
                        })
                        .collect::<ReelResult<_>>()?,
                },
            };
            sections.push(Section {
                id: s.id.clone(),
                span: s.span,
                reveal: RevealGate::new(config.reveal.margins, config.reveal.duration_ms),
                runtime,
            });
        }

        Ok(Self {
            config,
            layout,
            bus,
            timers: TimerQueue::new(),
            showcases,
            sections,
            last_now: None,
            marquee_paused: false,
        })
    }

    /// Stage for the landing page at viewport height `viewport_h`, with
    /// [`StageConfig::workflow_steps`] workflow panels.
    pub fn landing(config: StageConfig, viewport_h: f64) -> ReelResult<Self> {
        let layout = PageLayout::landing(viewport_h, config.workflow_steps)?;
        Self::new(config, layout)
    }

    /// Active configuration.
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Page layout.
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Pointer hover over the video wall.
    pub fn set_marquee_paused(&mut self, paused: bool) {
        self.marquee_paused = paused;
    }

    /// Number of pending timer wakeups.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Showcases currently running, in page order.
    pub fn running(&self) -> Vec<ShowcaseKind> {
        self.showcases
            .iter()
            .filter(|s| s.showcase.is_active())
            .map(|s| s.showcase.kind())
            .collect()
    }

    /// Time `kind` has been running as of the last frame, if its gate is open.
    pub fn showcase_elapsed(&self, kind: ShowcaseKind) -> Option<u64> {
        let now = self.last_now?;
        self.showcases
            .iter()
            .find(|s| s.showcase.kind() == kind)
            .and_then(|s| s.opened_at)
            .map(|at| now.since(at))
    }

    /// Replace the layout geometry after a resize. Section kinds must stay the same.
    pub fn relayout(&mut self, layout: PageLayout) -> ReelResult<()> {
        layout.validate()?;
        if layout.sections.len() != self.layout.sections.len() {
            return Err(ReelError::validation(
                "relayout must keep the same sections",
            ));
        }
        for (section, s) in self.sections.iter_mut().zip(&layout.sections) {
            if section.id != s.id {
                return Err(ReelError::validation(format!(
                    "relayout expected section '{}', got '{}'",
                    section.id, s.id
                )));
            }
            section.span = s.span;
            match &section.runtime {
                Runtime::Parallax {
                    track: Some(track), ..
                }
                | Runtime::CardStack { track, .. }
                | Runtime::Stepper { track, .. } => track.set_container(s.span),
                _ => {}
            }
            let panels = match &s.kind {
                SectionKind::Showcases { panels } | SectionKind::CardStack { panels } => {
                    panels.as_slice()
                }
                _ => &[],
            };
            let slots: &[usize] = match &section.runtime {
                Runtime::Showcases { slots } | Runtime::CardStack { slots, .. } => slots,
                _ => &[],
            };
            for (slot, p) in slots.iter().zip(panels) {
                if let Some(sc) = self.showcases.get_mut(*slot) {
                    sc.natural = p.span;
                    if let Some((_, offset)) = sc.sticky {
                        sc.sticky = Some((s.span, offset));
                    }
                }
            }
        }
        self.layout = layout;
        Ok(())
    }

    /// Advance to `now` with scroll state `scroll` and return every style.
    ///
    /// Time never runs backwards: an earlier `now` is treated as the last one seen.
    #[tracing::instrument(level = "trace", skip(self, now), fields(now = now.0))]
    pub fn frame(&mut self, now: Millis, scroll: ScrollFrame) -> FrameStyles {
        let now = self.last_now.map_or(now, |last| now.max(last));
        let dt = self.last_now.map_or(0, |last| now.since(last));
        self.last_now = Some(now);

        self.bus.publish(scroll);
        self.deliver_due(now);
        self.update_gates(now, scroll);

        let viewport = scroll.viewport();
        let mut cancelled = false;
        let mut styles = Vec::with_capacity(self.sections.len());
        for section in &mut self.sections {
            section.reveal.update(section.span, viewport, now);
            let mut out = SectionStyle {
                id: section.id.clone(),
                reveal: section.reveal.style(now),
                progress: None,
                step: None,
                elements: Vec::new(),
            };

            match &mut section.runtime {
                Runtime::Reveal => {}
                Runtime::Parallax { track, layers } => {
                    let v = match track {
                        Some(t) => {
                            out.progress = Some(t.progress());
                            t.progress().get()
                        }
                        None => scroll.scroll_y,
                    };
                    out.elements = layers
                        .iter()
                        .map(|l| StyleRecord::identity(l.element.clone()).with_layer(l, v))
                        .collect();
                }
                Runtime::Showcases { slots } => {
                    out.elements = slots
                        .iter()
                        .filter_map(|i| self.showcases.get(*i))
                        .map(|s| {
                            let kind = s.showcase.kind();
                            card_record(kind, None, Progress::START, s.showcase.frame(now))
                        })
                        .collect();
                }
                Runtime::CardStack { track, stack, slots } => {
                    let progress = track.progress();
                    out.progress = Some(progress);
                    out.elements = slots
                        .iter()
                        .enumerate()
                        .filter_map(|(index, i)| Some((index, self.showcases.get(*i)?)))
                        .map(|(index, s)| {
                            let slot = CardSlot {
                                stack: *stack,
                                index,
                            };
                            card_record(s.showcase.kind(), Some(slot), progress, s.showcase.frame(now))
                        })
                        .collect();
                }
                Runtime::Stepper {
                    track,
                    stepper,
                    panels,
                    slots,
                } => {
                    let progress = track.progress();
                    if let Some(step) = stepper.update(progress) {
                        tracing::debug!(section = %section.id, step, "workflow step changed");
                        panels.set_active(step);
                    }
                    panels.step(dt as f64);
                    let current = stepper.current();
                    let on_screen = section.span.overlap(viewport) > 0.0;

                    for &(step, idx) in slots.iter() {
                        let Some(slot) = self.showcases.get_mut(idx) else {
                            continue;
                        };
                        let live = on_screen && PanelTag::of(step, current) == PanelTag::Active;
                        if live && !slot.showcase.is_active() {
                            tracing::debug!(
                                showcase = %slot.showcase.kind(),
                                step,
                                "panel showcase started"
                            );
                            let mut sched = Routed::new(&mut self.timers, idx);
                            slot.showcase.activate(now, &mut sched);
                            slot.opened_at = Some(now);
                        } else if !live && slot.showcase.deactivate() {
                            tracing::debug!(
                                showcase = %slot.showcase.kind(),
                                step,
                                "panel showcase stopped"
                            );
                            slot.opened_at = None;
                            cancelled = true;
                        }
                    }

                    let entered = section.reveal.revealed_at().map(|at| now.since(at));
                    out.progress = Some(progress);
                    out.step = Some(current);
                    out.elements = panels
                        .poses()
                        .into_iter()
                        .enumerate()
                        .map(|(i, pose)| {
                            let mut record = StyleRecord::from_panel(format!("step-{i}"), pose);
                            record.showcase = slots
                                .iter()
                                .find(|(step, _)| *step == i)
                                .and_then(|(_, idx)| self.showcases.get(*idx))
                                .map(|s| s.showcase.frame(now));
                            if i == 0 {
                                record.entrance = Some(script_entrance(entered));
                            }
                            record
                        })
                        .collect();
                }
                Runtime::Marquee { rows } => {
                    out.elements = rows
                        .iter_mut()
                        .enumerate()
                        .map(|(i, row)| {
                            row.set_paused(self.marquee_paused);
                            row.tick(dt);
                            StyleRecord {
                                translate: Vec2::new(row.offset(), 0.0),
                                ..StyleRecord::identity(format!("row-{i}"))
                            }
                        })
                        .collect();
                }
            }
            styles.push(out);
        }
        if cancelled {
            self.timers.retain(|(_, w)| w.is_live());
        }

        FrameStyles {
            now,
            scroll,
            nav: nav_state(&self.layout, scroll),
            sections: styles,
        }
    }

    /// Tear down: close every gate and cancel every run.
    pub fn unmount(&mut self) {
        for slot in &mut self.showcases {
            if let Some(gate) = &mut slot.gate {
                gate.close();
            }
            slot.showcase.deactivate();
            slot.opened_at = None;
        }
        self.timers.retain(|(_, w)| w.is_live());
        tracing::debug!("stage unmounted");
    }

    fn deliver_due(&mut self, now: Millis) {
        while let Some(fired) = self.timers.pop_until(now) {
            let (idx, wakeup) = fired.payload;
            let Some(slot) = self.showcases.get_mut(idx) else {
                continue;
            };
            let mut sched = Routed::new(&mut self.timers, idx);
            if let Some(entered) = slot.showcase.fire(wakeup, fired.at, &mut sched) {
                tracing::trace!(
                    showcase = %slot.showcase.kind(),
                    phase = entered.phase,
                    cycle = entered.cycle,
                    "showcase phase"
                );
            }
        }
    }

    fn update_gates(&mut self, now: Millis, scroll: ScrollFrame) {
        let viewport = scroll.viewport();
        let mut cancelled = false;
        for (idx, slot) in self.showcases.iter_mut().enumerate() {
            let span = slot.span(scroll);
            let Some(gate) = &mut slot.gate else {
                continue;
            };
            match gate.update(span, viewport) {
                Some(GateEdge::Entered) => {
                    tracing::debug!(showcase = %slot.showcase.kind(), "gate entered");
                    let mut sched = Routed::new(&mut self.timers, idx);
                    slot.showcase.activate(now, &mut sched);
                    slot.opened_at = Some(now);
                }
                Some(GateEdge::Exited) => {
                    tracing::debug!(showcase = %slot.showcase.kind(), "gate exited");
                    slot.showcase.deactivate();
                    slot.opened_at = None;
                    cancelled = true;
                }
                None => {}
            }
        }
        if cancelled {
            self.timers.retain(|(_, w)| w.is_live());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/director.rs"]
mod tests;
