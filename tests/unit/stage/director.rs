use super::*;

const VH: f64 = 1000.0;

fn stage() -> Stage {
    Stage::landing(StageConfig::default(), VH).unwrap()
}

fn at(y: f64) -> ScrollFrame {
    ScrollFrame::new(y, VH)
}

fn section<'a>(styles: &'a FrameStyles, id: &str) -> &'a SectionStyle {
    styles.sections.iter().find(|s| s.id == id).unwrap()
}

#[test]
fn gates_start_and_stop_showcases() {
    let mut s = stage();
    s.frame(Millis(0), at(0.0));
    assert!(s.running().is_empty());
    assert_eq!(s.pending_timers(), 0);

    // Auto mode panel spans 2100..2800; the gated viewport at 1800 is 2000..2600.
    s.frame(Millis(1_000), at(1_800.0));
    assert_eq!(s.running(), vec![ShowcaseKind::AutoMode]);
    assert_eq!(s.pending_timers(), 1);
    assert_eq!(s.showcase_elapsed(ShowcaseKind::AutoMode), Some(0));

    s.frame(Millis(2_000), at(0.0));
    assert!(s.running().is_empty());
    assert_eq!(s.pending_timers(), 0);
    assert_eq!(s.showcase_elapsed(ShowcaseKind::AutoMode), None);
}

#[test]
fn live_showcase_matches_pure_style() {
    let mut s = stage();
    s.frame(Millis(500), at(0.0));
    let mut now = 700;
    while now < 30_000 {
        let styles = s.frame(Millis(now), at(1_800.0));
        let live = &section(&styles, "features").elements[0];
        let elapsed = s.showcase_elapsed(ShowcaseKind::AutoMode).unwrap();
        assert_eq!(elapsed, now - 700);
        let pure =
            showcase_style(ShowcaseKind::AutoMode, &[], None, elapsed, Progress::START, true)
                .unwrap();
        assert_eq!(*live, pure, "diverged at {now}ms");
        now += 137;
    }
}

#[test]
fn leaving_and_returning_restarts_from_first_phase() {
    let mut s = stage();
    s.frame(Millis(0), at(1_800.0));
    let styles = s.frame(Millis(4_100), at(1_800.0));
    let frame = section(&styles, "features").elements[0].showcase.clone().unwrap();
    assert_eq!(frame.phase, Some("playing"));

    s.frame(Millis(4_200), at(0.0));
    let styles = s.frame(Millis(4_300), at(1_800.0));
    let frame = section(&styles, "features").elements[0].showcase.clone().unwrap();
    assert_eq!(frame.phase, Some("setup"));
    assert_eq!(frame.cycle, 0);
}

#[test]
fn stacked_cards_stay_live_while_pinned() {
    let mut s = stage();
    // Cards 0 and 1 are pinned inside the viewport; card 2 has not reached its pin line.
    s.frame(Millis(0), at(5_000.0));
    assert_eq!(
        s.running(),
        vec![ShowcaseKind::BatchProduction, ShowcaseKind::Consistency]
    );

    let styles = s.frame(Millis(16), at(5_000.0));
    let cards = section(&styles, "advantages");
    assert_eq!(cards.elements.len(), 4);
    assert_eq!(cards.elements[1].sticky_top, Some(25.0));
    assert_eq!(cards.elements[3].z_index, 3);
    assert!(cards.elements[0].scale < 1.0);
    assert!(cards.progress.unwrap().get() > 0.0);
}

#[test]
fn workflow_panels_follow_scroll_step() {
    let mut s = stage();
    // Workflow spans 8800..12800, so sticky progress runs over 8800..11800.
    let mut styles = s.frame(Millis(0), at(10_300.0));
    assert_eq!(section(&styles, "workflow").step, Some(2));
    for t in 1..=300 {
        styles = s.frame(Millis(t * 16), at(10_300.0));
    }
    let panels = &section(&styles, "workflow").elements;
    assert_eq!(panels.len(), 4);
    assert!((panels[2].opacity - 1.0).abs() < 1e-3);
    assert!(panels[2].interactive);
    assert!((panels[0].translate_pct.y + 120.0).abs() < 1e-2);
    assert!(panels[3].overlay);
}

#[test]
fn marquee_scrolls_until_paused() {
    let mut s = stage();
    let row = |styles: &FrameStyles| section(styles, "gallery").elements[0].translate.x;

    let a = row(&s.frame(Millis(0), at(1_000.0)));
    let b = row(&s.frame(Millis(5_000), at(1_000.0)));
    assert!(a != b);

    s.set_marquee_paused(true);
    let c = row(&s.frame(Millis(6_000), at(1_000.0)));
    let d = row(&s.frame(Millis(9_000), at(1_000.0)));
    assert_eq!(c, d);
}

#[test]
fn reveal_latches_on_first_entry() {
    let mut s = stage();
    let styles = s.frame(Millis(0), at(0.0));
    assert_eq!(section(&styles, "tech_specs").reveal, RevealStyle::HIDDEN);

    s.frame(Millis(1_000), at(7_000.0));
    let styles = s.frame(Millis(5_000), at(0.0));
    let shown = section(&styles, "tech_specs").reveal;
    assert!((shown.opacity - 1.0).abs() < 1e-9);
    assert!(shown.translate_y.abs() < 1e-9);
}

#[test]
fn pricing_crossfade_tracks_section_progress() {
    let mut s = stage();
    // Pricing sticky progress runs over 12800..14300.
    let styles = s.frame(Millis(0), at(13_400.0));
    let pricing = section(&styles, "pricing");
    assert!((pricing.progress.unwrap().get() - 0.4).abs() < 1e-9);
    let (membership, credits) = (&pricing.elements[0], &pricing.elements[1]);
    assert!((membership.opacity - 0.5).abs() < 1e-9);
    assert_eq!(credits.opacity, 0.0);
    assert!(membership.interactive && !credits.interactive);
}

#[test]
fn time_never_runs_backwards() {
    let mut s = stage();
    s.frame(Millis(500), at(0.0));
    let styles = s.frame(Millis(100), at(0.0));
    assert_eq!(styles.now, Millis(500));
}

#[test]
fn unmount_cancels_every_run() {
    let mut s = stage();
    s.frame(Millis(0), at(5_000.0));
    assert!(s.pending_timers() > 0);
    s.unmount();
    assert!(s.running().is_empty());
    assert_eq!(s.pending_timers(), 0);
}

#[test]
fn hidden_cards_render_resting_frames() {
    let stack = CardStack::new(StepCount::FOUR, 0.05, 25.0).unwrap();
    let slot = CardSlot { stack, index: 1 };
    let style = showcase_style(
        ShowcaseKind::Consistency,
        &[],
        Some(slot),
        9_999,
        Progress::END,
        false,
    )
    .unwrap();
    let frame = style.showcase.unwrap();
    assert!(!frame.active);
    assert_eq!(frame.cue, 0);
    assert!((style.scale - stack.target_scale(1)).abs() < 1e-9);
    assert_eq!(style.sticky_top, Some(25.0));
}

#[test]
fn relayout_rejects_different_pages() {
    let mut s = stage();
    let mut other = PageLayout::landing(VH, StepCount::FOUR).unwrap();
    other.sections.pop();
    assert!(s.relayout(other).is_err());
    assert!(s.relayout(PageLayout::landing(800.0, StepCount::FOUR).unwrap()).is_ok());
    assert_eq!(s.layout().viewport_h, 800.0);
}

#[test]
fn export_walkthrough_runs_only_on_the_active_last_panel() {
    let mut s = stage();
    // Sticky progress 0.9 puts the last of four panels on stage.
    let styles = s.frame(Millis(0), at(11_500.0));
    assert_eq!(section(&styles, "workflow").step, Some(3));
    assert_eq!(s.running(), vec![ShowcaseKind::ExportSettings]);
    assert_eq!(s.pending_timers(), 1);

    let styles = s.frame(Millis(1_200), at(11_500.0));
    let panels = &section(&styles, "workflow").elements;
    let export = panels[3].showcase.as_ref().unwrap();
    assert_eq!(export.phase, Some("cover"));
    assert!(panels[2].showcase.is_none());

    // Stepping back to panel 2 stops it and drops its wakeup.
    let styles = s.frame(Millis(1_300), at(10_300.0));
    assert!(s.running().is_empty());
    assert_eq!(s.pending_timers(), 0);
    let export = section(&styles, "workflow").elements[3].showcase.clone().unwrap();
    assert!(!export.active);

    let styles = s.frame(Millis(2_000), at(11_500.0));
    let export = section(&styles, "workflow").elements[3].showcase.clone().unwrap();
    assert_eq!((export.phase, export.cycle), (Some("hidden"), 0));
    assert_eq!(s.showcase_elapsed(ShowcaseKind::ExportSettings), Some(0));
}

#[test]
fn export_walkthrough_stops_off_screen() {
    let mut s = stage();
    s.frame(Millis(0), at(11_500.0));
    // Progress stays clamped at the last step, but the section has scrolled away.
    s.frame(Millis(500), at(14_000.0));
    assert!(s.running().is_empty());
    assert_eq!(s.pending_timers(), 0);
}

#[test]
fn first_panel_pointer_enters_after_reveal() {
    let mut s = stage();
    let styles = s.frame(Millis(0), at(0.0));
    let first = &section(&styles, "workflow").elements[0];
    assert!(!first.entrance.unwrap().menu_open);

    s.frame(Millis(1_000), at(8_800.0));
    let styles = s.frame(Millis(1_500), at(8_800.0));
    assert!(!section(&styles, "workflow").elements[0].entrance.unwrap().menu_open);
    let styles = s.frame(Millis(1_800), at(8_800.0));
    let entrance = section(&styles, "workflow").elements[0].entrance.unwrap();
    assert!(entrance.menu_open);
    assert_eq!(entrance.cursor_opacity, 1.0);
    assert!(section(&styles, "workflow").elements[1].entrance.is_none());
}

#[test]
fn configured_step_count_shapes_the_workflow() {
    let config = StageConfig {
        workflow_steps: StepCount::new(3).unwrap(),
        ..StageConfig::default()
    };
    let mut s = Stage::landing(config, VH).unwrap();
    let styles = s.frame(Millis(0), at(11_500.0));
    let workflow = section(&styles, "workflow");
    assert_eq!(workflow.elements.len(), 3);
    assert_eq!(workflow.step, Some(2));
    assert!(workflow.elements[2].showcase.as_ref().unwrap().active);
    assert_eq!(s.running(), vec![ShowcaseKind::ExportSettings]);

    let four = stage().frame(Millis(0), at(11_500.0));
    assert_eq!(section(&four, "workflow").elements.len(), 4);
}
