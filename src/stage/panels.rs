use crate::{
    animation::spring::{SpringParams, SpringValue},
    foundation::core::StepCount,
    foundation::error::ReelResult,
};

/// Where a panel sits relative to the active one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelTag {
    /// Already stepped through.
    Past,
    /// The panel on stage.
    Active,
    /// Still to come.
    Future,
}

impl PanelTag {
    /// Tag of panel `index` when `active` is on stage.
    pub fn of(index: usize, active: usize) -> Self {
        match index.cmp(&active) {
            std::cmp::Ordering::Less => Self::Past,
            std::cmp::Ordering::Equal => Self::Active,
            std::cmp::Ordering::Greater => Self::Future,
        }
    }
}

/// Visual pose of one panel.
///
/// `y_pct` is a translation in percent of the panel's own height. Filter values follow CSS:
/// brightness `1` is unfiltered, grayscale `0` is full color.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PanelPose {
    /// Tag the pose was derived from.
    pub tag: PanelTag,
    /// Vertical translation in percent.
    pub y_pct: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Brightness filter.
    pub brightness: f64,
    /// Grayscale filter.
    pub grayscale: f64,
    /// Dim overlay drawn over upcoming panels.
    pub overlay: bool,
    /// Only the active panel takes pointer input.
    pub interactive: bool,
    /// Stacking order; the active panel is always on top.
    pub z_index: i32,
}

impl PanelPose {
    /// Resting pose of panel `index` with `active` on stage.
    pub fn target(index: usize, active: usize) -> Self {
        let tag = PanelTag::of(index, active);
        let distance = index.abs_diff(active);
        let z_index = match tag {
            PanelTag::Active => 10,
            _ => 10i32.saturating_sub(i32::try_from(distance).unwrap_or(i32::MAX)),
        };
        match tag {
            PanelTag::Past => Self {
                tag,
                y_pct: -120.0,
                scale: 0.9,
                opacity: 0.0,
                brightness: 0.5,
                grayscale: 1.0,
                overlay: false,
                interactive: false,
                z_index,
            },
            PanelTag::Active => Self {
                tag,
                y_pct: 0.0,
                scale: 1.0,
                opacity: 1.0,
                brightness: 1.0,
                grayscale: 0.0,
                overlay: false,
                interactive: true,
                z_index,
            },
            PanelTag::Future => Self {
                tag,
                y_pct: distance as f64 * 110.0,
                scale: 0.9,
                opacity: 0.4,
                brightness: 0.5,
                grayscale: 1.0,
                overlay: true,
                interactive: false,
                z_index,
            },
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PanelMotion {
    y_pct: SpringValue,
    scale: SpringValue,
    opacity: SpringValue,
    brightness: SpringValue,
    grayscale: SpringValue,
}

impl PanelMotion {
    fn resting(pose: PanelPose, params: SpringParams) -> Self {
        Self {
            y_pct: SpringValue::at_rest(pose.y_pct, params),
            scale: SpringValue::at_rest(pose.scale, params),
            opacity: SpringValue::at_rest(pose.opacity, params),
            brightness: SpringValue::at_rest(pose.brightness, params),
            grayscale: SpringValue::at_rest(pose.grayscale, params),
        }
    }

    fn springs_mut(&mut self) -> [&mut SpringValue; 5] {
        [
            &mut self.y_pct,
            &mut self.scale,
            &mut self.opacity,
            &mut self.brightness,
            &mut self.grayscale,
        ]
    }

    fn retarget(&mut self, pose: PanelPose) {
        self.y_pct.set_target(pose.y_pct);
        self.scale.set_target(pose.scale);
        self.opacity.set_target(pose.opacity);
        self.brightness.set_target(pose.brightness);
        self.grayscale.set_target(pose.grayscale);
    }
}

/// Stack of full-size panels, one on stage at a time, springing between poses.
///
/// Discrete attributes (tag, overlay, interactivity, z-order) switch as soon as the active panel
/// changes; continuous ones follow springs that keep their position and velocity when retargeted
/// mid-flight.
#[derive(Clone, Debug)]
pub struct PanelStack {
    active: usize,
    motions: Vec<PanelMotion>,
}

impl PanelStack {
    /// A stack of `count` panels at rest with panel 0 active.
    pub fn new(count: StepCount, params: SpringParams) -> ReelResult<Self> {
        params.validate()?;
        let motions = (0..count.get())
            .map(|i| PanelMotion::resting(PanelPose::target(i, 0), params))
            .collect();
        Ok(Self { active: 0, motions })
    }

    /// Number of panels.
    pub fn len(&self) -> usize {
        self.motions.len()
    }

    /// Always false; a stack has at least one panel.
    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
    }

    /// The panel on stage.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Bring `index` on stage (clamped to the last panel). Returns whether the active panel
    /// changed.
    pub fn set_active(&mut self, index: usize) -> bool {
        let index = index.min(self.motions.len().saturating_sub(1));
        if index == self.active {
            return false;
        }
        tracing::debug!(from = self.active, to = index, "panel stack retargeted");
        self.active = index;
        for (i, motion) in self.motions.iter_mut().enumerate() {
            motion.retarget(PanelPose::target(i, index));
        }
        true
    }

    /// Advance every spring by `dt_ms`.
    pub fn step(&mut self, dt_ms: f64) {
        for motion in &mut self.motions {
            for spring in motion.springs_mut() {
                spring.step(dt_ms);
            }
        }
    }

    /// Whether every spring has come to rest.
    pub fn is_settled(&self) -> bool {
        self.motions.iter().all(|m| {
            m.y_pct.is_settled()
                && m.scale.is_settled()
                && m.opacity.is_settled()
                && m.brightness.is_settled()
                && m.grayscale.is_settled()
        })
    }

    /// Current animated poses, in panel order.
    pub fn poses(&self) -> Vec<PanelPose> {
        self.motions
            .iter()
            .enumerate()
            .map(|(i, m)| PanelPose {
                y_pct: m.y_pct.value(),
                scale: m.scale.value(),
                opacity: m.opacity.value(),
                brightness: m.brightness.value(),
                grayscale: m.grayscale.value(),
                ..PanelPose::target(i, self.active)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/panels.rs"]
mod tests;
