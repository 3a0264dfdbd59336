use crate::config::TimelineConfig;
use crate::timeline::Timeline;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Pan offset (pixels) and zoom scale (pixels per unit), per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub offset: Vec2,
    pub scale: Vec2,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            offset: Vec2::new(0.0, 0.0),
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl ViewState {
    /// Set the scale on one axis, floored at `min_scale`.
    pub fn with_scale(mut self, axis: Axis, scale: f32, min_scale: f32) -> Self {
        let floor = min_scale.max(f32::MIN_POSITIVE);
        let scale = if scale.is_finite() { scale.max(floor) } else { floor };
        self.scale.set(axis, scale);
        self
    }

    /// Zoom one axis by `amount` keeping the content under `cursor` fixed.
    ///
    /// `cursor` and `area_origin` are screen coordinates along `axis`. The
    /// resulting offset never goes positive, so content cannot be dragged
    /// away from the area origin.
    pub fn zoomed_at(
        self,
        axis: Axis,
        cursor: f32,
        area_origin: f32,
        amount: f32,
        min_scale: f32,
    ) -> Self {
        let old_scale = self.scale.get(axis);
        let mut next = self.with_scale(axis, old_scale + amount, min_scale);
        let new_scale = next.scale.get(axis);

        let relative = cursor - area_origin;
        let offset = self.offset.get(axis);
        let zoomed = relative - (relative - offset) * (new_scale / old_scale);
        next.offset.set(axis, zoomed.min(0.0));
        next
    }

    /// Offset after a middle-button pan, clamped to the scrollable content.
    pub fn panned(mut self, before: Vec2, delta: Vec2, bounds: &ScrollBounds) -> Self {
        self.offset.x = bounds.horizontal.clamp_offset(before.x + delta.x);
        self.offset.y = bounds.vertical.clamp_offset(before.y + delta.y);
        self
    }

    /// Offset after setting a scrollbar value; offset is the negated value.
    pub fn scrolled_to(mut self, axis: Axis, value: f32, bounds: &ScrollBounds) -> Self {
        let value = bounds.get(axis).clamp(value);
        self.offset.set(axis, -value);
        self
    }
}

/// One scrollbar: a value clamped to `[min, max]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollRange {
    pub min: f32,
    pub max: f32,
    pub value: f32,
}

impl ScrollRange {
    pub fn new(min: f32, max: f32, value: f32) -> Self {
        let mut range = Self { min, max, value };
        range.value = range.clamp(value);
        range
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max.max(self.min))
    }

    /// Offsets live on the negative side of the scrollbar value.
    pub fn clamp_offset(&self, offset: f32) -> f32 {
        -self.clamp(-offset)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollBounds {
    pub horizontal: ScrollRange,
    pub vertical: ScrollRange,
}

impl ScrollBounds {
    /// Derive scrollbar ranges from content extents and the current view.
    pub fn measure(timeline: &Timeline, config: &TimelineConfig, view: &ViewState) -> Self {
        let full_height = timeline.tracks.len() as f32
            * (config.track_height + config.track_spacing)
            * view.scale.y;
        let full_width = timeline.content_end() * view.scale.x;
        Self {
            horizontal: ScrollRange::new(0.0, full_width, -view.offset.x),
            vertical: ScrollRange::new(0.0, full_height, -view.offset.y),
        }
    }

    pub fn get(&self, axis: Axis) -> &ScrollRange {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }
}
