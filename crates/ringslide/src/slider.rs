use crate::color::Color;
use crate::config::{self, Property, SliderConfig, ThumbSize};
use crate::error::SliderError;
use crate::geometry::{Geometry, Point, Rect, Size};
use crate::host::{NoopHost, ResourceId, SliderHost, ThumbSource};
use crate::touch::{TouchAction, TouchKind, TouchPhase, TouchTracker};

/// How much derived state a property change invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Recompute {
    Nothing,
    Progress,
    Layout,
}

impl Recompute {
    fn for_property(property: Property) -> Self {
        match property {
            Property::Maximum | Property::Progress => Self::Progress,
            Property::StartAngle
            | Property::SweepAngle
            | Property::LineWidth
            | Property::TouchCorrection
            | Property::Thumb => Self::Layout,
            Property::Clockwise
            | Property::RoundEdges
            | Property::TrackColor
            | Property::ProgressColor
            | Property::Enabled => Self::Nothing,
        }
    }
}

/// What a renderer needs to paint one frame.
///
/// Angles are in degrees, clockwise from 3 o'clock. When `clockwise` is
/// false the renderer mirrors the whole drawing horizontally around the
/// center of `arc_rect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub arc_rect: Rect,
    pub center: Point,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub progress_sweep: f64,
    pub thumb_offset: Point,
    /// Where the thumb image goes, if there is one.
    pub thumb_rect: Option<Rect>,
    pub clockwise: bool,
    pub line_width: f64,
    pub round_edges: bool,
    pub track_color: Color,
    pub progress_color: Color,
}

type PropertyObserver = Box<dyn FnMut(Property)>;
type ProgressObserver = Box<dyn FnMut(u32)>;

/// The circular slider: configuration, derived geometry and pointer state.
///
/// Every setter validates first and leaves the slider untouched on error.
/// A successful change recomputes geometry, asks the host for a redraw and
/// only then notifies observers, so callbacks always see consistent state.
pub struct Slider {
    config: SliderConfig,
    size: Option<Size>,
    geometry: Geometry,
    touch: TouchTracker,
    host: Box<dyn SliderHost>,
    property_observers: Vec<PropertyObserver>,
    progress_observers: Vec<ProgressObserver>,
}

impl Default for Slider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Slider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("config", &self.config)
            .field("size", &self.size)
            .field("geometry", &self.geometry)
            .field("touch", &self.touch)
            .finish_non_exhaustive()
    }
}

impl Slider {
    pub fn new() -> Self {
        Self::with_config_unchecked(SliderConfig::default())
    }

    /// Default slider for a display with the given pixel density.
    pub fn with_density(density: f64) -> Result<Self, SliderError> {
        Self::from_config(SliderConfig::with_density(density))
    }

    pub fn from_config(config: SliderConfig) -> Result<Self, SliderError> {
        config.validate()?;
        Ok(Self::with_config_unchecked(config))
    }

    fn with_config_unchecked(config: SliderConfig) -> Self {
        Self {
            geometry: Geometry::derive(&config, None),
            config,
            size: None,
            touch: TouchTracker::default(),
            host: Box::new(NoopHost),
            property_observers: Vec::new(),
            progress_observers: Vec::new(),
        }
    }

    pub fn with_host(mut self, host: impl SliderHost + 'static) -> Self {
        self.set_host(host);
        self
    }

    /// Swaps the host, for embedders whose widgets exist only after the
    /// slider was built.
    pub fn set_host(&mut self, host: impl SliderHost + 'static) {
        self.host = Box::new(host);
    }

    pub fn on_property_changed(&mut self, observer: impl FnMut(Property) + 'static) {
        self.property_observers.push(Box::new(observer));
    }

    pub fn on_progress_changed(&mut self, observer: impl FnMut(u32) + 'static) {
        self.progress_observers.push(Box::new(observer));
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn touch_phase(&self) -> TouchPhase {
        self.touch.phase()
    }

    pub fn maximum(&self) -> u32 {
        self.config.maximum
    }

    pub fn progress(&self) -> u32 {
        self.config.progress
    }

    pub fn start_angle(&self) -> i32 {
        self.config.start_angle
    }

    pub fn sweep_angle(&self) -> i32 {
        self.config.sweep_angle
    }

    pub fn clockwise(&self) -> bool {
        self.config.clockwise
    }

    pub fn line_width(&self) -> f64 {
        self.config.line_width
    }

    pub fn round_edges(&self) -> bool {
        self.config.round_edges
    }

    pub fn touch_correction(&self) -> i32 {
        self.config.touch_correction
    }

    pub fn thumb(&self) -> Option<ThumbSize> {
        self.config.thumb
    }

    pub fn track_color(&self) -> Color {
        self.config.track_color
    }

    pub fn progress_color(&self) -> Color {
        self.config.progress_color
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn set_maximum(&mut self, value: u32) -> Result<(), SliderError> {
        config::check_maximum(value, self.config.progress)?;
        if value != self.config.maximum {
            self.config.maximum = value;
            self.commit(&[Property::Maximum]);
        }
        Ok(())
    }

    pub fn set_progress(&mut self, value: u32) -> Result<(), SliderError> {
        config::check_progress(value, self.config.maximum)?;
        if value != self.config.progress {
            self.config.progress = value;
            self.commit(&[Property::Progress]);
        }
        Ok(())
    }

    pub fn set_start_angle(&mut self, value: i32) -> Result<(), SliderError> {
        config::check_angle(Property::StartAngle, value)?;
        if value != self.config.start_angle {
            self.config.start_angle = value;
            self.commit(&[Property::StartAngle]);
        }
        Ok(())
    }

    pub fn set_sweep_angle(&mut self, value: i32) -> Result<(), SliderError> {
        config::check_angle(Property::SweepAngle, value)?;
        if value != self.config.sweep_angle {
            self.config.sweep_angle = value;
            self.commit(&[Property::SweepAngle]);
        }
        Ok(())
    }

    pub fn set_clockwise(&mut self, value: bool) {
        if value != self.config.clockwise {
            self.config.clockwise = value;
            self.commit(&[Property::Clockwise]);
        }
    }

    pub fn set_line_width(&mut self, value: f64) -> Result<(), SliderError> {
        config::check_line_width(value)?;
        if value != self.config.line_width {
            self.config.line_width = value;
            self.commit(&[Property::LineWidth]);
        }
        Ok(())
    }

    pub fn set_round_edges(&mut self, value: bool) {
        if value != self.config.round_edges {
            self.config.round_edges = value;
            self.commit(&[Property::RoundEdges]);
        }
    }

    pub fn set_touch_correction(&mut self, value: i32) -> Result<(), SliderError> {
        config::check_touch_correction(value)?;
        if value != self.config.touch_correction {
            self.config.touch_correction = value;
            self.commit(&[Property::TouchCorrection]);
        }
        Ok(())
    }

    pub fn set_thumb(&mut self, thumb: Option<ThumbSize>) -> Result<(), SliderError> {
        if let Some(t) = &thumb {
            t.ensure_square()?;
        }
        if thumb != self.config.thumb {
            self.config.thumb = thumb;
            self.commit(&[Property::Thumb]);
        }
        Ok(())
    }

    /// Resolves `id` through `source` and installs it as the thumb. The
    /// resolved image is returned for the renderer to keep.
    pub fn set_thumb_from_image_resource<S: ThumbSource>(
        &mut self,
        source: &S,
        id: &ResourceId,
    ) -> Result<S::Image, SliderError> {
        let (image, size) = source.resolve(id)?;
        self.set_thumb(Some(size))?;
        Ok(image)
    }

    pub fn set_track_color(&mut self, value: Color) {
        if value != self.config.track_color {
            self.config.track_color = value;
            self.commit(&[Property::TrackColor]);
        }
    }

    pub fn set_progress_color(&mut self, value: Color) {
        if value != self.config.progress_color {
            self.config.progress_color = value;
            self.commit(&[Property::ProgressColor]);
        }
    }

    /// Disabling the slider also drops any gesture in progress.
    pub fn set_enabled(&mut self, value: bool) {
        if value == self.config.enabled {
            return;
        }
        if !value && self.touch.reset() {
            self.host.disallow_ancestor_intercept(false);
        }
        self.config.enabled = value;
        self.commit(&[Property::Enabled]);
    }

    /// Replaces the whole configuration at once, notifying each field
    /// that actually changed.
    pub fn apply(&mut self, config: SliderConfig) -> Result<(), SliderError> {
        config.validate()?;
        let changed = self.config.diff(&config);
        if changed.is_empty() {
            return Ok(());
        }

        if !config.enabled && self.touch.reset() {
            self.host.disallow_ancestor_intercept(false);
        }
        self.config = config;
        self.commit(&changed);
        Ok(())
    }

    /// Called by the host once layout is known and on every resize.
    pub fn on_size_known(&mut self, width: f64, height: f64) {
        let size = Size::new(width, height);
        if size.is_degenerate() {
            log::debug!("Degenerate slider size {}x{}", width, height);
        }

        self.size = Some(size);
        self.geometry = Geometry::derive(&self.config, self.size);
        log::debug!("Layout for {}x{}: {:?}", width, height, self.geometry.layout);
        self.host.request_redraw();
    }

    /// Feeds one pointer event. Returns whether the slider claims the
    /// gesture, which is always the case while enabled.
    pub fn on_touch_event(&mut self, kind: TouchKind, x: f64, y: f64) -> bool {
        if !self.config.enabled {
            return false;
        }

        let action = self
            .touch
            .handle(kind, Point::new(x, y), &self.geometry, &self.config);

        match action {
            TouchAction::Ignored => {}
            TouchAction::Pressed { began, progress } => {
                if began {
                    self.host.disallow_ancestor_intercept(true);
                }
                if let Some(value) = progress
                    && let Err(e) = self.set_progress(value)
                {
                    log::warn!("Discarding touch progress {}: {}", value, e);
                }
            }
            TouchAction::Released { was_pressed } => {
                if was_pressed {
                    self.host.disallow_ancestor_intercept(false);
                }
            }
        }

        true
    }

    /// Snapshot for the renderer, `None` until the size is known.
    pub fn render_params(&self) -> Option<RenderParams> {
        let layout = self.geometry.layout?;
        let progress = self.geometry.progress;

        let thumb_rect = self.config.thumb.map(|thumb| {
            let (w, h) = (f64::from(thumb.width), f64::from(thumb.height));
            Rect::from_origin(
                layout.center.x - progress.thumb_offset.x - w / 2.0,
                layout.center.y - progress.thumb_offset.y - h / 2.0,
                w,
                h,
            )
        });

        Some(RenderParams {
            arc_rect: layout.rect,
            center: layout.center,
            start_angle: f64::from(self.config.start_angle),
            sweep_angle: f64::from(self.config.sweep_angle),
            progress_sweep: progress.progress_sweep,
            thumb_offset: progress.thumb_offset,
            thumb_rect,
            clockwise: self.config.clockwise,
            line_width: self.config.line_width,
            round_edges: self.config.round_edges,
            track_color: self.config.track_color,
            progress_color: self.config.progress_color,
        })
    }

    fn commit(&mut self, changed: &[Property]) {
        let scope = changed
            .iter()
            .map(|&p| Recompute::for_property(p))
            .max()
            .unwrap_or(Recompute::Nothing);

        match scope {
            Recompute::Layout => self.geometry = Geometry::derive(&self.config, self.size),
            Recompute::Progress => self.geometry = self.geometry.with_progress(&self.config),
            Recompute::Nothing => {}
        }
        log::debug!("{:?} changed, recomputed {:?}", changed, scope);

        self.host.request_redraw();

        for &property in changed {
            for observer in &mut self.property_observers {
                observer(property);
            }
            if property == Property::Progress {
                let progress = self.config.progress;
                for observer in &mut self.progress_observers {
                    observer(progress);
                }
            }
        }
    }
}
