//! Single-pointer input handling: decides whether an event lands on the
//! active ring and which progress value it selects.

use crate::config::SliderConfig;
use crate::geometry::{Geometry, Point};
use crate::mapper;
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TouchKind {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchPhase {
    #[default]
    Idle,
    Pressed,
}

/// Where a pointer position falls relative to the live arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Outside the active ring, or no layout yet.
    Outside,
    /// On the ring but past either end of the arc.
    OffArc,
    Progress(u32),
}

impl Target {
    pub fn resolve(point: Point, geometry: &Geometry, config: &SliderConfig) -> Self {
        let (Some(layout), Some(ring)) = (geometry.layout, geometry.ring) else {
            return Self::Outside;
        };
        if ring.is_ignorable(layout.center, point) {
            return Self::Outside;
        }

        let angle = mapper::touch_angle(point, layout.center, config.start_angle, config.clockwise);
        mapper::angle_to_progress(angle, config.maximum, config.sweep_angle)
            .map_or(Self::OffArc, Self::Progress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    /// First contact away from the arc; the gesture is not captured.
    Ignored,
    /// The gesture is captured. `began` marks the transition out of idle;
    /// `progress` is the value to assign, if the point selected one.
    Pressed { began: bool, progress: Option<u32> },
    Released { was_pressed: bool },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TouchTracker {
    phase: TouchPhase,
}

impl TouchTracker {
    pub fn phase(&self) -> TouchPhase {
        self.phase
    }

    pub fn reset(&mut self) -> bool {
        let was_pressed = self.phase == TouchPhase::Pressed;
        self.phase = TouchPhase::Idle;
        was_pressed
    }

    pub fn handle(
        &mut self,
        kind: TouchKind,
        point: Point,
        geometry: &Geometry,
        config: &SliderConfig,
    ) -> TouchAction {
        if matches!(kind, TouchKind::Up | TouchKind::Cancel) {
            return TouchAction::Released {
                was_pressed: self.reset(),
            };
        }

        let target = Target::resolve(point, geometry, config);
        let action = match (self.phase, target) {
            (TouchPhase::Idle, Target::Progress(p)) => {
                self.phase = TouchPhase::Pressed;
                TouchAction::Pressed {
                    began: true,
                    progress: Some(p),
                }
            }
            (TouchPhase::Idle, _) => TouchAction::Ignored,
            (TouchPhase::Pressed, Target::Progress(p)) => TouchAction::Pressed {
                began: false,
                progress: Some(p),
            },
            (TouchPhase::Pressed, _) => TouchAction::Pressed {
                began: false,
                progress: None,
            },
        };

        log::trace!("{} at ({}, {}) -> {:?}", kind, point.x, point.y, action);
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    // 204x204 widget, line width 4: arc radius 100 around (102, 102)
    fn setup() -> (Geometry, SliderConfig) {
        let config = SliderConfig {
            maximum: 50,
            touch_correction: 10,
            ..SliderConfig::default()
        };
        (Geometry::derive(&config, Some(Size::new(204.0, 204.0))), config)
    }

    const TOP: Point = Point { x: 102.0, y: 2.0 };
    const CENTER: Point = Point { x: 102.0, y: 102.0 };
    const BOTTOM: Point = Point { x: 102.0, y: 202.0 };

    #[test]
    fn test_touch_kind_parsing() {
        assert_eq!("down".parse::<TouchKind>().unwrap(), TouchKind::Down);
        assert_eq!("CANCEL".parse::<TouchKind>().unwrap(), TouchKind::Cancel);
        assert_eq!(TouchKind::Move.to_string(), "move");
    }

    #[test]
    fn test_resolve_targets() {
        let (geo, config) = setup();
        assert_eq!(Target::resolve(TOP, &geo, &config), Target::Progress(25));
        assert_eq!(Target::resolve(CENTER, &geo, &config), Target::Outside);
        assert_eq!(Target::resolve(BOTTOM, &geo, &config), Target::OffArc);
        assert_eq!(
            Target::resolve(Point::new(202.0, 102.0), &geo, &config),
            Target::Progress(50)
        );
        assert_eq!(
            Target::resolve(TOP, &Geometry::derive(&config, None), &config),
            Target::Outside
        );
    }

    #[test]
    fn test_down_on_ring_presses() {
        let (geo, config) = setup();
        let mut tracker = TouchTracker::default();

        let action = tracker.handle(TouchKind::Down, TOP, &geo, &config);
        assert_eq!(
            action,
            TouchAction::Pressed {
                began: true,
                progress: Some(25)
            }
        );
        assert_eq!(tracker.phase(), TouchPhase::Pressed);
    }

    #[test]
    fn test_first_contact_off_ring_is_ignored() {
        let (geo, config) = setup();
        let mut tracker = TouchTracker::default();

        assert_eq!(
            tracker.handle(TouchKind::Down, CENTER, &geo, &config),
            TouchAction::Ignored
        );
        assert_eq!(
            tracker.handle(TouchKind::Move, BOTTOM, &geo, &config),
            TouchAction::Ignored
        );
        assert_eq!(tracker.phase(), TouchPhase::Idle);
    }

    #[test]
    fn test_capture_survives_leaving_the_ring() {
        let (geo, config) = setup();
        let mut tracker = TouchTracker::default();
        tracker.handle(TouchKind::Down, TOP, &geo, &config);

        assert_eq!(
            tracker.handle(TouchKind::Move, CENTER, &geo, &config),
            TouchAction::Pressed {
                began: false,
                progress: None
            }
        );
        assert_eq!(
            tracker.handle(TouchKind::Move, BOTTOM, &geo, &config),
            TouchAction::Pressed {
                began: false,
                progress: None
            }
        );

        let left = Point::new(2.0, 102.0);
        assert_eq!(
            tracker.handle(TouchKind::Move, left, &geo, &config),
            TouchAction::Pressed {
                began: false,
                progress: Some(0)
            }
        );
    }

    #[test]
    fn test_release() {
        let (geo, config) = setup();
        let mut tracker = TouchTracker::default();

        assert_eq!(
            tracker.handle(TouchKind::Up, TOP, &geo, &config),
            TouchAction::Released { was_pressed: false }
        );

        tracker.handle(TouchKind::Down, TOP, &geo, &config);
        assert_eq!(
            tracker.handle(TouchKind::Cancel, TOP, &geo, &config),
            TouchAction::Released { was_pressed: true }
        );
        assert_eq!(tracker.phase(), TouchPhase::Idle);
    }
}
