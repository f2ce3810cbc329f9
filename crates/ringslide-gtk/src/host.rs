use gdk_pixbuf::Pixbuf;
use gtk::prelude::*;
use gtk4 as gtk;
use ringslide::{ResourceId, SliderError, SliderHost, ThumbSize, ThumbSource};
use std::path::PathBuf;

/// Bridges slider requests onto the drawing area and its drag gesture.
pub struct GtkHost {
    area: gtk::DrawingArea,
    drag: gtk::GestureDrag,
}

impl GtkHost {
    pub fn new(area: gtk::DrawingArea, drag: gtk::GestureDrag) -> Self {
        Self { area, drag }
    }
}

impl SliderHost for GtkHost {
    fn request_redraw(&self) {
        self.area.queue_draw();
    }

    fn disallow_ancestor_intercept(&self, disallow: bool) {
        // claiming the sequence keeps parent scrollers from taking it over
        if disallow {
            self.drag.set_state(gtk::EventSequenceState::Claimed);
        }
    }
}

/// Loads thumb images from files, resolving ids relative to `root`.
/// Absolute ids are used as they are.
#[derive(Debug, Clone)]
pub struct PixbufSource {
    root: PathBuf,
}

impl PixbufSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, id: &ResourceId) -> PathBuf {
        self.root.join(id.as_str())
    }
}

fn dimension(px: i32) -> u32 {
    u32::try_from(px).unwrap_or(0)
}

impl ThumbSource for PixbufSource {
    type Image = Pixbuf;

    fn resolve(&self, id: &ResourceId) -> Result<(Pixbuf, ThumbSize), SliderError> {
        let pixbuf = Pixbuf::from_file(self.path(id)).map_err(|e| SliderError::resource(id, e))?;
        let size = ThumbSize::new(dimension(pixbuf.width()), dimension(pixbuf.height()));
        Ok((pixbuf, size))
    }
}
