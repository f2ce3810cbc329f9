use cairo::{Context, LineCap};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use ringslide::{Color, Rect, RenderParams};
use std::f64::consts::PI;

/// Paints the track, the filled arc and the thumb. Counter-clockwise
/// sliders are drawn clockwise under a horizontal mirror.
pub fn draw(
    cr: &Context,
    params: &RenderParams,
    thumb: Option<&Pixbuf>,
) -> Result<(), cairo::Error> {
    cr.save()?;

    if !params.clockwise {
        let mirror = params.arc_rect.center();
        cr.translate(mirror.x, mirror.y);
        cr.scale(-1.0, 1.0);
        cr.translate(-mirror.x, -mirror.y);
    }

    cr.set_line_width(params.line_width);
    cr.set_line_cap(if params.round_edges {
        LineCap::Round
    } else {
        LineCap::Square
    });

    stroke_arc(cr, params, params.sweep_angle, params.track_color)?;
    stroke_arc(cr, params, params.progress_sweep, params.progress_color)?;

    if let Some(rect) = params.thumb_rect {
        draw_thumb(cr, rect, thumb, params.progress_color)?;
    }

    cr.restore()
}

fn set_color(cr: &Context, color: Color) {
    let (r, g, b, a) = color.to_unit().into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn stroke_arc(
    cr: &Context,
    params: &RenderParams,
    sweep: f64,
    color: Color,
) -> Result<(), cairo::Error> {
    let radius = params.arc_rect.width() / 2.0;
    if sweep <= 0.0 || radius <= 0.0 {
        return Ok(());
    }

    let start = params.start_angle.to_radians();
    let center = params.arc_rect.center();

    set_color(cr, color);
    cr.new_path();
    cr.arc(center.x, center.y, radius, start, start + sweep.to_radians());
    cr.stroke()
}

fn draw_thumb(
    cr: &Context,
    rect: Rect,
    pixbuf: Option<&Pixbuf>,
    fallback: Color,
) -> Result<(), cairo::Error> {
    match pixbuf {
        Some(pixbuf) => {
            cr.save()?;
            cr.set_source_pixbuf(pixbuf, rect.left, rect.top);
            cr.rectangle(rect.left, rect.top, rect.width(), rect.height());
            cr.fill()?;
            cr.restore()
        }
        // sized thumb from config but no image: plain dot
        None => {
            let center = rect.center();
            set_color(cr, fallback);
            cr.new_path();
            cr.arc(center.x, center.y, rect.width() / 2.0, 0.0, 2.0 * PI);
            cr.fill()
        }
    }
}
