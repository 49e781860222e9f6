use super::model::WheelGeometry;
use super::{
    HUB_RADIUS_FACTOR, LABEL_FONT_FACTOR, LABEL_MIN_FONT_SIZE, LABEL_RIM_GAP_FACTOR,
    OUTLINE_WIDTH_FACTOR, POINTER_SIZE,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use spindle::{Color, EntryList, Slice};
use std::f64::consts::PI;
use std::iter::zip;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Traces the wedge of `slice` around the origin.
fn slice_path(cr: &Context, slice: &Slice, radius: f64) {
    cr.move_to(0.0, 0.0);
    cr.arc(
        0.0,
        0.0,
        radius,
        slice.start.to_radians(),
        slice.end.to_radians(),
    );
    cr.close_path();
}

struct WheelRenderer<'a> {
    entries: &'a EntryList,
    colors: &'a [Color],
    geometry: WheelGeometry,
    rotation: f64,
}

impl<'a> WheelRenderer<'a> {
    fn draw(&self, cr: &Context, theme: &ThemeColors) -> Result<(), cairo::Error> {
        if self.entries.is_empty() {
            self.draw_empty(cr, theme)?;
        } else {
            cr.save()?;
            cr.translate(self.geometry.center.x, self.geometry.center.y);
            cr.rotate(self.rotation.to_radians());
            self.draw_slices(cr)?;
            self.draw_outlines(cr, theme)?;
            self.draw_labels(cr, theme)?;
            cr.restore()?;
            self.draw_hub(cr, theme)?;
        }
        self.draw_pointer(cr, theme)
    }

    fn draw_empty(&self, cr: &Context, theme: &ThemeColors) -> Result<(), cairo::Error> {
        set_source(cr, theme.empty_wheel);
        cr.arc(
            self.geometry.center.x,
            self.geometry.center.y,
            self.geometry.radius,
            0.0,
            2.0 * PI,
        );
        cr.fill()
    }

    fn draw_slices(&self, cr: &Context) -> Result<(), cairo::Error> {
        for (slice, color) in zip(self.entries.slices(), self.colors) {
            let (r, g, b) = color.to_unit();
            cr.set_source_rgb(r, g, b);
            slice_path(cr, &slice, self.geometry.radius);
            cr.fill()?;
        }
        Ok(())
    }

    fn draw_outlines(&self, cr: &Context, theme: &ThemeColors) -> Result<(), cairo::Error> {
        // a lone slice is the whole disc
        if self.entries.len() < 2 {
            return Ok(());
        }
        set_source(cr, theme.outline);
        cr.set_line_width(self.geometry.radius * OUTLINE_WIDTH_FACTOR);
        for slice in self.entries.slices() {
            slice_path(cr, &slice, self.geometry.radius);
            cr.stroke()?;
        }
        Ok(())
    }

    fn draw_labels(&self, cr: &Context, theme: &ThemeColors) -> Result<(), cairo::Error> {
        let radius = self.geometry.radius;
        let outer = radius * (1.0 - LABEL_RIM_GAP_FACTOR);
        let inner = radius * HUB_RADIUS_FACTOR * 1.5;

        set_source(cr, theme.label);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);

        for (entry, slice) in zip(self.entries.iter(), self.entries.slices()) {
            let text = entry.label().as_str();

            // shrink long labels until they fit between hub and rim
            let mut size = radius * LABEL_FONT_FACTOR;
            cr.set_font_size(size);
            let mut extents = cr.text_extents(text)?;
            let available = outer - inner;
            if extents.width() > available && extents.width() > 0.0 {
                size = (size * available / extents.width()).max(LABEL_MIN_FONT_SIZE);
                cr.set_font_size(size);
                extents = cr.text_extents(text)?;
            }

            cr.save()?;
            cr.rotate(slice.middle().to_radians());
            cr.move_to(
                outer - extents.width() - extents.x_bearing(),
                -extents.y_bearing() - extents.height() / 2.0,
            );
            cr.show_text(text)?;
            cr.restore()?;
        }
        Ok(())
    }

    fn draw_hub(&self, cr: &Context, theme: &ThemeColors) -> Result<(), cairo::Error> {
        set_source(cr, theme.hub);
        cr.arc(
            self.geometry.center.x,
            self.geometry.center.y,
            self.geometry.radius * HUB_RADIUS_FACTOR,
            0.0,
            2.0 * PI,
        );
        cr.fill()
    }

    /// Fixed marker at the right edge, pointing at wheel angle 0.
    fn draw_pointer(&self, cr: &Context, theme: &ThemeColors) -> Result<(), cairo::Error> {
        let tip = self.geometry.center.x + self.geometry.radius - POINTER_SIZE * 0.4;
        let base = self.geometry.center.x + self.geometry.radius + POINTER_SIZE * 0.8;
        let y = self.geometry.center.y;

        set_source(cr, theme.pointer);
        cr.move_to(tip, y);
        cr.line_to(base, y - POINTER_SIZE / 2.0);
        cr.line_to(base, y + POINTER_SIZE / 2.0);
        cr.close_path();
        cr.fill()
    }
}

/// Renders the whole wheel: slices back to front, then outlines, labels,
/// hub and pointer. `rotation` is the clockwise turn in degrees.
pub fn draw(
    cr: &Context,
    entries: &EntryList,
    colors: &[Color],
    rotation: f64,
    width: f64,
    height: f64,
    theme: &ThemeColors,
) -> Result<(), cairo::Error> {
    WheelRenderer {
        entries,
        colors,
        geometry: WheelGeometry::fit(width, height),
        rotation,
    }
    .draw(cr, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairo::{Format, ImageSurface};
    use spindle::Label;

    const SIZE: i32 = 200;
    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    /// Draws the wheel offscreen and returns pixels as `0xAARRGGBB`.
    fn render(entries: &EntryList, colors: &[Color], rotation: f64) -> impl Fn(i32, i32) -> u32 {
        let mut surface = ImageSurface::create(Format::ARgb32, SIZE, SIZE).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            draw(
                &cr,
                entries,
                colors,
                rotation,
                SIZE as f64,
                SIZE as f64,
                &ThemeColors::default(),
            )
            .unwrap();
        }
        surface.flush();
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap().to_vec();
        move |x, y| {
            let offset = y as usize * stride + x as usize * 4;
            u32::from_ne_bytes(data[offset..offset + 4].try_into().unwrap())
        }
    }

    fn two_entries() -> EntryList {
        EntryList::from_labels([Label::new("A"), Label::new("B")]).unwrap()
    }

    #[test]
    fn test_first_slice_starts_at_pointer_and_runs_clockwise() {
        let pixel = render(&two_entries(), &[RED, BLUE], 0.0);
        // lower half is slice 0, upper half slice 1
        assert_eq!(pixel(60, 130), 0xffff0000);
        assert_eq!(pixel(60, 70), 0xff0000ff);
    }

    #[test]
    fn test_rotation_turns_slices() {
        let pixel = render(&two_entries(), &[RED, BLUE], 180.0);
        assert_eq!(pixel(60, 130), 0xff0000ff);
        assert_eq!(pixel(60, 70), 0xffff0000);
    }

    #[test]
    fn test_empty_wheel_is_grey() {
        let pixel = render(&EntryList::new(), &[], 0.0);
        let p = pixel(60, 130);
        let (a, r, g, b) = (p >> 24, (p >> 16) & 0xff, (p >> 8) & 0xff, p & 0xff);
        assert_eq!(a, 0xff);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert!(r > 0x40 && r < 0xc0);
    }

    #[test]
    fn test_outside_the_wheel_is_untouched() {
        let pixel = render(&two_entries(), &[RED, BLUE], 0.0);
        assert_eq!(pixel(2, 2), 0);
    }
}
