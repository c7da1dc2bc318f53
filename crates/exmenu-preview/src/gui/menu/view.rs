use super::model::Preview;
use super::{IconCache, LABEL_FONT_SIZE, LINE_WIDTH};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use exmenu::geometry::{Point, Rect};
use exmenu::render::{Canvas, IconRef, Paint};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;

/// Cairo angle (radians from +x, clockwise on screen) for a menu angle.
fn screen_angle(degrees: f64) -> f64 {
    (degrees - 90.0).to_radians()
}

struct CairoCanvas<'a> {
    cr: &'a Context,
    colors: &'a ThemeColors,
    icons: &'a IconCache,
}

impl<'a> CairoCanvas<'a> {
    fn new(cr: &'a Context, colors: &'a ThemeColors, icons: &'a IconCache) -> Self {
        Self { cr, colors, icons }
    }

    fn set_color(&self, color: Srgba<f64>) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }

    fn draw_pixbuf(&self, pixbuf: &Pixbuf, rect: Rect) -> Result<(), cairo::Error> {
        let (sx, sy) = (
            rect.width / pixbuf.width() as f64,
            rect.height / pixbuf.height() as f64,
        );

        self.cr.save()?;
        self.cr.translate(rect.x, rect.y);
        self.cr.scale(sx, sy);
        self.cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        self.cr.paint()?;
        self.cr.restore()
    }
}

impl Canvas for CairoCanvas<'_> {
    type Error = cairo::Error;

    fn fill_disc(&mut self, center: Point, radius: f64, paint: Paint) -> Result<(), cairo::Error> {
        self.set_color(self.colors.paint(paint));
        self.cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        self.cr.fill()
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f64,
        paint: Paint,
    ) -> Result<(), cairo::Error> {
        self.set_color(self.colors.paint(paint));
        self.cr.set_line_width(LINE_WIDTH);
        self.cr.new_path();
        self.cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        self.cr.stroke()
    }

    fn fill_sector(
        &mut self,
        center: Point,
        radius: f64,
        start: f64,
        span: f64,
        paint: Paint,
    ) -> Result<(), cairo::Error> {
        let from = screen_angle(start);
        self.set_color(self.colors.paint(paint));
        self.cr.move_to(center.x, center.y);
        self.cr
            .arc(center.x, center.y, radius, from, from + span.to_radians());
        self.cr.close_path();
        self.cr.fill()
    }

    fn line(&mut self, from: Point, to: Point, paint: Paint) -> Result<(), cairo::Error> {
        self.set_color(self.colors.paint(paint));
        self.cr.set_line_width(LINE_WIDTH);
        self.cr.move_to(from.x, from.y);
        self.cr.line_to(to.x, to.y);
        self.cr.stroke()
    }

    fn blit(&mut self, icon: IconRef<'_>, rect: Rect) -> Result<(), cairo::Error> {
        match self.icons.get(icon) {
            Some(pixbuf) => self.draw_pixbuf(pixbuf, rect),
            None => Ok(()),
        }
    }

    fn label(&mut self, text: &str, rect: Rect) -> Result<(), cairo::Error> {
        self.set_color(self.colors.label);
        self.cr
            .select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        self.cr.set_font_size(LABEL_FONT_SIZE);
        if let Ok(ext) = self.cr.text_extents(text) {
            // top-centred under the icon
            self.cr.move_to(
                rect.x + (rect.width - ext.width()) / 2.0 - ext.x_bearing(),
                rect.y - ext.y_bearing(),
            );
            self.cr.show_text(text)?;
        }
        Ok(())
    }
}

pub fn draw(cr: &Context, preview: &Preview, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let mut canvas = CairoCanvas::new(cr, colors, &preview.icons);
    preview
        .session
        .render(&preview.layout, &preview.avatar, &preview.store, &mut canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use exmenu::geometry::direction;

    #[test]
    fn test_screen_angle_matches_menu_direction() {
        for degrees in [0.0, 45.0, 90.0, 180.0, 300.0] {
            let a = screen_angle(degrees);
            let d = direction(degrees);
            assert!((a.cos() - d.x).abs() < 1e-9);
            assert!((a.sin() - d.y).abs() < 1e-9);
        }
    }
}
