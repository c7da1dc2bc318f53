use exmenu::render::Paint;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub disc: Srgba<f64>,
    pub rim: Srgba<f64>,
    pub highlight: Srgba<f64>,
    pub separator: Srgba<f64>,
    pub label: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            disc: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(0.0, 0.2, 0.2, 1.0),
                None,
            ),
            rim: Self::lookup_color(
                context,
                "borders",
                Srgba::new(0.0, 0.3, 0.3, 1.0),
                None,
            ),
            highlight: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.0, 0.3, 0.3, 0.9),
                Some(0.6),
            ),
            separator: Self::lookup_color(
                context,
                "borders",
                Srgba::new(0.0, 0.3, 0.3, 1.0),
                None,
            ),
            label: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.95, 0.95, 0.95, 1.0),
                None,
            ),
        }
    }

    pub fn paint(&self, paint: Paint) -> Srgba<f64> {
        match paint {
            Paint::Disc => self.disc,
            Paint::Rim => self.rim,
            Paint::Highlight => self.highlight,
            Paint::Separator => self.separator,
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.exmenu-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
