use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Colors for the parts of the wheel that don't come from the slice palette.
pub struct ThemeColors {
    pub outline: Srgba<f64>,
    pub empty_wheel: Srgba<f64>,
    pub label: Srgba<f64>,
    pub hub: Srgba<f64>,
    pub pointer: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            outline: Srgba::new(1.0, 1.0, 1.0, 1.0),
            empty_wheel: Srgba::new(0.5, 0.5, 0.5, 1.0),
            label: Srgba::new(0.1, 0.1, 0.1, 0.9),
            hub: Srgba::new(1.0, 1.0, 1.0, 1.0),
            pointer: Srgba::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            outline: Self::lookup_color(context, "theme_base_color", fallback.outline, Some(1.0)),
            empty_wheel: Self::lookup_color(
                context,
                "insensitive_fg_color",
                fallback.empty_wheel,
                Some(1.0),
            ),
            label: fallback.label,
            hub: Self::lookup_color(context, "theme_base_color", fallback.hub, Some(1.0)),
            pointer: Self::lookup_color(context, "theme_fg_color", fallback.pointer, Some(1.0)),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        #[allow(deprecated)]
        let color = context.lookup_color(name);
        color
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
.spin-button {
    font-size: 1.6em;
    font-weight: bold;
    min-height: 56px;
    min-width: 240px;
}
.input-error {
    color: @error_color;
    font-size: 0.8em;
}
.swatch {
    min-width: 20px;
    min-height: 20px;
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
