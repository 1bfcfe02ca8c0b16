//! Class lookup for every theme and template combination.
//!
//! The page, header and share menu only ever read classes from a
//! [`StyleBundle`], so adding a theme or template forces every cell of the
//! table to be filled in.

use crate::theme::{TemplateKind, Theme};

const CONTAINER_BASE: &str = "min-h-screen flex items-center justify-center p-4 font-inter";
const CARD_BASE: &str = "w-full max-w-md rounded-xl shadow-sm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleBundle {
    pub container: String,
    pub card: String,
    pub heading: &'static str,
    pub subtext: &'static str,
    pub error_text: &'static str,
    pub brand_text: &'static str,
    pub share_toggle: &'static str,
    pub share_menu: &'static str,
    pub share_icon: &'static str,
    pub footer: &'static str,
}

/// Per-theme colors shared by all templates.
struct Palette {
    container: &'static str,
    card_surface: &'static str,
    heading: &'static str,
    subtext: &'static str,
    error_text: &'static str,
    brand_text: &'static str,
    share_toggle: &'static str,
    share_menu: &'static str,
    share_icon: &'static str,
    footer: &'static str,
}

const LIGHT: Palette = Palette {
    container: "hero-gradient text-zinc-800",
    card_surface: "bg-white",
    heading: "text-zinc-800",
    subtext: "text-zinc-500",
    error_text: "text-zinc-600",
    brand_text: "text-amber-500",
    share_toggle: "bg-zinc-100 text-zinc-600 hover:bg-zinc-200",
    share_menu: "bg-white border border-zinc-200",
    share_icon: "text-zinc-600",
    footer: "text-zinc-500",
};

const DARK: Palette = Palette {
    container: "bg-zinc-900 text-zinc-100",
    card_surface: "bg-zinc-800",
    heading: "text-zinc-100",
    subtext: "text-zinc-300",
    error_text: "text-zinc-300",
    brand_text: "text-amber-400",
    share_toggle: "bg-zinc-700 text-zinc-300 hover:bg-zinc-600",
    share_menu: "bg-zinc-800 border border-zinc-700",
    share_icon: "text-zinc-300",
    footer: "text-zinc-400",
};

pub fn style_bundle(theme: Theme, template: TemplateKind) -> StyleBundle {
    let (palette, border) = match (theme, template) {
        (Theme::Light, TemplateKind::Standard) => (&LIGHT, "border border-zinc-200"),
        (Theme::Light, TemplateKind::Minimal) => (&LIGHT, "border border-zinc-200"),
        (Theme::Light, TemplateKind::Branded) => (&LIGHT, "border-2 border-amber-400"),
        (Theme::Dark, TemplateKind::Standard) => (&DARK, "border border-zinc-700"),
        (Theme::Dark, TemplateKind::Minimal) => (&DARK, "border border-zinc-700"),
        (Theme::Dark, TemplateKind::Branded) => (&DARK, "border-2 border-amber-500"),
    };

    StyleBundle {
        container: format!("{CONTAINER_BASE} {}", palette.container),
        card: format!("{CARD_BASE} {} {border}", palette.card_surface),
        heading: palette.heading,
        subtext: palette.subtext,
        error_text: palette.error_text,
        brand_text: palette.brand_text,
        share_toggle: palette.share_toggle,
        share_menu: palette.share_menu,
        share_icon: palette.share_icon,
        footer: palette.footer,
    }
}

/// Classes for the feedback widget skeleton. Only the theme matters here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetStyle {
    pub panel: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub textarea: &'static str,
    pub button: &'static str,
}

pub fn widget_style(theme: Theme) -> WidgetStyle {
    match theme {
        Theme::Light => WidgetStyle {
            panel: "bg-white border border-zinc-200 shadow-sm",
            icon: "text-amber-500",
            title: "text-zinc-800",
            textarea: "bg-zinc-50 border-zinc-200",
            button: "bg-zinc-800 hover:bg-zinc-900",
        },
        Theme::Dark => WidgetStyle {
            panel: "bg-zinc-900 text-white",
            icon: "text-amber-400",
            title: "text-zinc-100",
            textarea: "bg-zinc-800 text-white border-zinc-700",
            button: "bg-amber-500 hover:bg-amber-600",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATES: [TemplateKind; 3] = [
        TemplateKind::Standard,
        TemplateKind::Branded,
        TemplateKind::Minimal,
    ];

    #[test]
    fn dark_theme_selects_dark_classes_for_every_template() {
        for template in TEMPLATES {
            let style = style_bundle(Theme::Dark, template);
            assert!(style.container.ends_with("bg-zinc-900 text-zinc-100"));
            assert!(style.card.contains("bg-zinc-800"));
            assert_eq!(style.heading, "text-zinc-100");
        }
    }

    #[test]
    fn light_theme_selects_light_classes_for_every_template() {
        for template in TEMPLATES {
            let style = style_bundle(Theme::Light, template);
            assert!(style.container.ends_with("hero-gradient text-zinc-800"));
            assert!(style.card.contains("bg-white"));
            assert_eq!(style.heading, "text-zinc-800");
        }
    }

    #[test]
    fn branded_cards_get_the_heavy_amber_border() {
        let dark = style_bundle(Theme::Dark, TemplateKind::Branded);
        assert_eq!(
            dark.card,
            "w-full max-w-md rounded-xl shadow-sm bg-zinc-800 border-2 border-amber-500"
        );

        let light = style_bundle(Theme::Light, TemplateKind::Branded);
        assert_eq!(
            light.card,
            "w-full max-w-md rounded-xl shadow-sm bg-white border-2 border-amber-400"
        );
    }

    #[test]
    fn other_templates_keep_the_plain_border() {
        for template in [TemplateKind::Standard, TemplateKind::Minimal] {
            assert!(!style_bundle(Theme::Dark, template).card.contains("border-2"));
            assert!(!style_bundle(Theme::Light, template).card.contains("border-2"));
        }
    }

    #[test]
    fn widget_button_follows_theme() {
        assert_eq!(widget_style(Theme::Dark).button, "bg-amber-500 hover:bg-amber-600");
        assert_eq!(widget_style(Theme::Light).button, "bg-zinc-800 hover:bg-zinc-900");
    }
}
