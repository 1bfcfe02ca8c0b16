use std::str::FromStr;

use tracing::warn;

use crate::error::PresentationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateKind {
    #[default]
    Standard,
    Branded,
    Minimal,
}

/// What a single request asked to look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presentation {
    pub theme: Theme,
    pub template: TemplateKind,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl TemplateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Standard => "standard",
            TemplateKind::Branded => "branded",
            TemplateKind::Minimal => "minimal",
        }
    }
}

impl FromStr for Theme {
    type Err = PresentationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(PresentationError::UnknownTheme(other.to_string())),
        }
    }
}

impl FromStr for TemplateKind {
    type Err = PresentationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(TemplateKind::Standard),
            "branded" => Ok(TemplateKind::Branded),
            "minimal" => Ok(TemplateKind::Minimal),
            other => Err(PresentationError::UnknownTemplate(other.to_string())),
        }
    }
}

/// Builds the presentation from the raw `theme` and `template` query values.
///
/// Values are trimmed and lowercased; missing or blank values take the
/// default. An unrecognized value is an error in strict mode and otherwise
/// falls back to the default with a warning.
pub fn presentation_from_query(
    theme: Option<String>,
    template: Option<String>,
    strict: bool,
) -> Result<Presentation, PresentationError> {
    Ok(Presentation {
        theme: parse_or_default(theme, strict)?,
        template: parse_or_default(template, strict)?,
    })
}

fn parse_or_default<T>(value: Option<String>, strict: bool) -> Result<T, PresentationError>
where
    T: FromStr<Err = PresentationError> + Default,
{
    let normalized = value.and_then(|value| {
        let trimmed = value.trim().to_ascii_lowercase();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    });

    let Some(normalized) = normalized else {
        return Ok(T::default());
    };

    match normalized.parse::<T>() {
        Ok(parsed) => Ok(parsed),
        Err(err) if strict => Err(err),
        Err(err) => {
            warn!("{}, falling back to default", err);
            Ok(T::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient(theme: Option<&str>, template: Option<&str>) -> Presentation {
        presentation_from_query(
            theme.map(str::to_string),
            template.map(str::to_string),
            false,
        )
        .unwrap()
    }

    #[test]
    fn absent_params_use_defaults() {
        let presentation = lenient(None, None);
        assert_eq!(presentation.theme, Theme::Light);
        assert_eq!(presentation.template, TemplateKind::Standard);
    }

    #[test]
    fn values_are_normalized() {
        let presentation = lenient(Some(" Dark "), Some("BRANDED"));
        assert_eq!(presentation.theme, Theme::Dark);
        assert_eq!(presentation.template, TemplateKind::Branded);
    }

    #[test]
    fn theme_matching_ignores_case() {
        assert_eq!(lenient(Some("DARK"), None).theme, Theme::Dark);
        assert_eq!(lenient(Some("Dark"), None).theme, Theme::Dark);
        let strict = presentation_from_query(Some("DARK".to_string()), None, true).unwrap();
        assert_eq!(strict.theme, Theme::Dark);
    }

    #[test]
    fn unknown_values_fall_back_when_lenient() {
        let presentation = lenient(Some("drak"), Some("fancy"));
        assert_eq!(presentation.theme, Theme::Light);
        assert_eq!(presentation.template, TemplateKind::Standard);
    }

    #[test]
    fn blank_values_use_defaults_even_when_strict() {
        let presentation =
            presentation_from_query(Some("  ".to_string()), Some(String::new()), true).unwrap();
        assert_eq!(presentation, Presentation::default());
    }

    #[test]
    fn strict_mode_rejects_unknown_values() {
        let err = presentation_from_query(Some("drak".to_string()), None, true).unwrap_err();
        assert_eq!(err, PresentationError::UnknownTheme("drak".to_string()));

        let err =
            presentation_from_query(Some("dark".to_string()), Some("fancy".to_string()), true)
                .unwrap_err();
        assert_eq!(err, PresentationError::UnknownTemplate("fancy".to_string()));
    }
}
