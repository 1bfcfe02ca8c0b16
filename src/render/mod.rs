use askama::Template;
use worker::Url;

use crate::loader::ViewState;
use crate::profile::UserProfile;
use crate::share::{SharePlatform, ShareMenu};
use crate::style::{style_bundle, widget_style, StyleBundle, WidgetStyle};
use crate::theme::{Presentation, TemplateKind, Theme};

#[derive(Template)]
#[template(path = "page/loading.html")]
struct LoadingPageTemplate {
    title: String,
    container: String,
}

#[derive(Template)]
#[template(path = "page/error.html")]
struct ErrorPageTemplate {
    title: String,
    container: String,
    card: String,
    heading: &'static str,
    error_text: &'static str,
    message: String,
}

#[derive(Template)]
#[template(path = "page/feedback.html")]
struct FeedbackPageTemplate {
    title: String,
    container: String,
    style: StyleBundle,
    header: Option<String>,
    widget: String,
    brand_name: String,
    share_open: bool,
    share_toggle_href: String,
    share_links: Vec<ShareLink>,
}

#[derive(Template)]
#[template(path = "page/widget.html")]
struct WidgetPageTemplate {
    title: String,
    container: String,
    widget: String,
}

#[derive(Template)]
#[template(path = "partials/header_branded.html")]
struct BrandedHeaderTemplate {
    brand_name: String,
    brand_text: &'static str,
    heading: &'static str,
    username: String,
}

#[derive(Template)]
#[template(path = "partials/header_standard.html")]
struct StandardHeaderTemplate {
    username: String,
    avatar_url: Option<String>,
    initial: String,
    heading: &'static str,
    subtext: &'static str,
}

#[derive(Template)]
#[template(path = "partials/widget.html")]
struct WidgetTemplate {
    style: WidgetStyle,
    target: Option<WidgetTarget>,
}

/// Where the embedded feedback form posts to.
#[derive(Debug, Clone)]
pub struct WidgetTarget {
    pub action: String,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct ShareLink {
    pub label: &'static str,
    pub href: String,
    pub copies: bool,
}

/// Everything about a page request that is not the profile itself.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub presentation: Presentation,
    pub brand_name: String,
    pub page_url: Url,
    pub form_action: String,
    pub share_menu: ShareMenu,
}

pub fn render_feedback_page(ctx: &PageContext, state: &ViewState) -> Result<String, askama::Error> {
    match state {
        ViewState::Loading => render_loading_page(ctx.presentation),
        ViewState::Error { message } => render_error_page(ctx.presentation, message),
        ViewState::Loaded(profile) => render_loaded_page(ctx, profile),
    }
}

pub fn render_loading_page(presentation: Presentation) -> Result<String, askama::Error> {
    let style = style_bundle(presentation.theme, presentation.template);
    LoadingPageTemplate {
        title: "Loading".to_string(),
        container: style.container,
    }
    .render()
}

pub fn render_error_page(presentation: Presentation, message: &str) -> Result<String, askama::Error> {
    let style = style_bundle(presentation.theme, presentation.template);
    ErrorPageTemplate {
        title: "Error".to_string(),
        container: style.container,
        card: style.card,
        heading: style.heading,
        error_text: style.error_text,
        message: message.to_string(),
    }
    .render()
}

/// The standalone widget preview. It has no form target, so it renders
/// read-only.
pub fn render_widget_page(theme: Theme) -> Result<String, askama::Error> {
    let style = style_bundle(theme, TemplateKind::Standard);
    WidgetPageTemplate {
        title: "Feedback widget".to_string(),
        container: style.container,
        widget: render_widget(theme, None)?,
    }
    .render()
}

pub fn render_widget(theme: Theme, target: Option<WidgetTarget>) -> Result<String, askama::Error> {
    WidgetTemplate {
        style: widget_style(theme),
        target,
    }
    .render()
}

/// Header markup for the template, or `None` for the minimal template.
pub fn render_header(
    presentation: Presentation,
    brand_name: &str,
    profile: &UserProfile,
) -> Result<Option<String>, askama::Error> {
    let style = style_bundle(presentation.theme, presentation.template);
    let header = match presentation.template {
        TemplateKind::Minimal => return Ok(None),
        TemplateKind::Branded => BrandedHeaderTemplate {
            brand_name: brand_name.to_string(),
            brand_text: style.brand_text,
            heading: style.heading,
            username: profile.username.clone(),
        }
        .render()?,
        TemplateKind::Standard => StandardHeaderTemplate {
            username: profile.username.clone(),
            avatar_url: profile.avatar_url.clone(),
            initial: profile.initial(),
            heading: style.heading,
            subtext: style.subtext,
        }
        .render()?,
    };
    Ok(Some(header))
}

fn render_loaded_page(ctx: &PageContext, profile: &UserProfile) -> Result<String, askama::Error> {
    let presentation = ctx.presentation;
    let style = style_bundle(presentation.theme, presentation.template);
    let header = render_header(presentation, &ctx.brand_name, profile)?;
    let widget = render_widget(
        presentation.theme,
        Some(WidgetTarget {
            action: ctx.form_action.clone(),
            username: profile.username.clone(),
        }),
    )?;

    FeedbackPageTemplate {
        title: format!("Send feedback to @{}", profile.username),
        container: style.container.clone(),
        style,
        header,
        widget,
        brand_name: ctx.brand_name.clone(),
        share_open: ctx.share_menu.is_open(),
        share_toggle_href: share_toggle_href(presentation, ctx.share_menu),
        share_links: share_links(&ctx.page_url),
    }
    .render()
}

/// Link that flips the share menu while keeping the presentation.
fn share_toggle_href(presentation: Presentation, menu: ShareMenu) -> String {
    let mut toggled = menu;
    toggled.toggle();

    let mut href = format!(
        "?theme={}&template={}",
        presentation.theme.as_str(),
        presentation.template.as_str()
    );
    if toggled.is_open() {
        href.push_str("&share=open");
    }
    href
}

fn share_links(page_url: &Url) -> Vec<ShareLink> {
    let base = page_url.path().trim_end_matches('/');
    SharePlatform::ALL
        .into_iter()
        .map(|platform| ShareLink {
            label: platform.label(),
            href: format!("{base}/share/{}", platform.as_str()),
            copies: platform == SharePlatform::Copy,
        })
        .collect()
}
