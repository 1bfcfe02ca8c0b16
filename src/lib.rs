mod config;
mod error;
mod loader;
mod profile;
mod render;
mod share;
mod style;
mod theme;

use percent_encoding::percent_decode_str;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{format::Pretty, time::UtcTime},
    prelude::*,
};
use tracing_web::{MakeConsoleWriter, performance_layer};
use worker::{Context, Cors, Env, Method, Request, Response, RouteContext, Router, Url, event};

use config::Config;
use loader::{ProfileLoader, ViewState};
use profile::HttpProfileSource;
use render::PageContext;
use share::{ShareAction, ShareMenu, SharePlatform};
use theme::Presentation;

const CACHE_CONTROL: &str = "public, max-age=60";
const NO_STORE: &str = "no-store";
const REJECTED: (u16, &str) = (400, NO_STORE);

#[event(start)]
fn start() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_timer(UtcTime::rfc_3339())
        .with_writer(MakeConsoleWriter);
    let perf_layer = performance_layer().with_details_from_fields(Pretty::default());
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(perf_layer)
        .init();
}

#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> worker::Result<Response> {
    console_error_panic_hook::set_once();

    let cors = Cors::default()
        .with_origins(["*"])
        .with_methods([Method::Get, Method::Options])
        .with_allowed_headers(["Content-Type"]);

    let resp = Router::new()
        .get("/health", |_, _| Response::ok("feedbackgrove"))
        .get_async("/feedback", |req, ctx| async move {
            handle_feedback(req, ctx).await
        })
        .get_async("/feedback/", |req, ctx| async move {
            handle_feedback(req, ctx).await
        })
        .get_async("/feedback/:username", |req, ctx| async move {
            handle_feedback(req, ctx).await
        })
        .get_async("/feedback/:username/share/:platform", |req, ctx| async move {
            handle_share(req, ctx).await
        })
        .get_async("/widget", |req, ctx| async move {
            handle_widget(req, ctx).await
        })
        .run(req, env)
        .await?
        .with_cors(&cors)?;

    Ok(resp)
}

async fn handle_feedback(req: Request, ctx: RouteContext<()>) -> worker::Result<Response> {
    let config = Config::load(&ctx.env);
    let url = req.url()?;

    let presentation = match theme::presentation_from_query(
        query_param(&url, "theme"),
        query_param(&url, "template"),
        config.strict_presentation,
    ) {
        Ok(value) => value,
        Err(err) => {
            warn!("rejecting presentation: url={} error={}", url, err);
            let html = render_or_error(render::render_error_page(
                Presentation::default(),
                &err.to_string(),
            ))?;
            let (status, cache_control) = REJECTED;
            return html_response(html, status, cache_control);
        }
    };

    let username = route_param(&ctx, "username");
    info!(
        "feedback page: username={} theme={} template={}",
        username,
        presentation.theme.as_str(),
        presentation.template.as_str()
    );

    let source = HttpProfileSource::new(config.api_base.clone());
    let mut loader = ProfileLoader::new();
    let state = loader.load(&source, &username).await;

    let page_ctx = PageContext {
        presentation,
        brand_name: config.brand_name.clone(),
        page_url: share::page_url(&public_origin(&config, &url)?, &username),
        form_action: config.form_action(),
        share_menu: ShareMenu::new(query_param(&url, "share").as_deref() == Some("open")),
    };
    let html = render_or_error(render::render_feedback_page(&page_ctx, state))?;

    let (status, cache_control) = page_status(state);
    html_response(html, status, cache_control)
}

async fn handle_share(req: Request, ctx: RouteContext<()>) -> worker::Result<Response> {
    let config = Config::load(&ctx.env);
    let url = req.url()?;
    let username = route_param(&ctx, "username");
    let page = share::page_url(&public_origin(&config, &url)?, &username);

    let reply = share_reply(ctx.param("platform").map(String::as_str), &page);
    info!("share: username={} reply={:?}", username, reply);

    let mut resp = match &reply {
        ShareReply::Redirect(target) => {
            let target =
                Url::parse(target).map_err(|err| worker::Error::RustError(err.to_string()))?;
            Response::redirect_with_status(target, reply.status())?
        }
        ShareReply::Copy(action) => Response::from_json(action)?,
        ShareReply::UnknownPlatform(message) => Response::error(message.clone(), reply.status())?,
    };
    resp.headers_mut().set("Cache-Control", NO_STORE)?;
    Ok(resp)
}

async fn handle_widget(req: Request, _ctx: RouteContext<()>) -> worker::Result<Response> {
    let url = req.url()?;
    // The widget preview never rejects; it only has a theme to pick.
    let theme = theme::presentation_from_query(query_param(&url, "theme"), None, false)
        .map(|presentation| presentation.theme)
        .unwrap_or_default();

    let html = render_or_error(render::render_widget_page(theme))?;
    html_response(html, 200, CACHE_CONTROL)
}

/// Status and `Cache-Control` for a rendered feedback page.
fn page_status(state: &ViewState) -> (u16, &'static str) {
    match state {
        ViewState::Loaded(_) => (200, CACHE_CONTROL),
        ViewState::Error { .. } => (404, NO_STORE),
        ViewState::Loading => (503, NO_STORE),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShareReply {
    Redirect(String),
    Copy(ShareAction),
    UnknownPlatform(String),
}

impl ShareReply {
    fn status(&self) -> u16 {
        match self {
            ShareReply::Redirect(_) => 302,
            ShareReply::Copy(_) => 200,
            ShareReply::UnknownPlatform(_) => 404,
        }
    }
}

fn share_reply(platform: Option<&str>, page: &Url) -> ShareReply {
    let platform = match platform.map(str::parse::<SharePlatform>) {
        Some(Ok(platform)) => platform,
        Some(Err(err)) => return ShareReply::UnknownPlatform(err),
        None => return ShareReply::UnknownPlatform("share platform is required".to_string()),
    };

    let mut menu = ShareMenu::new(true);
    match menu.select(platform, page) {
        ShareAction::OpenWindow { url } => ShareReply::Redirect(url),
        action @ ShareAction::CopyLink { .. } => ShareReply::Copy(action),
    }
}

/// Route params arrive still percent-encoded; decode them once here.
fn route_param(ctx: &RouteContext<()>, key: &str) -> String {
    ctx.param(key)
        .map(|value| decode_path_segment(value))
        .unwrap_or_default()
}

fn decode_path_segment(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

fn public_origin(config: &Config, url: &Url) -> worker::Result<Url> {
    match &config.public_origin {
        Some(origin) => {
            Url::parse(origin).map_err(|err| worker::Error::RustError(err.to_string()))
        }
        None => Ok(url.clone()),
    }
}

fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.to_string())
}

fn html_response(html: String, status: u16, cache_control: &str) -> worker::Result<Response> {
    let mut resp = Response::from_html(html)?.with_status(status);
    resp.headers_mut().set("Cache-Control", cache_control)?;
    Ok(resp)
}

fn render_or_error(result: Result<String, askama::Error>) -> worker::Result<String> {
    result.map_err(|err| worker::Error::RustError(err.to_string()))
}
