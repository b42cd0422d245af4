//! Command handlers. Each one runs against an already restored session.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use rewear::client::catalogue::{self, ItemDetail};
use rewear::client::credential_store::SqliteCredentialStore;
use rewear::client::listing::LISTING_FAILED;
use rewear::client::session::{LOGIN_FALLBACK, REGISTER_FALLBACK};
use rewear::client::swap_flow::SUBMIT_FALLBACK;
use rewear::client::{AppView, ClientError, Dashboard, ImageUpload, ListingForm, Page, Session, SessionManager};
use rewear::shared::marketplace::SwapAction;
use uuid::Uuid;

use crate::render::Renderer;

type Sessions = SessionManager<SqliteCredentialStore>;

const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";
const LOGIN_PROMPT: &str = "Please log in first (rewear login --email ...)";

/// The session needed to act on `view`, or a prompt to log in
fn gate(sessions: &Sessions, view: AppView) -> Result<Session> {
    if view.resolve(sessions.state().is_authenticated()) == AppView::Login {
        bail!(LOGIN_PROMPT);
    }
    sessions
        .require_session()
        .map(Session::clone)
        .map_err(|_| anyhow::anyhow!(LOGIN_PROMPT))
}

/// Turn a client error into the line shown to the user
fn fail(error: ClientError, fallback: &str) -> anyhow::Error {
    if error.is_credential_rejected() {
        anyhow::anyhow!(SESSION_EXPIRED)
    } else {
        anyhow::anyhow!(error.user_message(fallback))
    }
}

pub async fn login(sessions: &mut Sessions, renderer: &Renderer, email: &str, password: &str) -> Result<()> {
    let user = sessions
        .login(email, password)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message(LOGIN_FALLBACK)))?;
    renderer.success(&format!("Welcome back, {}", user.username));
    renderer.profile(&user);
    Ok(())
}

pub async fn register(
    sessions: &mut Sessions,
    renderer: &Renderer,
    email: &str,
    username: &str,
    password: &str,
) -> Result<()> {
    let user = sessions
        .register(email, username, password)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message(REGISTER_FALLBACK)))?;
    renderer.success(&format!("Account created. Welcome, {}", user.username));
    renderer.profile(&user);
    Ok(())
}

pub async fn logout(sessions: &mut Sessions, renderer: &Renderer) -> Result<()> {
    sessions.logout().await;
    renderer.success("Logged out");
    Ok(())
}

pub async fn whoami(sessions: &mut Sessions, renderer: &Renderer) -> Result<()> {
    if !sessions.state().is_authenticated() {
        renderer.muted("Not logged in");
        return Ok(());
    }
    let user = sessions.refresh().await.map_err(|e| fail(e, "Could not load profile"))?;
    renderer.profile(&user);
    Ok(())
}

pub async fn featured(sessions: &Sessions, renderer: &Renderer) -> Result<()> {
    let items = catalogue::featured(sessions.api())
        .await
        .map_err(|e| fail(e, "Error fetching items"))?;
    renderer.heading("Featured items");
    renderer.items(&items);
    Ok(())
}

pub async fn browse(sessions: &Sessions, renderer: &Renderer, skip: u32, limit: u32) -> Result<()> {
    let page = Page { skip, limit };
    let items = catalogue::browse(sessions.api(), page)
        .await
        .map_err(|e| fail(e, "Error fetching items"))?;
    renderer.heading("Browse items");
    renderer.items(&items);
    if let Some(next) = page.after(items.len()) {
        renderer.muted(&format!("More: rewear browse --skip {} --limit {}", next.skip, next.limit));
    }
    Ok(())
}

pub async fn closet(sessions: &Sessions, renderer: &Renderer, user_id: Uuid) -> Result<()> {
    let items = catalogue::closet(sessions.api(), user_id)
        .await
        .map_err(|e| fail(e, "Error fetching items"))?;
    let owner = items.first().map(|item| item.owner_display()).unwrap_or("Unknown");
    renderer.heading(&format!("Listed by {}", owner));
    renderer.items(&items);
    Ok(())
}

pub async fn show(sessions: &mut Sessions, renderer: &Renderer, id: Uuid) -> Result<()> {
    let result = ItemDetail::load(sessions.api(), id, sessions.session()).await;
    let detail = sessions.observe(result).await.map_err(|e| fail(e, "Item not found"))?;

    let image_urls: Vec<String> = detail
        .item
        .images
        .iter()
        .map(|image| sessions.api().config().asset_url(image))
        .collect();
    renderer.item_detail(&detail.item, &image_urls);

    match (&detail.swap_form, sessions.session()) {
        (Some(form), Some(session)) if !detail.is_own(Some(session)) => {
            renderer.swap_options(form, session.identity());
        }
        (Some(_), Some(_)) => renderer.muted("This is your item"),
        _ => renderer.muted("Log in to request this item"),
    }
    Ok(())
}

/// Flags of `rewear list`
pub struct ListingArgs {
    pub title: String,
    pub description: String,
    pub category: String,
    pub size: String,
    pub condition: String,
    pub tags: String,
    pub points: i64,
    pub images: Vec<PathBuf>,
}

pub async fn list_item(sessions: &mut Sessions, renderer: &Renderer, args: ListingArgs) -> Result<()> {
    let session = gate(sessions, AppView::AddItem)?;

    let mut form = ListingForm {
        title: args.title,
        description: args.description,
        category: args.category.parse().context("--category")?,
        size: args.size,
        condition: args.condition.parse().context("--condition")?,
        tags: args.tags,
        price_points: args.points,
        images: Vec::with_capacity(args.images.len()),
    };
    for path in &args.images {
        let upload = ImageUpload::from_path(path)
            .await
            .map_err(|e| anyhow::anyhow!(e.user_message(&format!("Could not read {}", path.display()))))?;
        form.images.push(upload);
    }

    let result = form.submit(sessions.api(), &session).await;
    let (item, _) = sessions.observe(result).await.map_err(|e| match e {
        ClientError::Validation(err) => anyhow::anyhow!(err.message().to_string()),
        e if e.is_credential_rejected() => anyhow::anyhow!(SESSION_EXPIRED),
        _ => anyhow::anyhow!(LISTING_FAILED),
    })?;

    renderer.success(&format!("Listed '{}' ({})", item.title, item.id));
    Ok(())
}

pub async fn request(
    sessions: &mut Sessions,
    renderer: &Renderer,
    item_id: Uuid,
    points: bool,
    offer: Option<Uuid>,
    message: Option<String>,
) -> Result<()> {
    let session = gate(sessions, AppView::ItemDetail(item_id))?;

    let result = ItemDetail::load(sessions.api(), item_id, Some(&session)).await;
    let detail = sessions.observe(result).await.map_err(|e| fail(e, "Item not found"))?;
    let Some(mut form) = detail.swap_form else {
        bail!(LOGIN_PROMPT);
    };

    if points {
        form.select_points();
    } else if let Some(offered) = offer {
        form.choose_offered_item(offered).map_err(|e| anyhow::anyhow!(e.message().to_string()))?;
    }
    if let Some(message) = message {
        form.set_message(message);
    }

    if let Some(blocker) = form.blocker(session.identity()) {
        renderer.swap_options(&form, session.identity());
        bail!("{}", blocker);
    }

    let result = form.submit(sessions.api(), &session).await;
    let (swap, _) = sessions.observe(result).await.map_err(|e| {
        if e.is_credential_rejected() {
            anyhow::anyhow!(SESSION_EXPIRED)
        } else {
            anyhow::anyhow!(form.error().unwrap_or(SUBMIT_FALLBACK).to_string())
        }
    })?;

    renderer.success("Swap request sent");
    renderer.swap(&swap, true);
    renderer.muted("Track it with: rewear dashboard");
    Ok(())
}

async fn load_dashboard(sessions: &mut Sessions, session: &Session) -> Result<Dashboard> {
    let dashboard = Dashboard::load(sessions.api(), session).await;
    ensure_session(sessions, &dashboard).await?;
    Ok(dashboard)
}

/// End the session if any section was refused for a bad credential
async fn ensure_session(sessions: &mut Sessions, dashboard: &Dashboard) -> Result<()> {
    sessions.note_errors(dashboard.errors()).await;
    if !sessions.state().is_authenticated() {
        bail!(SESSION_EXPIRED);
    }
    Ok(())
}

pub async fn dashboard(sessions: &mut Sessions, renderer: &Renderer) -> Result<()> {
    let session = gate(sessions, AppView::Dashboard)?;
    let dashboard = load_dashboard(sessions, &session).await?;
    renderer.dashboard(session.identity(), &dashboard);
    Ok(())
}

pub async fn respond(sessions: &mut Sessions, renderer: &Renderer, swap_id: Uuid, action: SwapAction) -> Result<()> {
    let session = gate(sessions, AppView::Dashboard)?;
    let mut dashboard = load_dashboard(sessions, &session).await?;

    let result = dashboard.respond(sessions.api(), &session, swap_id, action).await;
    let ack = sessions
        .observe(result)
        .await
        .map_err(|e| fail(e, &format!("Error {}ing swap", action.path_segment())))?;

    renderer.success(&ack.message);
    ensure_session(sessions, &dashboard).await?;
    // Points may have moved
    let identity = match sessions.refresh().await {
        Ok(user) => user,
        Err(_) => session.identity().clone(),
    };
    renderer.dashboard(&identity, &dashboard);
    Ok(())
}
