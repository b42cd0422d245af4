//! Terminal output in the configured theme.
//!
//! Colors are dropped when stdout is not a terminal or `NO_COLOR` is set.

use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};
use rewear::client::dashboard::DashboardSection;
use rewear::client::theme::{Palette, Rgb};
use rewear::client::{Dashboard, SubmitBlocker, SwapForm, Theme};
use rewear::shared::{Item, SwapMode, SwapRequest, SwapStatus, UserProfile};

pub struct Renderer {
    theme: Theme,
    palette: Palette,
    color: bool,
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self {
            theme,
            palette: theme.palette(),
            color,
        }
    }

    fn paint(&self, text: &str, rgb: Rgb) -> String {
        if self.color {
            text.with(color(rgb)).to_string()
        } else {
            text.to_string()
        }
    }

    fn strong(&self, text: &str, rgb: Rgb) -> String {
        if self.color {
            text.with(color(rgb)).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn heading(&self, text: &str) {
        println!("{} {}", self.strong(self.theme.brand(), self.palette.accent), self.strong(text, self.palette.accent));
    }

    pub fn success(&self, text: &str) {
        println!("{}", self.paint(text, self.palette.success));
    }

    pub fn warning(&self, text: &str) {
        println!("{}", self.paint(text, self.palette.warning));
    }

    pub fn muted(&self, text: &str) {
        println!("{}", self.paint(text, self.palette.muted));
    }

    pub fn profile(&self, user: &UserProfile) {
        println!(
            "{} <{}>  {}",
            self.strong(&user.username, self.palette.accent),
            user.email,
            self.paint(&format!("{} points", user.points), self.palette.success)
        );
    }

    fn item_line(&self, item: &Item) -> String {
        let mut line = format!(
            "{}  {}  {} · {} · {}  {}",
            self.paint(&item.id.to_string(), self.palette.muted),
            self.strong(&item.title, self.palette.accent),
            item.category,
            item.size,
            item.condition,
            self.paint(&format!("{} pts", item.price_points), self.palette.success),
        );
        if !item.available {
            line.push_str(&format!("  {}", self.paint("(swapped)", self.palette.warning)));
        }
        line
    }

    pub fn items(&self, items: &[Item]) {
        if items.is_empty() {
            self.muted("No items");
            return;
        }
        for item in items {
            println!("{}", self.item_line(item));
        }
    }

    pub fn item_detail(&self, item: &Item, image_urls: &[String]) {
        self.heading(&item.title);
        println!("{}", item.description);
        println!(
            "Category: {}  Size: {}  Condition: {}",
            item.category, item.size, item.condition
        );
        println!("Price: {}", self.paint(&format!("{} points", item.price_points), self.palette.success));
        println!("Listed by: {}", item.owner_display());
        if !item.tags.is_empty() {
            println!("Tags: {}", self.paint(&item.tags.join(", "), self.palette.muted));
        }
        for url in image_urls {
            println!("Image: {}", url);
        }
        if !item.available {
            self.warning("This item is no longer available");
        }
    }

    /// Ways the viewer can request the item, and what blocks each
    pub fn swap_options(&self, form: &SwapForm, viewer: &UserProfile) {
        println!();
        println!("{}", self.strong("Request this item", self.palette.accent));

        let mut points_form = form.clone();
        points_form.select_points();
        match points_form.blocker(viewer) {
            Some(SubmitBlocker::InsufficientPoints { missing, .. }) => self.warning(&format!(
                "  --points      You have {} points ({} more needed)",
                viewer.points, missing
            )),
            Some(blocker) => self.warning(&format!("  --points      {}", blocker)),
            None => println!("  --points      Redeem for {} points", form.item().price_points),
        }

        if form.offerable().is_empty() {
            self.muted("  --offer ID    You have no available items to offer");
        } else {
            println!("  --offer ID    Offer one of your items:");
            for item in form.offerable() {
                println!("    {}", self.item_line(item));
            }
        }

        if let Some(error) = form.error() {
            self.warning(error);
        }
    }

    fn status(&self, status: SwapStatus) -> String {
        let rgb = match status {
            SwapStatus::Pending => self.palette.warning,
            SwapStatus::Accepted | SwapStatus::Completed => self.palette.success,
            SwapStatus::Rejected => self.palette.error,
        };
        self.paint(status.as_str(), rgb)
    }

    /// One swap request; `sent` picks whose name is shown
    pub fn swap(&self, swap: &SwapRequest, sent: bool) {
        let counterpart = if sent {
            swap.owner_username.as_deref()
        } else {
            swap.requester_username.as_deref()
        }
        .unwrap_or("Unknown");

        let terms = match swap.mode() {
            SwapMode::Points => "for points".to_string(),
            SwapMode::ItemOffer => format!(
                "for {}",
                swap.offered_item_title.as_deref().unwrap_or("an item")
            ),
        };

        println!(
            "{}  {}  {} {}  [{}]",
            self.paint(&swap.id.to_string(), self.palette.muted),
            self.strong(swap.item_display(), self.palette.accent),
            if sent { "to" } else { "from" },
            counterpart,
            self.status(swap.status),
        );
        let mut detail = terms;
        if let Some(message) = swap.message.as_deref().filter(|m| !m.is_empty()) {
            detail.push_str(&format!(" · \"{}\"", message));
        }
        println!("    {}", self.paint(&detail, self.palette.muted));
    }

    fn section_failed(&self, dashboard: &Dashboard, section: DashboardSection) -> bool {
        if dashboard.failed(section) {
            println!("{}", self.paint(&format!("Could not load {}", section), self.palette.error));
            true
        } else {
            false
        }
    }

    pub fn dashboard(&self, user: &UserProfile, dashboard: &Dashboard) {
        self.heading("Dashboard");
        self.profile(user);

        println!();
        println!("{}", self.strong("My items", self.palette.accent));
        if !self.section_failed(dashboard, DashboardSection::MyItems) {
            self.items(&dashboard.my_items);
        }

        println!();
        println!("{}", self.strong("Received requests", self.palette.accent));
        if !self.section_failed(dashboard, DashboardSection::Received) {
            if dashboard.received.is_empty() {
                self.muted("No requests");
            }
            for swap in &dashboard.received {
                self.swap(swap, false);
            }
            if dashboard.actionable().next().is_some() {
                self.muted("Answer with: rewear accept <SWAP_ID> | rewear reject <SWAP_ID>");
            }
        }

        println!();
        println!("{}", self.strong("Sent requests", self.palette.accent));
        if !self.section_failed(dashboard, DashboardSection::Sent) {
            if dashboard.sent.is_empty() {
                self.muted("No requests");
            }
            for swap in &dashboard.sent {
                self.swap(swap, true);
            }
        }
    }
}
