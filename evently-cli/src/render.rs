//! TUI rendering for evently types.
//!
//! Extension traits and view structs that add colored terminal rendering
//! to evently-core types using owo_colors.

use evently_core::datetime::to_display_string;
use evently_core::{Category, Event, User};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Category {
    fn render(&self) -> String {
        format!("{} {}", format!("[{}]", self.id).dimmed(), self.name)
    }
}

/// An event with its references already resolved for display.
pub struct EventView<'a> {
    pub event: &'a Event,
    pub category_names: Vec<String>,
    pub creator: Option<&'a User>,
}

impl<'a> EventView<'a> {
    pub fn new(event: &'a Event, category_names: Vec<String>) -> Self {
        EventView {
            event,
            category_names,
            creator: None,
        }
    }

    pub fn with_creator(mut self, creator: Option<&'a User>) -> Self {
        self.creator = creator;
        self
    }

    /// Full view for a single event, including its creator.
    pub fn render_detail(&self) -> String {
        let mut lines = vec![self.render()];

        let creator = match self.creator {
            Some(user) => user.name.bold().to_string(),
            None => "(unknown)".dimmed().to_string(),
        };
        lines.push(format!("   {} {}", "Created by:".dimmed(), creator));

        if let Some(user) = self.creator.filter(|u| !u.image.is_empty()) {
            lines.push(format!("   {} {}", "Avatar:".dimmed(), user.image));
        }

        lines.join("\n")
    }

    fn render_categories(&self) -> String {
        if self.category_names.is_empty() {
            return "(none)".dimmed().to_string();
        }

        self.category_names
            .iter()
            .map(|name| name.cyan().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Render for EventView<'_> {
    fn render(&self) -> String {
        let event = self.event;
        let mut lines = Vec::new();

        lines.push(format!(
            "{} {}",
            format!("#{}", event.id).dimmed(),
            event.title.bold()
        ));

        if !event.description.is_empty() {
            lines.push(format!("   {}", event.description));
        }
        if !event.image.is_empty() {
            lines.push(format!("   {} {}", "Image:".dimmed(), event.image));
        }

        lines.push(format!(
            "   {} {}",
            "Start:".dimmed(),
            to_display_string(&event.start_time)
        ));
        lines.push(format!(
            "   {} {}",
            "End:".dimmed(),
            to_display_string(&event.end_time)
        ));
        lines.push(format!(
            "   {} {}",
            "Categories:".dimmed(),
            self.render_categories()
        ));

        lines.join("\n")
    }
}
