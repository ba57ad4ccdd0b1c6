use geo::Coord;
use serde::Serialize;

use crate::nav::HoverEvent;

/// Tooltip state owned by one chart instance.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Overlay {
    pub visible: bool,
    pub position: Coord<f64>,
    pub title: String,
    pub lines: Vec<String>,
}

impl Overlay {
    pub fn show(&mut self, position: Coord<f64>, event: &HoverEvent) {
        self.visible = true;
        self.position = position;
        self.title = event.name.clone();
        self.lines.clear();
        self.lines.push(format!("Value: {}", event.value));
        if let Some(status) = event.details.get("status").and_then(|s| s.as_str()) {
            self.lines.push(format!("Status: {status}"));
        }
    }

    /// Follow the pointer without changing the content.
    pub fn move_to(&mut self, position: Coord<f64>) {
        if self.visible { self.position = position }
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.title.clear();
        self.lines.clear();
    }
}
