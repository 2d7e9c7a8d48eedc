//! Tooltip payloads and sinks

use d3three_core::{DataPoint, Orientation};
use d3three_scale::AxisSet;
use serde::{Deserialize, Serialize};

/// Distance between the pointer and the tooltip's top-left corner, in pixels
pub const TOOLTIP_OFFSET: f64 = 10.0;

/// What the host should show after a pointer event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TooltipPayload {
    pub visible: bool,
    pub html: String,
    /// Left edge in client pixels
    pub x: f64,
    /// Top edge in client pixels
    pub y: f64,
}

impl TooltipPayload {
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Visible tooltip next to the pointer
    pub fn near_pointer(html: String, client_x: f64, client_y: f64) -> Self {
        Self {
            visible: true,
            html,
            x: client_x + TOOLTIP_OFFSET,
            y: client_y + TOOLTIP_OFFSET,
        }
    }
}

/// Receives tooltip updates; implemented by the host UI
pub trait TooltipSink {
    fn update(&mut self, payload: TooltipPayload);
}

/// Sink that remembers the latest payload
#[derive(Debug, Clone, Default)]
pub struct TooltipState {
    current: TooltipPayload,
    updates: usize,
}

impl TooltipState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &TooltipPayload {
        &self.current
    }

    pub fn is_visible(&self) -> bool {
        self.current.visible
    }

    pub fn update_count(&self) -> usize {
        self.updates
    }
}

impl TooltipSink for TooltipState {
    fn update(&mut self, payload: TooltipPayload) {
        self.current = payload;
        self.updates += 1;
    }
}

/// Key/value markup for a datum, each field formatted by its own axis
pub fn tooltip_html(point: &DataPoint, axes: AxisSet<'_>) -> String {
    let mut html = String::from("<div class=\"tooltip_kv\">");
    for orientation in Orientation::ALL {
        let text = axes.get(orientation).tick_format(point.get(orientation));
        html.push_str(&format!("<span>{orientation}: {text}</span><br>"));
    }
    html.push_str("</div>");
    html
}
