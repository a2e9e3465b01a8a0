//! Button events and their wire form
//!
//! This module defines the event carried on the bus and the serialized frame
//! that is written to every connected client.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::HubError;

/// Color of a physical buzzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonColor {
    Red,
    Green,
    Blue,
    Yellow,
}

impl ButtonColor {
    /// All buzzer colors
    pub const ALL: [ButtonColor; 4] = [
        ButtonColor::Red,
        ButtonColor::Green,
        ButtonColor::Blue,
        ButtonColor::Yellow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonColor::Red => "red",
            ButtonColor::Green => "green",
            ButtonColor::Blue => "blue",
            ButtonColor::Yellow => "yellow",
        }
    }
}

impl fmt::Display for ButtonColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ButtonColor {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ButtonColor::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| HubError::UnknownColor(s.to_string()))
    }
}

/// A buzzer was hit
///
/// Serialized as `{"Color":"red"}`, the shape existing game front-ends read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonHit {
    #[serde(rename = "Color")]
    pub color: ButtonColor,
}

impl ButtonHit {
    pub fn new(color: ButtonColor) -> Self {
        Self { color }
    }

    /// Serialize into a frame that can be shared by every connection
    pub fn to_frame(&self) -> Result<EventFrame, serde_json::Error> {
        serde_json::to_string(self).map(EventFrame::from)
    }
}

impl From<ButtonColor> for ButtonHit {
    fn from(color: ButtonColor) -> Self {
        Self::new(color)
    }
}

/// Serialized event text
///
/// Serialized once per event and shared by reference count across all
/// connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFrame(Arc<str>);

impl EventFrame {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EventFrame {
    fn from(text: String) -> Self {
        Self(Arc::from(text))
    }
}

impl From<&str> for EventFrame {
    fn from(text: &str) -> Self {
        Self(Arc::from(text))
    }
}
