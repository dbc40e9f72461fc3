use serde::{Deserialize, Serialize};

/// A user action forwarded from a front end.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InteractionEvent {
    /// A click on the canvas. Coordinates are already in world space. `z`
    /// may be omitted, in which case the simulation picks a depth.
    Add {
        x: f32,
        y: f32,
        #[serde(default)]
        z: Option<f32>,
    },
    /// The canvas changed size. Without `depth` the current depth is kept.
    Resize {
        width: f32,
        height: f32,
        #[serde(default)]
        depth: Option<f32>,
    },
}

impl InteractionEvent {
    /// Parse a JSON message such as `{"type":"add","x":1,"y":2}`.
    pub fn from_json(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// Parse a text command: `add <x> <y> [z]` or `resize <width> <height> [depth]`.
    pub fn from_command(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let verb = parts.next()?;
        let a: f32 = parts.next()?.parse().ok()?;
        let b: f32 = parts.next()?.parse().ok()?;
        let c: Option<f32> = match parts.next() {
            Some(raw) => Some(raw.parse().ok()?),
            None => None,
        };
        if parts.next().is_some() {
            return None;
        }
        match verb {
            "add" => Some(InteractionEvent::Add { x: a, y: b, z: c }),
            "resize" => Some(InteractionEvent::Resize { width: a, height: b, depth: c }),
            _ => None,
        }
    }
}
