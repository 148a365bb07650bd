//! Synthetic mouse and keyboard input.

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

use super::core::PageSession;

impl PageSession {
    async fn dispatch_mouse(&self, event: MouseEvent) -> Result<(), CdpError> {
        self.call("Input.dispatchMouseEvent", Some(serde_json::to_value(event)?))
            .await?;
        Ok(())
    }

    /// Left click at viewport coordinates: hover, press, release.
    pub async fn click(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.dispatch_mouse(MouseEvent::moved(x, y)).await?;
        self.dispatch_mouse(MouseEvent::left(MouseEventKind::Pressed, x, y))
            .await?;
        self.dispatch_mouse(MouseEvent::left(MouseEventKind::Released, x, y))
            .await?;
        debug!("Clicked at ({:.0}, {:.0})", x, y);
        Ok(())
    }

    /// Insert text into the focused element as a single edit.
    pub async fn type_text(&self, text: &str) -> Result<(), CdpError> {
        self.call("Input.insertText", Some(json!({ "text": text })))
            .await?;
        Ok(())
    }

    /// Press and release a combination such as `"Control+a"`.
    pub async fn press_key_combo(&self, combo: &str) -> Result<(), CdpError> {
        let parts: Vec<&str> = combo.split('+').collect();
        let Some((key, modifier_names)) = parts.split_last() else {
            return Ok(());
        };
        let modifiers = Self::get_modifiers(modifier_names);

        for kind in [KeyEventKind::KeyDown, KeyEventKind::KeyUp] {
            let event = KeyEvent { kind, key: *key, modifiers };
            self.call("Input.dispatchKeyEvent", Some(serde_json::to_value(event)?))
                .await?;
        }
        Ok(())
    }

    /// Modifier bit mask: Alt=1, Control=2, Meta=4, Shift=8.
    pub(super) fn get_modifiers(names: &[&str]) -> i32 {
        names
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "alt" => 1,
                "control" | "ctrl" => 2,
                "meta" | "command" | "cmd" => 4,
                "shift" => 8,
                _ => 0,
            })
            .fold(0, |flags, bit| flags | bit)
    }
}
