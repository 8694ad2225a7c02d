//! Turns a [`DisplayState`] into terminal output.
use crate::session::DisplayState;
use anyhow::Result;

/// `kind: line`, continuation lines indented under the first.
pub fn render_text(state: &DisplayState) -> String {
  let mut out = String::new();
  for (kind, slot) in state.slots() {
    let label = format!("{kind}: ");
    let indent = " ".repeat(label.len());
    for (i, line) in slot.lines.iter().enumerate() {
      let prefix = if i == 0 { label.as_str() } else { indent.as_str() };
      out.push_str(prefix);
      out.push_str(line);
      out.push('\n');
    }
  }
  out
}

pub fn render_json(state: &DisplayState) -> Result<String> {
  Ok(serde_json::to_string(state)?)
}
