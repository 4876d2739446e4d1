// Plain terminal rendering of a snapshot, colored with the active palette.

use crossterm::style::{Color, Stylize};
use std::fmt::Write;

use crate::config::OutputMode;
use crate::display::{LayoutMode, PanelKind, info_rows, sparkline};
use crate::models::{ColorScheme, HostInfo, Rgba, SystemSnapshot};

fn term_color(c: Rgba) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// One block per panel: title, sparkline(s) and headline value; detail rows
/// follow in [`LayoutMode::Detailed`].
pub fn render_text(
    snapshot: &SystemSnapshot,
    host: &HostInfo,
    scheme: &ColorScheme,
    mode: LayoutMode,
) -> String {
    let mut out = String::new();
    for kind in PanelKind::ALL {
        let color = term_color(kind.color(scheme));
        let max = kind.max_value(snapshot);
        let (primary, secondary) = kind.series(snapshot);
        let mut graph = sparkline(primary, max);
        if let Some(second) = secondary {
            graph.push(' ');
            graph.push_str(&sparkline(second, max));
        }
        let _ = writeln!(
            out,
            "{} {} {}",
            format!("{:<5}", kind.title()).with(color).bold(),
            graph.with(color),
            kind.summary(snapshot).with(term_color(scheme.text))
        );
        if mode.shows_detail() {
            for row in info_rows(kind, snapshot, host) {
                let _ = writeln!(
                    out,
                    "      {} {}",
                    format!("{:<10}", row.label).with(term_color(scheme.sub_text)),
                    row.value.with(term_color(scheme.text))
                );
            }
        }
    }
    out
}

/// One frame of output: a JSON line of the snapshot or the coloured text panels.
pub fn render_frame(
    output: OutputMode,
    snapshot: &SystemSnapshot,
    host: &HostInfo,
    scheme: &ColorScheme,
    mode: LayoutMode,
) -> Result<String, serde_json::Error> {
    match output {
        OutputMode::Json => serde_json::to_string(snapshot),
        OutputMode::Text => Ok(render_text(snapshot, host, scheme, mode)),
    }
}

/// Current terminal width and height, if stdout is a terminal.
pub fn terminal_size() -> Option<(u16, u16)> {
    crossterm::terminal::size().ok()
}
