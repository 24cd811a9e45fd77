//! LAZYLOAD Panel - Debug-Bar Profiling Panel
//!
//! Renders a registry's [`ProfileSnapshot`] for a debug bar: a compact tab
//! label with the total number of executed computations, and an HTML table
//! with one row per registered key.
//!
//! The panel only ever reads `profile_snapshot()`; it never resolves or
//! mutates the registry it reports on.

use std::time::Duration;

use lazyload_core::{ConfigError, LazyRegistry, ProfileSnapshot};
use serde::{Deserialize, Serialize};

/// Anything that can hand out a profile snapshot.
pub trait ProfileSource {
    fn profile_snapshot(&self) -> ProfileSnapshot;
}

impl ProfileSource for LazyRegistry {
    fn profile_snapshot(&self) -> ProfileSnapshot {
        LazyRegistry::profile_snapshot(self)
    }
}

impl ProfileSource for ProfileSnapshot {
    fn profile_snapshot(&self) -> ProfileSnapshot {
        self.clone()
    }
}

/// A debug-bar panel: a short tab label plus an expandable body.
pub trait BarPanel {
    /// Tab label shown in the bar.
    fn tab(&self) -> String;

    /// Panel body shown when the tab is expanded.
    fn panel(&self) -> String;
}

/// Panel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub title: String,
    /// Add a cumulative duration column to the table.
    pub show_durations: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: "LazyLoader".to_string(),
            show_durations: true,
        }
    }
}

impl PanelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the panel title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Show or hide the duration column.
    pub fn with_durations(mut self, enabled: bool) -> Self {
        self.show_durations = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "title".to_string(),
                value: self.title.clone(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Profiling panel for a lazy registry.
#[derive(Debug)]
pub struct LazyLoaderPanel<'a, S: ProfileSource + ?Sized> {
    config: PanelConfig,
    source: &'a S,
}

impl<'a, S: ProfileSource + ?Sized> LazyLoaderPanel<'a, S> {
    /// Create a panel with the default title.
    pub fn new(source: &'a S) -> Self {
        Self {
            config: PanelConfig::default(),
            source,
        }
    }

    /// Create a panel with an explicit configuration.
    pub fn with_config(source: &'a S, config: PanelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, source })
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }
}

impl<S: ProfileSource + ?Sized> BarPanel for LazyLoaderPanel<'_, S> {
    fn tab(&self) -> String {
        let executed = self.source.profile_snapshot().total_executed();
        let title = escape_html(&self.config.title);
        if executed == 0 {
            return title;
        }
        format!("<strong>{title}</strong> {executed}")
    }

    fn panel(&self) -> String {
        let snapshot = self.source.profile_snapshot();
        let durations = self.config.show_durations;

        let mut out = Vec::with_capacity(snapshot.len() * 5 + 9);
        out.push("<table>".to_string());
        out.push("<thead>".to_string());
        out.push("<tr>".to_string());
        out.push("<th>Closure</th>".to_string());
        out.push("<th>Executed</th>".to_string());
        if durations {
            out.push("<th>Duration</th>".to_string());
        }
        out.push("</tr>".to_string());
        out.push("</thead>".to_string());
        out.push("<tbody>".to_string());
        for entry in &snapshot {
            out.push("<tr>".to_string());
            out.push(format!("<td>{}</td>", escape_html(&entry.key)));
            out.push(format!("<td>{}&times;</td>", entry.executed));
            if durations {
                let cell = entry
                    .total_duration
                    .map(format_duration)
                    .unwrap_or_else(|| "&ndash;".to_string());
                out.push(format!("<td>{cell}</td>"));
            }
            out.push("</tr>".to_string());
        }
        out.push("</tbody>".to_string());
        out.push("</table>".to_string());
        out.join("\n")
    }
}

/// Milliseconds with microsecond precision, e.g. `1.250 ms`.
pub fn format_duration(duration: Duration) -> String {
    format!("{:.3} ms", duration.as_secs_f64() * 1000.0)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use lazyload_core::ProfileEntry;

    fn snapshot(entries: &[(&str, u64, Option<Duration>)]) -> ProfileSnapshot {
        ProfileSnapshot::new(
            entries
                .iter()
                .map(|(key, executed, total)| ProfileEntry {
                    key: key.to_string(),
                    executed: *executed,
                    last_duration: *total,
                    total_duration: *total,
                    last_computed_at: None,
                })
                .collect(),
        )
    }

    #[test]
    fn test_tab_without_executions_is_plain_title() {
        let data = snapshot(&[("job", 0, None)]);
        assert_eq!(LazyLoaderPanel::new(&data).tab(), "LazyLoader");
    }

    #[test]
    fn test_tab_shows_total_executions() {
        let data = snapshot(&[("job", 1, None), ("favourite_drink", 3, None)]);
        assert_eq!(LazyLoaderPanel::new(&data).tab(), "<strong>LazyLoader</strong> 4");
    }

    #[test]
    fn test_panel_rows_in_snapshot_order() {
        let data = snapshot(&[
            ("job", 1, Some(Duration::from_micros(1250))),
            ("greeting", 0, None),
        ]);
        let html = LazyLoaderPanel::new(&data).panel();

        let job = html.find("<td>job</td>").unwrap();
        let greeting = html.find("<td>greeting</td>").unwrap();
        assert!(job < greeting);
        assert!(html.contains("<td>1&times;</td>"));
        assert!(html.contains("<td>1.250 ms</td>"));
        assert!(html.contains("<td>&ndash;</td>"));
        assert!(html.starts_with("<table>"));
        assert!(html.ends_with("</table>"));
        assert!(html.contains("<tbody>"));
    }

    #[test]
    fn test_panel_without_duration_column() {
        let data = snapshot(&[("job", 2, Some(Duration::from_millis(1)))]);
        let config = PanelConfig::new().with_durations(false);
        let html = LazyLoaderPanel::with_config(&data, config).unwrap().panel();
        assert!(!html.contains("Duration"));
        assert!(!html.contains(" ms"));
    }

    #[test]
    fn test_keys_and_title_are_escaped() {
        let data = snapshot(&[("<script>", 1, None)]);
        let config = PanelConfig::new().with_title("Lazy & Co");
        let panel = LazyLoaderPanel::with_config(&data, config).unwrap();
        assert!(panel.panel().contains("<td>&lt;script&gt;</td>"));
        assert_eq!(panel.tab(), "<strong>Lazy &amp; Co</strong> 1");
    }

    #[test]
    fn test_blank_title_rejected() {
        let data = ProfileSnapshot::default();
        let err = LazyLoaderPanel::with_config(&data, PanelConfig::new().with_title(" ")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "title"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(2)), "2.000 ms");
        assert_eq!(format_duration(Duration::ZERO), "0.000 ms");
    }
}
