use crate::classification::Classification;
use crate::config::{Settings, SettingsSection};
use crate::dispatch::{IgnoreReason, Outcome, Strategy};
use crate::highlight::ClassList;
use crate::host::NoteFile;
use serde_json::json;
use std::io::Write;

/// Result of opening one note, ready for printing.
pub struct OpenReport<'a> {
    pub note: &'a NoteFile,
    pub outcome: &'a Outcome,
    /// Classes on the highlighted surface after the event was handled.
    pub classes: Option<&'a ClassList>,
}

fn level_color(level: Classification) -> &'static str {
    match level {
        Classification::White => "\x1b[1;97m",
        Classification::Green => "\x1b[1;32m",
        Classification::Amber | Classification::AmberStrict => "\x1b[1;33m",
        Classification::Red => "\x1b[1;31m",
    }
}

fn strategy_label(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Path => "path match",
        Strategy::PathFallback => "frontmatter (path did not match)",
        Strategy::Frontmatter => "frontmatter",
    }
}

fn ignore_label(reason: IgnoreReason) -> &'static str {
    match reason {
        IgnoreReason::NoFile => "no file open",
        IgnoreReason::NotMarkdown => "not a markdown note",
        IgnoreReason::HighlightingDisabled => "path and frontmatter highlighting are both off",
    }
}

fn class_string(classes: Option<&ClassList>) -> String {
    classes
        .map(|list| list.iter().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

/// Print the report with ANSI colors.
pub fn print_pretty(report: &OpenReport) {
    let mut out = std::io::stdout();
    write_pretty(report, &mut out);
}

fn write_pretty(report: &OpenReport, out: &mut dyn Write) {
    let _ = writeln!(out, "\x1b[4m{}\x1b[0m", report.note.path);

    match report.outcome {
        Outcome::Ignored(reason) => {
            let _ = writeln!(out, "  \x1b[90m–\x1b[0m ignored: {}", ignore_label(*reason));
        }
        Outcome::Applied {
            strategy,
            classification,
            surface,
            surface_found,
        } => {
            match classification {
                Some(level) => {
                    let _ = writeln!(
                        out,
                        "  {}TLP:{}\x1b[0m \x1b[90mvia {}\x1b[0m",
                        level_color(*level),
                        level.pretty_name(),
                        strategy_label(*strategy)
                    );
                }
                None => {
                    let _ = writeln!(
                        out,
                        "  \x1b[90munclassified via {}\x1b[0m",
                        strategy_label(*strategy)
                    );
                }
            }

            if *surface_found {
                let _ = writeln!(
                    out,
                    "  \x1b[90m{:<13}\x1b[0m {}",
                    surface.as_str(),
                    class_string(report.classes)
                );
            } else {
                let _ = writeln!(
                    out,
                    "  \x1b[33mwarn\x1b[0m  {} is not rendered; nothing highlighted",
                    surface
                );
            }
        }
    }
}

/// Print the report as JSON.
pub fn print_json(report: &OpenReport) {
    let mut out = std::io::stdout();
    write_json(report, &mut out);
}

fn write_json(report: &OpenReport, out: &mut dyn Write) {
    let classes: Vec<&str> = report
        .classes
        .map(|list| list.iter().collect())
        .unwrap_or_default();
    let value = match report.outcome {
        Outcome::Ignored(reason) => json!({
            "path": report.note.path,
            "ignored": reason,
        }),
        Outcome::Applied {
            strategy,
            classification,
            surface,
            surface_found,
        } => json!({
            "path": report.note.path,
            "strategy": strategy,
            "classification": classification,
            "surface": surface,
            "surfaceFound": surface_found,
            "classes": classes,
        }),
    };
    let _ = writeln!(out, "{}", serde_json::to_string_pretty(&value).unwrap_or_default());
}

/// Print one line per report: `path<TAB>classification<TAB>classes`.
pub fn print_compact(report: &OpenReport) {
    let mut out = std::io::stdout();
    write_compact(report, &mut out);
}

fn write_compact(report: &OpenReport, out: &mut dyn Write) {
    let level = match report.outcome {
        Outcome::Ignored(_) => "-",
        Outcome::Applied {
            classification: Some(level),
            ..
        } => level.as_str(),
        Outcome::Applied { .. } => "none",
    };
    let _ = writeln!(
        out,
        "{}\t{}\t{}",
        report.note.path,
        level,
        class_string(report.classes)
    );
}

/// Print the effective settings as the panel would show them.
pub fn print_settings(settings: &Settings) {
    let mut out = std::io::stdout();
    write_settings(settings, &mut out);
}

fn write_settings(settings: &Settings, out: &mut dyn Write) {
    let on_off = |b: bool| if b { "\x1b[32mon\x1b[0m" } else { "\x1b[90moff\x1b[0m" };

    for section in settings.sections() {
        match section {
            SettingsSection::Surface => {
                let _ = writeln!(
                    out,
                    "  {:<22} {} ({})",
                    "Object to highlight",
                    settings.ui_element_to_highlight.label(),
                    settings.ui_element_to_highlight
                );
            }
            SettingsSection::Toggles => {
                let _ = writeln!(
                    out,
                    "  {:<22} {}",
                    "Check frontmatter",
                    on_off(settings.use_frontmatter_highlight)
                );
                let _ = writeln!(
                    out,
                    "  {:<22} {}",
                    "Check path",
                    on_off(settings.use_path_highlight)
                );
            }
            SettingsSection::Frontmatter => {
                let _ = writeln!(out, "\n\x1b[1mFrontmatter\x1b[0m");
                let _ = writeln!(out, "  {:<22} {}", "Attribute", settings.frontmatter_attribute);
                for level in Classification::ALL {
                    let _ = writeln!(
                        out,
                        "  {}{:<22}\x1b[0m {}",
                        level_color(level),
                        level.pretty_name(),
                        settings.tlp_values.get(level)
                    );
                }
            }
            SettingsSection::Path => {
                let _ = writeln!(out, "\n\x1b[1mPath\x1b[0m");
                let shown = if settings.path_to_highlight.is_empty() {
                    "\x1b[90m(empty: every note matches)\x1b[0m"
                } else {
                    settings.path_to_highlight.as_str()
                };
                let _ = writeln!(out, "  {:<22} {}", "Path", shown);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Surface;
    use crate::highlight::StyleTarget;

    fn render(f: fn(&OpenReport, &mut dyn Write), report: &OpenReport) -> String {
        let mut buf = Vec::new();
        f(report, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    fn applied(level: Option<Classification>, surface_found: bool) -> Outcome {
        Outcome::Applied {
            strategy: Strategy::Frontmatter,
            classification: level,
            surface: Surface::Titlebar,
            surface_found,
        }
    }

    #[test]
    fn pretty_shows_level_and_classes() {
        let note = NoteFile::new("Clients/acme.md");
        let outcome = applied(Some(Classification::Amber), true);
        let classes = ClassList::with_classes(&["tlp-highlight", "tlp-amber"]);
        let report = OpenReport {
            note: &note,
            outcome: &outcome,
            classes: Some(&classes),
        };
        let text = render(write_pretty, &report);
        assert!(text.contains("Clients/acme.md"));
        assert!(text.contains("TLP:AMBER"));
        assert!(text.contains("via frontmatter"));
        assert!(text.contains("tlp-amber tlp-highlight"));
    }

    #[test]
    fn pretty_warns_when_surface_missing() {
        let note = NoteFile::new("a.md");
        let outcome = applied(Some(Classification::Red), false);
        let report = OpenReport {
            note: &note,
            outcome: &outcome,
            classes: None,
        };
        assert!(render(write_pretty, &report).contains("titlebar is not rendered"));
    }

    #[test]
    fn pretty_ignored() {
        let note = NoteFile::new("board.canvas");
        let outcome = Outcome::Ignored(IgnoreReason::NotMarkdown);
        let report = OpenReport {
            note: &note,
            outcome: &outcome,
            classes: None,
        };
        assert!(render(write_pretty, &report).contains("ignored: not a markdown note"));
    }

    #[test]
    fn json_fields() {
        let note = NoteFile::new("Private/x.md");
        let outcome = Outcome::Applied {
            strategy: Strategy::Path,
            classification: Some(Classification::Red),
            surface: Surface::ViewContent,
            surface_found: true,
        };
        let mut classes = ClassList::new();
        classes.add(&["tlp-highlight-light", "tlp-red"]);
        let report = OpenReport {
            note: &note,
            outcome: &outcome,
            classes: Some(&classes),
        };
        let value: serde_json::Value = serde_json::from_str(&render(write_json, &report)).unwrap();
        assert_eq!(value["path"], "Private/x.md");
        assert_eq!(value["strategy"], "path");
        assert_eq!(value["classification"], "red");
        assert_eq!(value["surface"], "view-content");
        assert_eq!(value["surfaceFound"], true);
        assert_eq!(value["classes"], json!(["tlp-highlight-light", "tlp-red"]));
    }

    #[test]
    fn json_ignored() {
        let note = NoteFile::new("a.md");
        let outcome = Outcome::Ignored(IgnoreReason::HighlightingDisabled);
        let report = OpenReport {
            note: &note,
            outcome: &outcome,
            classes: None,
        };
        let value: serde_json::Value = serde_json::from_str(&render(write_json, &report)).unwrap();
        assert_eq!(value["ignored"], "highlighting-disabled");
    }

    #[test]
    fn compact_line() {
        let note = NoteFile::new("notes/a.md");
        let outcome = applied(None, true);
        let classes = ClassList::new();
        let report = OpenReport {
            note: &note,
            outcome: &outcome,
            classes: Some(&classes),
        };
        assert_eq!(render(write_compact, &report), "notes/a.md\tnone\t\n");

        let outcome = applied(Some(Classification::AmberStrict), true);
        let classes = ClassList::with_classes(&["tlp-highlight", "tlp-amberStrict"]);
        let report = OpenReport {
            note: &note,
            outcome: &outcome,
            classes: Some(&classes),
        };
        assert_eq!(
            render(write_compact, &report),
            "notes/a.md\tamberStrict\ttlp-amberStrict tlp-highlight\n"
        );
    }

    #[test]
    fn settings_hide_disabled_sections() {
        let mut buf = Vec::new();
        write_settings(&Settings::default(), &mut buf);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Frontmatter"));
        assert!(text.contains("AMBER:STRICT"));
        assert!(!text.contains("\x1b[1mPath"));

        let settings = Settings {
            use_path_highlight: true,
            use_frontmatter_highlight: false,
            ..Default::default()
        };
        let mut buf = Vec::new();
        write_settings(&settings, &mut buf);
        let text = String::from_utf8(buf).unwrap();
        assert!(!text.contains("Attribute"));
        assert!(text.contains("every note matches"));
    }

    #[test]
    fn settings_print_sections_in_panel_order() {
        let settings = Settings {
            use_path_highlight: true,
            path_to_highlight: "Private/".into(),
            ..Default::default()
        };
        let mut buf = Vec::new();
        write_settings(&settings, &mut buf);
        let text = String::from_utf8(buf).unwrap();

        let headings: Vec<&str> = text
            .lines()
            .filter_map(|line| line.strip_prefix("\x1b[1m"))
            .filter_map(|line| line.strip_suffix("\x1b[0m"))
            .collect();
        assert_eq!(headings, ["Frontmatter", "Path"]);
        assert_eq!(settings.sections().len(), 4);
        assert!(text.find("Object to highlight") < text.find("Check path"));
        assert!(text.contains("Private/"));
    }
}
