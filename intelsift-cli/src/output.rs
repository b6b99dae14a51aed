//! Console output formatting with colors.

use intelsift_core::CanonicalRecord;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Console reporter with optional colors.
pub struct Reporter {
    use_colors: bool,
    quiet: bool,
}

impl Reporter {
    /// Creates a new reporter.
    pub fn new(use_colors: bool, quiet: bool) -> Self {
        Self { use_colors, quiet }
    }

    /// Prints a success line.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", self.green(msg));
        }
    }

    /// Prints an informational line.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{msg}");
        }
    }

    /// Prints a warning line.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("{}", self.yellow(msg));
        }
    }

    /// Prints an error line to stderr.
    pub fn error(&self, msg: &str) {
        if !self.quiet {
            eprintln!("{}", self.red(msg));
        }
    }

    /// Prints a section header.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("{}", self.bold(msg));
        }
    }

    /// Prints a geolocation record as a field-per-line report.
    ///
    /// Location fields that the endpoint omitted render as "Unknown";
    /// network fields render as "N/A".
    pub fn geo_details(&self, record: &CanonicalRecord) {
        if self.quiet {
            return;
        }
        println!("{}", self.format_geo(record));
    }

    /// Formats a geolocation record as a field-per-line report.
    fn format_geo(&self, record: &CanonicalRecord) -> String {
        let unknown = |v: &Option<String>| v.clone().unwrap_or_else(|| "Unknown".to_string());
        let na = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());

        let coords = match (record.latitude, record.longitude) {
            (Some(lat), Some(lon)) => format!("{lat}, {lon}"),
            _ => "Unknown".to_string(),
        };

        let mut lines = vec![
            format!("{}  {}", self.bold("Source:      "), record.source),
            format!("{}  {}", self.bold("Country:     "), unknown(&record.country)),
            format!("{}  {}", self.bold("City:        "), unknown(&record.city)),
            format!("{}  {}", self.bold("Coordinates: "), coords),
            format!("{}  {}", self.bold("ISP:         "), na(&record.isp)),
            format!(
                "{}  {}",
                self.bold("Organization:"),
                na(&record.organization)
            ),
            format!("{}  {}", self.bold("Timezone:    "), na(&record.timezone)),
        ];

        if let Some(resolved) = &record.resolved_query {
            lines.push(format!("{}  {}", self.bold("Resolved:    "), self.cyan(resolved)));
        }

        lines.join("\n")
    }

    fn green(&self, s: &str) -> String {
        self.paint(GREEN, s)
    }

    fn yellow(&self, s: &str) -> String {
        self.paint(YELLOW, s)
    }

    fn red(&self, s: &str) -> String {
        self.paint(RED, s)
    }

    fn cyan(&self, s: &str) -> String {
        self.paint(CYAN, s)
    }

    fn bold(&self, s: &str) -> String {
        self.paint(BOLD, s)
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.use_colors {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line_for<'a>(report: &'a str, label: &str) -> &'a str {
        report
            .lines()
            .find(|l| l.contains(label))
            .unwrap_or_else(|| panic!("no {label} line"))
    }

    #[test]
    fn test_missing_location_fields_render_unknown() {
        let reporter = Reporter::new(false, false);
        let record = CanonicalRecord::new("ip-api.com", "8.8.8.8");

        let report = reporter.format_geo(&record);
        assert!(line_for(&report, "Country:").ends_with("Unknown"));
        assert!(line_for(&report, "Coordinates:").ends_with("Unknown"));
    }

    #[test]
    fn test_missing_network_fields_render_na() {
        let reporter = Reporter::new(false, false);
        let record = CanonicalRecord::new("ip-api.com", "8.8.8.8");

        let report = reporter.format_geo(&record);
        assert!(line_for(&report, "ISP:").ends_with("N/A"));
        assert!(line_for(&report, "Timezone:").ends_with("N/A"));
    }

    #[test]
    fn test_populated_fields_render_values() {
        let reporter = Reporter::new(false, false);
        let mut record = CanonicalRecord::new("ip-api.com", "8.8.8.8");
        record.country = Some("United States".to_string());
        record.latitude = Some(37.751);
        record.longitude = Some(-97.822);
        record.isp = Some("Google LLC".to_string());

        let report = reporter.format_geo(&record);
        assert!(report.contains("United States"));
        assert!(report.contains("37.751, -97.822"));
        assert!(report.contains("Google LLC"));
    }

    #[test]
    fn test_colors_disabled_emit_no_escapes() {
        let reporter = Reporter::new(false, false);
        let record = CanonicalRecord::new("ip-api.com", "8.8.8.8");
        assert!(!reporter.format_geo(&record).contains('\x1b'));
    }
}
