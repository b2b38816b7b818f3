use kuaidi::{CandidateSummary, ParseReport};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(report: &ParseReport, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", report.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Candidates ━━━", ansi::GRAY));
    print_level("province", &report.details.provinces, &palette);
    print_level("city", &report.details.cities, &palette);
    print_level("county", &report.details.counties, &palette);

    println!("\n{}", palette.paint("━━━ Resolution ━━━", ansi::GRAY));
    print_slot("province", report.address.province.as_deref(), &palette);
    print_slot("city", report.address.city.as_deref(), &palette);
    print_slot("county", report.address.county.as_deref(), &palette);
    let anchor = &report.details.anchor;
    if anchor.is_empty() {
        println!("  {} {}", palette.paint("anchor:", ansi::BLUE), palette.dim("(none)"));
    } else {
        println!("  {} {}", palette.paint("anchor:", ansi::BLUE), palette.paint(anchor, ansi::YELLOW));
    }

    println!("\n{}", palette.paint("━━━ Fields ━━━", ansi::GRAY));
    print_slot("detail", report.address.detail.as_deref(), &palette);
    print_slot("name", report.address.receiving_name.as_deref(), &palette);
    let phone = if report.address.phone.is_empty() { None } else { Some(report.address.phone.as_str()) };
    print_slot("phone", phone, &palette);

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Score: {}  │  Reduce: {}  │  Extract: {}",
        palette.paint(format!("{:?}", report.elapsed), ansi::GREEN),
        palette.paint(format!("{:?}", report.details.score), ansi::CYAN),
        palette.dim(format!("{:?}", report.details.reduce)),
        palette.dim(format!("{:?}", report.details.extract)),
    );
    println!();
}

fn print_level(label: &str, candidates: &[CandidateSummary], palette: &ansi::Palette) {
    if candidates.is_empty() {
        println!("  {} {}", palette.paint(format!("{label}:"), ansi::BLUE), palette.dim("✗ no matches"));
        return;
    }
    let list = candidates
        .iter()
        .map(|c| format!("{} {}", palette.paint(&c.name, ansi::GREEN), palette.dim(format!("({})", c.score))))
        .collect::<Vec<_>>()
        .join("  ");
    println!("  {} {}", palette.paint(format!("{label}:"), ansi::BLUE), list);
}

fn print_slot(label: &str, value: Option<&str>, palette: &ansi::Palette) {
    match value {
        Some(value) => {
            println!("  {} {}", palette.paint(format!("{label}:"), ansi::BLUE), palette.bold(value));
        }
        None => println!("  {} {}", palette.paint(format!("{label}:"), ansi::BLUE), palette.dim("(none)")),
    }
}
