/// Color used for lines without a backend color or palette entry.
pub const FALLBACK_COLOR: &str = "#999";

const PALETTE: [(&str, &str); 12] = [
    ("L1", "#E2001A"),
    ("L2", "#A93DB9"),
    ("L3", "#00843D"),
    ("L4", "#F9B000"),
    ("L5", "#005BA9"),
    ("L6", "#683F99"),
    ("L7", "#C1A961"),
    ("L8", "#E85C98"),
    ("L9", "#F36F21"),
    ("L10", "#009CDD"),
    ("L11", "#A5CE39"),
    ("L12", "#9CA299"),
];

/// Turns a raw line code into its display label.
///
/// Branch codes encode the trunk and the direction (`91` is the southern
/// branch of line 9). Unknown codes pass through untouched so newly added
/// variants still show up, just unformatted.
pub fn format(code: &str) -> String {
    if let Ok(number) = code.parse::<u32>()
        && (1..=11).contains(&number)
    {
        return format!("L{code}");
    }
    match code {
        "91" => "L9 S".into(),
        "94" => "L9 N".into(),
        "101" => "L10 S".into(),
        "104" => "L10 N".into(),
        "99" => "FM".into(),
        _ => code.into(),
    }
}

/// Fixed palette color for a line, looked up by its display label.
pub fn palette_color(code: &str) -> Option<&'static str> {
    let label = format(code);
    PALETTE
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, color)| *color)
}

/// Picks the backend color, then the palette, then the grey fallback.
pub fn resolve_color<'a>(backend_color: Option<&'a str>, code: &str) -> &'a str {
    backend_color
        .or_else(|| palette_color(code))
        .unwrap_or(FALLBACK_COLOR)
}

#[test]
fn numeric_codes_test() {
    for n in 1..=11 {
        assert_eq!(format(&n.to_string()), format!("L{n}"));
    }
}

#[test]
fn branch_codes_test() {
    assert_eq!(format("91"), "L9 S");
    assert_eq!(format("94"), "L9 N");
    assert_eq!(format("101"), "L10 S");
    assert_eq!(format("104"), "L10 N");
    assert_eq!(format("99"), "FM");
}

#[test]
fn passthrough_codes_test() {
    for code in ["0", "12", "L1", "", "R2 Nord", "100"] {
        assert_eq!(format(code), code);
    }
}

#[test]
fn palette_test() {
    assert_eq!(palette_color("3"), Some("#00843D"));
    assert_eq!(palette_color("91"), None);
    assert_eq!(resolve_color(None, "FM"), FALLBACK_COLOR);
    assert_eq!(resolve_color(Some("#123456"), "1"), "#123456");
}
