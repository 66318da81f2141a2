//! Style maps and the conversions between their representations.
//!
//! Styles are kept as ordered maps keyed by property name (usually camelCase,
//! as authored in the editor). The functions here turn them into CSS
//! declarations, script-style object maps, and normalized values
//! (units, colors, font weights).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ordered style map. Insertion order is the output order.
pub type StyleMap = IndexMap<String, StyleValue>;

/// A single style value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// Explicitly unset. Dropped on output; removes the key when merged.
    Null,
    /// A bare number (keeps integer/float formatting).
    Number(serde_json::Number),
    /// A string value, emitted as-is after normalization.
    Text(String),
    /// A nested map (e.g. a media-query block). Replaced wholesale on merge.
    Nested(StyleMap),
}

impl StyleValue {
    /// Check if this value is dropped on output (null or empty string).
    pub fn is_empty(&self) -> bool {
        match self {
            StyleValue::Null => true,
            StyleValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Get the numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Get the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<i64> for StyleValue {
    fn from(value: i64) -> Self {
        StyleValue::Number(value.into())
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(StyleValue::Number)
            .unwrap_or(StyleValue::Null)
    }
}

/// Build a style map from string pairs.
pub fn style_map(pairs: &[(&str, &str)]) -> StyleMap {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), StyleValue::from(*value)))
        .collect()
}

/// Properties that take a `px` unit when given a bare number.
const UNIT_PROPERTIES: &[&str] = &[
    "width", "height", "min-width", "min-height", "max-width", "max-height",
    "top", "right", "bottom", "left",
    "margin", "margin-top", "margin-right", "margin-bottom", "margin-left",
    "padding", "padding-top", "padding-right", "padding-bottom", "padding-left",
    "border-width", "border-top-width", "border-right-width", "border-bottom-width",
    "border-left-width", "border-radius",
    "font-size", "letter-spacing", "word-spacing",
    "flex-basis", "gap",
];

/// Unit properties where a value `<= 1` is read as a fraction.
const PERCENT_PROPERTIES: &[&str] = &[
    "width", "height", "min-width", "min-height", "max-width", "max-height",
    "top", "right", "bottom", "left",
    "flex-basis",
];

/// The standard font-weight ladder.
const FONT_WEIGHTS: [f64; 9] = [100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0, 800.0, 900.0];

/// Named colors and their palette values.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("red", "#dc3545"),
    ("blue", "#007bff"),
    ("green", "#28a745"),
    ("yellow", "#ffc107"),
    ("orange", "#fd7e14"),
    ("purple", "#6f42c1"),
    ("pink", "#e83e8c"),
    ("teal", "#20c997"),
    ("cyan", "#17a2b8"),
    ("white", "#ffffff"),
    ("black", "#000000"),
    ("gray", "#6c757d"),
    ("grey", "#6c757d"),
    ("lightgray", "#f8f9fa"),
    ("lightgrey", "#f8f9fa"),
    ("darkgray", "#343a40"),
    ("darkgrey", "#343a40"),
    ("transparent", "transparent"),
];

/// Keywords accepted as colors besides hex and rgb forms.
const COLOR_KEYWORDS: &[&str] = &[
    "transparent", "currentcolor", "inherit", "initial", "unset",
];

/// Properties the editor knows how to validate (kebab-case).
const KNOWN_PROPERTIES: &[&str] = &[
    "display", "position", "flex-direction", "justify-content", "align-items", "flex-wrap",
    "font-family", "font-weight", "text-align", "text-decoration", "text-transform",
    "color", "background-color",
    "width", "height", "min-width", "min-height", "max-width", "max-height",
    "margin", "padding",
    "border-style", "border-radius",
    "box-shadow", "opacity",
];

/// Units accepted by [`is_valid_size`].
const SIZE_UNITS: &[&str] = &["px", "%", "em", "rem", "vh", "vw", "vmin", "vmax"];

// ========== CASE CONVERSION ==========

/// Convert a camelCase property name to kebab-case.
///
/// A hyphen goes before each uppercase letter not already preceded by one,
/// so `WebkitTransition` becomes `-webkit-transition`.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for ch in name.chars() {
        if ch.is_uppercase() {
            if prev != Some('-') {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
        prev = Some(ch);
    }
    out
}

/// Convert a kebab-case property name to camelCase.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '-' {
            if let Some(next) = chars.peek().copied().filter(char::is_ascii_lowercase) {
                out.push(next.to_ascii_uppercase());
                chars.next();
                continue;
            }
        }
        out.push(ch);
    }
    out
}

// ========== MAP CONVERSION ==========

/// Render a style map as inline CSS declarations (`prop: value;` pairs).
pub fn to_css_string(style: &StyleMap) -> String {
    style
        .iter()
        .filter_map(|(key, value)| {
            let property = kebab_case(key);
            let formatted = format_value(&property, value)?;
            Some(format!("{property}: {formatted};"))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a style map to camelCase keys for embedding as a script object.
pub fn to_script_style_map(style: &StyleMap) -> StyleMap {
    style
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (camel_case(key), value.clone()))
        .collect()
}

/// Convert a style map to kebab-case keys, leaving values untouched.
pub fn to_css_style_map(style: &StyleMap) -> StyleMap {
    style
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (kebab_case(key), value.clone()))
        .collect()
}

/// Convert a style map to kebab-case keys with every value formatted.
pub fn normalize_style_map(style: &StyleMap) -> IndexMap<String, String> {
    style
        .iter()
        .filter_map(|(key, value)| {
            let property = kebab_case(key);
            let formatted = format_value(&property, value)?;
            Some((property, formatted))
        })
        .collect()
}

// ========== VALUE FORMATTING ==========

/// Format a value for a (kebab-case) CSS property.
///
/// Returns `None` for values that are dropped on output.
pub fn format_value(property: &str, value: &StyleValue) -> Option<String> {
    match value {
        StyleValue::Null | StyleValue::Nested(_) => None,
        StyleValue::Number(n) => n.as_f64().map(|v| format_numeric(property, v)),
        StyleValue::Text(s) if s.is_empty() => None,
        StyleValue::Text(s) => Some(format_string(property, s)),
    }
}

/// Format a numeric value with the unit its property expects.
pub fn format_numeric(property: &str, value: f64) -> String {
    if UNIT_PROPERTIES.contains(&property) {
        if PERCENT_PROPERTIES.contains(&property) && value <= 1.0 {
            return format!("{}%", format_number(value * 100.0));
        }
        return format!("{}px", format_number(value));
    }

    match property {
        "opacity" => format_number(value.clamp(0.0, 1.0)),
        "font-weight" => format_number(snap_font_weight(value)),
        _ => format_number(value),
    }
}

fn format_string(property: &str, value: &str) -> String {
    if is_plain_number(value) {
        if let Ok(number) = value.parse::<f64>() {
            return format_numeric(property, number);
        }
    }

    if property.contains("color") || property.contains("background") {
        return normalize_color(value);
    }

    value.to_string()
}

/// Snap a weight to the nearest step of the 100..900 ladder.
/// Ties resolve to the lighter weight.
pub fn snap_font_weight(value: f64) -> f64 {
    FONT_WEIGHTS
        .iter()
        .copied()
        .fold(FONT_WEIGHTS[0], |prev, curr| {
            if (curr - value).abs() < (prev - value).abs() {
                curr
            } else {
                prev
            }
        })
}

/// Print a number the way a script runtime would (`12`, not `12.0`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// `^\d+(\.\d+)?$`
fn is_plain_number(s: &str) -> bool {
    let mut parts = s.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && parts.next().is_none_or(all_digits)
}

/// Append a unit to a bare number or numeric string; other values pass through.
pub fn with_unit(value: &StyleValue, unit: &str) -> StyleValue {
    match value {
        StyleValue::Number(n) => match n.as_f64() {
            Some(v) => StyleValue::Text(format!("{}{unit}", format_number(v))),
            None => value.clone(),
        },
        StyleValue::Text(s) if is_plain_number(s) => match s.parse::<f64>() {
            Ok(v) => StyleValue::Text(format!("{}{unit}", format_number(v))),
            Err(_) => value.clone(),
        },
        _ => value.clone(),
    }
}

/// Convert a number or `px` value to `rem` against the given base size.
pub fn to_rem(value: &StyleValue, base: f64) -> StyleValue {
    let pixels = match value {
        StyleValue::Number(n) => n.as_f64(),
        StyleValue::Text(s) => s.strip_suffix("px").and_then(parse_float_prefix),
        _ => None,
    };
    match pixels {
        Some(px) if base != 0.0 => StyleValue::Text(format!("{}rem", format_number(px / base))),
        _ => value.clone(),
    }
}

// ========== PARSING ==========

/// Parse a CSS value to a number: `px` values as pixels, `%` values as
/// fractions, anything unparseable as zero.
pub fn parse_css_value(value: &StyleValue) -> f64 {
    match value {
        StyleValue::Number(n) => n.as_f64().unwrap_or(0.0),
        StyleValue::Text(s) => {
            if let Some(percent) = s.strip_suffix('%') {
                return parse_float_prefix(percent).map_or(0.0, |v| v / 100.0);
            }
            parse_float_prefix(s).unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

/// Parse the leading decimal number of a string (like a script `parseFloat`).
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > end + 1 || end > digits_start {
            end = frac_end;
        }
    }
    s[..end].parse::<f64>().ok()
}

/// Parse a declaration list (`color: red; font-size: 12px`) into a style map
/// with camelCase keys.
pub fn parse_css_string(css: &str) -> StyleMap {
    css.split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let (property, value) = (property.trim(), value.trim());
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some((camel_case(property), StyleValue::from(value)))
        })
        .collect()
}

// ========== COLORS ==========

/// Normalize a color.
///
/// `#rgb` expands to `#rrggbb` keeping the digits' case. Full hex and `rgb()`
/// forms are lowercased. Named colors map through the palette and anything
/// else passes through unchanged.
pub fn normalize_color(color: &str) -> String {
    if color.is_empty() {
        return String::new();
    }

    if let Some(hex) = color.strip_prefix('#') {
        if hex.len() == 3 && hex.is_ascii() {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            return format!("#{expanded}");
        }
        return color.to_ascii_lowercase();
    }

    let lower = color.to_ascii_lowercase();
    if lower.starts_with("rgb") {
        return lower;
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, value)| value.to_string())
        .unwrap_or_else(|| color.to_string())
}

/// Check whether a string looks like a valid color.
pub fn is_valid_color(color: &str) -> bool {
    if color.is_empty() {
        return false;
    }

    if let Some(hex) = color.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.bytes().all(|b| b.is_ascii_hexdigit());
    }

    if color.starts_with("rgb(") || color.starts_with("rgba(") {
        return true;
    }

    let lower = color.to_ascii_lowercase();
    COLOR_KEYWORDS.contains(&lower.as_str()) || NAMED_COLORS.iter().any(|(name, _)| *name == lower)
}

/// Check whether a value is a valid size (number, number with unit, or keyword).
pub fn is_valid_size(value: &StyleValue) -> bool {
    match value {
        StyleValue::Number(_) => true,
        StyleValue::Text(s) => {
            if matches!(s.as_str(), "auto" | "inherit" | "initial") {
                return true;
            }
            SIZE_UNITS.iter().any(|unit| {
                s.strip_suffix(unit).is_some_and(is_plain_number)
            })
        }
        _ => false,
    }
}

/// Validate a value against its property.
///
/// Null values are invalid. Unknown properties are accepted. Color and
/// background properties must hold a valid color, sizing properties a
/// valid size.
pub fn is_valid_css_property(property: &str, value: &StyleValue) -> bool {
    if property.is_empty() || matches!(value, StyleValue::Null) {
        return false;
    }

    let property = kebab_case(property);
    if !KNOWN_PROPERTIES.contains(&property.as_str()) {
        log::debug!("Unknown CSS property: {}", property);
        return true;
    }

    if property.contains("color") || property.contains("background") {
        return value.as_str().is_some_and(is_valid_color);
    }
    if property.contains("width") || property.contains("height") || property.contains("size") {
        return is_valid_size(value);
    }
    true
}

fn parse_hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() < 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

fn to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Move a `#rrggbb` color towards white by `amount` (0..1).
pub fn lighten_color(hex: &str, amount: f64) -> Option<String> {
    let (r, g, b) = parse_hex_rgb(hex)?;
    let lift = |c: u8| {
        let c = f64::from(c);
        (c + (amount * (255.0 - c)).round()).clamp(0.0, 255.0) as u8
    };
    Some(to_hex(lift(r), lift(g), lift(b)))
}

/// Move a `#rrggbb` color towards black by `amount` (0..1).
pub fn darken_color(hex: &str, amount: f64) -> Option<String> {
    let (r, g, b) = parse_hex_rgb(hex)?;
    let drop = |c: u8| {
        let c = f64::from(c);
        (c - (amount * c).round()).clamp(0.0, 255.0) as u8
    };
    Some(to_hex(drop(r), drop(g), drop(b)))
}

/// Nine progressively lighter variations of a base color.
///
/// Colors that do not normalize to hex yield just the input.
pub fn color_palette(base: &str) -> Vec<String> {
    if base.is_empty() {
        return Vec::new();
    }
    let hex = normalize_color(base);
    if !hex.starts_with('#') {
        return vec![base.to_string()];
    }
    (1..=9)
        .filter_map(|step| lighten_color(&hex, f64::from(step) / 10.0))
        .collect()
}

// ========== MAP MANIPULATION ==========

/// Remove null and empty values from a style map.
pub fn clean_style(style: &StyleMap) -> StyleMap {
    style
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Check whether a style map has no effective values.
pub fn is_empty_style(style: &StyleMap) -> bool {
    style.values().all(StyleValue::is_empty)
}

/// Merge custom styles over defaults.
///
/// Empty custom values are ignored. Nested maps on both sides merge one
/// level deep; everything else is replaced.
pub fn merge_styles(custom: &StyleMap, defaults: &StyleMap) -> StyleMap {
    let mut result = defaults.clone();
    for (key, value) in custom {
        if value.is_empty() {
            continue;
        }
        match (result.get_mut(key), value) {
            (Some(StyleValue::Nested(existing)), StyleValue::Nested(overrides)) => {
                for (k, v) in overrides {
                    existing.insert(k.clone(), v.clone());
                }
            }
            _ => {
                result.insert(key.clone(), value.clone());
            }
        }
    }
    result
}

/// Pick the given properties (any case) out of a style map, keyed camelCase.
pub fn extract_properties(style: &StyleMap, properties: &[&str]) -> StyleMap {
    properties
        .iter()
        .filter_map(|property| {
            let key = camel_case(property);
            let value = style.get(&key)?.clone();
            Some((key, value))
        })
        .collect()
}

// ========== LAYOUT HELPERS ==========

/// Flexbox container styles. The editor's defaults are
/// `row`, `flex-start`, `stretch` and `nowrap`.
pub fn flexbox_styles(direction: &str, justify: &str, align: &str, wrap: &str) -> StyleMap {
    style_map(&[
        ("display", "flex"),
        ("flexDirection", direction),
        ("justifyContent", justify),
        ("alignItems", align),
        ("flexWrap", wrap),
    ])
}

/// Grid container styles (defaults `1fr` and `8px`).
pub fn grid_styles(columns: &str, gap: &str) -> StyleMap {
    style_map(&[("display", "grid"), ("gridTemplateColumns", columns), ("gap", gap)])
}

/// Margin and padding, with bare numbers given `px`.
pub fn spacing_styles(margin: &StyleValue, padding: &StyleValue) -> StyleMap {
    let mut style = StyleMap::new();
    style.insert("margin".into(), with_unit(margin, "px"));
    style.insert("padding".into(), with_unit(padding, "px"));
    style
}

/// Base styles plus one nested `@media (min-width: ..)` block per breakpoint.
pub fn responsive_styles(base: &StyleMap, breakpoints: &[(&str, StyleMap)]) -> StyleMap {
    let mut style = base.clone();
    for (breakpoint, overrides) in breakpoints {
        style.insert(
            format!("@media (min-width: {breakpoint})"),
            StyleValue::Nested(overrides.clone()),
        );
    }
    style
}

/// Build a `{prefix}-{id}` class name. An empty id gets a random suffix.
pub fn class_name(prefix: &str, id: &str) -> String {
    if id.is_empty() {
        let random = Uuid::new_v4().simple().to_string();
        return format!("{prefix}-{}", &random[..9]);
    }
    format!("{prefix}-{id}")
}
