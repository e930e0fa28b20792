//! Placeholder rendering for catalog text via `minijinja`, and the reign
//! year display.
//!
//! Catalog strings may contain `{{ ruler }}`, `{{ member }}` and similar
//! placeholders. A string that fails to render is shown raw.

use minijinja::{Environment, Value};
use tracing::warn;

/// Chinese digits 0-9.
const DIGITS: [&str; 10] = ["零", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// Renders catalog text against a small context.
pub struct TextRenderer {
    env: Environment<'static>,
}

impl std::fmt::Debug for TextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRenderer").finish_non_exhaustive()
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    /// Create a renderer with default settings.
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    /// Render `source` against `ctx`. Text without placeholders is returned
    /// unchanged; render failures fall back to the raw text.
    pub fn render(&self, source: &str, ctx: Value) -> String {
        if !source.contains("{{") {
            return source.to_owned();
        }
        self.env.render_str(source, ctx).unwrap_or_else(|e| {
            warn!(error = %e, source, "catalog text failed to render");
            source.to_owned()
        })
    }
}

/// Write `n` (1-99) in Chinese numerals; larger values fall back to digits.
pub fn chinese_number(n: u32) -> String {
    let digit = |d: u32| -> &'static str {
        usize::try_from(d)
            .ok()
            .and_then(|i| DIGITS.get(i))
            .copied()
            .unwrap_or("")
    };
    match n {
        0..=9 => digit(n).to_owned(),
        10 => "十".to_owned(),
        11..=19 => format!("十{}", digit(n % 10)),
        20..=99 => {
            let ones = n % 10;
            let tens = digit(n / 10);
            if ones == 0 {
                format!("{tens}十")
            } else {
                format!("{tens}十{}", digit(ones))
            }
        }
        _ => n.to_string(),
    }
}

/// Display form of a reign year: `永泰元年`, `永泰三年`, `永泰十二年`.
pub fn reign_year_label(title: &str, year: u32) -> String {
    if year <= 1 {
        format!("{title}元年")
    } else {
        format!("{title}{}年", chinese_number(year))
    }
}
