use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse user-typed amount text. Surrounding whitespace is ignored; plain
/// decimals (`-150`, `4.50`) and scientific notation (`1e3`) are accepted.
/// Returns `None` for empty or non-numeric input.
pub(crate) fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() || text.contains('_') {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
