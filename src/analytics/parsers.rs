// src/analytics/parsers.rs

use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::table::CellValue;

/// Marcador que as planilhas exportadas usam para "sem dado".
pub const NO_DATA_MARKER: &str = "####";

/// Converte uma célula de moeda ("$1,234.56") em número.
///
/// Função total: números passam direto, o marcador de "sem dado", células
/// vazias e qualquer texto que não vire número resultam em `0.0`.
/// Aceita notação científica ("1.5E3") e negativos contábeis ("($50.00)").
pub fn parse_currency(value: Option<&CellValue>) -> f64 {
    parse_cell(value, clean_currency)
}

fn clean_currency(text: &str) -> String {
    let (negative, inner) = match text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, text),
    };
    let digits: String = inner
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        .collect();

    if negative { format!("-{digits}") } else { digits }
}

/// Converte uma célula de percentual ("12.34%") em número (12.34).
pub fn parse_percentage(value: Option<&CellValue>) -> f64 {
    parse_cell(value, |text| {
        text.chars()
            .filter(|c| *c != '%' && *c != ',' && !c.is_whitespace())
            .collect()
    })
}

fn parse_cell(value: Option<&CellValue>, clean: impl Fn(&str) -> String) -> f64 {
    match value {
        Some(CellValue::Number(n)) if n.is_finite() => *n,
        Some(CellValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() || text == NO_DATA_MARKER {
                return 0.0;
            }
            parse_number(&clean(text)).unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    // Decimal primeiro (sem ruído binário); f64 cobre valores fora do alcance do Decimal
    let parsed = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .and_then(|d| d.to_f64())
        .or_else(|| raw.parse::<f64>().ok())?;

    parsed.is_finite().then_some(parsed)
}

/// Arredonda para 2 casas, metade para longe do zero (0.125 -> 0.13).
///
/// Valores que não cabem em `Decimal` (ou não finitos) voltam intactos, para
/// que a checagem de finitude do serviço ainda os enxergue.
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .map(|rounded| if rounded == 0.0 { 0.0 } else { rounded })
        .unwrap_or(value)
}

/// Rótulo "12.34%".
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", round2(value))
}

/// Rótulo "$1,234.56" (negativos como "-$1,234.56").
pub fn format_currency(value: f64) -> String {
    let rounded = round2(value);
    let fixed = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

/// Identificador numérico da semana: `1`, `"12"`, `"Week 12"`, `"W12"`.
pub fn parse_week(value: Option<&CellValue>) -> Option<u32> {
    match value? {
        CellValue::Number(n) if n.is_finite() && *n >= 0.0 => u32::from_f64(n.trunc()),
        CellValue::Text(text) => first_digit_run(text),
        _ => None,
    }
}

/// Hora do dia (0..=23): `"11 AM"`, `"2 PM"`, `"14"`, `"14:00"`.
pub fn parse_hour(value: Option<&CellValue>) -> Option<u32> {
    let hour = match value? {
        CellValue::Number(n) if n.is_finite() && *n >= 0.0 => u32::from_f64(n.trunc())?,
        CellValue::Text(text) => {
            let lower = text.trim().to_ascii_lowercase();
            let hour = first_digit_run(&lower)?;
            if lower.ends_with("pm") {
                match hour {
                    12 => 12,
                    1..=11 => hour + 12,
                    _ => return None,
                }
            } else if lower.ends_with("am") {
                match hour {
                    12 => 0,
                    1..=11 => hour,
                    _ => return None,
                }
            } else {
                hour
            }
        }
        _ => return None,
    };

    (hour < 24).then_some(hour)
}

/// Rótulo de 12 horas para o eixo ("12 AM", "1 PM").
pub fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{hour} AM"),
        12 => "12 PM".to_string(),
        _ => format!("{} PM", hour - 12),
    }
}

fn first_digit_run(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn currency_strings_are_stripped_and_parsed() {
        assert_eq!(parse_currency(Some(&text("$1,234.56"))), 1234.56);
        assert_eq!(parse_currency(Some(&text(" $12 "))), 12.0);
        assert_eq!(parse_currency(Some(&text("-$1,000.50"))), -1000.5);
        assert_eq!(parse_currency(Some(&CellValue::Number(42.5))), 42.5);
    }

    #[test]
    fn currency_keeps_scientific_notation() {
        assert_eq!(parse_currency(Some(&text("1.5E3"))), 1500.0);
        assert_eq!(parse_currency(Some(&text("$2.5e2"))), 250.0);
        assert_eq!(
            parse_currency(Some(&text("1.5E3"))),
            parse_percentage(Some(&text("1.5E3")))
        );
    }

    #[test]
    fn accounting_parentheses_are_negative() {
        assert_eq!(parse_currency(Some(&text("($50.00)"))), -50.0);
        assert_eq!(parse_currency(Some(&text(" ($1,234.56) "))), -1234.56);
        assert_eq!(parse_currency(Some(&text("()"))), 0.0);
    }

    #[test]
    fn placeholder_and_garbage_parse_to_zero() {
        let cases = [
            Some(text("####")),
            Some(text("")),
            Some(text("   ")),
            Some(text("n/a")),
            Some(text("1.2.3")),
            Some(text("$")),
            Some(CellValue::Number(f64::NAN)),
            Some(CellValue::Number(f64::INFINITY)),
            Some(CellValue::Blank(serde::de::IgnoredAny)),
            None,
        ];
        for case in &cases {
            assert_eq!(parse_currency(case.as_ref()), 0.0, "currency {case:?}");
            assert_eq!(parse_percentage(case.as_ref()), 0.0, "percentage {case:?}");
        }
    }

    #[test]
    fn percentage_strings_drop_the_sign() {
        assert_eq!(parse_percentage(Some(&text("12.34%"))), 12.34);
        assert_eq!(parse_percentage(Some(&text("-3 %"))), -3.0);
        assert_eq!(parse_percentage(Some(&text("1,050%"))), 1050.0);
        assert_eq!(parse_percentage(Some(&text("infinity%"))), 0.0);
    }

    #[test]
    fn round2_goes_half_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(-0.001), 0.0);
        assert!(round2(f64::NAN).is_nan());
    }

    #[test]
    fn formatted_percentage_reparses_within_a_cent() {
        for value in [0.0, 12.3456, 99.999, -4.321, 250.5, 0.004] {
            let label = format_percentage(value);
            let back = parse_percentage(Some(&CellValue::Text(label.clone())));
            assert!((back - value).abs() <= 0.01, "{value} -> {label} -> {back}");
        }
    }

    #[test]
    fn currency_labels_group_thousands() {
        assert_eq!(format_currency(1234.56), "$1,234.56");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(-52.5), "-$52.50");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn week_identifiers() {
        assert_eq!(parse_week(Some(&CellValue::Number(3.0))), Some(3));
        assert_eq!(parse_week(Some(&text("Week 12"))), Some(12));
        assert_eq!(parse_week(Some(&text("W7"))), Some(7));
        assert_eq!(parse_week(Some(&text("week"))), None);
        assert_eq!(parse_week(Some(&CellValue::Number(-1.0))), None);
        assert_eq!(parse_week(None), None);
    }

    #[test]
    fn hour_identifiers_and_labels() {
        assert_eq!(parse_hour(Some(&text("2 PM"))), Some(14));
        assert_eq!(parse_hour(Some(&text("12 AM"))), Some(0));
        assert_eq!(parse_hour(Some(&text("12pm"))), Some(12));
        assert_eq!(parse_hour(Some(&text("14:00"))), Some(14));
        assert_eq!(parse_hour(Some(&CellValue::Number(9.0))), Some(9));
        assert_eq!(parse_hour(Some(&text("25"))), None);
        assert_eq!(parse_hour(Some(&text("13 PM"))), None);

        assert_eq!(hour_label(0), "12 AM");
        assert_eq!(hour_label(11), "11 AM");
        assert_eq!(hour_label(12), "12 PM");
        assert_eq!(hour_label(14), "2 PM");
    }
}
