use crate::models::PriceState;

pub const HEADING: &str = "Bitcoin Price Tracker";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub heading: String,
    pub body: String,
}

/// Pure function of the tracker state: a heading plus one body line showing
/// either the loading indicator or the grouped, dollar-prefixed price.
pub fn render(state: &PriceState) -> RenderOutput {
    let body = match state {
        PriceState::Loading => "Current Price: Loading...".to_string(),
        PriceState::Loaded(sample) => {
            format!("Current Price: ${}", format_grouped(sample.price))
        }
    };

    RenderOutput {
        heading: HEADING.to_string(),
        body,
    }
}

/// Formats a price with thousands separators, at most three fraction digits
/// and no trailing zeros, matching `Number.prototype.toLocaleString()` in
/// the en-US locale: 12345.6 -> "12,345.6", 100000.0 -> "100,000".
pub fn format_grouped(value: f64) -> String {
    let negative = value < 0.0;
    // Round ties half away from zero like toLocaleString; "{:.3}" alone
    // rounds them half-to-even.
    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let text = format!("{:.3}", rounded);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (text.as_str(), ""),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(text.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceSample;

    #[test]
    fn groups_thousands_with_commas() {
        assert_eq!(format_grouped(12345.6), "12,345.6");
        assert_eq!(format_grouped(1234567.0), "1,234,567");
        assert_eq!(format_grouped(100000.0), "100,000");
        assert_eq!(format_grouped(999.99), "999.99");
        assert_eq!(format_grouped(0.5), "0.5");
    }

    #[test]
    fn rounds_to_three_fraction_digits() {
        assert_eq!(format_grouped(12345.6789), "12,345.679");
        assert_eq!(format_grouped(0.1239), "0.124");
        assert_eq!(format_grouped(42.0001), "42");
    }

    #[test]
    fn rounds_ties_away_from_zero() {
        assert_eq!(format_grouped(0.0625), "0.063");
        assert_eq!(format_grouped(-0.0625), "-0.063");
    }

    #[test]
    fn handles_negative_values() {
        assert_eq!(format_grouped(-12345.6), "-12,345.6");
    }

    #[test]
    fn renders_loading_indicator_without_sample() {
        let output = render(&PriceState::Loading);
        assert_eq!(output.heading, "Bitcoin Price Tracker");
        assert_eq!(output.body, "Current Price: Loading...");
    }

    #[test]
    fn renders_grouped_price_with_currency_symbol() {
        let state = PriceState::Loaded(PriceSample::new(12345.6));
        let output = render(&state);
        assert_eq!(output.body, "Current Price: $12,345.6");
    }
}
