//! Pulling a conversion request out of free text.

use std::sync::LazyLock;

use regex::Regex;

/// `<amount> <code> to|in <code>`, anywhere in the text, any case.
static REQUEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*([a-z]{3})\s*(?:to|in)\s*([a-z]{3})")
        .expect("conversion pattern is valid")
});

/// A parsed "convert this" request. Codes are upper-cased.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

/// First request found in `text`, if any.
pub fn parse_request(text: &str) -> Option<ConversionRequest> {
    let caps = REQUEST.captures(text)?;
    let amount = caps[1].parse::<f64>().ok()?;

    Some(ConversionRequest {
        amount,
        from: caps[2].to_ascii_uppercase(),
        to: caps[3].to_ascii_uppercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(amount: f64, from: &str, to: &str) -> ConversionRequest {
        ConversionRequest {
            amount,
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test]
    fn test_parse_basic() {
        assert_eq!(parse_request("100 usd to eur"), Some(req(100.0, "USD", "EUR")));
        assert_eq!(parse_request("12.5GBP in JPY"), Some(req(12.5, "GBP", "JPY")));
    }

    #[test]
    fn test_parse_inside_sentence() {
        assert_eq!(
            parse_request("how much is 20 chf to inr these days?"),
            Some(req(20.0, "CHF", "INR"))
        );
    }

    #[test]
    fn test_parse_first_match_wins() {
        assert_eq!(
            parse_request("5 eur to usd or 6 eur to gbp"),
            Some(req(5.0, "EUR", "USD"))
        );
    }

    #[test]
    fn test_parse_rejects_non_requests() {
        assert_eq!(parse_request("no numbers here"), None);
        assert_eq!(parse_request("100 dollars to euros"), None);
        assert_eq!(parse_request("usd to eur"), None);
    }
}
