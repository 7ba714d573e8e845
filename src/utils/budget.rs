/// Budget parsing helpers.
///
/// Job and proposal budgets are stored as free-text strings ("$1,200",
/// "around 350 dollars"). Payment rows need a concrete amount, so the first
/// numeric group is extracted at acceptance time and converted to integer
/// cents to avoid floating-point precision issues.
use regex::Regex;

/// Platform commission, in percent of the parsed budget.
pub const PLATFORM_FEE_PERCENT: i64 = 10;

/// Largest budget accepted, in cents ($100M). Keeps the fee arithmetic far
/// away from i64 overflow on attacker-supplied budget strings.
pub const MAX_BUDGET_CENTS: i64 = 10_000_000_000;

/// Extract the first monetary figure from a free-text budget string and
/// return it in cents. Commas are stripped; at most two decimal places are
/// honored.
pub fn parse_budget_cents(budget: &str) -> Result<i64, String> {
    let re = Regex::new(r"(\d[\d,]*)(?:\.(\d{1,2}))?").expect("budget regex is valid");

    let caps = re
        .captures(budget)
        .ok_or_else(|| format!("No numeric amount found in budget '{}'", budget))?;

    let whole: i64 = caps[1]
        .replace(',', "")
        .parse()
        .map_err(|_| format!("Amount in budget '{}' is out of range", budget))?;

    let cents = match caps.get(2) {
        Some(frac) if frac.as_str().len() == 1 => frac.as_str().parse::<i64>().unwrap_or(0) * 10,
        Some(frac) => frac.as_str().parse::<i64>().unwrap_or(0),
        None => 0,
    };

    whole
        .checked_mul(100)
        .and_then(|w| w.checked_add(cents))
        .filter(|total| *total <= MAX_BUDGET_CENTS)
        .ok_or_else(|| format!("Amount in budget '{}' is out of range", budget))
}

/// Split an amount into platform fee and pro payout. The fee is exactly
/// PLATFORM_FEE_PERCENT of the amount, truncated to whole cents.
pub fn split_platform_fee(amount_cents: i64) -> (i64, i64) {
    let fee = amount_cents * PLATFORM_FEE_PERCENT / 100;
    (fee, amount_cents - fee)
}

/// Format cents as a dollar string with 2 decimal places.
pub fn format_cents(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_budget_cents("350"), Ok(35000));
        assert_eq!(parse_budget_cents("350.75"), Ok(35075));
    }

    #[test]
    fn test_parse_with_currency_noise() {
        assert_eq!(parse_budget_cents("$1,200"), Ok(120000));
        assert_eq!(parse_budget_cents("around 350 dollars"), Ok(35000));
        assert_eq!(parse_budget_cents("$99.5 or so"), Ok(9950));
    }

    #[test]
    fn test_parse_takes_first_number() {
        assert_eq!(parse_budget_cents("between 100 and 200"), Ok(10000));
    }

    #[test]
    fn test_parse_no_number_fails() {
        assert!(parse_budget_cents("negotiable").is_err());
        assert!(parse_budget_cents("").is_err());
    }

    #[test]
    fn test_absurd_amounts_rejected_before_fee_math() {
        assert!(parse_budget_cents("92233720368547758").is_err());
        assert!(parse_budget_cents("999999999999999999999999").is_err());
        assert_eq!(parse_budget_cents("100000000"), Ok(MAX_BUDGET_CENTS));

        // The ceiling keeps the split itself overflow-free.
        let (fee, payout) = split_platform_fee(MAX_BUDGET_CENTS);
        assert_eq!(fee + payout, MAX_BUDGET_CENTS);
    }

    #[test]
    fn test_fee_is_exactly_ten_percent() {
        let (fee, payout) = split_platform_fee(120000);
        assert_eq!(fee, 12000);
        assert_eq!(payout, 108000);

        let (fee, payout) = split_platform_fee(35075);
        assert_eq!(fee, 3507);
        assert_eq!(payout, 31568);
        assert_eq!(fee + payout, 35075);
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(120000), "$1200.00");
        assert_eq!(format_cents(9950), "$99.50");
        assert_eq!(format_cents(5), "$0.05");
    }
}
