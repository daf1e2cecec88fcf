//! Console prompt and parse helpers

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::Write;
use std::str::FromStr;

/// Print a prompt and read one trimmed line from stdin
pub fn read_line(label: &str) -> Result<String> {
    print!("{}", label);
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Read a numeric menu choice; None when the input is not a number
pub fn read_choice(label: &str) -> Result<Option<u32>> {
    let input = read_line(label)?;
    Ok(input.parse().ok())
}

/// Parse a `SYMBOL QUANTITY` order line
pub fn parse_order(input: &str) -> Result<(String, u32), String> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 2 {
        return Err("expected a symbol and a quantity separated by a space".to_string());
    }

    let quantity = parse_quantity(parts[1])?;
    Ok((parts[0].to_string(), quantity))
}

/// Parse a quantity as a non-negative integer
pub fn parse_quantity(s: &str) -> Result<u32, String> {
    s.parse()
        .map_err(|_| format!("'{}' is not a valid quantity", s))
}

/// Parse a non-negative decimal price
pub fn parse_price(s: &str) -> Result<Decimal, String> {
    let price = Decimal::from_str(s).map_err(|_| format!("'{}' is not a valid price", s))?;
    if price.is_sign_negative() {
        return Err(format!("price must not be negative, got {}", price));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_order() {
        assert_eq!(parse_order("AAPL 5"), Ok(("AAPL".to_string(), 5)));
        assert_eq!(parse_order("  MSFT   12  "), Ok(("MSFT".to_string(), 12)));
    }

    #[test]
    fn test_parse_order_rejects_bad_shapes() {
        assert!(parse_order("AAPL").is_err());
        assert!(parse_order("AAPL 5 extra").is_err());
        assert!(parse_order("").is_err());
        assert!(parse_order("AAPL five").is_err());
        assert!(parse_order("AAPL -5").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("7"), Ok(7));
        assert!(parse_quantity("-1").is_err());
        assert!(parse_quantity("1.5").is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("135.00"), Ok(dec!(135.00)));
        assert_eq!(parse_price("0"), Ok(dec!(0)));
        assert!(parse_price("-2.50").is_err());
        assert!(parse_price("abc").is_err());
    }
}
