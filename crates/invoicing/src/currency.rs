//! Supported currencies and pure derivations from the currency code.
//!
//! The symbol is always derived from the authoritative code through this
//! table; the denormalized field on [`crate::Invoice`] is only a display
//! cache written via `set_currency`.

/// One supported currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

pub const CURRENCIES: &[CurrencyInfo] = &[
    CurrencyInfo { code: "USD", symbol: "$", name: "US Dollar" },
    CurrencyInfo { code: "EUR", symbol: "€", name: "Euro" },
    CurrencyInfo { code: "GBP", symbol: "£", name: "British Pound" },
    CurrencyInfo { code: "INR", symbol: "₹", name: "Indian Rupee" },
    CurrencyInfo { code: "BDT", symbol: "৳", name: "Bangladeshi Taka" },
    CurrencyInfo { code: "CAD", symbol: "C$", name: "Canadian Dollar" },
    CurrencyInfo { code: "AUD", symbol: "A$", name: "Australian Dollar" },
    CurrencyInfo { code: "JPY", symbol: "¥", name: "Japanese Yen" },
    CurrencyInfo { code: "CNY", symbol: "¥", name: "Chinese Yuan" },
    CurrencyInfo { code: "SGD", symbol: "S$", name: "Singapore Dollar" },
];

/// Display symbol for a currency code, if supported.
pub fn symbol_for(code: &str) -> Option<&'static str> {
    CURRENCIES.iter().find(|c| c.code == code).map(|c| c.symbol)
}

/// Payment methods preselected for a currency's typical market.
pub fn default_payment_methods(code: &str) -> &'static [&'static str] {
    match code {
        "BDT" => &["Bank Transfer", "bKash", "Nagad"],
        "INR" => &["Bank Transfer", "UPI", "PayPal"],
        _ => &["Bank Transfer", "PayPal"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(symbol_for("USD"), Some("$"));
        assert_eq!(symbol_for("BDT"), Some("৳"));
        assert_eq!(symbol_for("SGD"), Some("S$"));
    }

    #[test]
    fn unknown_code_resolves_to_none() {
        assert_eq!(symbol_for("ZWL"), None);
        assert_eq!(symbol_for(""), None);
    }

    #[test]
    fn default_methods_by_market() {
        assert_eq!(default_payment_methods("BDT"), &["Bank Transfer", "bKash", "Nagad"]);
        assert_eq!(default_payment_methods("INR"), &["Bank Transfer", "UPI", "PayPal"]);
        assert_eq!(default_payment_methods("EUR"), &["Bank Transfer", "PayPal"]);
        // Fallback for unlisted codes.
        assert_eq!(default_payment_methods("ZWL"), &["Bank Transfer", "PayPal"]);
    }
}
