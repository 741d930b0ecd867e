//! Display names for common ISO 4217 codes.

const NAMES: &[(&str, &str)] = &[
    ("USD", "United States Dollar"),
    ("EUR", "Euro"),
    ("GBP", "British Pound Sterling"),
    ("INR", "Indian Rupee"),
    ("AUD", "Australian Dollar"),
    ("CAD", "Canadian Dollar"),
    ("SGD", "Singapore Dollar"),
    ("CHF", "Swiss Franc"),
    ("MYR", "Malaysian Ringgit"),
    ("JPY", "Japanese Yen"),
    ("CNY", "Chinese Yuan Renminbi"),
    ("NZD", "New Zealand Dollar"),
    ("THB", "Thai Baht"),
    ("HUF", "Hungarian Forint"),
    ("AED", "United Arab Emirates Dirham"),
    ("HKD", "Hong Kong Dollar"),
    ("MXN", "Mexican Peso"),
    ("ZAR", "South African Rand"),
    ("PHP", "Philippine Peso"),
    ("SEK", "Swedish Krona"),
    ("IDR", "Indonesian Rupiah"),
    ("SAR", "Saudi Riyal"),
    ("BRL", "Brazilian Real"),
    ("TRY", "Turkish Lira"),
    ("KES", "Kenyan Shilling"),
    ("KRW", "South Korean Won"),
    ("EGP", "Egyptian Pound"),
    ("IQD", "Iraqi Dinar"),
    ("NOK", "Norwegian Krone"),
    ("KWD", "Kuwaiti Dinar"),
    ("RUB", "Russian Ruble"),
    ("DKK", "Danish Krone"),
    ("PKR", "Pakistani Rupee"),
    ("ILS", "Israeli New Shekel"),
    ("PLN", "Polish Zloty"),
    ("QAR", "Qatari Riyal"),
    ("XAU", "Gold Ounce"),
    ("XAG", "Silver Ounce"),
    ("COP", "Colombian Peso"),
    ("CLP", "Chilean Peso"),
    ("TWD", "New Taiwan Dollar"),
    ("ARS", "Argentine Peso"),
    ("CZK", "Czech Koruna"),
    ("VND", "Vietnamese Dong"),
    ("MAD", "Moroccan Dirham"),
    ("JOD", "Jordanian Dinar"),
    ("BHD", "Bahraini Dinar"),
    ("XOF", "CFA Franc BCEAO"),
    ("LKR", "Sri Lankan Rupee"),
    ("UAH", "Ukrainian Hryvnia"),
    ("NGN", "Nigerian Naira"),
];

/// Full name for `code`, or the code itself when unknown.
pub fn currency_name(code: &str) -> &str {
    NAMES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map_or(code, |&(_, name)| name)
}
