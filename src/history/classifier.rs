/// Ledger entries that show up in the deal history under a pseudo-symbol.
/// Matched as substrings of the lowercased symbol, so `bonus_usd` is rejected too.
pub const NON_TRADING_KEYWORDS: [&str; 13] = [
    "external",
    "internal",
    "correction",
    "bonus",
    "balance",
    "commission",
    "swap",
    "fee",
    "deposit",
    "withdrawal",
    "transfer",
    "credit",
    "adjustment",
];

const MIN_SYMBOL_LEN: usize = 3;

/// Decides whether `symbol` names a tradable instrument rather than a
/// deposit, fee, correction or similar ledger operation.
///
/// The substring match also rejects tickers that merely contain a keyword
/// (`CREDITX`); callers rely on that behaviour staying as is.
pub fn is_real_trading_symbol(symbol: &str) -> bool {
    if symbol.is_empty() {
        return false;
    }

    let normalized = symbol.trim().to_lowercase();

    if NON_TRADING_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(keyword))
    {
        return false;
    }

    if normalized.chars().count() < MIN_SYMBOL_LEN {
        return false;
    }

    normalized.chars().any(char::is_alphabetic)
}
