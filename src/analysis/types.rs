use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::report::{format_money, format_signed_money};

/// Running totals for one symbol during a single aggregation pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SymbolStats {
    pub profit: f64,
    pub count: usize,
    pub wins: usize,
}

impl SymbolStats {
    pub fn record(&mut self, profit: f64) {
        self.profit += profit;
        self.count += 1;
        if profit > 0.0 {
            self.wins += 1;
        }
    }

    pub fn win_rate(&self) -> WinRate {
        WinRate::new(self.wins, self.count)
    }
}

/// Share of winning trades, rendered as a one-decimal percentage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WinRate {
    pub wins: usize,
    pub trades: usize,
}

impl WinRate {
    pub fn new(wins: usize, trades: usize) -> Self {
        Self { wins, trades }
    }

    pub fn percent(&self) -> f64 {
        if self.trades == 0 {
            return 0.0;
        }
        self.wins as f64 / self.trades as f64 * 100.0
    }
}

impl fmt::Display for WinRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.percent())
    }
}

impl Serialize for WinRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What the user is told after the history has been analysed.
#[derive(Clone, Debug, PartialEq)]
pub enum Recommendation {
    /// The terminal returned no deals at all.
    NoHistory,
    /// Deals exist but none of them were real trades.
    NoRealSymbols,
    BestAndMostTraded {
        symbol: String,
        profit: f64,
        trades: usize,
        win_rate: WinRate,
    },
    Split {
        best_symbol: String,
        best_profit: f64,
        most_traded_symbol: String,
        most_traded_count: usize,
    },
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::NoHistory => f.write_str("No trade history found."),
            Recommendation::NoRealSymbols => write!(
                f,
                "No real trading symbols found in history.\n\
                 (Deposits, withdrawals, swaps, corrections skipped)"
            ),
            Recommendation::BestAndMostTraded {
                symbol,
                profit,
                trades,
                win_rate,
            } => write!(
                f,
                "{} is your best & most traded pair!\n\
                 • Profit: {}\n\
                 • Trades: {}  (win rate: {})",
                symbol,
                format_money(*profit),
                trades,
                win_rate
            ),
            Recommendation::Split {
                best_symbol,
                best_profit,
                most_traded_symbol,
                most_traded_count,
            } => write!(
                f,
                "Your highest returning pair: {} ({})\n\
                 Your most traded pair: {} ({} trades)",
                best_symbol,
                format_signed_money(*best_profit),
                most_traded_symbol,
                most_traded_count
            ),
        }
    }
}

/// Balance-independent outcome of one pass over the deal history.
#[derive(Clone, Debug, PartialEq)]
pub struct TradeSummary {
    pub total_real_trades: usize,
    pub win_rate: WinRate,
    pub recommendation: Recommendation,
}

/// Serialises with the win rate and recommendation as display text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub total_real_trades: usize,
    pub win_rate: WinRate,
    pub balance: Decimal,
    #[serde(serialize_with = "serialize_display")]
    pub recommendation: Recommendation,
}

fn serialize_display<T: fmt::Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

impl AnalysisResult {
    pub fn new(summary: TradeSummary, balance: Decimal) -> Self {
        Self {
            total_real_trades: summary.total_real_trades,
            win_rate: summary.win_rate,
            balance,
            recommendation: summary.recommendation,
        }
    }

    pub fn recommendation_text(&self) -> String {
        self.recommendation.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_rate_formats_one_decimal() {
        assert_eq!(WinRate::new(2, 3).to_string(), "66.7%");
        assert_eq!(WinRate::new(3, 3).to_string(), "100.0%");
        assert_eq!(WinRate::new(0, 0).to_string(), "0.0%");
    }

    #[test]
    fn result_serializes_display_values() {
        let result = AnalysisResult {
            total_real_trades: 3,
            win_rate: WinRate::new(2, 3),
            balance: rust_decimal_macros::dec!(1500.25),
            recommendation: Recommendation::NoRealSymbols,
        };
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "total_real_trades": 3,
                "win_rate": "66.7%",
                "balance": "1500.25",
                "recommendation": "No real trading symbols found in history.\n(Deposits, withdrawals, swaps, corrections skipped)"
            })
        );
    }

    #[test]
    fn break_even_is_not_a_win() {
        let mut stats = SymbolStats::default();
        stats.record(0.0);
        stats.record(12.5);
        stats.record(-3.0);

        assert_eq!(stats.count, 3);
        assert_eq!(stats.wins, 1);
        assert!((stats.profit - 9.5).abs() < f64::EPSILON);
    }

    #[test]
    fn split_recommendation_shows_sign() {
        let rec = Recommendation::Split {
            best_symbol: "EURUSD".into(),
            best_profit: -5.0,
            most_traded_symbol: "GBPUSD".into(),
            most_traded_count: 4,
        };
        assert_eq!(
            rec.to_string(),
            "Your highest returning pair: EURUSD (-$5.00)\nYour most traded pair: GBPUSD (4 trades)"
        );
    }
}
