use indexmap::IndexMap;
use log::debug;

use super::types::{Recommendation, SymbolStats, TradeSummary, WinRate};
use crate::history::{is_real_trading_symbol, Deal};

/// Summarises a deal history: per-symbol totals, overall win rate and a
/// recommendation naming the best and most traded instruments.
///
/// Pure function of `deals`; order only matters for breaking ties, where the
/// symbol seen first wins.
pub fn aggregate(deals: &[Deal]) -> TradeSummary {
    if deals.is_empty() {
        return TradeSummary {
            total_real_trades: 0,
            win_rate: WinRate::default(),
            recommendation: Recommendation::NoHistory,
        };
    }

    let mut symbol_stats: IndexMap<&str, SymbolStats> = IndexMap::new();
    let mut real_deals_count = 0usize;

    for deal in deals {
        if !deal.entry.is_closing() {
            continue;
        }

        let symbol = deal.symbol.trim();
        if !is_real_trading_symbol(symbol) {
            continue;
        }

        real_deals_count += 1;
        symbol_stats.entry(symbol).or_default().record(deal.profit);
    }

    debug!(
        "Aggregated {} real deals across {} symbols ({} raw deals)",
        real_deals_count,
        symbol_stats.len(),
        deals.len()
    );

    let (best_symbol, best) = match first_max_by(&symbol_stats, |a, b| a.profit > b.profit) {
        Some(entry) => entry,
        None => {
            return TradeSummary {
                total_real_trades: real_deals_count,
                win_rate: WinRate::default(),
                recommendation: Recommendation::NoRealSymbols,
            }
        }
    };
    let (most_symbol, most) = match first_max_by(&symbol_stats, |a, b| a.count > b.count) {
        Some(entry) => entry,
        None => (best_symbol, best),
    };

    let total_real_trades: usize = symbol_stats.values().map(|s| s.count).sum();
    let total_wins: usize = symbol_stats.values().map(|s| s.wins).sum();

    let recommendation = if best_symbol == most_symbol {
        Recommendation::BestAndMostTraded {
            symbol: best_symbol.to_string(),
            profit: best.profit,
            trades: best.count,
            win_rate: best.win_rate(),
        }
    } else {
        Recommendation::Split {
            best_symbol: best_symbol.to_string(),
            best_profit: best.profit,
            most_traded_symbol: most_symbol.to_string(),
            most_traded_count: most.count,
        }
    };

    TradeSummary {
        total_real_trades,
        win_rate: WinRate::new(total_wins, total_real_trades),
        recommendation,
    }
}

// Iterator::max_by keeps the last maximum; ties must go to the first symbol seen.
fn first_max_by<'a, F>(
    stats: &'a IndexMap<&'a str, SymbolStats>,
    greater: F,
) -> Option<(&'a str, &'a SymbolStats)>
where
    F: Fn(&SymbolStats, &SymbolStats) -> bool,
{
    let mut best: Option<(&str, &SymbolStats)> = None;
    for (symbol, entry) in stats {
        match best {
            Some((_, current)) if !greater(entry, current) => {}
            _ => best = Some((*symbol, entry)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::DealEntry;

    fn closing(symbol: &str, profit: f64) -> Deal {
        Deal::closing(symbol, profit)
    }

    #[test]
    fn empty_history_reports_no_history() {
        let summary = aggregate(&[]);

        assert_eq!(summary.total_real_trades, 0);
        assert_eq!(summary.win_rate.to_string(), "0.0%");
        assert_eq!(summary.recommendation, Recommendation::NoHistory);
        assert_eq!(summary.recommendation.to_string(), "No trade history found.");
    }

    #[test]
    fn non_trading_history_reports_no_real_symbols() {
        let deals = vec![
            closing("balance", 1000.0),
            closing("Deposit", 250.0),
            Deal::new(DealEntry::In, "EURUSD", 0.0),
        ];
        let summary = aggregate(&deals);

        assert_eq!(summary.total_real_trades, 0);
        assert_eq!(summary.win_rate.to_string(), "0.0%");
        assert_eq!(summary.recommendation, Recommendation::NoRealSymbols);
        assert_ne!(
            summary.recommendation.to_string(),
            Recommendation::NoHistory.to_string()
        );
    }

    #[test]
    fn best_and_most_traded_on_same_symbol() {
        let deals = vec![
            closing("EURUSD", 100.0),
            closing("EURUSD", -40.0),
            closing("GBPUSD", 30.0),
        ];
        let summary = aggregate(&deals);

        assert_eq!(summary.total_real_trades, 3);
        assert_eq!(summary.win_rate.to_string(), "66.7%");
        assert_eq!(
            summary.recommendation,
            Recommendation::BestAndMostTraded {
                symbol: "EURUSD".into(),
                profit: 60.0,
                trades: 2,
                win_rate: WinRate::new(1, 2),
            }
        );
        assert_eq!(
            summary.recommendation.to_string(),
            "EURUSD is your best & most traded pair!\n• Profit: $60.00\n• Trades: 2  (win rate: 50.0%)"
        );
    }

    #[test]
    fn all_winners_on_second_symbol() {
        let deals = vec![
            closing("EURUSD", 10.0),
            closing("GBPUSD", 50.0),
            closing("GBPUSD", 50.0),
        ];
        let summary = aggregate(&deals);

        assert_eq!(summary.win_rate.to_string(), "100.0%");
        match summary.recommendation {
            Recommendation::BestAndMostTraded { symbol, trades, .. } => {
                assert_eq!(symbol, "GBPUSD");
                assert_eq!(trades, 2);
            }
            other => panic!("unexpected recommendation {other:?}"),
        }
    }

    #[test]
    fn best_and_most_traded_differ() {
        let deals = vec![
            closing("EURUSD", 100.0),
            closing("GBPUSD", 10.0),
            closing("GBPUSD", 10.0),
        ];
        let summary = aggregate(&deals);

        assert_eq!(
            summary.recommendation.to_string(),
            "Your highest returning pair: EURUSD (+$100.00)\nYour most traded pair: GBPUSD (2 trades)"
        );
    }

    #[test]
    fn grouping_is_case_sensitive_and_trimmed() {
        let deals = vec![
            closing(" EURUSD ", 5.0),
            closing("EURUSD", 5.0),
            closing("eurusd", 20.0),
        ];
        let summary = aggregate(&deals);

        assert_eq!(summary.total_real_trades, 3);
        assert_eq!(
            summary.recommendation,
            Recommendation::Split {
                best_symbol: "eurusd".into(),
                best_profit: 20.0,
                most_traded_symbol: "EURUSD".into(),
                most_traded_count: 2,
            }
        );
    }

    #[test]
    fn ties_go_to_first_seen_symbol() {
        let deals = vec![
            closing("GBPUSD", 25.0),
            closing("EURUSD", 25.0),
            closing("USDJPY", -1.0),
        ];
        let summary = aggregate(&deals);

        match summary.recommendation {
            Recommendation::BestAndMostTraded { symbol, .. } => assert_eq!(symbol, "GBPUSD"),
            other => panic!("unexpected recommendation {other:?}"),
        }
    }

    #[test]
    fn opening_and_ledger_deals_are_skipped() {
        let deals = vec![
            Deal::new(DealEntry::In, "XAUUSD", 0.0),
            closing("XAUUSD", 15.0),
            Deal::new(DealEntry::OutBy, "XAUUSD", 99.0),
            closing("commission", -2.0),
            closing("", 3.0),
        ];
        let summary = aggregate(&deals);

        assert_eq!(summary.total_real_trades, 1);
        assert_eq!(summary.win_rate.to_string(), "100.0%");
    }

    #[test]
    fn aggregation_is_idempotent() {
        let deals = vec![
            closing("EURUSD", 100.0),
            closing("GBPUSD", -10.0),
            closing("GBPUSD", 10.0),
        ];

        assert_eq!(aggregate(&deals), aggregate(&deals));
    }
}
