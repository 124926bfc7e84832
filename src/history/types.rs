use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Entry kind of a deal as reported by the terminal (codes 0..=3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "RawDealEntry")]
pub enum DealEntry {
    In,
    Out,
    InOut,
    OutBy,
}

impl DealEntry {
    /// Only plain `Out` legs count as a finished trade.
    pub fn is_closing(&self) -> bool {
        matches!(self, DealEntry::Out)
    }
}

impl TryFrom<u32> for DealEntry {
    type Error = String;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(DealEntry::In),
            1 => Ok(DealEntry::Out),
            2 => Ok(DealEntry::InOut),
            3 => Ok(DealEntry::OutBy),
            other => Err(format!("unknown deal entry code {}", other)),
        }
    }
}

// Exports carry either the terminal code or the snake_case name.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDealEntry {
    Code(u32),
    Name(String),
}

impl TryFrom<RawDealEntry> for DealEntry {
    type Error = String;

    fn try_from(raw: RawDealEntry) -> Result<Self, Self::Error> {
        match raw {
            RawDealEntry::Code(code) => DealEntry::try_from(code),
            RawDealEntry::Name(name) => match name.as_str() {
                "in" => Ok(DealEntry::In),
                "out" => Ok(DealEntry::Out),
                "in_out" => Ok(DealEntry::InOut),
                "out_by" => Ok(DealEntry::OutBy),
                other => Err(format!("unknown deal entry {:?}", other)),
            },
        }
    }
}

/// One historical transaction record from the account history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub ticket: u64,
    pub time: DateTime<Utc>,
    pub entry: DealEntry,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub symbol: String,
    pub profit: f64,
}

impl Deal {
    pub fn new(entry: DealEntry, symbol: impl Into<String>, profit: f64) -> Self {
        Self {
            ticket: 0,
            time: Utc::now(),
            entry,
            symbol: symbol.into(),
            profit,
        }
    }

    /// Shorthand for a closing leg, which is what most of the history consists of.
    pub fn closing(symbol: impl Into<String>, profit: f64) -> Self {
        Self::new(DealEntry::Out, symbol, profit)
    }
}

// Terminals report ledger rows with a null symbol.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Date range requested from the terminal's history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl HistoryWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// From `from` up to the moment of the call.
    pub fn until_now(from: DateTime<Utc>) -> Self {
        Self::new(from, Utc::now())
    }

    pub fn contains(&self, time: &DateTime<Utc>) -> bool {
        *time >= self.from && *time <= self.to
    }

    pub fn history_epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::until_now(Self::history_epoch())
    }
}
