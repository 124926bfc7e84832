mod format;
mod sink;

pub use format::{format_balance, format_money, format_signed_money};
pub use sink::{
    result_rows, ConsoleSink, JsonSink, OutputFormat, PresentationSink, NOTICE, STATUS_COMPLETE,
    STATUS_FAILED,
};
