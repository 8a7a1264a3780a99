mod format;

pub use self::format::{format_date, format_money, format_volume};
