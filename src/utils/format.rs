use chrono::NaiveDate;

// Format a date for report output
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

// Format an amount with thousands separators, two decimals
pub fn format_money(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = (amount.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let mut grouped = String::new();
    let digits = whole.to_string();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, cents)
}

// Format a share count or volume with thousands separators, no decimals
pub fn format_volume(volume: f64) -> String {
    let whole = volume.abs().round() as u64;
    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if volume < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_day_first() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(d), "07/03/2024");
    }

    #[test]
    fn test_format_money_groups_thousands() {
        assert_eq!(format_money(1234567.891), "1,234,567.89");
        assert_eq!(format_money(999.5), "999.50");
        assert_eq!(format_money(-10000.0), "-10,000.00");
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(52814612.0), "52,814,612");
        assert_eq!(format_volume(999.0), "999");
    }
}
