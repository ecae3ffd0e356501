use chrono::NaiveDate;

/// Two-digit years below the pivot expand into the 2000s, the rest into the
/// 1900s. The default of 69 is the POSIX `%y` split (`00..=68` -> 20xx).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenturyPivot(u8);

pub const DEFAULT_CENTURY_PIVOT: u8 = 69;

impl CenturyPivot {
    /// `pivot` may be 0 (everything is 19xx) up to 100 (everything is 20xx).
    pub fn new(pivot: u8) -> Option<Self> {
        if pivot <= 100 {
            Some(CenturyPivot(pivot))
        } else {
            None
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn expand(&self, yy: u32) -> i32 {
        let yy = yy as i32;
        if yy < self.0 as i32 {
            2000 + yy
        } else {
            1900 + yy
        }
    }
}

impl Default for CenturyPivot {
    fn default() -> Self {
        CenturyPivot(DEFAULT_CENTURY_PIVOT)
    }
}

/// Parse an MRZ `YYMMDD` date. Anything other than six ASCII digits forming
/// a real calendar date is `None`.
pub fn parse_mrz_date(raw: &str, pivot: CenturyPivot) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let yy = raw[0..2].parse::<u32>().ok()?;
    let month = raw[2..4].parse::<u32>().ok()?;
    let day = raw[4..6].parse::<u32>().ok()?;

    NaiveDate::from_ymd_opt(pivot.expand(yy), month, day)
}

/// `YYMMDD` -> `YYYY-MM-DD`, or `None` when the input is empty or not a date.
pub fn canonicalize_date(raw: &str, pivot: CenturyPivot) -> Option<String> {
    parse_mrz_date(raw, pivot).map(|date| date.format("%Y-%m-%d").to_string())
}
