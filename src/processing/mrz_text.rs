use crate::models::RawMrzFields;
use crate::processing::check_digit;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use std::ops::Range;

lazy_static! {
    static ref MRZ_LINE: Regex = Regex::new(r"^[A-Z0-9<]{28,}$").unwrap();
}

/// ICAO 9303 MRZ layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MrzLayout {
    Td1, // ID card, 3 x 30
    Td2, // ID card, 2 x 36
    Td3, // Passport, 2 x 44
}

impl MrzLayout {
    pub fn line_count(&self) -> usize {
        match self {
            MrzLayout::Td1 => 3,
            MrzLayout::Td2 | MrzLayout::Td3 => 2,
        }
    }

    pub fn line_width(&self) -> usize {
        match self {
            MrzLayout::Td1 => 30,
            MrzLayout::Td2 => 36,
            MrzLayout::Td3 => 44,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MrzLayout::Td1 => "TD1",
            MrzLayout::Td2 => "TD2",
            MrzLayout::Td3 => "TD3",
        }
    }

    /// Layout whose line width is within `WIDTH_TOLERANCE` of `len`.
    fn from_line_width(len: usize) -> Option<Self> {
        [MrzLayout::Td1, MrzLayout::Td2, MrzLayout::Td3]
            .into_iter()
            .find(|layout| layout.line_width().abs_diff(len) <= WIDTH_TOLERANCE)
    }
}

// OCR may drop or add a couple of characters per line
const WIDTH_TOLERANCE: usize = 2;

/// Upper-case and trim an OCR line and, if it has the shape of an MRZ line,
/// return it with its layout. Inner spaces count as fillers only on lines
/// that already carry a real `<`; a spaced line without one is prose.
fn classify_line(line: &str) -> Option<(MrzLayout, String)> {
    let line = line.trim().to_ascii_uppercase();
    if line.contains(' ') && !line.contains('<') {
        return None;
    }
    let cleaned = line.replace(' ', "<");
    if !MRZ_LINE.is_match(&cleaned) {
        return None;
    }
    let layout = MrzLayout::from_line_width(cleaned.len())?;
    Some((layout, cleaned))
}

/// Runs of consecutive same-layout MRZ lines, in reading order. Blank lines
/// do not break a run; any other line does.
fn mrz_runs(text: &str) -> Vec<(MrzLayout, Vec<String>)> {
    let mut runs: Vec<(MrzLayout, Vec<String>)> = Vec::new();
    let mut open = false;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match classify_line(line) {
            Some((layout, cleaned)) => match runs.last_mut() {
                Some((current, lines)) if open && *current == layout => lines.push(cleaned),
                _ => {
                    runs.push((layout, vec![cleaned]));
                    open = true;
                }
            },
            None => open = false,
        }
    }
    runs
}

/// Lines of OCR text that look like MRZ lines, in reading order.
pub fn find_mrz_lines(text: &str) -> Vec<String> {
    mrz_runs(text)
        .into_iter()
        .flat_map(|(_, lines)| lines)
        .collect()
}

fn fit(line: &str, width: usize) -> String {
    let mut fitted: String = line.chars().take(width).collect();
    while fitted.len() < width {
        fitted.push('<');
    }
    fitted
}

fn slice(line: &str, range: Range<usize>) -> &str {
    line.get(range).unwrap_or("")
}

// Code or number with its `<` padding removed
fn trimmed(line: &str, range: Range<usize>) -> String {
    slice(line, range).trim_matches('<').to_string()
}

fn digit_at(line: &str, index: usize) -> Option<char> {
    line.chars().nth(index)
}

/// Parse an OCR'd MRZ block into raw fields.
///
/// The MRZ sits at the bottom of the document, so the last run of
/// consecutive same-width MRZ lines long enough for its layout is used, and
/// of that run the last two (or three) lines. Returns `None` when no MRZ is
/// recognizable.
pub fn parse_mrz_text(text: &str) -> Option<RawMrzFields> {
    let runs = mrz_runs(text);
    let Some((layout, run)) = runs
        .iter()
        .rev()
        .find(|(layout, lines)| lines.len() >= layout.line_count())
    else {
        debug!("No run of MRZ lines long enough in {} candidate runs", runs.len());
        return None;
    };
    let layout = *layout;

    let lines: Vec<String> = run[run.len() - layout.line_count()..]
        .iter()
        .map(|line| fit(line, layout.line_width()))
        .collect();
    debug!("Parsing {} MRZ: {:?}", layout.name(), lines);

    let fields = match layout {
        MrzLayout::Td1 => parse_td1(&lines),
        MrzLayout::Td2 | MrzLayout::Td3 => parse_two_line(&lines, layout),
    };
    Some(RawMrzFields {
        mrz_type: Some(layout.name().to_string()),
        raw_text: Some(lines.join("\n")),
        ..fields
    })
}

// TD2 and TD3 share one layout, TD3 only has a longer name and optional field
fn parse_two_line(lines: &[String], layout: MrzLayout) -> RawMrzFields {
    let (line1, line2) = (&lines[0], &lines[1]);
    let width = layout.line_width();
    let optional_end = width - 2 + usize::from(layout == MrzLayout::Td2);

    verify_field(line2, 0..9, 9, "document number");
    verify_field(line2, 13..19, 19, "birth date");
    verify_field(line2, 21..27, 27, "expiry date");

    RawMrzFields {
        document_type_code: Some(trimmed(line1, 0..2)),
        issuer_country_code: Some(trimmed(line1, 2..5)),
        raw_name_field: Some(slice(line1, 5..width).to_string()),
        document_number: Some(trimmed(line2, 0..9)),
        document_number_check_digit: digit_at(line2, 9).map(String::from),
        nationality_code: Some(trimmed(line2, 10..13)),
        raw_birth_date: Some(slice(line2, 13..19).to_string()),
        sex: Some(slice(line2, 20..21).to_string()),
        raw_expiry_date: Some(slice(line2, 21..27).to_string()),
        optional_data_1: Some(trimmed(line2, 28..optional_end)),
        ..Default::default()
    }
}

fn parse_td1(lines: &[String]) -> RawMrzFields {
    let (line1, line2, line3) = (&lines[0], &lines[1], &lines[2]);

    verify_field(line1, 5..14, 14, "document number");
    verify_field(line2, 0..6, 6, "birth date");
    verify_field(line2, 8..14, 14, "expiry date");

    RawMrzFields {
        document_type_code: Some(trimmed(line1, 0..2)),
        issuer_country_code: Some(trimmed(line1, 2..5)),
        document_number: Some(trimmed(line1, 5..14)),
        document_number_check_digit: digit_at(line1, 14).map(String::from),
        optional_data_1: Some(trimmed(line1, 15..30)),
        raw_birth_date: Some(slice(line2, 0..6).to_string()),
        sex: Some(slice(line2, 7..8).to_string()),
        raw_expiry_date: Some(slice(line2, 8..14).to_string()),
        nationality_code: Some(trimmed(line2, 15..18)),
        optional_data_2: Some(trimmed(line2, 18..29)),
        raw_name_field: Some(line3.to_string()),
        ..Default::default()
    }
}

fn verify_field(line: &str, field: Range<usize>, check: usize, label: &str) {
    let value = slice(line, field);
    match digit_at(line, check) {
        Some(digit) if check_digit::verify(value, digit) => {}
        digit => warn!(
            "Check digit mismatch for {} {:?}: read {:?}, expected {:?}",
            label,
            value,
            digit,
            check_digit::check_digit(value)
        ),
    }
}
