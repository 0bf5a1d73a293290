//! Payment card input checks and presentation helpers.
//!
//! Everything here is pure: no I/O and no state. Inputs are raw form strings,
//! so separators (spaces and hyphens) are tolerated wherever a card number is
//! accepted.

use crate::domain::model::PaymentData;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MASK_CHAR: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Unknown,
}

impl CardType {
    /// Card number lengths the network issues.
    pub fn valid_lengths(&self) -> &'static [usize] {
        match self {
            Self::Visa => &[13, 16, 19],
            Self::Mastercard => &[16],
            Self::Amex => &[15],
            Self::Discover => &[16, 17, 18, 19],
            Self::Unknown => &[13, 14, 15, 16, 17, 18, 19],
        }
    }

    pub fn cvv_length(&self) -> usize {
        match self {
            Self::Amex => 4,
            _ => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "VISA",
            Self::Mastercard => "MASTERCARD",
            Self::Amex => "AMEX",
            Self::Discover => "DISCOVER",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Removes spaces and hyphens. `None` if anything else that is not a digit remains.
fn clean_digits(raw: &str) -> Option<String> {
    let cleaned: String = raw.chars().filter(|c| *c != ' ' && *c != '-').collect();
    if cleaned.chars().all(|c| c.is_ascii_digit()) {
        Some(cleaned)
    } else {
        None
    }
}

fn prefix(digits: &str, len: usize) -> Option<u32> {
    digits.get(..len).and_then(|p| p.parse().ok())
}

/// Detects the issuing network from the leading digits.
pub fn card_type(number: &str) -> CardType {
    let digits = match clean_digits(number) {
        Some(d) if !d.is_empty() => d,
        _ => return CardType::Unknown,
    };

    if digits.starts_with('4') {
        return CardType::Visa;
    }
    if matches!(prefix(&digits, 2), Some(34 | 37)) {
        return CardType::Amex;
    }
    if matches!(prefix(&digits, 2), Some(51..=55)) || matches!(prefix(&digits, 4), Some(2221..=2720)) {
        return CardType::Mastercard;
    }
    if digits.starts_with("6011")
        || digits.starts_with("65")
        || matches!(prefix(&digits, 3), Some(644..=649))
    {
        return CardType::Discover;
    }
    CardType::Unknown
}

/// Luhn checksum over a string of ASCII digits.
pub fn luhn_checksum_valid(digits: &str) -> bool {
    let mut sum = 0;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(mut d) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    !digits.is_empty() && sum % 10 == 0
}

pub fn is_valid_card_number(raw: &str) -> bool {
    let Some(digits) = clean_digits(raw) else {
        return false;
    };
    let network = card_type(&digits);
    if !network.valid_lengths().contains(&digits.len()) {
        return false;
    }
    luhn_checksum_valid(&digits)
}

pub fn is_valid_cvv(code: &str, network: CardType) -> bool {
    !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()) && code.len() == network.cvv_length()
}

/// Two-digit years are read as 20YY.
fn normalize_year(year: i32) -> i32 {
    if (0..100).contains(&year) {
        2000 + year
    } else {
        year
    }
}

pub fn is_valid_expiration_date(month: u32, year: i32) -> bool {
    is_valid_expiration_date_at(month, year, Local::now().date_naive())
}

/// The card stays valid through the whole expiry month.
pub fn is_valid_expiration_date_at(month: u32, year: i32, today: NaiveDate) -> bool {
    if !(1..=12).contains(&month) {
        return false;
    }
    (normalize_year(year), month) >= (today.year(), today.month())
}

/// Parses `MM/YY` or `MM/YYYY` form input into `(month, year)`.
pub fn parse_expiry(input: &str) -> Option<(u32, i32)> {
    let (month, year) = input.trim().split_once('/')?;
    let (month, year) = (month.trim(), year.trim());
    if month.is_empty() || month.len() > 2 || !(year.len() == 2 || year.len() == 4) {
        return None;
    }
    if !month.chars().chain(year.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((month.parse().ok()?, year.parse().ok()?))
}

fn group(chars: &[char], network: CardType) -> String {
    let sizes: &[usize] = if network == CardType::Amex && chars.len() <= 15 {
        &[4, 6, 5]
    } else {
        &[]
    };

    let mut groups: Vec<String> = Vec::new();
    let mut rest = chars;
    for size in sizes {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at((*size).min(rest.len()));
        groups.push(head.iter().collect());
        rest = tail;
    }
    groups.extend(rest.chunks(4).map(|chunk| chunk.iter().collect::<String>()));
    groups.join(" ")
}

/// Groups the digits for display: 4-4-4-4, or 4-6-5 for Amex.
pub fn format_card_number(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    group(&digits, card_type(raw))
}

/// Reveals only the last four digits, grouped like [`format_card_number`].
pub fn mask_card_number(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let visible_from = digits.len().saturating_sub(4);
    let masked: Vec<char> = digits
        .iter()
        .enumerate()
        .map(|(i, d)| if i < visible_from { MASK_CHAR } else { *d })
        .collect();
    group(&masked, card_type(raw))
}

pub fn is_valid_cardholder_name(name: &str) -> bool {
    name.split_whitespace().count() >= 2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardField {
    Number,
    Holder,
    Expiry,
    Cvv,
}

impl CardField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Holder => "holder",
            Self::Expiry => "expiry",
            Self::Cvv => "cvv",
        }
    }
}

/// Raw card form input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardInfo {
    pub number: String,
    pub holder: String,
    /// `MM/YY` or `MM/YYYY`.
    pub expiry: String,
    pub cvv: String,
}

impl CardInfo {
    pub fn card_type(&self) -> CardType {
        card_type(&self.number)
    }

    /// What is sent to the API: network, masked number and holder only.
    pub fn to_payment_data(&self, installments: u32) -> PaymentData {
        PaymentData {
            card_type: self.card_type().to_string(),
            masked_number: mask_card_number(&self.number),
            card_holder: self.holder.trim().to_string(),
            installments: installments.max(1),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardValidation {
    pub is_valid: bool,
    pub errors: BTreeMap<CardField, String>,
}

impl CardValidation {
    pub fn error(&self, field: CardField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

pub fn validate_card_info(info: &CardInfo) -> CardValidation {
    validate_card_info_at(info, Local::now().date_naive())
}

pub fn validate_card_info_at(info: &CardInfo, today: NaiveDate) -> CardValidation {
    let mut errors = BTreeMap::new();

    if info.number.trim().is_empty() {
        errors.insert(CardField::Number, "Card number is required".to_string());
    } else if !is_valid_card_number(&info.number) {
        errors.insert(CardField::Number, "Card number is not valid".to_string());
    }

    if !is_valid_cardholder_name(&info.holder) {
        errors.insert(
            CardField::Holder,
            "Enter the cardholder's first and last name".to_string(),
        );
    }

    match parse_expiry(&info.expiry) {
        None => {
            errors.insert(CardField::Expiry, "Use the MM/YY format".to_string());
        }
        Some((month, year)) if !is_valid_expiration_date_at(month, year, today) => {
            errors.insert(CardField::Expiry, "Card is expired or the month is invalid".to_string());
        }
        Some(_) => {}
    }

    let network = info.card_type();
    if !is_valid_cvv(&info.cvv, network) {
        errors.insert(
            CardField::Cvv,
            format!("CVV must be {} digits", network.cvv_length()),
        );
    }

    CardValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}
