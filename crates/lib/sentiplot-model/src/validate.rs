//! Field validation for raw caller input.
//!
//! Every field is checked by its own function and violations are collected
//! rather than short-circuited, so a rejected record reports every offending
//! field at once.

use std::{error::Error, fmt};

use serde::Serialize;
use url::Url;

use crate::models::{AnalysisRecord, Link, RawLink, RawRecord};
use crate::schema::{
    FIELD_LINKS,
    FIELD_PRESENCE,
    FIELD_SENTIMENT,
    FIELD_SUMMARY,
    FIELD_SYMBOL,
    FIELD_TITLE,
    FIELD_URL,
    LINK_TITLE_MAX_CHARS,
    LINK_TITLE_MIN_CHARS,
    PRESENCE_MAX,
    PRESENCE_MIN,
    SENTIMENT_MAX,
    SENTIMENT_MIN,
    SUMMARY_MAX_CHARS,
    TICKER_MAX_LEN,
    TICKER_MIN_LEN,
};

/// The rule a value failed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    SymbolPattern,
    Finite,
    Range { min: f64, max: f64 },
    MinChars { min: usize },
    MaxChars { max: usize },
    AbsoluteUrl,
    HexColor,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SymbolPattern => write!(
                f,
                "must look like 'Name (TICKER)' with a {TICKER_MIN_LEN}-{TICKER_MAX_LEN} letter uppercase ticker"
            ),
            Self::Finite => write!(f, "must be a finite number"),
            Self::Range { min, max } => write!(f, "must be within [{min:.1}, {max:.1}]"),
            Self::MinChars { min } => write!(f, "must be at least {min} characters"),
            Self::MaxChars { max } => write!(f, "must be at most {max} characters"),
            Self::AbsoluteUrl => write!(f, "must be an absolute http(s) URL"),
            Self::HexColor => write!(f, "must be '#' followed by 6 hex digits"),
        }
    }
}

/// A single field-attributed rejection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `data[1].links[0].url`.
    pub field: String,
    pub constraint: Constraint,
    /// The rejected value. Over-long text is reported by its length.
    pub value: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, constraint: Constraint, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            constraint,
            value: value.into(),
        }
    }

    fn under(mut self, prefix: &str) -> Self {
        self.field = format!("{prefix}.{}", self.field);
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (got {})", self.field, self.constraint, self.value)
    }
}

impl Error for ValidationError {}

/// Every violation found while validating one value or batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Returns the first violation recorded for `field`, if any.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|error| error.field == field)
    }

    fn absorb(&mut self, prefix: &str, other: Self) {
        self.0
            .extend(other.0.into_iter().map(|error| error.under(prefix)));
    }

    fn collect<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    fn into_result<T>(self, value: Option<T>) -> Result<T, Self> {
        match value {
            Some(value) if self.is_empty() => Ok(value),
            _ => Err(self),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, error) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Checks a symbol against `<name> (<TICKER>)` and returns the ticker.
///
/// The ticker must be 1 to 5 ASCII uppercase letters, preceded by a literal
/// space and opening parenthesis, with the closing parenthesis as the final
/// character. The name must be non-empty and single-line.
///
/// # Errors
/// Returns `ValidationError` with [`Constraint::SymbolPattern`] on mismatch.
pub fn validate_symbol(value: &str) -> Result<String, ValidationError> {
    let reject = || ValidationError::new(FIELD_SYMBOL, Constraint::SymbolPattern, value);
    let inner = value.strip_suffix(')').ok_or_else(reject)?;
    let (name, ticker) = inner.rsplit_once(" (").ok_or_else(reject)?;
    let ticker_ok = (TICKER_MIN_LEN..=TICKER_MAX_LEN).contains(&ticker.len())
        && ticker.bytes().all(|b| b.is_ascii_uppercase());
    if name.is_empty() || name.contains('\n') || !ticker_ok {
        return Err(reject());
    }
    Ok(ticker.to_string())
}

/// Checks that `value` is finite and inside the closed interval `[min, max]`.
///
/// # Errors
/// Returns `ValidationError` with [`Constraint::Finite`] or [`Constraint::Range`].
pub fn validate_closed_range(
    field: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new(field, Constraint::Finite, value.to_string()));
    }
    if value < min || value > max {
        return Err(ValidationError::new(
            field,
            Constraint::Range { min, max },
            value.to_string(),
        ));
    }
    Ok(value)
}

/// Checks a character count against inclusive bounds.
///
/// # Errors
/// Returns `ValidationError` with [`Constraint::MinChars`] or [`Constraint::MaxChars`].
pub fn validate_chars(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let count = value.chars().count();
    if count < min {
        return Err(ValidationError::new(
            field,
            Constraint::MinChars { min },
            value,
        ));
    }
    if count > max {
        return Err(ValidationError::new(
            field,
            Constraint::MaxChars { max },
            format!("{count} characters"),
        ));
    }
    Ok(())
}

/// Parses an absolute `http`/`https` URL with a host.
///
/// # Errors
/// Returns `ValidationError` with [`Constraint::AbsoluteUrl`].
pub fn validate_url(value: &str) -> Result<Url, ValidationError> {
    let reject = || ValidationError::new(FIELD_URL, Constraint::AbsoluteUrl, value);
    let url = Url::parse(value).map_err(|_| reject())?;
    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(reject());
    }
    Ok(url)
}

impl RawLink {
    /// Validates both fields of the link.
    ///
    /// # Errors
    /// Returns every violation found.
    pub fn validate(self) -> Result<Link, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let url = errors.collect(validate_url(&self.url));
        let title = errors.collect(validate_chars(
            FIELD_TITLE,
            &self.title,
            LINK_TITLE_MIN_CHARS,
            LINK_TITLE_MAX_CHARS,
        ));
        let link = url.zip(title).map(|(url, ())| Link::new(url, self.title));
        errors.into_result(link)
    }
}

impl RawRecord {
    /// Validates every field of the record, including each link.
    ///
    /// # Errors
    /// Returns every violation found, with link fields reported as
    /// `links[<index>].<field>`.
    pub fn validate(self) -> Result<AnalysisRecord, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let ticker = errors.collect(validate_symbol(&self.symbol));
        let sentiment = errors.collect(validate_closed_range(
            FIELD_SENTIMENT,
            self.sentiment,
            SENTIMENT_MIN,
            SENTIMENT_MAX,
        ));
        let presence = errors.collect(validate_closed_range(
            FIELD_PRESENCE,
            self.presence,
            PRESENCE_MIN,
            PRESENCE_MAX,
        ));
        let summary = errors.collect(validate_chars(FIELD_SUMMARY, &self.summary, 0, SUMMARY_MAX_CHARS));

        let mut links = Vec::with_capacity(self.links.len());
        for (idx, raw) in self.links.into_iter().enumerate() {
            match raw.validate() {
                Ok(link) => links.push(link),
                Err(link_errors) => errors.absorb(&format!("{FIELD_LINKS}[{idx}]"), link_errors),
            }
        }

        let record = match (ticker, sentiment, presence, summary) {
            (Some(ticker), Some(sentiment), Some(presence), Some(())) => Some(AnalysisRecord::new(
                self.symbol,
                ticker,
                sentiment,
                presence,
                self.summary,
                links,
            )),
            _ => None,
        };
        errors.into_result(record)
    }
}

/// Validates a whole batch, rejecting it if any record is invalid.
///
/// Fields are reported as `<root>[<index>].<field>`.
///
/// # Errors
/// Returns the violations of every invalid record in the batch.
pub fn validate_batch(
    root: &str,
    raws: Vec<RawRecord>,
) -> Result<Vec<AnalysisRecord>, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut records = Vec::with_capacity(raws.len());
    for (idx, raw) in raws.into_iter().enumerate() {
        match raw.validate() {
            Ok(record) => records.push(record),
            Err(record_errors) => errors.absorb(&format!("{root}[{idx}]"), record_errors),
        }
    }
    if errors.is_empty() {
        Ok(records)
    } else {
        Err(errors)
    }
}
