use crate::utils::error::{CreationaryError, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Field name to messages, in field order. Serializes as `{ "field": { "errors": [...] } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
    order: Vec<String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        if !self.fields.contains_key(field) {
            self.order.push(field.to_string());
        }
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// 把 Result 的錯誤收進來，成功則忽略
    pub fn record(&mut self, result: Result<()>) {
        match result {
            Ok(()) => {}
            Err(CreationaryError::ValidationError { field, message }) => self.add(&field, message),
            Err(other) => self.add("_", other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// The first error recorded, as a [`CreationaryError::ValidationError`].
    pub fn first(&self) -> Option<CreationaryError> {
        let field = self.order.first()?;
        let message = self.fields.get(field)?.first()?;
        Some(CreationaryError::ValidationError {
            field: field.clone(),
            message: message.clone(),
        })
    }

    pub fn into_result(self) -> Result<()> {
        match self.first() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        #[derive(Serialize)]
        struct Entry<'a> {
            errors: &'a [String],
        }

        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.order {
            if let Some(errors) = self.fields.get(field) {
                map.serialize_entry(field, &Entry { errors })?;
            }
        }
        map.end()
    }
}

fn invalid(field_name: &str, message: impl Into<String>) -> CreationaryError {
    CreationaryError::ValidationError {
        field: field_name.to_string(),
        message: message.into(),
    }
}

pub fn validate_min_chars(field_name: &str, value: &str, min: usize, message: &str) -> Result<()> {
    if value.chars().count() < min {
        return Err(invalid(field_name, message));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(field_name, "Email is required"));
    }
    if !EMAIL_RE.is_match(value) {
        return Err(invalid(field_name, "Invalid email address"));
    }
    Ok(())
}

/// Password policy shared by sign-up and login. Reports the first rule broken.
pub fn validate_password(field_name: &str, value: &str) -> Result<()> {
    if value.chars().count() < 8 {
        return Err(invalid(field_name, "Be at least 8 characters long"));
    }
    if !value.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(invalid(field_name, "Contain at least one letter."));
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Err(invalid(field_name, "Contain at least one number."));
    }
    if !value.chars().any(|c| !c.is_ascii_alphanumeric()) {
        return Err(invalid(field_name, "Contain at least one special character."));
    }
    Ok(())
}

pub fn validate_non_negative_amount(field_name: &str, value: f64, message: &str) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field_name, message));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(CreationaryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CreationaryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
