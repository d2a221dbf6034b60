use crate::utils::error::Result;
use crate::utils::validation::{
    validate_email, validate_min_chars, validate_non_empty_string, validate_non_negative_amount,
    validate_password, FieldErrors, Validate,
};
use serde::{Deserialize, Serialize};

/// Content submitted through the creator upload wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub content: String,
    pub features: Vec<String>,
    pub category: String,
    pub price: f64,
    pub original_price: Option<f64>,
}

impl PostDraft {
    /// Collects every failing field.
    pub fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.record(validate_min_chars(
            "title",
            &self.title,
            5,
            "Title must be at least 5 characters",
        ));
        errors.record(validate_min_chars(
            "description",
            &self.description,
            10,
            "Description must be at least 10 characters",
        ));
        errors.record(validate_min_chars(
            "content",
            &self.content,
            20,
            "Content must be at least 20 characters",
        ));
        if self.features.iter().all(|f| f.trim().is_empty()) {
            errors.add("features", "At least one feature is required");
        }
        errors.record(validate_non_empty_string("category", &self.category));
        errors.record(validate_non_negative_amount(
            "price",
            self.price,
            "Price must be a positive number",
        ));
        if let Some(original) = self.original_price {
            errors.record(validate_non_negative_amount(
                "originalPrice",
                original,
                "Original price must be a positive number",
            ));
        }
        errors
    }
}

impl Validate for PostDraft {
    fn validate(&self) -> Result<()> {
        self.check().into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl SignUpForm {
    pub fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.record(validate_min_chars(
            "firstName",
            &self.first_name,
            3,
            "First name is required",
        ));
        errors.record(validate_min_chars(
            "lastName",
            &self.last_name,
            3,
            "Last name is required",
        ));
        errors.record(validate_email("email", self.email.trim()));
        errors.record(validate_password("password", &self.password));
        errors
    }
}

impl Validate for SignUpForm {
    fn validate(&self) -> Result<()> {
        self.check().into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.record(validate_email("email", &self.email));
        errors.record(validate_password("password", &self.password));
        errors
    }
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<()> {
        self.check().into_result()
    }
}
