use crate::utils::error::{Result, SkillSwapError};
use regex::Regex;
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> SkillSwapError {
    SkillSwapError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String], allowed: &[&str]) -> Result<()> {
    if formats.is_empty() {
        return Err(invalid(field_name, "", "At least one format is required"));
    }

    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();
    for format in formats {
        if !allowed_set.contains(format.as_str()) {
            return Err(invalid(
                field_name,
                format,
                format!("Unsupported format. Valid formats: {}", allowed.join(", ")),
            ));
        }
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| SkillSwapError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
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
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// Input checks on user-supplied fields report `ValidationError` rather than
/// the configuration variants above.
pub fn validate_email(email: &str) -> Result<()> {
    let re = Regex::new(EMAIL_PATTERN).map_err(|e| SkillSwapError::ValidationError {
        message: e.to_string(),
    })?;
    if !re.is_match(email.trim()) {
        return Err(SkillSwapError::ValidationError {
            message: format!("'{}' is not a valid email address", email),
        });
    }
    Ok(())
}

pub fn validate_password(password: &str, min_length: usize) -> Result<()> {
    if password.chars().count() < min_length {
        return Err(SkillSwapError::ValidationError {
            message: format!("password must be at least {} characters", min_length),
        });
    }
    Ok(())
}

pub fn validate_text(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SkillSwapError::ValidationError {
            message: format!("{} cannot be empty", field_name),
        });
    }
    Ok(())
}
