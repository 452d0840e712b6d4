use crate::utils::error::{AdvisorError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 副檔名不分大小寫；不在清單內回傳 UnsupportedFormatError
pub fn validate_file_extension(file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension.to_lowercase().as_str()) => Ok(()),
        _ => Err(AdvisorError::UnsupportedFormatError {
            path: file.to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 關鍵字清單: 至少一個、皆非空白、皆為小寫
pub fn validate_keywords(field_name: &str, keywords: &[String]) -> Result<()> {
    if keywords.is_empty() {
        return Err(AdvisorError::ConfigValidationError {
            field: field_name.to_string(),
            message: "At least one keyword is required".to_string(),
        });
    }

    for keyword in keywords {
        validate_non_empty_string(field_name, keyword)?;
        if keyword.to_lowercase() != *keyword {
            return Err(AdvisorError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: keyword.clone(),
                reason: "Keywords must be lower-case".to_string(),
            });
        }
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
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
