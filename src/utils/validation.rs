use crate::utils::error::{ConvertError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Fails with `MissingInformation` when a required addressee field is empty.
pub fn validate_required_info(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ConvertError::missing_information(format!(
            "{field_name} is required, name/address/phone need to be filled correctly"
        )));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}
