use crate::utils::error::{Result, SchedulerError};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// True when the client source should be fetched over HTTP rather than read from disk.
pub fn is_remote_source(source: &str) -> bool {
    let lowered = source.trim().to_ascii_lowercase();
    lowered.starts_with("http://") || lowered.starts_with("https://")
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SchedulerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SchedulerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SchedulerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SchedulerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SchedulerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A client source is either an http(s) URL or a local CSV path.
pub fn validate_client_source(field_name: &str, source: &str) -> Result<()> {
    if is_remote_source(source) {
        validate_url(field_name, source.trim())
    } else {
        validate_path(field_name, source)?;
        validate_file_extensions(field_name, &[source.to_string()], &["csv"])
    }
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        match std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => {}
            Some(extension) => {
                return Err(SchedulerError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(SchedulerError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SchedulerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Rosters must be non-empty, with non-blank names that are unique after trimming.
pub fn validate_team_names(field_name: &str, teams: &[String]) -> Result<()> {
    if teams.is_empty() {
        return Err(SchedulerError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for team in teams {
        validate_non_empty_string(field_name, team)?;
        if !seen.insert(team.trim()) {
            return Err(SchedulerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: team.clone(),
                reason: "Duplicate team name".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    let valid_formats = ["csv", "json"];
    if formats.is_empty() {
        return Err(SchedulerError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    for format in formats {
        if !valid_formats.contains(&format.as_str()) {
            return Err(SchedulerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    valid_formats.join(", ")
                ),
            });
        }
    }
    Ok(())
}
