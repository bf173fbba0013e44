use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DynimportError;

pub const DEFAULT_FILTER: &str = r"\.(js|json)$";
pub const DEFAULT_LOADER: &str = "js";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DynimportOptions {
    pub transform_extensions: Option<Vec<String>>,
    pub change_relative_to_absolute: bool,
    pub filter: Option<String>,
    pub loader: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PluginConfig {
    pub transform_extensions: Vec<String>,
    pub change_relative_to_absolute: bool,
    pub filter: Regex,
    pub loader: String,
}

impl PluginConfig {
    pub fn from_options(options: &DynimportOptions) -> Result<Self, DynimportError> {
        if options.transform_extensions.is_none() && !options.change_relative_to_absolute {
            return Err(DynimportError::Config {
                message: "one of transformExtensions or changeRelativeToAbsolute is required"
                    .to_string(),
            });
        }
        let filter_source = options.filter.as_deref().unwrap_or(DEFAULT_FILTER);
        let filter = Regex::new(filter_source).map_err(|err| DynimportError::Config {
            message: format!("filter is not a valid regex: {err}"),
        })?;
        let transform_extensions = options
            .transform_extensions
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|ext| normalize_extension(&ext))
            .filter(|ext| ext != ".")
            .collect::<Vec<_>>();
        Ok(Self {
            transform_extensions,
            change_relative_to_absolute: options.change_relative_to_absolute,
            filter,
            loader: options
                .loader
                .clone()
                .unwrap_or_else(|| DEFAULT_LOADER.to_string()),
        })
    }
}

fn normalize_extension(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{trimmed}")
    }
}
