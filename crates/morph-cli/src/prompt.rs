//! Interactive format selection backed by `dialoguer`.

use std::path::Path;

use dialoguer::Select;
use morph_core::{ConvertError, ConvertResult, FormatPrompt, TargetFormat};

/// Modal terminal prompt: arrow keys to move, Enter to pick, Esc to cancel.
pub struct SelectPrompt;

impl FormatPrompt for SelectPrompt {
    fn select(&mut self, source: &Path, options: &[TargetFormat]) -> ConvertResult<Option<usize>> {
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());
        let items: Vec<String> = options
            .iter()
            .map(|t| format!("{} ({})", t.display_name, t.extension))
            .collect();

        Select::new()
            .with_prompt(format!("Convert {file_name} to"))
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|e| ConvertError::ConversionFailed(format!("selection failed: {e}")))
    }
}
