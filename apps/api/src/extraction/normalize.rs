//! Text normalization — first stage of the extraction pipeline.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Punctuation kept through normalization. Résumés rely on these for dates,
/// contact details, and inline lists; everything else is noise.
const KEPT_PUNCTUATION: &str = ".,:()@/-";

/// Cleans raw résumé text for segmentation.
///
/// Total and idempotent: any input (including the empty string) yields a
/// cleaned string, and normalizing twice equals normalizing once.
pub struct TextNormalizer {
    spaces: Regex,
    line_leading_ws: Regex,
    blank_lines: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            spaces: Regex::new(r"[ \t]+").expect("Invalid spaces regex"),
            line_leading_ws: Regex::new(r"\n[ \t]+").expect("Invalid leading-whitespace regex"),
            blank_lines: Regex::new(r"\n{2,}").expect("Invalid blank-lines regex"),
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        // NFKD first, so ligatures and fullwidth forms decompose into plain
        // characters before the keep-set filter runs. Combining marks left
        // behind by the decomposition are dropped by the filter, which turns
        // accented letters into their ASCII base.
        let filtered: String = text.nfkd().filter(|&c| keep_char(c)).collect();

        let collapsed = self.spaces.replace_all(&filtered, " ");
        let collapsed = self.line_leading_ws.replace_all(&collapsed, "\n");
        let collapsed = self.blank_lines.replace_all(&collapsed, "\n");

        collapsed.trim().to_string()
    }
}

/// Keep-set: newline, tab, non-control whitespace, word characters, and the
/// punctuation above. Rejects control characters, emoji/pictographs, and
/// combining marks.
fn keep_char(c: char) -> bool {
    if c == '\n' || c == '\t' {
        return true;
    }
    if c.is_control() {
        return false;
    }
    c.is_alphanumeric() || c == '_' || c.is_whitespace() || KEPT_PUNCTUATION.contains(c)
}
