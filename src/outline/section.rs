use super::*;

#[derive(Debug)]
pub struct SectionNumberPatterns {
    spaced: Regex,
    dashed: Regex,
    compact: Regex,
}

impl SectionNumberPatterns {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            spaced: Regex::new(r"(\d+)\s+(\d+)\s+(\d+)")?,
            dashed: Regex::new(r"(\d+)-(\d+)-(\d+)")?,
            compact: Regex::new(r"(\d{6})")?,
        })
    }

    pub fn normalize(&self, raw: &str) -> String {
        let raw = raw.trim();

        for pattern in [&self.spaced, &self.dashed] {
            if let Some(captures) = pattern.captures(raw) {
                return format!("{}{}{}", &captures[1], &captures[2], &captures[3]);
            }
        }

        if let Some(captures) = self.compact.captures(raw) {
            return captures[1].to_string();
        }

        raw.replace([' ', '-'], "")
    }
}
