use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledNumber {
    pub number: Option<String>,
    pub was_corrected: bool,
}

#[derive(Debug, Default)]
pub struct NumberingCounters {
    counters: HashMap<(String, u32), u32>,
}

impl NumberingCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reconcile(
        &mut self,
        numbering_id: Option<&str>,
        numbering_level: Option<u32>,
        detected_number: Option<&str>,
    ) -> ReconciledNumber {
        let (Some(numbering_id), Some(numbering_level)) = (numbering_id, numbering_level) else {
            return ReconciledNumber {
                number: detected_number.map(ToOwned::to_owned),
                was_corrected: false,
            };
        };

        let count = self
            .counters
            .entry((numbering_id.to_string(), numbering_level))
            .and_modify(|value| *value += 1)
            .or_insert(1);
        let authoritative = count.to_string();

        let was_corrected = detected_number
            .map(|detected| detected != authoritative)
            .unwrap_or(false);

        ReconciledNumber {
            number: Some(authoritative),
            was_corrected,
        }
    }
}
