// Registry list of valid well registration numbers
use crate::error::{Result, ReviewError};
use crate::patterns::REGISTRY_SEPARATOR;
use shared_types::RegistryStatus;
use std::collections::BTreeSet;

/// Set of registration numbers known to the water authority registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    numbers: BTreeSet<String>,
}

impl Registry {
    /// Parses a free-text or delimited registry export
    ///
    /// Tokens may be separated by any mix of commas, semicolons, tabs and
    /// newlines. Surrounding whitespace is trimmed and blank tokens dropped.
    pub fn parse(text: &str) -> Result<Self> {
        let numbers: BTreeSet<String> = REGISTRY_SEPARATOR
            .split(text.trim_start_matches('\u{feff}'))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();

        if numbers.is_empty() {
            return Err(ReviewError::EmptyRegistry);
        }

        tracing::info!("Loaded registry list with {} numbers", numbers.len());
        Ok(Self { numbers })
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Exact match against the trimmed registration number
    pub fn contains(&self, registration_number: &str) -> bool {
        self.numbers.contains(registration_number.trim())
    }

    pub fn check(&self, registration_number: &str) -> RegistryStatus {
        if registration_number.trim().is_empty() {
            RegistryStatus::MissingNumber
        } else if self.contains(registration_number) {
            RegistryStatus::Registered
        } else {
            RegistryStatus::NotRegistered
        }
    }
}

/// Registry status for a dossier, `NotChecked` when no list is loaded
pub fn registry_status(registry: Option<&Registry>, registration_number: &str) -> RegistryStatus {
    match registry {
        Some(registry) => registry.check(registration_number),
        None => RegistryStatus::NotChecked,
    }
}
