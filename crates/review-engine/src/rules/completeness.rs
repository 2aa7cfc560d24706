// Section completeness: how many required entries of a section are filled
use crate::extractors::numeric::is_filled;
use shared_types::{Applicant, Completeness, Documents, Signatures, Technical, TextRecord};

/// Counts required text fields that hold more than whitespace
///
/// A required name the record does not know counts as empty.
pub fn text_completeness<R: TextRecord + ?Sized>(record: &R, required: &[&str]) -> Completeness {
    let filled = required
        .iter()
        .filter(|name| is_filled(record.text_field(name)))
        .count();
    Completeness::from_counts(filled as u32, required.len() as u32)
}

/// Same bucketing for checkbox-style sections
pub fn flag_completeness<I: IntoIterator<Item = bool>>(flags: I) -> Completeness {
    let (filled, required) = flags
        .into_iter()
        .fold((0u32, 0u32), |(filled, total), flag| {
            (filled + u32::from(flag), total + 1)
        });
    Completeness::from_counts(filled, required)
}

pub fn applicant_completeness(applicant: &Applicant) -> Completeness {
    text_completeness(applicant, Applicant::REQUIRED)
}

pub fn technical_completeness(technical: &Technical) -> Completeness {
    text_completeness(technical, Technical::REQUIRED)
}

pub fn documents_completeness(documents: &Documents) -> Completeness {
    flag_completeness(documents.flags())
}

pub fn signatures_completeness(signatures: &Signatures) -> Completeness {
    flag_completeness(signatures.flags())
}
