use crate::{alphabet::Alphabet, dna_sequence::DnaSequence, error::DigestError};
use serde::{Deserialize, Serialize};

/// A restriction enzyme as written in an enzyme definition file.
///
/// This is the unchecked form; [`RestrictionEnzymeDefinition::into_enzyme`]
/// validates it against an alphabet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionEnzymeDefinition {
    pub name: String,
    pub sequence: String,
    pub cut: isize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RestrictionEnzymeDefinition {
    pub fn into_enzyme(self, alphabet: &Alphabet) -> Result<RestrictionEnzyme, DigestError> {
        let mut ret = RestrictionEnzyme::with_alphabet(&self.name, &self.sequence, self.cut, alphabet)?;
        ret.note = self.note;
        Ok(ret)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "RestrictionEnzymeDefinition",
    into = "RestrictionEnzymeDefinition"
)]
pub struct RestrictionEnzyme {
    name: String,
    sequence: String,
    cut: usize,
    note: Option<String>,
    is_palindromic: bool,
}

impl RestrictionEnzyme {
    /// Builds an enzyme over the DNA alphabet. `cut` is the offset inside the
    /// recognition sequence at which the forward strand is severed.
    pub fn new(name: &str, sequence: &str, cut: isize) -> Result<Self, DigestError> {
        Self::with_alphabet(name, sequence, cut, &Alphabet::dna())
    }

    pub fn with_alphabet(
        name: &str,
        sequence: &str,
        cut: isize,
        alphabet: &Alphabet,
    ) -> Result<Self, DigestError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DigestError::invalid_enzyme(name, "name is empty"));
        }
        let sequence = sequence.trim().to_ascii_uppercase();
        if sequence.is_empty() {
            return Err(DigestError::invalid_enzyme(name, "recognition sequence is empty"));
        }
        if let Some(bad) = alphabet.first_invalid(sequence.as_bytes()) {
            return Err(DigestError::invalid_enzyme(
                name,
                format!(
                    "recognition sequence '{sequence}' contains '{}', which is not one of {}",
                    bad.escape_ascii(),
                    String::from_utf8_lossy(&alphabet.symbols())
                ),
            ));
        }
        let cut = usize::try_from(cut)
            .ok()
            .filter(|cut| *cut <= sequence.len())
            .ok_or_else(|| {
                DigestError::invalid_enzyme(
                    name,
                    format!("cut offset {cut} is outside 0..={}", sequence.len()),
                )
            })?;
        let is_palindromic = alphabet
            .reverse_complement(sequence.as_bytes())
            .is_some_and(|rc| rc == sequence.as_bytes());
        Ok(Self {
            name: name.to_string(),
            sequence,
            cut,
            note: None,
            is_palindromic,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn cut(&self) -> usize {
        self.cut
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn is_palindromic(&self) -> bool {
        self.is_palindromic
    }

    /// Start offsets of every occurrence of the recognition sequence,
    /// including overlapping ones.
    pub fn recognition_sites(&self, seq: &DnaSequence) -> Vec<usize> {
        let pattern = self.sequence.as_bytes();
        seq.forward()
            .windows(pattern.len())
            .enumerate()
            .filter(|(_, window)| *window == pattern)
            .map(|(start, _)| start)
            .collect()
    }

    /// 0-based cleavage offsets on `seq`, ascending and free of duplicates.
    pub fn cleavage_sites(&self, seq: &DnaSequence) -> Vec<usize> {
        self.recognition_sites(seq)
            .into_iter()
            .map(|start| start + self.cut)
            .collect()
    }
}

impl TryFrom<RestrictionEnzymeDefinition> for RestrictionEnzyme {
    type Error = DigestError;

    fn try_from(definition: RestrictionEnzymeDefinition) -> Result<Self, Self::Error> {
        definition.into_enzyme(&Alphabet::dna())
    }
}

impl From<RestrictionEnzyme> for RestrictionEnzymeDefinition {
    fn from(enzyme: RestrictionEnzyme) -> Self {
        Self {
            name: enzyme.name,
            sequence: enzyme.sequence,
            cut: enzyme.cut as isize,
            note: enzyme.note,
        }
    }
}
