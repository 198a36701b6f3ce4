use crate::{error::DigestError, fragment::Fragment};
use anyhow::{Context, Result};
use bio::io::fasta;
use std::{fs::File, io::Read, path::Path};

/// An uppercase, non-empty linear DNA template.
///
/// Symbols are not checked against the alphabet; only the enzyme patterns are.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DnaSequence {
    name: Option<String>,
    seq: Vec<u8>,
}

impl DnaSequence {
    pub fn from_sequence(sequence: &str) -> Result<Self, DigestError> {
        Self::from_u8(sequence.as_bytes())
    }

    pub fn from_u8(s: &[u8]) -> Result<Self, DigestError> {
        if s.is_empty() {
            return Err(DigestError::EmptySequence);
        }
        Ok(Self {
            name: None,
            seq: s.to_ascii_uppercase(),
        })
    }

    /// Reads every FASTA record from `reader` and concatenates their sequence
    /// lines into one template. The first record's id becomes the name.
    /// Input without a `>` header is read as bare sequence lines.
    pub fn from_fasta_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = vec![];
        reader
            .read_to_end(&mut text)
            .context("Could not read sequence input")?;
        let headerless = text
            .split(|&c| c == b'\n')
            .map(|line| line.trim_ascii())
            .find(|line| !line.is_empty())
            .is_some_and(|line| !line.starts_with(b">"));
        if headerless {
            text = [b">sequence\n".as_slice(), &text].concat();
        }

        let mut name = None;
        let mut seq = vec![];
        for record in fasta::Reader::new(text.as_slice()).records() {
            let record = record.context("Could not parse FASTA record")?;
            if name.is_none() && !headerless {
                name = Some(record.id().to_string());
            }
            seq.extend_from_slice(record.seq());
        }
        let mut ret = Self::from_u8(&seq)?;
        ret.name = name;
        Ok(ret)
    }

    pub fn from_fasta_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Could not open FASTA file '{}'", path.display()))?;
        Self::from_fasta_reader(file)
            .with_context(|| format!("Could not load sequence from '{}'", path.display()))
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline(always)]
    pub fn forward(&self) -> &[u8] {
        &self.seq
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// The bases covered by `fragment`, or `None` if it does not lie within
    /// this sequence.
    pub fn fragment_bases(&self, fragment: &Fragment) -> Option<&[u8]> {
        self.seq.get(fragment.start..fragment.end)
    }
}
