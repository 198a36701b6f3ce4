//! Human-facing view of digest results.
//!
//! Everything below the reporting layer works in 0-based offsets and
//! half-open fragments. This module is the only place they are turned into
//! 1-based, inclusive positions: a cut at offset `p` is reported at position
//! `p + 1`, and fragment `[s, e)` is reported as `start = s + 1, end = e`.

use crate::{
    digest::{DigestResult, DigestRun, DigestTarget},
    gel::GelBand,
    restriction_enzyme::RestrictionEnzyme,
};
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FragmentReport {
    pub number: usize,
    pub start: usize,
    pub end: usize,
    pub length: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DigestReport {
    pub name: String,
    pub combined: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recognition_sequence: Option<String>,
    pub cleavage_positions: Vec<usize>,
    pub fragments: Vec<FragmentReport>,
}

impl DigestReport {
    pub fn new(result: &DigestResult, enzyme: Option<&RestrictionEnzyme>) -> Self {
        Self {
            name: result.target.name().to_string(),
            combined: result.target == DigestTarget::Combined,
            recognition_sequence: enzyme.map(|re| re.sequence().to_string()),
            cleavage_positions: result.sites.iter().map(|offset| offset + 1).collect(),
            fragments: result
                .fragments
                .iter()
                .enumerate()
                .map(|(i, fragment)| FragmentReport {
                    number: i + 1,
                    start: fragment.start + 1,
                    end: fragment.end,
                    length: fragment.len(),
                })
                .collect(),
        }
    }

    fn write_fragments(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for fragment in &self.fragments {
            writeln!(
                f,
                "  Fragment {}: start={}, end={}, length={} bp",
                fragment.number, fragment.start, fragment.end, fragment.length
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for DigestReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.combined {
            writeln!(f, "=== Combined digest (all enzymes) ===")?;
            writeln!(
                f,
                "Total number of distinct cleavage sites: {}",
                self.cleavage_positions.len()
            )?;
            if !self.cleavage_positions.is_empty() {
                writeln!(
                    f,
                    "Cleavage positions (1-based): {}",
                    self.cleavage_positions.iter().join(", ")
                )?;
            }
            writeln!(f, "Fragments (start, end, length in bp):")?;
            self.write_fragments(f)?;
            return writeln!(f);
        }

        writeln!(f, "=== {} ===", self.name)?;
        if let Some(seq) = &self.recognition_sequence {
            writeln!(f, "Recognition sequence: {seq}")?;
        }
        writeln!(f, "Number of cleavages: {}", self.cleavage_positions.len())?;
        if self.cleavage_positions.is_empty() {
            writeln!(f, "No cleavage sites found. One fragment:")?;
        } else {
            writeln!(f, "Cleavage positions (1-based index along the DNA):")?;
            writeln!(f, "  {}", self.cleavage_positions.iter().join(", "))?;
            writeln!(f, "Fragments (start, end, length in bp):")?;
        }
        self.write_fragments(f)?;
        writeln!(f)
    }
}

/// Everything a run produced, ready to print or serialize.
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub sequence_name: Option<String>,
    pub sequence_len: usize,
    pub digests: Vec<DigestReport>,
    pub bands: Vec<GelBand>,
}

impl RunReport {
    pub fn new(
        sequence_name: Option<&str>,
        run: &DigestRun,
        enzymes: &[RestrictionEnzyme],
        bands: Vec<GelBand>,
    ) -> Self {
        let digests = run
            .results()
            .map(|result| {
                let enzyme = match &result.target {
                    DigestTarget::Enzyme(name) => enzymes.iter().find(|re| re.name() == name),
                    DigestTarget::Combined => None,
                };
                DigestReport::new(result, enzyme)
            })
            .collect();
        Self {
            sequence_name: sequence_name.map(str::to_string),
            sequence_len: run.sequence_len,
            digests,
            bands,
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.sequence_name {
            Some(name) => writeln!(f, "DNA '{name}' length: {} bp\n", self.sequence_len)?,
            None => writeln!(f, "DNA length: {} bp\n", self.sequence_len)?,
        }
        for digest in &self.digests {
            write!(f, "{digest}")?;
        }
        Ok(())
    }
}
