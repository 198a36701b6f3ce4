use crate::{
    dna_sequence::DnaSequence,
    error::DigestError,
    fragment::{Fragment, assemble_fragments, fragment_lengths},
    gel::GelLane,
    restriction_enzyme::RestrictionEnzyme,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeSet, HashSet},
    fmt,
};
use tracing::{debug, info};

pub const COMBINED_DIGEST_NAME: &str = "All enzymes";

/// What produced a digest: a single enzyme, or all enzymes of a run at once.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestTarget {
    Enzyme(String),
    Combined,
}

impl DigestTarget {
    pub fn name(&self) -> &str {
        match self {
            Self::Enzyme(name) => name,
            Self::Combined => COMBINED_DIGEST_NAME,
        }
    }
}

impl fmt::Display for DigestTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestResult {
    pub target: DigestTarget,
    pub sites: Vec<usize>,
    pub fragments: Vec<Fragment>,
}

impl DigestResult {
    pub fn fragment_lengths(&self) -> Vec<usize> {
        fragment_lengths(&self.fragments)
    }

    pub fn sequence_len(&self) -> usize {
        self.fragments.last().map(|f| f.end).unwrap_or(0)
    }

    pub fn gel_lane(&self) -> GelLane {
        GelLane::from_digest(self)
    }
}

/// Cuts `seq` with a single enzyme.
pub fn digest(seq: &DnaSequence, enzyme: &RestrictionEnzyme) -> Result<DigestResult, DigestError> {
    let sites = enzyme.cleavage_sites(seq);
    debug!(enzyme = enzyme.name(), sites = sites.len(), "scanned sequence");
    let fragments = assemble_fragments(seq.len(), &sites)?;
    Ok(DigestResult {
        target: DigestTarget::Enzyme(enzyme.name().to_string()),
        sites,
        fragments,
    })
}

/// Set union of cleavage offsets from several enzymes, ascending. A position
/// reported by more than one enzyme appears once.
pub fn combine_cleavage_sites<'a, I>(site_lists: I) -> Vec<usize>
where
    I: IntoIterator<Item = &'a [usize]>,
{
    site_lists
        .into_iter()
        .flat_map(|sites| sites.iter().copied())
        .collect::<BTreeSet<usize>>()
        .into_iter()
        .collect()
}

/// Simultaneous digest of one template by every enzyme that produced
/// `site_lists`.
pub fn combined_digest<'a, I>(sequence_len: usize, site_lists: I) -> Result<DigestResult, DigestError>
where
    I: IntoIterator<Item = &'a [usize]>,
{
    let sites = combine_cleavage_sites(site_lists);
    let fragments = assemble_fragments(sequence_len, &sites)?;
    Ok(DigestResult {
        target: DigestTarget::Combined,
        sites,
        fragments,
    })
}

/// Every digest of one run: one per enzyme in the order given, plus the
/// combined digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestRun {
    pub sequence_len: usize,
    pub per_enzyme: Vec<DigestResult>,
    pub combined: DigestResult,
}

impl DigestRun {
    pub fn results(&self) -> impl Iterator<Item = &DigestResult> {
        self.per_enzyme.iter().chain(std::iter::once(&self.combined))
    }

    pub fn gel_lanes(&self) -> Vec<GelLane> {
        self.results().map(GelLane::from_digest).collect()
    }
}

/// Enzyme names label gel lanes, so they must be unique within a run and
/// must not collide with the combined digest's lane.
pub fn check_enzyme_names(enzymes: &[RestrictionEnzyme]) -> Result<(), DigestError> {
    let mut seen = HashSet::new();
    for enzyme in enzymes {
        if enzyme.name() == COMBINED_DIGEST_NAME {
            return Err(DigestError::ReservedEnzymeName(enzyme.name().to_string()));
        }
        if !seen.insert(enzyme.name()) {
            return Err(DigestError::DuplicateEnzyme(enzyme.name().to_string()));
        }
    }
    Ok(())
}

/// Scans `seq` with every enzyme in parallel and merges the results.
pub fn digest_all(seq: &DnaSequence, enzymes: &[RestrictionEnzyme]) -> Result<DigestRun, DigestError> {
    check_enzyme_names(enzymes)?;

    let per_enzyme = enzymes
        .par_iter()
        .map(|enzyme| digest(seq, enzyme))
        .collect::<Result<Vec<_>, _>>()?;
    let combined = combined_digest(
        seq.len(),
        per_enzyme.iter().map(|result| result.sites.as_slice()),
    )?;
    info!(
        sequence_len = seq.len(),
        enzymes = enzymes.len(),
        combined_sites = combined.sites.len(),
        "digest complete"
    );
    Ok(DigestRun {
        sequence_len: seq.len(),
        per_enzyme,
        combined,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn lab_enzymes() -> Vec<RestrictionEnzyme> {
        vec![
            RestrictionEnzyme::new("EcoRI", "GAATTC", 1).unwrap(),
            RestrictionEnzyme::new("BamHI", "GGATCC", 1).unwrap(),
            RestrictionEnzyme::new("HindIII", "AAGCTT", 1).unwrap(),
            RestrictionEnzyme::new("TaqI", "TCGA", 1).unwrap(),
            RestrictionEnzyme::new("HaeIII", "GGCC", 2).unwrap(),
        ]
    }

    #[test]
    fn test_single_enzyme_digest() {
        let seq = DnaSequence::from_sequence("GAATTCGGATCC").unwrap();
        let re = RestrictionEnzyme::new("EcoRI", "GAATTC", 1).unwrap();
        let result = digest(&seq, &re).unwrap();
        assert_eq!(result.target, DigestTarget::Enzyme("EcoRI".to_string()));
        assert_eq!(result.sites, vec![1]);
        assert_eq!(
            result.fragments,
            vec![Fragment::new(0, 1), Fragment::new(1, 12)]
        );
        assert_eq!(result.fragment_lengths(), vec![1, 11]);
        assert_eq!(result.sequence_len(), 12);
    }

    #[test]
    fn test_combine_collapses_shared_sites() {
        let a: Vec<usize> = vec![2, 5, 9];
        let b: Vec<usize> = vec![5, 7];
        let combined = combine_cleavage_sites([a.as_slice(), b.as_slice()]);
        assert_eq!(combined, vec![2, 5, 7, 9]);
        assert_eq!(combined.iter().filter(|&&s| s == 5).count(), 1);
    }

    #[test]
    fn test_combine_nothing() {
        let combined = combined_digest(10, std::iter::empty()).unwrap();
        assert!(combined.sites.is_empty());
        assert_eq!(combined.fragments, vec![Fragment::new(0, 10)]);
        assert_eq!(combined.target, DigestTarget::Combined);
    }

    #[test]
    fn test_two_enzymes_sharing_a_cut() {
        // AGGA/2 severs the same G^G bond as BamHI.
        let seq = DnaSequence::from_sequence("AAAAGGATCCAAAA").unwrap();
        let enzymes = vec![
            RestrictionEnzyme::new("BamHI", "GGATCC", 1).unwrap(),
            RestrictionEnzyme::new("Custom", "AGGA", 2).unwrap(),
        ];
        let run = digest_all(&seq, &enzymes).unwrap();
        assert_eq!(run.per_enzyme[0].sites, vec![5]);
        assert_eq!(run.per_enzyme[1].sites, vec![5]);
        assert_eq!(run.combined.sites, vec![5]);
        assert_eq!(run.combined.fragments.len(), 2);
    }

    #[test]
    fn test_digest_all_lab_sequence() {
        let unit = "ATGCGGAATTCCGGAATTCTTGGATCCGCTTAAGATCGGAAGCTTTTTCGAGGCCGGCC";
        let seq = DnaSequence::from_sequence(&unit.repeat(3)).unwrap();
        let run = digest_all(&seq, &lab_enzymes()).unwrap();
        assert_eq!(run.sequence_len, 177);
        assert_eq!(run.per_enzyme.len(), 5);

        let eco = &run.per_enzyme[0];
        assert_eq!(eco.sites, vec![6, 14, 65, 73, 124, 132]);
        assert_eq!(eco.fragments.len(), 7);

        let hae = &run.per_enzyme[4];
        assert_eq!(hae.sites, vec![53, 57, 112, 116, 171, 175]);

        let union: BTreeSet<usize> = run
            .per_enzyme
            .iter()
            .flat_map(|r| r.sites.iter().copied())
            .collect();
        assert_eq!(run.combined.sites, union.into_iter().collect::<Vec<_>>());
        assert_eq!(
            run.combined.fragment_lengths().iter().sum::<usize>(),
            seq.len()
        );
        assert_eq!(run.results().count(), 6);
        assert_eq!(run.results().last().unwrap().target.name(), "All enzymes");
    }

    #[test]
    fn test_duplicate_enzyme_names() {
        let seq = DnaSequence::from_sequence("GAATTC").unwrap();
        let enzymes = vec![
            RestrictionEnzyme::new("EcoRI", "GAATTC", 1).unwrap(),
            RestrictionEnzyme::new("EcoRI", "GAATTC", 5).unwrap(),
        ];
        let err = digest_all(&seq, &enzymes).unwrap_err();
        assert_eq!(err, DigestError::DuplicateEnzyme("EcoRI".to_string()));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_enzyme_named_like_combined_lane() {
        let seq = DnaSequence::from_sequence("GGATCCAAAAGAATTCAAAAAAAA").unwrap();
        let enzymes = vec![
            RestrictionEnzyme::new("BamHI", "GGATCC", 1).unwrap(),
            RestrictionEnzyme::new(COMBINED_DIGEST_NAME, "GAATTC", 1).unwrap(),
        ];
        let err = digest_all(&seq, &enzymes).unwrap_err();
        assert_eq!(
            err,
            DigestError::ReservedEnzymeName("All enzymes".to_string())
        );
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_no_enzymes() {
        let seq = DnaSequence::from_sequence("ACGTACGTAC").unwrap();
        let run = digest_all(&seq, &[]).unwrap();
        assert!(run.per_enzyme.is_empty());
        assert_eq!(run.combined.fragments, vec![Fragment::new(0, 10)]);
    }
}
