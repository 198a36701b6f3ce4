use crate::{
    alphabet::Alphabet,
    digest::check_enzyme_names,
    error::DigestError,
    restriction_enzyme::{RestrictionEnzyme, RestrictionEnzymeDefinition},
};
use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path};
use tracing::debug;

/// The restriction enzymes a caller supplied for a run, in file order and
/// with unique names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnzymeSet {
    restriction_enzymes: Vec<RestrictionEnzyme>,
}

impl EnzymeSet {
    pub fn new(restriction_enzymes: Vec<RestrictionEnzyme>) -> Result<Self, DigestError> {
        check_enzyme_names(&restriction_enzymes)?;
        Ok(Self {
            restriction_enzymes,
        })
    }

    /// Parses a JSON array of enzyme definitions. Rows may carry a `"type"`
    /// field; if present it has to be `"restriction"`.
    pub fn from_json_text(json_text: &str, alphabet: &Alphabet) -> Result<Self> {
        let res: serde_json::Value =
            serde_json::from_str(json_text).context("Enzyme definitions are not valid JSON")?;
        let arr = res
            .as_array()
            .ok_or(anyhow!("Enzyme definitions are not a JSON array"))?;
        let mut enzymes = Vec::with_capacity(arr.len());
        for row in arr {
            match row.get("type").map(|et| et.as_str()) {
                None | Some(Some("restriction")) => {}
                Some(Some(other)) => return Err(anyhow!("Unknown enzyme type '{other}' in {row}")),
                Some(None) => return Err(anyhow!("Enzyme type is not a string in {row}")),
            }
            let definition: RestrictionEnzymeDefinition = serde_json::from_value(row.clone())
                .with_context(|| format!("Bad restriction enzyme: {row}"))?;
            enzymes.push(definition.into_enzyme(alphabet)?);
        }
        debug!(enzymes = enzymes.len(), "loaded enzyme definitions");
        Ok(Self::new(enzymes)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P, alphabet: &Alphabet) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read enzyme file '{}'", path.display()))?;
        Self::from_json_text(&text, alphabet)
            .with_context(|| format!("Could not load enzymes from '{}'", path.display()))
    }

    pub fn restriction_enzymes(&self) -> &[RestrictionEnzyme] {
        &self.restriction_enzymes
    }

    pub fn get(&self, name: &str) -> Option<&RestrictionEnzyme> {
        self.restriction_enzymes.iter().find(|re| re.name() == name)
    }

    /// The named enzymes in the order requested. Unknown names are an error.
    pub fn by_names(&self, names: &[&str]) -> Result<Vec<RestrictionEnzyme>> {
        let missing = names
            .iter()
            .filter(|name| self.get(name).is_none())
            .copied()
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(anyhow!("Unknown enzymes: {}", missing.join(",")));
        }
        Ok(names
            .iter()
            .filter_map(|name| self.get(name))
            .cloned()
            .collect())
    }

    pub fn len(&self) -> usize {
        self.restriction_enzymes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restriction_enzymes.is_empty()
    }
}
