use serde::{Deserialize, Serialize};

/// The symbol alphabet recognition patterns are written in, together with the
/// base-pairing table used for reverse complements.
///
/// Each pair `(a, b)` declares both `a` and `b` as valid symbols and makes them
/// each other's complement. The default is the plain DNA alphabet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    complements: Vec<(char, char)>,
}

impl Alphabet {
    pub fn new(complements: Vec<(char, char)>) -> Self {
        let complements = complements
            .into_iter()
            .map(|(a, b)| (a.to_ascii_uppercase(), b.to_ascii_uppercase()))
            .collect();
        Self { complements }
    }

    pub fn dna() -> Self {
        Self::new(vec![('A', 'T'), ('C', 'G')])
    }

    #[inline(always)]
    pub fn contains(&self, letter: u8) -> bool {
        self.complement(letter).is_some()
    }

    #[inline(always)]
    pub fn complement(&self, letter: u8) -> Option<u8> {
        let letter = letter as char;
        self.complements.iter().find_map(|&(a, b)| {
            if a.eq_ignore_ascii_case(&letter) {
                Some(b.to_ascii_uppercase() as u8)
            } else if b.eq_ignore_ascii_case(&letter) {
                Some(a.to_ascii_uppercase() as u8)
            } else {
                None
            }
        })
    }

    /// Reverse complement of `seq`, or `None` if it holds a symbol outside the
    /// alphabet.
    pub fn reverse_complement(&self, seq: &[u8]) -> Option<Vec<u8>> {
        seq.iter().rev().map(|&c| self.complement(c)).collect()
    }

    /// Returns the first symbol of `seq` that is not part of the alphabet.
    pub fn first_invalid(&self, seq: &[u8]) -> Option<u8> {
        seq.iter().copied().find(|&c| !self.contains(c))
    }

    /// Patterns are scanned byte by byte, so every symbol must be ASCII.
    pub fn first_non_ascii(&self) -> Option<char> {
        self.complements
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .find(|c| !c.is_ascii())
    }

    pub fn symbols(&self) -> Vec<u8> {
        let mut ret: Vec<u8> = self
            .complements
            .iter()
            .flat_map(|&(a, b)| [a.to_ascii_uppercase() as u8, b.to_ascii_uppercase() as u8])
            .collect();
        ret.sort_unstable();
        ret.dedup();
        ret
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::dna()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dna_symbols() {
        let alphabet = Alphabet::dna();
        assert_eq!(alphabet.symbols(), b"ACGT".to_vec());
        assert!(alphabet.contains(b'a'));
        assert!(!alphabet.contains(b'N'));
        assert!(!alphabet.contains(b'U'));
    }

    #[test]
    fn test_complement() {
        let alphabet = Alphabet::dna();
        assert_eq!(alphabet.complement(b'A'), Some(b'T'));
        assert_eq!(alphabet.complement(b'C'), Some(b'G'));
        assert_eq!(alphabet.complement(b'G'), Some(b'C'));
        assert_eq!(alphabet.complement(b'T'), Some(b'A'));
        assert_eq!(alphabet.complement(b'g'), Some(b'C'));
        assert_eq!(alphabet.complement(b'X'), None);
    }

    #[test]
    fn test_reverse_complement() {
        let alphabet = Alphabet::dna();
        assert_eq!(
            alphabet.reverse_complement(b"GGATCC"),
            Some(b"GGATCC".to_vec())
        );
        assert_eq!(
            alphabet.reverse_complement(b"AAGCTA"),
            Some(b"TAGCTT".to_vec())
        );
        assert_eq!(alphabet.reverse_complement(b"ANT"), None);
    }

    #[test]
    fn test_rna_alphabet_from_config() {
        let alphabet: Alphabet =
            serde_json::from_str(r#"{"complements":[["A","U"],["C","G"]]}"#).unwrap();
        assert!(alphabet.contains(b'U'));
        assert!(!alphabet.contains(b'T'));
        assert_eq!(alphabet.first_invalid(b"ACGT"), Some(b'T'));
        assert_eq!(alphabet.first_non_ascii(), None);
    }

    #[test]
    fn test_non_ascii_symbol() {
        let alphabet = Alphabet::new(vec![('Ā', 'T'), ('C', 'G')]);
        assert_eq!(alphabet.first_non_ascii(), Some('Ā'));
    }
}
