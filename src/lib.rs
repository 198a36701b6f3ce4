pub mod alphabet;
pub mod config;
pub mod digest;
pub mod dna_sequence;
pub mod enzymes;
pub mod error;
pub mod fragment;
pub mod gel;
pub mod gel_render;
pub mod report;
pub mod restriction_enzyme;

pub use digest::{DigestResult, DigestRun, DigestTarget, combined_digest, digest, digest_all};
pub use dna_sequence::DnaSequence;
pub use error::{DigestError, ErrorKind};
pub use fragment::{Fragment, assemble_fragments};
pub use gel::{GelBand, GelLane, MigrationConfig, MigrationModel};
pub use restriction_enzyme::RestrictionEnzyme;
