//! Phonetic name matching tuned for Indian names in Latin script.
//!
//! Registration desks spell the same name many ways (Shailesh/Shylesh,
//! Lakshmi/Laxmi, Geeta/Gita). Names reduce to a consonant-skeleton code
//! that is stable across those variants, and candidates are ranked by a
//! tiered similarity score on the codes.

pub mod code;
pub mod matcher;

pub use code::{phonetic_code, phonetic_code_aggressive};
pub use matcher::{match_score, search_candidates, PhoneticMatch};
