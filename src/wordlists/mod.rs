//! Answer supply for the layout engine
//!
//! Built-in topic packs compiled into the binary, file-based word lists, the
//! sanitizer every supplier runs its output through, and blending with the
//! generation history.

pub mod blend;
mod embedded;
pub mod loader;
mod supplier;

pub use blend::{BLEND_TOTAL, blend_with_history, fresh_only};
pub use embedded::TOPIC_PACKS;
pub use supplier::{Difficulty, EmbeddedSupplier, FileSupplier, SupplyError, WordSupplier};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_are_sorted_by_topic() {
        let topics: Vec<_> = TOPIC_PACKS.iter().map(|(t, _)| *t).collect();
        let mut sorted = topics.clone();
        sorted.sort_unstable();
        assert_eq!(topics, sorted);
    }

    #[test]
    fn pack_entries_survive_sanitizing() {
        for (topic, pack) in TOPIC_PACKS {
            let words = loader::collect_entries(pack.iter().copied());
            assert_eq!(words.len(), pack.len(), "pack '{topic}' has invalid entries");
        }
    }

    #[test]
    fn packs_are_large_enough_for_a_layout() {
        for (topic, pack) in TOPIC_PACKS {
            assert!(pack.len() >= 12, "pack '{topic}' has only {} entries", pack.len());
        }
    }
}
