//! Query Keys and Fetch Generations
//!
//! Every remote list has one loader. A fetch is stamped with a generation
//! number; answers older than the last published one are thrown away.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Boards,
    Tasks,
    Users,
}

impl QueryKey {
    pub const ALL: [QueryKey; 3] = [QueryKey::Boards, QueryKey::Tasks, QueryKey::Users];

    pub fn index(&self) -> usize {
        match self {
            QueryKey::Boards => 0,
            QueryKey::Tasks => 1,
            QueryKey::Users => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QueryKey::Boards => "boards",
            QueryKey::Tasks => "tasks",
            QueryKey::Users => "users",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchGenerations {
    issued: u64,
    applied: u64,
}

impl FetchGenerations {
    /// Stamp a new fetch
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Whether the answer of fetch `generation` may be published
    pub fn accept(&mut self, generation: u64) -> bool {
        if generation <= self.applied || generation > self.issued {
            return false;
        }
        self.applied = generation;
        true
    }

    /// Server data changed: answers to fetches already sent are stale
    pub fn invalidate(&mut self) {
        self.applied = self.issued;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_in_order_are_published() {
        let mut gens = FetchGenerations::default();
        let a = gens.issue();
        let b = gens.issue();
        assert!(gens.accept(a));
        assert!(gens.accept(b));
    }

    #[test]
    fn older_answer_after_newer_is_dropped() {
        let mut gens = FetchGenerations::default();
        let a = gens.issue();
        let b = gens.issue();
        assert!(gens.accept(b));
        assert!(!gens.accept(a));
    }

    #[test]
    fn unknown_generation_is_dropped() {
        let mut gens = FetchGenerations::default();
        assert!(!gens.accept(1));
        let a = gens.issue();
        assert!(gens.accept(a));
        assert!(!gens.accept(a));
    }

    #[test]
    fn fetch_sent_before_invalidation_is_dropped() {
        let mut gens = FetchGenerations::default();
        let before = gens.issue();
        gens.invalidate();
        let after = gens.issue();

        assert!(!gens.accept(before));
        assert!(gens.accept(after));
    }

    #[test]
    fn invalidation_does_not_block_the_next_fetch_out_of_order() {
        let mut gens = FetchGenerations::default();
        let a = gens.issue();
        gens.invalidate();
        let b = gens.issue();
        let c = gens.issue();
        assert!(gens.accept(c));
        assert!(!gens.accept(b));
        assert!(!gens.accept(a));
    }

    #[test]
    fn keys_have_distinct_slots() {
        let mut seen = [false; 3];
        for key in QueryKey::ALL {
            assert!(!seen[key.index()]);
            seen[key.index()] = true;
        }
    }
}
