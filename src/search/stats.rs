use std::fmt::{self, Debug, Display, Formatter};

use separator::Separatable;

/// Per-depth bookkeeping of one search run.
#[derive(PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<i32>,
    visited_states: Vec<i32>,
    duplicate_states: Vec<i32>,
}

impl Stats {
    pub fn new() -> Self {
        Stats {
            created_states: vec![],
            visited_states: vec![],
            duplicate_states: vec![],
        }
    }

    pub fn total_created(&self) -> i32 {
        self.created_states.iter().sum::<i32>()
    }

    pub fn total_unique_visited(&self) -> i32 {
        self.visited_states.iter().sum::<i32>()
    }

    pub fn total_reached_duplicates(&self) -> i32 {
        self.duplicate_states.iter().sum::<i32>()
    }

    /// Returns true when a new depth was reached.
    pub fn add_created(&mut self, depth: u32) -> bool {
        Self::add(&mut self.created_states, depth)
    }

    pub fn add_unique_visited(&mut self, depth: u32) -> bool {
        Self::add(&mut self.visited_states, depth)
    }

    pub fn add_reached_duplicate(&mut self, depth: u32) -> bool {
        Self::add(&mut self.duplicate_states, depth)
    }

    fn add(counts: &mut Vec<i32>, depth: u32) -> bool {
        let mut ret = false;

        // while because some depths might be skipped
        while depth as usize >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth as usize] += 1;
        ret
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "unique visited by depth: {:?}", self.visited_states)?;
        writeln!(
            f,
            "total created: {}",
            self.total_created().separated_string()
        )?;
        writeln!(
            f,
            "total reached duplicates: {}",
            self.total_reached_duplicates().separated_string()
        )?;
        writeln!(
            f,
            "total unique visited: {}",
            self.total_unique_visited().separated_string()
        )
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let duplicates = self.total_reached_duplicates();
        let visited = self.total_unique_visited();
        writeln!(f, "States created total: {}", created.separated_string())?;
        writeln!(
            f,
            "Unique states visited total: {}",
            visited.separated_string()
        )?;
        writeln!(
            f,
            "Reached duplicates total: {}",
            duplicates.separated_string()
        )?;
        writeln!(f, "Depth / created / visited:")?;
        for i in 0..self.created_states.len() {
            let visited = if i < self.visited_states.len() {
                self.visited_states[i]
            } else {
                0
            };
            writeln!(
                f,
                "{}: {} / {}",
                i,
                self.created_states[i].separated_string(),
                visited.separated_string()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_by_depth() {
        let mut stats = Stats::new();
        assert!(stats.add_created(0));
        assert!(!stats.add_created(0));
        assert!(stats.add_created(2)); // depth 1 skipped
        assert_eq!(stats.total_created(), 3);

        stats.add_unique_visited(0);
        stats.add_reached_duplicate(1);
        assert_eq!(stats.total_unique_visited(), 1);
        assert_eq!(stats.total_reached_duplicates(), 1);
    }
}
