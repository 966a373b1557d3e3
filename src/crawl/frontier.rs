// src/crawl/frontier.rs
// =============================================================================
// The crawl frontier: a FIFO queue of pages still to visit, plus the set of
// URLs we've already taken off it.
//
// Breadth-first comes for free from the FIFO: every page found at depth d is
// pushed behind everything already waiting, so all of depth d is done before
// any page it discovered at depth d + 1.
//
// Dedup happens when a target is popped, not when it is pushed. The same URL
// can sit in the queue twice (two pages linked to it before either copy was
// processed); the second copy is simply skipped.
// =============================================================================

use std::collections::{HashSet, VecDeque};

// One page waiting in the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    /// Normalized URL
    pub url: String,
    /// Link hops from the start URL (the start URL itself is 0)
    pub depth: usize,
}

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<CrawlTarget>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, url: String, depth: usize) {
        self.queue.push_back(CrawlTarget { url, depth });
    }

    // Pops the next target worth processing and marks it visited.
    //
    // Targets that were already visited, or that sit deeper than max_depth,
    // are dropped silently along the way. The number dropped is returned with
    // the target so the caller can report it.
    pub fn next_target(&mut self, max_depth: usize) -> (Option<CrawlTarget>, usize) {
        let mut skipped = 0;

        while let Some(target) = self.queue.pop_front() {
            if target.depth > max_depth || self.visited.contains(&target.url) {
                skipped += 1;
                continue;
            }

            // Marked before fetching so nothing discovered while this page is
            // in flight can schedule it again
            self.visited.insert(target.url.clone());
            return (Some(target), skipped);
        }

        (None, skipped)
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why check "visited" on pop instead of on push?
//    - A page is only known to be handled once it has been taken off the queue
//    - Checking on push would need a second set for "queued but not visited"
//    - A few duplicate queue entries are cheap; they're dropped in next_target()
//
// 2. Why return (Option<CrawlTarget>, usize)?
//    - The Option says whether there's anything left to crawl
//    - The usize reports how many entries were thrown away on the way, so the
//      engine can count them without the frontier knowing about summaries
//
// 3. Why store URLs as String and not Url?
//    - Every URL here is already normalized, so the string IS the identity
//    - HashSet<String> lookups with &str work directly (String: Borrow<str>)
// -----------------------------------------------------------------------------
