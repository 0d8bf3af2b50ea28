//! Last-played track memory
//!
//! Remembers the most recent track started by an explicit user selection
//! so a bare play command can resume something sensible. Control commands
//! and automatic recovery never write here.

use ripple_core::Track;

/// Memory of the last explicitly selected track
#[derive(Debug, Default)]
pub struct SelectionMemory {
    last: Option<Track>,
}

impl SelectionMemory {
    /// Create an empty memory
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a track as the latest explicit selection
    pub fn remember(&mut self, track: Track) {
        self.last = Some(track);
    }

    /// The last explicitly selected track, if any
    #[must_use]
    pub fn recall(&self) -> Option<&Track> {
        self.last.as_ref()
    }

    /// Clear the memory
    pub fn forget(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track::new(id, format!("/music/{id}.mp3"))
    }

    #[test]
    fn remembers_latest_selection() {
        let mut memory = SelectionMemory::new();
        assert!(memory.recall().is_none());

        memory.remember(track("a"));
        memory.remember(track("b"));
        assert_eq!(memory.recall().map(|t| t.id.as_str()), Some("b"));
    }

    #[test]
    fn forget_clears() {
        let mut memory = SelectionMemory::new();
        memory.remember(track("a"));
        memory.forget();
        assert!(memory.recall().is_none());
    }
}
