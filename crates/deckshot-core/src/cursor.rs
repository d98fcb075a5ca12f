//! Slide cursor state machine
//!
//! Pure transition function with no I/O. The screenshot loop captures the
//! current slide, asks the deck where it stands, and feeds that answer to
//! [`step`]. The cursor says whether another slide remains.
//!
//! The captured count is the number of screenshots taken: for a deck whose
//! final slide sits at zero-based index `i`, that is `i + 1`.

/// What the deck reported after a capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeckProbe {
    /// The current slide is the last one
    pub is_last_slide: bool,
    /// The current slide still has an unrevealed fragment
    pub has_next_fragment: bool,
}

impl DeckProbe {
    /// Nothing is left to reveal
    pub fn is_exhausted(&self) -> bool {
        self.is_last_slide && !self.has_next_fragment
    }
}

/// Cursor position in the capture loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// The slide at `index` is next to be captured
    HasMore { index: usize },
    /// Every slide was captured
    Exhausted { captured: usize },
}

impl CursorState {
    pub fn start() -> Self {
        CursorState::HasMore { index: 0 }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, CursorState::Exhausted { .. })
    }
}

/// Advance the cursor after capturing the current slide
///
/// `Exhausted` absorbs further probes.
pub fn step(state: CursorState, probe: DeckProbe) -> CursorState {
    match state {
        CursorState::HasMore { index } if probe.is_exhausted() => {
            CursorState::Exhausted { captured: index + 1 }
        }
        CursorState::HasMore { index } => CursorState::HasMore { index: index + 1 },
        exhausted @ CursorState::Exhausted { .. } => exhausted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MORE: DeckProbe = DeckProbe {
        is_last_slide: false,
        has_next_fragment: false,
    };
    const LAST: DeckProbe = DeckProbe {
        is_last_slide: true,
        has_next_fragment: false,
    };
    const LAST_WITH_FRAGMENT: DeckProbe = DeckProbe {
        is_last_slide: true,
        has_next_fragment: true,
    };

    #[test]
    fn test_single_slide_deck() {
        assert_eq!(
            step(CursorState::start(), LAST),
            CursorState::Exhausted { captured: 1 }
        );
    }

    #[test]
    fn test_index_increments_by_one_until_last() {
        let mut state = CursorState::start();
        let probes = [MORE, MORE, LAST];
        let mut seen = Vec::new();

        for probe in probes {
            if let CursorState::HasMore { index } = state {
                seen.push(index);
            }
            state = step(state, probe);
        }

        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(state, CursorState::Exhausted { captured: 3 });
    }

    #[test]
    fn test_pending_fragment_on_last_slide_keeps_going() {
        let state = step(CursorState::HasMore { index: 4 }, LAST_WITH_FRAGMENT);
        assert_eq!(state, CursorState::HasMore { index: 5 });

        let state = step(state, LAST);
        assert_eq!(state, CursorState::Exhausted { captured: 6 });
    }

    #[test]
    fn test_fragment_on_earlier_slide_is_not_exhausted() {
        let probe = DeckProbe {
            is_last_slide: false,
            has_next_fragment: true,
        };
        assert!(!probe.is_exhausted());
        assert!(!step(CursorState::start(), probe).is_exhausted());
    }

    #[test]
    fn test_exhausted_is_absorbing() {
        let done = CursorState::Exhausted { captured: 2 };
        assert_eq!(step(done, MORE), done);
        assert_eq!(step(done, LAST), done);
    }
}
