//! Two-phase staging of project card visibility.
//!
//! A change to the filter or sort first marks every card as leaving and
//! parks it in a frozen order slot, so the exit animation can play. After the
//! leave delay the caller settles the transition: cards outside the new set
//! are hidden, the rest are revealed in their new positions with a staggered
//! entering delay. Transitions are never cancelled; whichever settle runs last
//! determines the stage.

use std::time::Duration;

use crate::constants::{DEFAULT_LEAVE_MS, DEFAULT_STAGGER_MS, FROZEN_ORDER};
use crate::state::ViewMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
    pub leave: Duration,
    pub stagger: Duration,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            leave: Duration::from_millis(DEFAULT_LEAVE_MS),
            stagger: Duration::from_millis(DEFAULT_STAGGER_MS),
        }
    }
}

/// Presentation state of one project card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub displayed: bool,
    pub leaving: bool,
    pub order: u32,
    /// Delay before the entering animation starts once settled.
    pub enter_delay: Duration,
}

/// A scheduled settle. Produced by the leaving phase, consumed by
/// [`Stage::settle`] after [`Transition::delay`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    generation: u64,
    visible: Vec<usize>,
    timing: TransitionTiming,
}

impl Transition {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn delay(&self) -> Duration {
        self.timing.leave
    }

    /// Record indices that will be shown, in display order.
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }
}

/// The rendered project container: one card per record, the empty
/// placeholder and the container layout.
#[derive(Debug, Clone)]
pub struct Stage {
    cards: Vec<CardView>,
    empty_visible: bool,
    layout: ViewMode,
    next_generation: u64,
    settled_generation: u64,
}

impl Stage {
    /// A stage with every card shown in catalog order.
    pub fn new(card_count: usize, layout: ViewMode) -> Self {
        let cards = (0..card_count)
            .map(|i| CardView {
                displayed: true,
                leaving: false,
                order: i as u32,
                enter_delay: Duration::ZERO,
            })
            .collect();
        Self {
            cards,
            empty_visible: card_count == 0,
            layout,
            next_generation: 1,
            settled_generation: 0,
        }
    }

    /// Phase one: every card starts leaving and is parked at the frozen slot.
    pub fn begin(&mut self, visible: Vec<usize>, timing: TransitionTiming) -> Transition {
        for card in &mut self.cards {
            card.leaving = true;
            card.order = FROZEN_ORDER;
        }
        let generation = self.next_generation;
        self.next_generation += 1;
        tracing::debug!(
            "transition {generation}: {} cards leaving, {} to reveal",
            self.cards.len(),
            visible.len()
        );
        Transition {
            generation,
            visible,
            timing,
        }
    }

    /// Phase two: hide cards outside the transition's set and reveal the rest
    /// in order with staggered entering delays.
    pub fn settle(&mut self, transition: &Transition) {
        self.place(&transition.visible, transition.timing.stagger);
        self.settled_generation = transition.generation;
        tracing::debug!(
            "transition {} settled: {} visible",
            transition.generation,
            transition.visible.len()
        );
    }

    /// Apply a final layout immediately, without a leaving phase.
    pub fn snap(&mut self, visible: &[usize]) {
        self.place(visible, Duration::ZERO);
    }

    fn place(&mut self, visible: &[usize], stagger: Duration) {
        for card in &mut self.cards {
            card.displayed = false;
        }
        for (position, &index) in visible.iter().enumerate() {
            if let Some(card) = self.cards.get_mut(index) {
                card.displayed = true;
                card.leaving = false;
                card.order = position as u32;
                card.enter_delay = stagger * position as u32;
            }
        }
        self.empty_visible = visible.is_empty();
    }

    /// Swap the container layout. Returns false when already in `layout`.
    pub fn set_layout(&mut self, layout: ViewMode) -> bool {
        if self.layout == layout {
            return false;
        }
        self.layout = layout;
        true
    }

    pub fn layout(&self) -> ViewMode {
        self.layout
    }

    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    pub fn empty_visible(&self) -> bool {
        self.empty_visible
    }

    /// Generation of the last settled transition (0 before any).
    pub fn settled_generation(&self) -> u64 {
        self.settled_generation
    }

    pub fn is_settled(&self) -> bool {
        !self.cards.iter().any(|c| c.leaving && c.displayed)
    }

    /// Indices of displayed cards, ordered by their order slot.
    pub fn displayed_in_order(&self) -> Vec<usize> {
        let mut shown: Vec<usize> = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.displayed)
            .map(|(i, _)| i)
            .collect();
        shown.sort_by_key(|&i| self.cards[i].order);
        shown
    }
}
