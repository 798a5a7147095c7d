//! State machine tests for a single game session.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::test_prelude::{self, catalog, matching_pairs, two_symbol_session};
use crate::domain::{
    new_deck, CardView, Deck, FlipOutcome, GameSession, IgnoredFlip, Resolution, Symbol,
};
use crate::errors::domain::{DomainError, ValidationKind};

fn ticket_for(outcome: FlipOutcome) -> crate::domain::ResolutionTicket {
    match outcome {
        FlipOutcome::PairFlipped { ticket } => ticket,
        other => panic!("expected a pair, got {other:?}"),
    }
}

#[test]
fn two_symbol_game_end_to_end() {
    let mut session = two_symbol_session();

    assert_eq!(
        session.flip(0).unwrap(),
        FlipOutcome::Flipped { started_clock: true }
    );
    let ticket = ticket_for(session.flip(2).unwrap());
    assert_eq!(
        session.resolve(ticket),
        Resolution::Matched {
            pair: [0, 2],
            complete: false
        }
    );
    assert_eq!(session.solved().iter().copied().collect::<Vec<_>>(), vec![0, 2]);
    assert_eq!(session.attempts(), 1);
    assert!(session.flipped().is_empty());

    assert_eq!(
        session.flip(1).unwrap(),
        FlipOutcome::Flipped { started_clock: false }
    );
    let ticket = ticket_for(session.flip(3).unwrap());
    assert_eq!(
        session.resolve(ticket),
        Resolution::Matched {
            pair: [1, 3],
            complete: true
        }
    );
    assert_eq!(session.solved().len(), 4);
    assert_eq!(session.attempts(), 2);
    assert!(session.is_complete());
}

#[test]
fn mismatch_turns_both_back_and_counts_an_attempt() {
    let mut session = two_symbol_session();
    session.flip(0).unwrap();
    let ticket = ticket_for(session.flip(1).unwrap());

    assert_eq!(session.resolve(ticket), Resolution::Mismatched { pair: [0, 1] });
    assert!(session.solved().is_empty());
    assert!(session.flipped().is_empty());
    assert_eq!(session.attempts(), 1);
}

#[test]
fn third_flip_while_pair_pending_is_ignored() {
    let mut session = two_symbol_session();
    session.flip(0).unwrap();
    session.flip(1).unwrap();

    assert_eq!(
        session.flip(2).unwrap(),
        FlipOutcome::Ignored {
            reason: IgnoredFlip::PairPending
        }
    );
    assert_eq!(session.flipped(), &[0, 1]);
}

#[test]
fn reflipping_or_flipping_solved_is_ignored() {
    let mut session = two_symbol_session();
    session.flip(0).unwrap();
    assert_eq!(
        session.flip(0).unwrap(),
        FlipOutcome::Ignored {
            reason: IgnoredFlip::AlreadyFlipped
        }
    );
    assert_eq!(session.flipped(), &[0]);

    let ticket = ticket_for(session.flip(2).unwrap());
    session.resolve(ticket);
    assert_eq!(
        session.flip(2).unwrap(),
        FlipOutcome::Ignored {
            reason: IgnoredFlip::AlreadySolved
        }
    );
    assert!(session.flipped().is_empty());
}

#[test]
fn flips_after_completion_are_ignored() {
    let mut session = two_symbol_session();
    for pair in [[0, 2], [1, 3]] {
        session.flip(pair[0]).unwrap();
        let ticket = ticket_for(session.flip(pair[1]).unwrap());
        session.resolve(ticket);
    }
    assert!(session.is_complete());
    assert_eq!(
        session.flip(0).unwrap(),
        FlipOutcome::Ignored {
            reason: IgnoredFlip::Complete
        }
    );
}

#[test]
fn out_of_range_position_is_a_validation_error() {
    let mut session = two_symbol_session();
    let err = session.flip(4).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidPosition, _)
    ));
    assert!(!session.started());
}

#[test]
fn clock_runs_only_between_first_flip_and_completion() {
    let mut session = two_symbol_session();
    let generation = session.generation();

    assert!(!session.tick(generation), "clock must not run before the first flip");
    assert_eq!(session.elapsed_secs(), 0);

    session.flip(0).unwrap();
    assert!(session.tick(generation));
    assert!(session.tick(generation));
    assert_eq!(session.elapsed_secs(), 2);

    let ticket = ticket_for(session.flip(2).unwrap());
    session.resolve(ticket);
    session.flip(1).unwrap();
    let ticket = ticket_for(session.flip(3).unwrap());
    session.resolve(ticket);

    assert!(!session.tick(generation));
    assert_eq!(session.elapsed_secs(), 2);
}

#[test]
fn reset_invalidates_outstanding_tickets_and_clock() {
    let mut session = two_symbol_session();
    let old_generation = session.generation();
    session.flip(0).unwrap();
    let ticket = ticket_for(session.flip(2).unwrap());
    session.tick(old_generation);

    let fresh = Deck::from_cards(vec![
        Symbol::Astronaut,
        Symbol::Alien,
        Symbol::Alien,
        Symbol::Astronaut,
    ])
    .unwrap();
    session.reset(fresh.clone());

    assert_eq!(session.generation(), old_generation + 1);
    assert_eq!(session.deck(), &fresh);
    assert_eq!(session.attempts(), 0);
    assert_eq!(session.elapsed_secs(), 0);
    assert!(!session.started());
    assert!(session.flipped().is_empty());
    assert!(session.solved().is_empty());

    assert_eq!(session.resolve(ticket), Resolution::Stale);
    assert_eq!(session.attempts(), 0);

    session.flip(0).unwrap();
    assert!(!session.tick(old_generation));
    assert!(session.tick(session.generation()));
}

#[test]
fn ticket_for_a_different_pair_is_stale() {
    let mut session = two_symbol_session();
    session.flip(0).unwrap();
    let ticket = ticket_for(session.flip(1).unwrap());
    session.resolve(ticket);

    // Same generation, but the pair has already been turned back.
    assert_eq!(session.resolve(ticket), Resolution::Stale);
    assert_eq!(session.attempts(), 1);
}

#[test]
fn view_shows_only_flipped_and_solved_faces() {
    let mut session = two_symbol_session();
    session.flip(1).unwrap();
    let view = session.view();

    assert_eq!(view.cards.len(), 4);
    assert_eq!(view.cards[0], CardView::Down);
    assert_eq!(
        view.cards[1],
        CardView::Up {
            symbol: Symbol::Astronaut,
            image: "/memory-cards/astronaut.jpg".to_string(),
            solved: false,
        }
    );
    assert!(view.started);
    assert!(!view.complete);
    assert_eq!(view.clock, "0:00");
}

#[test]
fn clock_formatting() {
    use crate::domain::session::format_clock;
    assert_eq!(format_clock(0), "0:00");
    assert_eq!(format_clock(9), "0:09");
    assert_eq!(format_clock(61), "1:01");
    assert_eq!(format_clock(3600), "60:00");
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Solving every pair in order completes the game in exactly catalog-size attempts,
    /// and the invariants hold after every step.
    #[test]
    fn prop_perfect_play_completes(catalog in catalog(), seed in any::<u64>()) {
        let deck = new_deck(&catalog, &mut ChaCha8Rng::seed_from_u64(seed));
        let pairs = matching_pairs(&deck);
        let mut session = GameSession::new(deck);

        for [a, b] in pairs {
            prop_assert!(!session.is_complete());
            session.flip(a).unwrap();
            let outcome = session.flip(b).unwrap();
            let FlipOutcome::PairFlipped { ticket } = outcome else {
                return Err(TestCaseError::fail(format!("expected pair, got {outcome:?}")));
            };
            let resolution = session.resolve(ticket);
            prop_assert!(
                matches!(resolution, Resolution::Matched { .. }),
                "expected match, got {:?}",
                resolution
            );
            prop_assert!(session.flipped().iter().all(|p| !session.solved().contains(p)));
        }

        prop_assert!(session.is_complete());
        prop_assert_eq!(session.attempts() as usize, catalog.len());
    }

    /// Arbitrary flip/resolve sequences never break |flipped| <= 2 or flipped ∩ solved = ∅.
    #[test]
    fn prop_invariants_hold_under_random_play(
        seed in any::<u64>(),
        moves in proptest::collection::vec((0usize..16, any::<bool>()), 0..64),
    ) {
        let deck = new_deck(&crate::domain::Catalog::default(), &mut ChaCha8Rng::seed_from_u64(seed));
        let mut session = GameSession::new(deck);
        let mut pending = None;

        for (position, resolve_now) in moves {
            if let FlipOutcome::PairFlipped { ticket } = session.flip(position).unwrap() {
                pending = Some(ticket);
            }
            if resolve_now {
                if let Some(ticket) = pending.take() {
                    session.resolve(ticket);
                }
            }
            prop_assert!(session.flipped().len() <= 2);
            prop_assert!(session.flipped().iter().all(|p| !session.solved().contains(p)));
            prop_assert_eq!(session.solved().len() % 2, 0);
        }
    }
}
