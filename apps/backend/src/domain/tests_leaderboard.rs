use time::macros::datetime;

use crate::domain::{rank_players, Player, SubmissionStatus};

fn player(id: i64, attempts: i32, updated_at: time::OffsetDateTime) -> Player {
    Player {
        id,
        name: format!("player-{id}"),
        email: format!("p{id}@example.test"),
        attempts,
        created_at: updated_at,
        updated_at,
    }
}

#[test]
fn classify_submission() {
    assert_eq!(SubmissionStatus::classify(None, 12), SubmissionStatus::Created);
    assert_eq!(SubmissionStatus::classify(Some(10), 5), SubmissionStatus::Improved);
    assert_eq!(SubmissionStatus::classify(Some(10), 10), SubmissionStatus::Unchanged);
    assert_eq!(SubmissionStatus::classify(Some(10), 15), SubmissionStatus::Unchanged);
}

#[test]
fn ranks_by_attempts_then_time_then_id() {
    let early = datetime!(2025-01-01 10:00 UTC);
    let late = datetime!(2025-01-02 10:00 UTC);

    let ranked = rank_players(vec![
        player(1, 14, early),
        player(2, 9, late),
        player(3, 9, early),
        player(4, 9, early),
        player(5, 8, late),
    ]);

    let order: Vec<(usize, i64)> = ranked.iter().map(|(rank, p)| (*rank, p.id)).collect();
    assert_eq!(order, vec![(1, 5), (2, 3), (3, 4), (4, 2), (5, 1)]);
}

#[test]
fn empty_board_has_no_ranks() {
    assert!(rank_players(Vec::new()).is_empty());
}
