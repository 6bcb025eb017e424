//! Round-robin schedule generation (circle method).

use crate::models::{Fixture, LeagueError, Matchday, PlayerId, RoundMode, SeasonSettings};
use chrono::{Duration, NaiveDate};

/// One pairing in a round: `home` plays `away`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pairing<T> {
    pub home: T,
    pub away: T,
}

/// One round of a round-robin: the pairings plus whoever drew the bye.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Round<T> {
    pub pairings: Vec<Pairing<T>>,
    pub bye: Option<T>,
}

/// Generate a complete round-robin for `participants` using the circle method.
///
/// 1. Odd count: pad with an empty (bye) slot so the count `n` is even.
/// 2. Each round pairs slot `i` (home) with slot `n - 1 - i` (away).
/// 3. Slot 0 stays fixed; slots `1..n` rotate one position to the right between rounds.
/// 4. After `n - 1` rounds every participant has met every other exactly once.
///
/// `RoundMode::Double` appends the same rounds again with home and away swapped.
/// Fewer than two participants produce no rounds.
pub fn round_robin<T: Clone>(participants: &[T], mode: RoundMode) -> Vec<Round<T>> {
    if participants.len() < 2 {
        return Vec::new();
    }

    let mut slots: Vec<Option<T>> = participants.iter().cloned().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let n = slots.len();

    let mut rounds = Vec::with_capacity(n - 1);
    for _ in 0..n - 1 {
        let mut pairings = Vec::with_capacity(n / 2);
        let mut bye = None;
        for i in 0..n / 2 {
            match (&slots[i], &slots[n - 1 - i]) {
                (Some(home), Some(away)) => pairings.push(Pairing {
                    home: home.clone(),
                    away: away.clone(),
                }),
                (Some(p), None) | (None, Some(p)) => bye = Some(p.clone()),
                (None, None) => {}
            }
        }
        rounds.push(Round { pairings, bye });
        slots[1..].rotate_right(1);
    }

    if mode == RoundMode::Double {
        let mirrored: Vec<Round<T>> = rounds
            .iter()
            .map(|r| Round {
                pairings: r
                    .pairings
                    .iter()
                    .map(|p| Pairing {
                        home: p.away.clone(),
                        away: p.home.clone(),
                    })
                    .collect(),
                bye: r.bye.clone(),
            })
            .collect();
        rounds.extend(mirrored);
    }

    rounds
}

/// Date of the matchday at 0-based `idx`, or None when it falls outside the calendar.
fn matchday_date(start: NaiveDate, days_between: u32, idx: usize) -> Option<NaiveDate> {
    let days = i64::from(days_between).checked_mul(i64::try_from(idx).ok()?)?;
    start.checked_add_signed(Duration::try_days(days)?)
}

/// Turn the round-robin for `participants` into numbered, dated matchdays with fresh fixtures.
///
/// Fails with `DateOutOfRange` when the start date and spacing push a matchday past the
/// representable calendar.
pub fn build_matchdays(
    participants: &[PlayerId],
    settings: &SeasonSettings,
) -> Result<Vec<Matchday>, LeagueError> {
    round_robin(participants, settings.round_mode)
        .into_iter()
        .enumerate()
        .map(|(idx, round)| -> Result<Matchday, LeagueError> {
            let number = idx as u32 + 1;
            let date = match settings.start_date {
                Some(start) => Some(
                    matchday_date(start, settings.days_between_matchdays, idx)
                        .ok_or(LeagueError::DateOutOfRange { matchday: number })?,
                ),
                None => None,
            };
            let fixtures = round
                .pairings
                .into_iter()
                .map(|p| Fixture::new(number, p.home, p.away))
                .collect();
            Ok(Matchday {
                number,
                date,
                fixtures,
                bye: round.bye,
            })
        })
        .collect()
}
