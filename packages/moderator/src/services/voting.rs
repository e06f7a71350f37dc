use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::game::Game;
use crate::models::player::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub voter: PlayerId,
    pub candidate: PlayerId,
}

impl Ballot {
    pub fn new(voter: impl Into<PlayerId>, candidate: impl Into<PlayerId>) -> Self {
        Self {
            voter: voter.into(),
            candidate: candidate.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOutcome {
    Leader(PlayerId),
    Tie(Vec<PlayerId>),
    NoVotes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub totals: BTreeMap<PlayerId, u32>,
    /// Voters whose ballot did not count.
    pub ignored: Vec<PlayerId>,
    pub outcome: VoteOutcome,
}

impl Game {
    /// Counts the day's ballots. Dead, banned or repeat voters are ignored,
    /// the mayor's ballot is weighted and the raven's target starts with a
    /// handicap.
    pub fn tally(&self, ballots: &[Ballot]) -> VoteTally {
        let mut totals: BTreeMap<PlayerId, u32> = BTreeMap::new();
        let mut ignored = Vec::new();
        let mut counted: Vec<&PlayerId> = Vec::new();

        for ballot in ballots {
            let voter = match self.player(&ballot.voter) {
                Some(voter) if voter.can_vote(self.turn) && !counted.contains(&voter.id()) => voter,
                _ => {
                    ignored.push(ballot.voter.clone());
                    continue;
                }
            };
            if !self.player(&ballot.candidate).is_some_and(|c| c.is_alive()) {
                ignored.push(ballot.voter.clone());
                continue;
            }

            counted.push(voter.id());
            let weight = if voter.mayor {
                self.rules.mayor_vote_weight
            } else {
                1
            };
            *totals.entry(ballot.candidate.clone()).or_insert(0) += weight;
        }

        if let Some(cursed) = self.cursed.as_ref() {
            if self.player(cursed).is_some_and(|p| p.is_alive()) {
                *totals.entry(cursed.clone()).or_insert(0) += self.rules.raven_curse_votes;
            }
        }

        if !ignored.is_empty() {
            tracing::debug!("{} ballot(s) ignored", ignored.len());
        }

        let top = totals.values().copied().max().unwrap_or(0);
        let leaders: Vec<PlayerId> = totals
            .iter()
            .filter(|(_, votes)| top > 0 && **votes == top)
            .map(|(id, _)| id.clone())
            .collect();
        let outcome = match leaders.len() {
            0 => VoteOutcome::NoVotes,
            1 => VoteOutcome::Leader(leaders[0].clone()),
            _ => VoteOutcome::Tie(leaders),
        };

        VoteTally {
            totals,
            ignored,
            outcome,
        }
    }
}
