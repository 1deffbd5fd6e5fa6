use crate::types::*;

/// Points for each investigator when the impostor is caught
const CATCH_POINTS: u32 = 1;
/// Points for the impostor on surviving the vote
const SURVIVE_POINTS: u32 = 2;

/// Add this cycle's points to the cumulative scores.
/// If the impostor already left, a survival awards nothing.
pub fn apply_scores(players: &mut [Participant], impostor_id: &str, impostor_caught: bool) {
    for player in players.iter_mut() {
        let is_impostor = player.id == impostor_id;
        match (impostor_caught, is_impostor) {
            (true, false) => player.score += CATCH_POINTS,
            (false, true) => player.score += SURVIVE_POINTS,
            _ => {}
        }
    }
}

/// Scoreboard in roster order
pub fn score_entries(players: &[Participant]) -> Vec<ScoreEntry> {
    players
        .iter()
        .map(|p| ScoreEntry {
            name: p.name.clone(),
            score: p.score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Participant> {
        ["a", "b", "c"]
            .iter()
            .map(|id| Participant::new(id.to_string(), id.to_uppercase()))
            .collect()
    }

    #[test]
    fn test_caught_rewards_investigators() {
        let mut players = roster();
        apply_scores(&mut players, "b", true);

        let scores: Vec<u32> = players.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![1, 0, 1]);
    }

    #[test]
    fn test_survival_rewards_impostor() {
        let mut players = roster();
        apply_scores(&mut players, "b", false);

        let scores: Vec<u32> = players.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![0, 2, 0]);
    }

    #[test]
    fn test_scores_accumulate() {
        let mut players = roster();
        apply_scores(&mut players, "b", false);
        apply_scores(&mut players, "a", true);

        let scores: Vec<u32> = players.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![0, 3, 1]);
    }

    #[test]
    fn test_departed_impostor_survival_awards_nobody() {
        let mut players = roster();
        apply_scores(&mut players, "gone", false);
        assert!(players.iter().all(|p| p.score == 0));
    }

    #[test]
    fn test_score_entries_follow_roster_order() {
        let mut players = roster();
        players[2].score = 5;

        let entries = score_entries(&players);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "A");
        assert_eq!(
            entries[2],
            ScoreEntry {
                name: "C".to_string(),
                score: 5
            }
        );
    }
}
