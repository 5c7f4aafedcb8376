//! Candidate ranking for project staffing
//!
//! Two rankings are offered. [`CandidateRanker::match_pilots_to_project`]
//! scores available pilots on skill coverage and location. The urgent
//! variant additionally pairs each pilot with an available drone at the
//! pilot's base, because an urgent reassignment is useless without one.

use serde::{Deserialize, Serialize};
use skycrew_core::RankingPolicy;
use skycrew_roster::{Drone, Mission, Pilot, RosterSource};
use tracing::debug;

use crate::error::{AssignmentError, Result};

/// A pilot scored against a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotMatch {
    pub pilot_id: String,
    pub name: String,
    pub skills: String,
    pub location: String,
    pub score: u32,
}

/// A pilot and drone pairing proposed for an urgent project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgentCandidate {
    pub pilot_id: String,
    pub pilot_name: String,
    pub drone_id: String,
    /// Number of required skills the pilot holds
    pub skill_match_score: u32,
    pub location_match: bool,
    pub total_score: u32,
}

/// Best urgent pairings for one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgentCandidates {
    pub project_id: String,
    pub candidates: Vec<UrgentCandidate>,
}

/// Score available pilots against a mission.
///
/// Pilots scoring zero are dropped. The sort is stable so equal scores keep
/// roster order.
pub fn rank_pilots(mission: &Mission, pilots: &[Pilot], policy: &RankingPolicy) -> Vec<PilotMatch> {
    let mut matches: Vec<PilotMatch> = pilots
        .iter()
        .filter(|pilot| pilot.is_available())
        .filter_map(|pilot| {
            let mut score: u32 = 0;
            if mission.required_skills.any_held_by(&pilot.skills) {
                score = score.saturating_add(policy.skill_match_points);
            }
            if pilot.location == mission.location {
                score = score.saturating_add(policy.location_match_points);
            }

            (score > 0).then(|| PilotMatch {
                pilot_id: pilot.pilot_id.clone(),
                name: pilot.name.clone(),
                skills: pilot.skills.to_string(),
                location: pilot.location.clone(),
                score,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

/// Pair available pilots with co-located available drones and keep the best.
///
/// A pilot with no available drone at their base is never proposed. When
/// several drones qualify the first in roster order is used.
pub fn rank_urgent(
    mission: &Mission,
    pilots: &[Pilot],
    drones: &[Drone],
    policy: &RankingPolicy,
) -> Vec<UrgentCandidate> {
    let mut candidates: Vec<UrgentCandidate> = pilots
        .iter()
        .filter(|pilot| pilot.is_available())
        .filter_map(|pilot| {
            let drone = drones
                .iter()
                .find(|d| d.is_available() && d.location == pilot.location)?;

            let skill_match_score =
                u32::try_from(mission.required_skills.count_held_by(&pilot.skills)).unwrap_or(u32::MAX);
            let location_match = pilot.location == mission.location;
            let mut total_score = skill_match_score.saturating_mul(policy.urgent_skill_weight);
            if location_match {
                total_score = total_score.saturating_add(policy.urgent_location_bonus);
            }

            Some(UrgentCandidate {
                pilot_id: pilot.pilot_id.clone(),
                pilot_name: pilot.name.clone(),
                drone_id: drone.drone_id.clone(),
                skill_match_score,
                location_match,
                total_score,
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    candidates.truncate(policy.urgent_candidate_limit);
    candidates
}

/// Ranks roster pilots for a project
#[derive(Debug)]
pub struct CandidateRanker<S> {
    source: S,
    policy: RankingPolicy,
}

impl<S: RosterSource> CandidateRanker<S> {
    /// Create a ranker with the default weights
    pub fn new(source: S) -> Self {
        Self::with_policy(source, RankingPolicy::default())
    }

    pub fn with_policy(source: S, policy: RankingPolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> &RankingPolicy {
        &self.policy
    }

    /// Available pilots with a non-zero match score, best first
    pub fn match_pilots_to_project(&self, project_id: &str) -> Result<Vec<PilotMatch>> {
        let mission = self.mission(project_id)?;
        let pilots = self.source.pilots()?;

        let matches = rank_pilots(&mission, &pilots, &self.policy);
        debug!(project_id, candidates = matches.len(), "Ranked pilots");
        Ok(matches)
    }

    /// Top pilot and drone pairings for an urgent reassignment
    pub fn find_urgent_reassignment_candidates(&self, project_id: &str) -> Result<UrgentCandidates> {
        let mission = self.mission(project_id)?;
        let pilots = self.source.pilots()?;
        let drones = self.source.drones()?;

        let candidates = rank_urgent(&mission, &pilots, &drones, &self.policy);
        debug!(project_id, candidates = candidates.len(), "Ranked urgent candidates");
        Ok(UrgentCandidates {
            project_id: project_id.to_string(),
            candidates,
        })
    }

    fn mission(&self, project_id: &str) -> Result<Mission> {
        self.source
            .missions()?
            .into_iter()
            .find(|m| m.project_id == project_id)
            .ok_or_else(|| AssignmentError::ProjectNotFound(project_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use skycrew_roster::InMemoryRoster;

    fn mission() -> Mission {
        Mission::new("PRJ001", "Acme", "Bangalore", "2024-01-01", "2024-01-10")
            .with_required_skills("Mapping,Inspection")
    }

    fn policy() -> RankingPolicy {
        RankingPolicy::default()
    }

    #[test]
    fn test_skill_and_location_score() {
        let pilots = vec![Pilot::new("P001", "Arjun", "Bangalore").with_skills("Mapping,Survey")];

        let matches = rank_pilots(&mission(), &pilots, &policy());

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].score, 15);
        assert_eq!(matches[0].skills, "Mapping, Survey");
    }

    #[test]
    fn test_zero_score_and_unavailable_excluded() {
        let pilots = vec![
            Pilot::new("P001", "Arjun", "Pune").with_skills("Survey"),
            Pilot::new("P002", "Neha", "Bangalore")
                .with_skills("Mapping")
                .on_leave_until("2024-02-01"),
            Pilot::new("P003", "Ravi", "Pune").with_skills("Inspection"),
        ];

        let matches = rank_pilots(&mission(), &pilots, &policy());

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].pilot_id, "P003");
        assert_eq!(matches[0].score, 10);
    }

    #[test]
    fn test_location_only_scores_five() {
        let pilots = vec![Pilot::new("P001", "Arjun", "Bangalore").with_skills("Survey")];
        assert_eq!(rank_pilots(&mission(), &pilots, &policy())[0].score, 5);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let pilots = vec![
            Pilot::new("P001", "A", "Pune").with_skills("Mapping"),
            Pilot::new("P002", "B", "Bangalore").with_skills("Mapping"),
            Pilot::new("P003", "C", "Delhi").with_skills("Inspection"),
        ];

        let ids: Vec<_> = rank_pilots(&mission(), &pilots, &policy())
            .into_iter()
            .map(|m| m.pilot_id)
            .collect();
        assert_eq!(ids, vec!["P002", "P001", "P003"]);
    }

    #[test]
    fn test_urgent_requires_colocated_drone() {
        let pilots = vec![
            Pilot::new("P001", "Arjun", "Bangalore").with_skills("Mapping,Inspection"),
            Pilot::new("P002", "Neha", "Pune").with_skills("Mapping"),
        ];
        let drones = vec![
            Drone::new("D001", "M300", "Bangalore").in_maintenance(),
            Drone::new("D002", "Mavic", "Bangalore"),
            Drone::new("D003", "Mavic", "Bangalore"),
        ];

        let candidates = rank_urgent(&mission(), &pilots, &drones, &policy());

        assert_eq!(candidates.len(), 1);
        let top = &candidates[0];
        assert_eq!(top.pilot_id, "P001");
        assert_eq!(top.drone_id, "D002");
        assert_eq!(top.skill_match_score, 2);
        assert!(top.location_match);
        assert_eq!(top.total_score, 9);
    }

    #[test]
    fn test_urgent_zero_score_still_listed() {
        let pilots = vec![Pilot::new("P001", "Arjun", "Pune")];
        let drones = vec![Drone::new("D001", "M300", "Pune")];

        let candidates = rank_urgent(&mission(), &pilots, &drones, &policy());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].total_score, 0);
    }

    #[test]
    fn test_custom_policy_weights() {
        let policy = RankingPolicy {
            skill_match_points: 3,
            location_match_points: 1,
            ..RankingPolicy::default()
        };
        let pilots = vec![Pilot::new("P001", "Arjun", "Bangalore").with_skills("Mapping")];
        assert_eq!(rank_pilots(&mission(), &pilots, &policy)[0].score, 4);
    }

    #[test]
    fn test_huge_weights_saturate() {
        let policy = RankingPolicy {
            skill_match_points: u32::MAX,
            location_match_points: u32::MAX,
            urgent_skill_weight: u32::MAX,
            urgent_location_bonus: u32::MAX,
            ..RankingPolicy::default()
        };
        let pilots = vec![
            Pilot::new("P001", "Arjun", "Bangalore").with_skills("Mapping,Inspection"),
            Pilot::new("P002", "Neha", "Bangalore").with_skills("Mapping"),
        ];
        let drones = vec![Drone::new("D001", "M300", "Bangalore")];

        let matches = rank_pilots(&mission(), &pilots, &policy);
        assert!(matches.iter().all(|m| m.score == u32::MAX));

        let candidates = rank_urgent(&mission(), &pilots, &drones, &policy);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].pilot_id, "P001");
        assert_eq!(candidates[0].skill_match_score, 2);
        assert!(candidates.iter().all(|c| c.total_score == u32::MAX));
    }

    #[test]
    fn test_ranker_project_not_found() {
        let ranker = CandidateRanker::new(InMemoryRoster::new(vec![], vec![], vec![mission()]));

        let err = ranker.match_pilots_to_project("PRJ404").unwrap_err();
        assert!(matches!(err, AssignmentError::ProjectNotFound(ref id) if id == "PRJ404"));
        assert_eq!(err.to_string(), "Project PRJ404 not found");

        assert!(ranker.find_urgent_reassignment_candidates("PRJ404").is_err());
    }

    #[test]
    fn test_ranker_reads_source() {
        let roster = InMemoryRoster::new(
            vec![Pilot::new("P001", "Arjun", "Bangalore").with_skills("Mapping,Survey")],
            vec![Drone::new("D001", "M300", "Bangalore")],
            vec![mission()],
        );
        let ranker = CandidateRanker::new(roster);

        let matches = ranker.match_pilots_to_project("PRJ001").unwrap();
        assert_eq!(matches[0].score, 15);

        let urgent = ranker.find_urgent_reassignment_candidates("PRJ001").unwrap();
        assert_eq!(urgent.project_id, "PRJ001");
        assert_eq!(urgent.candidates[0].total_score, 7);
    }

    fn arb_pilots() -> impl Strategy<Value = Vec<Pilot>> {
        let pilot = (
            prop::sample::select(vec!["Bangalore", "Pune", "Mumbai"]),
            prop::sample::subsequence(vec!["Mapping", "Inspection", "Survey", "Thermal"], 0..4),
            any::<bool>(),
        );
        prop::collection::vec(pilot, 0..20).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (location, skills, available))| {
                    let pilot = Pilot::new(format!("P{:03}", i), "Pilot", location)
                        .with_skills(&skills.join(","));
                    if available {
                        pilot
                    } else {
                        pilot.on_leave_until("2024-03-01")
                    }
                })
                .collect()
        })
    }

    fn arb_drones() -> impl Strategy<Value = Vec<Drone>> {
        let drone = (prop::sample::select(vec!["Bangalore", "Pune", "Mumbai"]), any::<bool>());
        prop::collection::vec(drone, 0..10).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (location, available))| {
                    let drone = Drone::new(format!("D{:03}", i), "M300", location);
                    if available {
                        drone
                    } else {
                        drone.in_maintenance()
                    }
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_matches_sorted_and_nonzero(pilots in arb_pilots()) {
            let matches = rank_pilots(&mission(), &pilots, &policy());

            prop_assert!(matches.iter().all(|m| m.score > 0));
            prop_assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));

            // equal scores stay in roster order
            for w in matches.windows(2) {
                if w[0].score == w[1].score {
                    let first = pilots.iter().position(|p| p.pilot_id == w[0].pilot_id);
                    let second = pilots.iter().position(|p| p.pilot_id == w[1].pilot_id);
                    prop_assert!(first < second);
                }
            }
        }

        #[test]
        fn test_urgent_bounded_and_paired(
            pilots in arb_pilots(),
            drones in arb_drones(),
        ) {
            let candidates = rank_urgent(&mission(), &pilots, &drones, &policy());

            prop_assert!(candidates.len() <= 5);
            prop_assert!(candidates.windows(2).all(|w| w[0].total_score >= w[1].total_score));
            for candidate in &candidates {
                let pilot = pilots.iter().find(|p| p.pilot_id == candidate.pilot_id).unwrap();
                prop_assert!(pilot.is_available());
                let paired = drones
                    .iter()
                    .find(|d| d.is_available() && d.location == pilot.location)
                    .map(|d| d.drone_id.clone());
                prop_assert_eq!(paired, Some(candidate.drone_id.clone()));
            }
        }
    }
}
