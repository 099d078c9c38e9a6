//! Swarm-level reward from agent-to-landmark proximity.

use crate::types::{Point3, distance};

/// Reciprocal of the mean distance between every agent and every landmark.
///
/// `smoothing` is added to both the distance sum and the pair count, so an
/// empty swarm or landmark set yields `1.0` instead of dividing by zero.
pub fn landmark_reward(agents: &[Point3], landmarks: &[Point3], smoothing: f64) -> f64 {
    let mut total = smoothing;
    let mut count = smoothing;
    for agent in agents {
        for landmark in landmarks {
            total += distance(agent, landmark);
            count += 1.0;
        }
    }
    count / total
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMOOTHING: f64 = 0.0001;

    #[test]
    fn test_reward_is_reciprocal_mean_distance() {
        let agents = [[0.0, 0.0, 0.0], [0.0, 0.0, 4.0]];
        let landmarks = [[3.0, 0.0, 0.0]];
        // distances 3 and 5, mean 4
        let reward = landmark_reward(&agents, &landmarks, SMOOTHING);
        let expected = (2.0 + SMOOTHING) / (8.0 + SMOOTHING);
        assert!((reward - expected).abs() < 1e-12);
        assert!((reward - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_reward_positive_and_finite_when_empty() {
        let reward = landmark_reward(&[], &[], SMOOTHING);
        assert_eq!(reward, 1.0);

        let reward = landmark_reward(&[[1.0, 1.0, 1.0]], &[[1.0, 1.0, 1.0]], SMOOTHING);
        assert!(reward.is_finite() && reward > 0.0);
    }

    #[test]
    fn test_reward_decreases_with_distance() {
        let landmarks = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let mut previous = f64::INFINITY;
        for offset in [1.0, 2.0, 5.0, 10.0, 100.0] {
            let agents = [[0.0, offset, 0.0], [1.0, offset, 0.0]];
            let reward = landmark_reward(&agents, &landmarks, SMOOTHING);
            assert!(reward > 0.0 && reward.is_finite());
            assert!(reward < previous, "reward must fall as the swarm drifts away");
            previous = reward;
        }
    }
}
