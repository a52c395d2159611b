// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adaptive medoid clustering of visibility fingerprints
//!
//! Starts from `k` randomly drawn medoids and repeats three phases:
//!
//! 1. **Assign** every fingerprint to its strictly nearest live medoid
//!    (ties go to the lower cluster id). Clusters left empty are retired.
//! 2. **Recenter** each cluster on the member with the smallest summed
//!    distance to the other members.
//! 3. **Merge** clusters whose medoids are closer than the merge threshold.
//!    Mutual nearest neighbours fold the higher id into the lower one; a
//!    one-sided nearest neighbour is folded into its target.
//!
//! The loop ends when a round merges nothing, when a single cluster is
//! left, or at the round cap. Cluster ids are never reused once retired.

use std::collections::BTreeMap;
use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHasher};
use serde::{Deserialize, Serialize};

use crate::distance::fingerprint_distance;
use crate::error::{Error, Result};
use crate::observer::{Checkpoint, PipelineObserver};
use crate::types::{ClusterId, Fingerprint};

/// A live cluster: indices into the fingerprint list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub medoid: usize,
    /// Ascending fingerprint indices
    pub members: Vec<usize>,
}

/// Live clusters plus the ids that have been retired
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterState {
    clusters: BTreeMap<ClusterId, Cluster>,
    /// `None` when the cluster emptied out, `Some(target)` when merged into `target`
    retired: FxHashMap<ClusterId, Option<ClusterId>>,
}

impl ClusterState {
    /// Number of live clusters
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn get(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(&id)
    }

    pub fn is_live(&self, id: ClusterId) -> bool {
        self.clusters.contains_key(&id)
    }

    pub fn is_retired(&self, id: ClusterId) -> bool {
        self.retired.contains_key(&id)
    }

    /// Live clusters in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (ClusterId, &Cluster)> + '_ {
        self.clusters.iter().map(|(&id, c)| (id, c))
    }

    pub fn ids(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.clusters.keys().copied()
    }

    /// Retired ids, ascending
    pub fn retired_ids(&self) -> Vec<ClusterId> {
        let mut ids: Vec<ClusterId> = self.retired.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Follow merges from `id` to the live cluster now holding its members
    ///
    /// `None` for ids that never existed or whose cluster emptied out.
    pub fn resolve(&self, mut id: ClusterId) -> Option<ClusterId> {
        loop {
            if self.clusters.contains_key(&id) {
                return Some(id);
            }
            id = (*self.retired.get(&id)?)?;
        }
    }

    /// Total member count across live clusters
    pub fn member_count(&self) -> usize {
        self.clusters.values().map(|c| c.members.len()).sum()
    }

    /// Cluster id per fingerprint index, `None` for indices in no cluster
    pub fn assignments(&self, count: usize) -> Vec<Option<ClusterId>> {
        let mut labels = vec![None; count];
        for (&id, cluster) in &self.clusters {
            for &m in &cluster.members {
                if let Some(slot) = labels.get_mut(m) {
                    *slot = Some(id);
                }
            }
        }
        labels
    }

    fn retire(&mut self, id: ClusterId, into: Option<ClusterId>) -> Option<Cluster> {
        let cluster = self.clusters.remove(&id)?;
        self.retired.insert(id, into);
        Some(cluster)
    }
}

/// Summary of one assign/recenter/merge round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: usize,
    /// Live clusters after the merge phase
    pub live: usize,
    pub merges: usize,
}

/// Why the clustering loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// A round performed no merge
    Converged { rounds: usize },
    /// Only one cluster is left
    SingleCluster { rounds: usize },
    /// The round cap was hit while merges were still happening
    IterationCap { rounds: usize },
}

impl Termination {
    pub fn rounds(&self) -> usize {
        match *self {
            Termination::Converged { rounds }
            | Termination::SingleCluster { rounds }
            | Termination::IterationCap { rounds } => rounds,
        }
    }

    /// False only when the round cap cut the loop short
    pub fn is_converged(&self) -> bool {
        !matches!(self, Termination::IterationCap { .. })
    }
}

/// Medoid clustering over a borrowed fingerprint list
pub struct ClusterEngine<'a> {
    fingerprints: &'a [Fingerprint],
    merge_threshold: f32,
    max_rounds: usize,
    state: ClusterState,
}

impl<'a> ClusterEngine<'a> {
    pub fn new(fingerprints: &'a [Fingerprint], merge_threshold: f32, max_rounds: usize) -> Self {
        Self {
            fingerprints,
            merge_threshold,
            max_rounds: max_rounds.max(1),
            state: ClusterState::default(),
        }
    }

    pub fn state(&self) -> &ClusterState {
        &self.state
    }

    pub fn into_state(self) -> ClusterState {
        self.state
    }

    fn distance(&self, a: usize, b: usize) -> Result<f32> {
        fingerprint_distance(&self.fingerprints[a], &self.fingerprints[b])
    }

    /// Draw `min(requested, n)` distinct medoids with a seeded RNG
    ///
    /// Cluster ids are `0..k` in draw order, each starting as a singleton.
    pub fn initialize(&mut self, requested: usize, seed: u64) {
        let n = self.fingerprints.len();
        let k = requested.min(n);
        let mut rng = StdRng::seed_from_u64(seed);

        self.state = ClusterState::default();
        for (id, medoid) in rand::seq::index::sample(&mut rng, n, k).into_iter().enumerate() {
            self.state.clusters.insert(
                id,
                Cluster {
                    medoid,
                    members: vec![medoid],
                },
            );
        }
    }

    /// Reassign every fingerprint to its nearest live medoid and retire
    /// clusters that end up empty
    pub fn assign(&mut self) -> Result<()> {
        let medoids: Vec<(ClusterId, usize)> =
            self.state.iter().map(|(id, c)| (id, c.medoid)).collect();
        if medoids.is_empty() {
            return Ok(());
        }

        let nearest: Vec<ClusterId> = (0..self.fingerprints.len())
            .into_par_iter()
            .map(|i| -> Result<ClusterId> {
                let mut best = medoids[0].0;
                let mut best_distance = f32::INFINITY;
                for &(id, medoid) in &medoids {
                    let d = self.distance(i, medoid)?;
                    if d < best_distance {
                        best_distance = d;
                        best = id;
                    }
                }
                Ok(best)
            })
            .collect::<Result<_>>()?;

        for cluster in self.state.clusters.values_mut() {
            cluster.members.clear();
        }
        for (i, id) in nearest.into_iter().enumerate() {
            if let Some(cluster) = self.state.clusters.get_mut(&id) {
                cluster.members.push(i);
            }
        }

        let empty: Vec<ClusterId> = self
            .state
            .iter()
            .filter(|(_, c)| c.members.is_empty())
            .map(|(id, _)| id)
            .collect();
        for id in empty {
            tracing::trace!(cluster = id, "Retiring empty cluster");
            self.state.retire(id, None);
        }

        Ok(())
    }

    /// Exact medoid of `members`: the one with the smallest summed distance
    /// to the rest, ties going to the earlier member
    fn medoid_of(&self, members: &[usize]) -> Result<Option<usize>> {
        let mut best: Option<(usize, f32)> = None;
        for &candidate in members {
            let mut total = 0.0f32;
            for &other in members {
                if other != candidate {
                    total += self.distance(candidate, other)?;
                }
            }
            if best.map_or(true, |(_, b)| total < b) {
                best = Some((candidate, total));
            }
        }
        Ok(best.map(|(m, _)| m))
    }

    /// Recompute every live cluster's medoid
    pub fn recenter(&mut self) -> Result<()> {
        let clusters: Vec<(ClusterId, &Cluster)> = self.state.iter().collect();
        let medoids: Vec<(ClusterId, usize)> = clusters
            .par_iter()
            .map(|&(id, cluster)| -> Result<(ClusterId, usize)> {
                self.medoid_of(&cluster.members)?
                    .map(|medoid| (id, medoid))
                    .ok_or(Error::EmptyCluster(id))
            })
            .collect::<Result<_>>()?;

        for (id, medoid) in medoids {
            if let Some(cluster) = self.state.clusters.get_mut(&id) {
                cluster.medoid = medoid;
            }
        }
        Ok(())
    }

    /// Nearest other live cluster per live cluster, by medoid distance
    fn nearest_neighbours(&self) -> Result<BTreeMap<ClusterId, (ClusterId, f32)>> {
        let medoids: Vec<(ClusterId, usize)> =
            self.state.iter().map(|(id, c)| (id, c.medoid)).collect();

        let table: Vec<Option<(ClusterId, (ClusterId, f32))>> = medoids
            .par_iter()
            .map(|&(id, medoid)| -> Result<Option<(ClusterId, (ClusterId, f32))>> {
                let mut best: Option<(ClusterId, f32)> = None;
                for &(other, other_medoid) in &medoids {
                    if other == id {
                        continue;
                    }
                    let d = self.distance(medoid, other_medoid)?;
                    if best.map_or(true, |(_, b)| d < b) {
                        best = Some((other, d));
                    }
                }
                Ok(best.map(|nearest| (id, nearest)))
            })
            .collect::<Result<_>>()?;

        Ok(table.into_iter().flatten().collect())
    }

    /// Move every member of `from` into `into`; `into` keeps its medoid
    fn absorb(&mut self, from: ClusterId, into: ClusterId) {
        if let Some(absorbed) = self.state.retire(from, Some(into)) {
            if let Some(target) = self.state.clusters.get_mut(&into) {
                target.members.extend(absorbed.members);
                target.members.sort_unstable();
            }
        }
    }

    /// Merge close clusters, returning how many merges happened
    ///
    /// Nearest neighbours are computed once per call. Clusters are visited in
    /// ascending id order and only merge when their neighbour's medoid is
    /// closer than the merge threshold; this applies to mutual pairs too,
    /// otherwise the globally closest pair would always merge and the loop
    /// could only stop at one cluster or the round cap. A mutual pair folds
    /// the higher id into the lower; otherwise the cluster folds into its
    /// neighbour, following earlier merges to the live cluster that now
    /// holds it.
    pub fn merge(&mut self) -> Result<usize> {
        let table = self.nearest_neighbours()?;
        let mut merges = 0;

        for (&id, &(neighbour, d)) in &table {
            if !self.state.is_live(id) || d >= self.merge_threshold {
                continue;
            }
            let Some(target) = self.state.resolve(neighbour) else {
                continue;
            };
            if target == id {
                continue;
            }

            let mutual = table.get(&neighbour).map(|&(n, _)| n) == Some(id);
            let (from, into) = if mutual {
                (id.max(target), id.min(target))
            } else {
                (id, target)
            };
            tracing::trace!(from, into, distance = d, mutual, "Merging clusters");
            self.absorb(from, into);
            merges += 1;
        }

        Ok(merges)
    }

    /// Run initialize and then assign/recenter/merge rounds until termination
    pub fn run(
        &mut self,
        requested: usize,
        seed: u64,
        observer: &mut dyn PipelineObserver,
    ) -> Result<Termination> {
        self.initialize(requested, seed);
        if self.state.is_empty() {
            return Ok(Termination::Converged { rounds: 0 });
        }

        let mut round = 0;
        loop {
            round += 1;
            self.assign()?;
            self.recenter()?;
            let merges = self.merge()?;

            observer.checkpoint(&Checkpoint::ClusterRound(RoundReport {
                round,
                live: self.state.len(),
                merges,
            }));

            if merges == 0 {
                return Ok(Termination::Converged { rounds: round });
            }
            if self.state.len() <= 1 {
                return Ok(Termination::SingleCluster { rounds: round });
            }
            if round >= self.max_rounds {
                return Ok(Termination::IterationCap { rounds: round });
            }
        }
    }
}

/// Stable display colour for a cluster id
///
/// A pure function of the id: every run and every process maps the same id
/// to the same colour. Channels stay above 63 so labels never render black.
pub fn cluster_color(id: ClusterId) -> [u8; 3] {
    let mut hasher = FxHasher::default();
    hasher.write_u64(id as u64);
    let h = hasher.finish().to_le_bytes();
    [64 + h[5] % 192, 64 + h[6] % 192, 64 + h[7] % 192]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{CheckpointLog, NoopObserver};

    fn fp(flags: &[u8]) -> Fingerprint {
        Fingerprint::from_visibility(flags.iter().map(|&f| f != 0))
    }

    /// Two rooms of four cells each, seeing disjoint wall sets
    fn two_rooms() -> Vec<Fingerprint> {
        vec![
            fp(&[1, 1, 1, 0, 0, 0]),
            fp(&[0, 0, 0, 1, 1, 1]),
            fp(&[1, 1, 0, 0, 0, 0]),
            fp(&[0, 0, 0, 0, 1, 1]),
            fp(&[1, 1, 1, 0, 0, 0]),
            fp(&[0, 0, 0, 1, 1, 0]),
            fp(&[0, 1, 1, 0, 0, 0]),
            fp(&[0, 0, 0, 1, 1, 1]),
        ]
    }

    fn assert_partition(state: &ClusterState, n: usize) {
        assert_eq!(state.member_count(), n);
        let labels = state.assignments(n);
        assert!(labels.iter().all(Option::is_some));
        for (_, cluster) in state.iter() {
            assert!(cluster.members.contains(&cluster.medoid));
            assert!(cluster.members.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_initialize_clamps_to_fingerprint_count() {
        let prints = two_rooms();
        let mut engine = ClusterEngine::new(&prints, 0.6, 20);
        engine.initialize(50, 7);
        assert_eq!(engine.state().len(), prints.len());
        let mut medoids: Vec<usize> = engine.state().iter().map(|(_, c)| c.medoid).collect();
        medoids.sort_unstable();
        medoids.dedup();
        assert_eq!(medoids.len(), prints.len());
        assert_eq!(engine.state().ids().collect::<Vec<_>>(), (0..8).collect::<Vec<_>>());
    }

    /// Replace the engine state with the given `(id, medoid)` singletons
    fn seed_clusters(engine: &mut ClusterEngine<'_>, clusters: &[(ClusterId, usize)]) {
        engine.state = ClusterState::default();
        for &(id, medoid) in clusters {
            engine.state.clusters.insert(
                id,
                Cluster {
                    medoid,
                    members: vec![medoid],
                },
            );
        }
    }

    /// Visibility over `range` out of 16 wall samples
    fn span(range: std::ops::Range<usize>) -> Fingerprint {
        Fingerprint::from_visibility((0..16).map(|i| range.contains(&i)))
    }

    #[test]
    fn test_assign_ties_go_to_lower_id() {
        let prints = vec![fp(&[1, 0]), fp(&[1, 0]), fp(&[0, 1])];
        let mut engine = ClusterEngine::new(&prints, 0.6, 20);
        engine.initialize(3, 0);
        engine.assign().unwrap();

        // Indices 0 and 1 share a fingerprint, so whichever of their
        // clusters has the higher id empties out and is retired.
        assert_eq!(engine.state().len(), 2);
        assert_eq!(engine.state().retired_ids().len(), 1);
        assert_partition(engine.state(), 3);
        let labels = engine.state().assignments(3);
        assert_eq!(labels[0], labels[1]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn test_assign_tie_label_is_lower_id_for_any_draw() {
        let prints = vec![fp(&[1, 0]), fp(&[1, 0]), fp(&[0, 1])];
        for seed in 0..20 {
            let mut engine = ClusterEngine::new(&prints, 0.6, 20);
            engine.initialize(3, seed);
            let id_of = |medoid: usize| {
                engine
                    .state()
                    .iter()
                    .find(|(_, c)| c.medoid == medoid)
                    .map(|(id, _)| id)
                    .unwrap()
            };
            let lower = id_of(0).min(id_of(1));
            let upper = id_of(0).max(id_of(1));

            engine.assign().unwrap();
            let labels = engine.state().assignments(3);
            assert_eq!(labels[0], Some(lower), "seed {}", seed);
            assert_eq!(labels[1], Some(lower), "seed {}", seed);
            assert!(engine.state().is_retired(upper));
            assert_eq!(engine.state().resolve(upper), None);
        }
    }

    #[test]
    fn test_mutual_pair_folds_into_lower_id() {
        // Distance 0.5 between the two medoids
        let prints = vec![fp(&[1, 1, 0]), fp(&[0, 1, 1])];
        let mut engine = ClusterEngine::new(&prints, 0.6, 20);
        seed_clusters(&mut engine, &[(0, 0), (1, 1)]);

        assert_eq!(engine.merge().unwrap(), 1);
        let state = engine.state();
        assert_eq!(state.ids().collect::<Vec<_>>(), vec![0]);
        assert_eq!(state.resolve(1), Some(0));
        assert_eq!(state.get(0).unwrap().members, vec![0, 1]);
        assert_eq!(state.get(0).unwrap().medoid, 0);
    }

    #[test]
    fn test_pair_at_threshold_stays_apart() {
        let prints = vec![fp(&[1, 1, 0]), fp(&[0, 1, 1])];
        let mut engine = ClusterEngine::new(&prints, 0.5, 20);
        seed_clusters(&mut engine, &[(0, 0), (1, 1)]);

        assert_eq!(engine.merge().unwrap(), 0);
        assert_eq!(engine.state().len(), 2);
    }

    #[test]
    fn test_one_sided_merge_goes_to_neighbour() {
        // d(a, b) = 0.5, d(b, c) = 0.05, d(a, c) ~ 0.58: a points at b,
        // while b and c point at each other.
        let prints = vec![span(5..15), span(0..10), span(0..9)];
        let mut engine = ClusterEngine::new(&prints, 0.6, 20);
        seed_clusters(&mut engine, &[(0, 0), (1, 1), (2, 2)]);

        assert_eq!(engine.merge().unwrap(), 2);
        let state = engine.state();
        assert_eq!(state.ids().collect::<Vec<_>>(), vec![1]);
        assert_eq!(state.resolve(0), Some(1));
        assert_eq!(state.resolve(2), Some(1));
        assert_eq!(state.get(1).unwrap().members, vec![0, 1, 2]);
    }

    #[test]
    fn test_merge_chain_resolves_to_final_cluster() {
        // Same geometry with ids permuted: 0 folds into 2, then the mutual
        // pair 1/2 folds 2 into 1, so 0 reaches 1 through 2.
        let prints = vec![span(5..15), span(0..9), span(0..10)];
        let mut engine = ClusterEngine::new(&prints, 0.6, 20);
        seed_clusters(&mut engine, &[(0, 0), (1, 1), (2, 2)]);

        assert_eq!(engine.merge().unwrap(), 2);
        let state = engine.state();
        assert_eq!(state.ids().collect::<Vec<_>>(), vec![1]);
        assert!(state.is_retired(0));
        assert!(state.is_retired(2));
        assert_eq!(state.resolve(0), Some(1));
        assert_eq!(state.resolve(2), Some(1));
        assert_eq!(state.get(1).unwrap().members, vec![0, 1, 2]);
        assert_eq!(state.assignments(3), vec![Some(1); 3]);
    }

    #[test]
    fn test_recenter_picks_exact_medoid() {
        let prints = vec![
            fp(&[1, 1, 0, 0]),
            fp(&[1, 1, 1, 0]),
            fp(&[0, 1, 1, 1]),
            fp(&[1, 1, 1, 1]),
        ];
        let mut engine = ClusterEngine::new(&prints, 0.6, 20);
        engine.initialize(1, 3);
        engine.assign().unwrap();
        engine.recenter().unwrap();

        let (_, cluster) = engine.state().iter().next().unwrap();
        let total = |c: usize| -> f32 {
            (0..4)
                .map(|o| fingerprint_distance(&prints[c], &prints[o]).unwrap())
                .sum()
        };
        let best = (0..4)
            .min_by(|&a, &b| total(a).partial_cmp(&total(b)).unwrap())
            .unwrap();
        assert_eq!(cluster.medoid, best);
    }

    #[test]
    fn test_recenter_rejects_empty_cluster() {
        let prints = vec![fp(&[1, 0])];
        let mut engine = ClusterEngine::new(&prints, 0.6, 20);
        engine.initialize(1, 0);
        engine.state.clusters.get_mut(&0).unwrap().members.clear();
        assert!(matches!(engine.recenter(), Err(Error::EmptyCluster(0))));
    }

    #[test]
    fn test_two_rooms_separate() {
        let prints = two_rooms();
        let mut engine = ClusterEngine::new(&prints, 0.6, 20);
        let termination = engine.run(8, 11, &mut NoopObserver).unwrap();

        assert!(termination.is_converged());
        let state = engine.state();
        assert_eq!(state.len(), 2);
        assert_partition(state, prints.len());

        let labels = state.assignments(prints.len());
        for room in [[0, 2, 4, 6], [1, 3, 5, 7]] {
            assert!(room.iter().all(|&i| labels[i] == labels[room[0]]));
        }
        assert_ne!(labels[0], labels[1]);
    }

    #[test]
    fn test_merged_ids_are_retired_and_resolve() {
        let prints = two_rooms();
        let mut engine = ClusterEngine::new(&prints, 0.6, 20);
        engine.run(8, 11, &mut NoopObserver).unwrap();
        let state = engine.state();

        let retired = state.retired_ids();
        assert_eq!(retired.len() + state.len(), 8);
        for id in 0..8 {
            assert!(state.is_live(id) != state.is_retired(id));
            if let Some(live) = state.resolve(id) {
                assert!(state.is_live(live));
            }
        }
    }

    #[test]
    fn test_same_seed_same_partition() {
        let prints = two_rooms();
        let run = |seed| {
            let mut engine = ClusterEngine::new(&prints, 0.6, 20);
            let termination = engine.run(5, seed, &mut NoopObserver).unwrap();
            (termination, engine.into_state())
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_high_threshold_collapses_to_single_cluster() {
        let prints = two_rooms();
        let mut engine = ClusterEngine::new(&prints, 1.5, 20);
        let termination = engine.run(8, 1, &mut NoopObserver).unwrap();
        assert!(matches!(termination, Termination::SingleCluster { .. }));
        assert_eq!(engine.state().len(), 1);
        assert_partition(engine.state(), prints.len());
    }

    #[test]
    fn test_round_cap_is_reported_not_failed() {
        // The first round always merges inside each room and the rooms never
        // merge with each other, so a one-round cap stops a live loop.
        let prints = two_rooms();
        let mut engine = ClusterEngine::new(&prints, 0.6, 1);
        let mut log = CheckpointLog::new();
        let termination = engine.run(8, 5, &mut log).unwrap();

        assert_eq!(termination, Termination::IterationCap { rounds: 1 });
        assert!(!termination.is_converged());
        assert_eq!(log.rounds().count(), 1);
        assert_partition(engine.state(), prints.len());
    }

    #[test]
    fn test_no_fingerprints() {
        let mut engine = ClusterEngine::new(&[], 0.6, 20);
        let termination = engine.run(50, 0, &mut NoopObserver).unwrap();
        assert_eq!(termination, Termination::Converged { rounds: 0 });
        assert!(engine.state().is_empty());
    }

    #[test]
    fn test_dimension_mismatch_propagates() {
        let prints = vec![fp(&[1, 0]), fp(&[1, 0, 1])];
        let mut engine = ClusterEngine::new(&prints, 0.6, 20);
        let err = engine.run(2, 0, &mut NoopObserver).unwrap_err();
        assert!(matches!(err, Error::Dimension { .. }));
    }

    #[test]
    fn test_cluster_color_is_stable() {
        assert_eq!(cluster_color(3), cluster_color(3));
        assert_ne!(cluster_color(3), cluster_color(4));
        for id in 0..64 {
            assert!(cluster_color(id).iter().all(|&c| c >= 64));
        }
    }
}
