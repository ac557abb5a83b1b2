use super::*;
use crate::cell::Dem;
use crate::graph::DissimilarityMetric;
use nalgebra::Vector2;

fn dem_3x3(heights: &[[f64; 3]; 3]) -> Dem<2> {
    let mut dem = Dem::<2>::new(
        Vector2::new(0.0, 0.0),
        Vector2::new(3.0, 3.0),
        Vector2::new(1.0, 1.0),
    )
    .expect("valid bounds");
    for y in 0..3 {
        for x in 0..3 {
            dem.add_sample(
                &Vector2::new(x as f64 + 0.5, y as f64 + 0.5),
                heights[y][x],
            )
            .expect("in range");
        }
    }
    dem
}

fn segmenter_for(dem: &Dem<2>) -> GraphSegmenter {
    GraphSegmenter::new(DemGraph::build(dem, DissimilarityMetric::MeanAbs))
}

#[test]
fn non_positive_k_is_rejected() {
    let segmenter = segmenter_for(&dem_3x3(&[[1.0; 3]; 3]));
    for k in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = segmenter.segment(k).expect_err("k must be positive finite");
        assert!(
            matches!(err, DemError::InvalidArgument { name: "k", .. }),
            "unexpected error for k={k}: {err:?}"
        );
    }
}

#[test]
fn uniform_terrain_collapses_to_one_component() {
    let segmenter = segmenter_for(&dem_3x3(&[[1.0; 3]; 3]));
    let components = segmenter.segment(1.0).expect("valid k");
    assert_eq!(components.len(), 1);
    let only = components.iter().next().expect("one component");
    assert_eq!(only.size(), 9);
    assert_eq!(only.members, (0..9).collect::<Vec<_>>());
    assert_eq!(only.internal_difference, 0.0);
}

#[test]
fn center_outlier_splits_off() {
    let heights = [[1.0, 1.0, 1.0], [1.0, 100.0, 1.0], [1.0, 1.0, 1.0]];
    let segmenter = segmenter_for(&dem_3x3(&heights));
    let components = segmenter.segment(0.5).expect("valid k");
    assert_eq!(components.len(), 2, "ring and center");

    let center = components.component_of(4).expect("center is occupied");
    assert_eq!(components.members_of(center), &[4]);

    let ring = components.component_of(0).expect("corner is occupied");
    assert_ne!(ring, center);
    assert_eq!(components.members_of(ring).len(), 8);
}

#[test]
fn every_occupied_cell_belongs_to_exactly_one_component() {
    let heights = [[0.0, 0.0, 5.0], [0.0, 5.0, 5.0], [9.0, 9.0, 9.0]];
    let dem = dem_3x3(&heights);
    let segmenter = segmenter_for(&dem);
    for k in [0.1, 1.0, 4.0, 50.0] {
        let components = segmenter.segment(k).expect("valid k");
        let mut seen = vec![0usize; 9];
        for component in components.iter() {
            for &member in &component.members {
                seen[member] += 1;
            }
        }
        assert_eq!(seen, vec![1; 9], "partition violated for k={k}");
        for linear in 0..9 {
            let id = components
                .component_of(linear)
                .expect("occupied cell must be labeled");
            assert!(components.members_of(id).contains(&linear));
        }
    }
}

#[test]
fn repeated_calls_are_deterministic() {
    let heights = [[0.0, 1.0, 2.0], [3.0, 4.0, 5.0], [6.0, 7.0, 8.0]];
    let segmenter = segmenter_for(&dem_3x3(&heights));
    let first = segmenter.segment(2.0).expect("valid k");
    let second = segmenter.segment(2.0).expect("valid k");
    assert_eq!(first.len(), second.len());
    for linear in 0..9 {
        assert_eq!(first.component_of(linear), second.component_of(linear));
    }
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn internal_difference_tracks_the_largest_merge_edge() {
    // two flat shelves at 0 and 2 meeting along the middle column
    let heights = [[0.0, 0.0, 2.0], [0.0, 0.0, 2.0], [0.0, 0.0, 2.0]];
    let segmenter = segmenter_for(&dem_3x3(&heights));
    let components = segmenter.segment(20.0).expect("valid k");
    assert_eq!(components.len(), 1, "large k merges everything");
    let only = components.iter().next().expect("one component");
    assert_eq!(only.internal_difference, 2.0, "last merge crossed the step");
}

#[test]
fn min_size_pass_absorbs_small_components() {
    let heights = [[1.0, 1.0, 1.0], [1.0, 100.0, 1.0], [1.0, 1.0, 1.0]];
    let dem = dem_3x3(&heights);
    let graph = DemGraph::build(&dem, DissimilarityMetric::MeanAbs);

    let strict = GraphSegmenter::new(graph.clone());
    assert_eq!(strict.segment(0.5).expect("valid k").len(), 2);

    let forcing = GraphSegmenter::new(graph).with_params(SegmenterParams {
        min_component_size: 2,
    });
    let components = forcing.segment(0.5).expect("valid k");
    assert_eq!(components.len(), 1, "singleton center is absorbed");
    let only = components.iter().next().expect("one component");
    assert_eq!(only.size(), 9);
    assert_eq!(only.internal_difference, 99.0);
}

#[test]
fn empty_graph_produces_empty_partition() {
    let dem = Dem::<2>::new(
        Vector2::new(0.0, 0.0),
        Vector2::new(2.0, 2.0),
        Vector2::new(1.0, 1.0),
    )
    .expect("valid bounds");
    let segmenter = segmenter_for(&dem);
    let components = segmenter.segment(1.0).expect("valid k");
    assert!(components.is_empty());
    assert_eq!(components.component_of(0), None);
}

#[test]
fn unknown_component_id_has_no_members() {
    let segmenter = segmenter_for(&dem_3x3(&[[1.0; 3]; 3]));
    let components = segmenter.segment(1.0).expect("valid k");
    assert!(components.members_of(ComponentId(7)).is_empty());
    assert!(components.get(ComponentId(7)).is_none());
}
