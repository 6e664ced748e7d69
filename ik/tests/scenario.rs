use {
    ik::{Chain, IkSolver, Skeleton, DEFAULT_SEGMENT_LENGTH},
    ultraviolet::Vec3,
};

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];

/// Joints at y = 0, 10, 20, 30 and a free effector marker at y = 30.
fn seed() -> (Skeleton, Chain) {
    let mut skeleton = Skeleton::new();
    let root = skeleton.add_bone(Vec3::zero(), None, WHITE);
    skeleton.extend_active(Vec3::new(0.0, 10.0, 0.0), WHITE);
    skeleton.extend_active(Vec3::new(0.0, 20.0, 0.0), WHITE);
    skeleton.extend_active(Vec3::new(0.0, 30.0, 0.0), WHITE);

    let effector = skeleton.add_bone(Vec3::new(0.0, 30.0, 0.0), None, GREEN);
    skeleton[effector].pickable = true;

    let joints = skeleton.path_to_leaf(root);
    let chain = Chain::new(joints, effector, DEFAULT_SEGMENT_LENGTH).unwrap();
    (skeleton, chain)
}

#[test]
fn dragging_effector_keeps_spacing_and_root() {
    let (mut skeleton, chain) = seed();
    assert_eq!(chain.len(), 4);

    let mut solver =
        IkSolver::default().with_last_target(skeleton.position(chain.effector()));
    skeleton.set_position(chain.effector(), Vec3::new(0.0, 30.0, 10.0));
    assert!(solver.update(&mut skeleton, &chain));

    let joints = chain.joints();
    for pair in joints.windows(2) {
        let distance =
            (skeleton.position(pair[1]) - skeleton.position(pair[0])).mag();
        assert!((distance - 10.0).abs() < 1e-3, "spacing {}", distance);
    }
    assert!(skeleton.position(joints[0]).mag() < 1e-3);
    assert_eq!(
        skeleton.position(chain.effector()),
        Vec3::new(0.0, 30.0, 10.0)
    );

    // The chain bends towards the effector.
    assert!(skeleton.position(joints[3]).z > 0.0);
}

#[test]
fn repeated_ticks_without_motion_change_nothing() {
    let (mut skeleton, chain) = seed();
    let mut solver = IkSolver::default();
    skeleton.set_position(chain.effector(), Vec3::new(-12.0, 18.0, 4.0));

    assert!(solver.update(&mut skeleton, &chain));
    let solved: Vec<_> = chain
        .joints()
        .iter()
        .map(|&id| skeleton.position(id))
        .collect();

    for _ in 0..10 {
        assert!(!solver.update(&mut skeleton, &chain));
    }

    let after: Vec<_> = chain
        .joints()
        .iter()
        .map(|&id| skeleton.position(id))
        .collect();
    assert_eq!(solved, after);
}

#[test]
fn per_segment_rest_lengths_are_honoured() {
    let (mut skeleton, chain) = seed();
    let mut chain = Chain::with_rest_lengths(
        chain.joints().to_vec(),
        chain.effector(),
        vec![4.0, 8.0, 12.0],
    )
    .unwrap();
    chain.set_rest_length(0, 6.0).unwrap();

    ik::solve(&mut skeleton, &chain, Vec3::new(15.0, 5.0, -3.0));

    for (pair, &length) in chain.joints().windows(2).zip(&[6.0, 8.0, 12.0]) {
        let distance =
            (skeleton.position(pair[1]) - skeleton.position(pair[0])).mag();
        assert!((distance - length).abs() < 1e-3);
    }
    assert!(skeleton.position(chain.joints()[0]).mag() < 1e-3);
}
