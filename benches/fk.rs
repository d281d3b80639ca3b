use criterion::{criterion_group, criterion_main, Criterion};
use linkwalk::*;
use std::f64::consts::PI;
use std::hint::black_box;

/// Serial arm with `n` revolute joints around alternating axes.
fn build_arm(n: usize) -> Mechanism<f64> {
    let root = LinkBuilder::<f64>::new().name("root").into_node();
    let mut prev = root.clone();
    for i in 0..n {
        let axis = if i % 2 == 0 {
            Vector3::y_axis()
        } else {
            Vector3::z_axis()
        };
        let link = LinkBuilder::new()
            .name(&format!("link{i}"))
            .joint_type(JointType::Revolute { axis })
            .translation(Translation3::new(0.0, 0.1, 0.1))
            .into_node();
        link.set_parent(&prev);
        prev = link;
    }
    Mechanism::from_root(root)
}

fn random_angles(dof: usize) -> Vec<f64> {
    (0..dof)
        .map(|_| (rand::random::<f64>() - 0.5) * 2.0 * PI)
        .collect()
}

fn bench_update_transforms(c: &mut Criterion) {
    let mechanism = build_arm(12);
    let traversal = mechanism.traversal();
    let angles = random_angles(mechanism.dof());
    c.bench_function("update_transforms_12", |b| {
        b.iter(|| {
            mechanism.set_joint_positions_unchecked(black_box(&angles));
            traversal.update_transforms();
        })
    });
}

fn bench_update_kinematics(c: &mut Criterion) {
    let mechanism = build_arm(12);
    let traversal = mechanism.traversal();
    let angles = random_angles(mechanism.dof());
    let rates = random_angles(mechanism.dof());
    mechanism.set_joint_velocities(&rates).unwrap();
    mechanism.set_joint_accelerations(&rates).unwrap();
    c.bench_function("update_kinematics_12", |b| {
        b.iter(|| {
            mechanism.set_joint_positions_unchecked(black_box(&angles));
            traversal.update_kinematics(true, true);
        })
    });
}

fn bench_rebuild_traversal(c: &mut Criterion) {
    let mechanism = build_arm(12);
    let end = mechanism.find("link11").unwrap().clone();
    c.bench_function("find_from_end_12", |b| {
        b.iter(|| {
            let traversal = Traversal::from_reference(black_box(&end), true, true);
            black_box(traversal.len())
        })
    });
}

criterion_group!(
    benches,
    bench_update_transforms,
    bench_update_kinematics,
    bench_rebuild_traversal
);
criterion_main!(benches);
