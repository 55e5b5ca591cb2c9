//! Integration tests for transform composition across both hierarchies

use crate::foundation::math::{rotate_vector, Vec2};
use crate::scene::{Scene, SceneComponent};
use approx::assert_relative_eq;

#[test]
fn test_chain_world_position_is_sum_of_locals() {
    let mut scene = Scene::new();
    let object = scene.spawn_object_with_root();
    let root = scene.root(object).unwrap().unwrap();
    let a = scene.construct_scene_component(object, SceneComponent).unwrap();
    let b = scene.construct_scene_component(object, SceneComponent).unwrap();
    scene.attach_component(a, root).unwrap();
    scene.attach_component(b, a).unwrap();

    let offsets = [Vec2::new(-3.25, 8.0), Vec2::new(0.75, 1.5), Vec2::new(12.0, -0.125)];
    for (id, offset) in [root, a, b].into_iter().zip(offsets) {
        scene.set_local_position(id, offset).unwrap();
    }

    let expected = scene.local_position(root).unwrap()
        + scene.local_position(a).unwrap()
        + scene.local_position(b).unwrap();
    assert_eq!(scene.world_position(b).unwrap(), expected);
}

#[test]
fn test_two_trees_compose_through_owner() {
    let mut scene = Scene::new();
    let base = scene.spawn_object_with_root();
    let rider = scene.spawn_object_with_root();
    scene.attach_object(rider, base).unwrap();
    scene.set_object_local_position(base, Vec2::new(100.0, 50.0)).unwrap();
    scene.set_object_local_position(rider, Vec2::new(-10.0, 0.0)).unwrap();
    scene.set_object_local_rotation(base, 10.0).unwrap();

    let rider_root = scene.root(rider).unwrap().unwrap();
    let barrel = scene.construct_scene_component(rider, SceneComponent).unwrap();
    scene.attach_component(barrel, rider_root).unwrap();
    scene.set_local_position(barrel, Vec2::new(0.0, 4.0)).unwrap();
    scene.set_local_rotation(barrel, 20.0).unwrap();

    assert_eq!(scene.world_position(barrel).unwrap(), Vec2::new(90.0, 54.0));
    assert_relative_eq!(scene.world_rotation(barrel).unwrap(), 30.0);

    // Moving the base object drags the whole component chain with it
    scene.add_object_position(base, Vec2::new(1.0, 1.0)).unwrap();
    assert_eq!(scene.world_position(barrel).unwrap(), Vec2::new(91.0, 55.0));
}

#[test]
fn test_world_rotation_feeds_rotate_vector() {
    let mut scene = Scene::new();
    let object = scene.spawn_object_with_root();
    let root = scene.root(object).unwrap().unwrap();
    let arm = scene.construct_scene_component(object, SceneComponent).unwrap();
    scene.attach_component(arm, root).unwrap();
    scene.set_local_rotation(root, 45.0).unwrap();
    scene.set_local_rotation(arm, 45.0).unwrap();

    let facing = rotate_vector(scene.world_rotation(arm).unwrap(), &Vec2::new(1.0, 0.0));
    assert_relative_eq!(facing, Vec2::new(0.0, 1.0), epsilon = 1e-6);
}

#[test]
fn test_scale_composes_additively() {
    let mut scene = Scene::new();
    let object = scene.spawn_object_with_root();
    let root = scene.root(object).unwrap().unwrap();
    let child = scene.construct_scene_component(object, SceneComponent).unwrap();
    scene.attach_component(child, root).unwrap();
    scene.set_object_local_scale(object, Vec2::new(2.0, 3.0)).unwrap();
    scene.set_local_scale(child, Vec2::new(0.5, 0.5)).unwrap();

    assert_eq!(scene.world_scale(child).unwrap(), Vec2::new(2.5, 3.5));
}

#[test]
fn test_detached_branch_becomes_local_space() {
    let mut scene = Scene::new();
    let object = scene.spawn_object_with_root();
    scene.set_object_local_position(object, Vec2::new(7.0, 7.0)).unwrap();
    let root = scene.root(object).unwrap().unwrap();
    let branch = scene.construct_scene_component(object, SceneComponent).unwrap();
    let leaf = scene.construct_scene_component(object, SceneComponent).unwrap();
    scene.attach_component(branch, root).unwrap();
    scene.attach_component(leaf, branch).unwrap();
    scene.set_local_position(branch, Vec2::new(1.0, 0.0)).unwrap();
    scene.set_local_position(leaf, Vec2::new(0.0, 1.0)).unwrap();
    assert_eq!(scene.world_position(leaf).unwrap(), Vec2::new(8.0, 8.0));

    scene.detach_component(branch, root).unwrap();

    assert_eq!(scene.world_position(leaf).unwrap(), Vec2::new(1.0, 1.0));
    assert_eq!(scene.component_owner(branch).unwrap(), None);
    assert_eq!(scene.component_owner(leaf).unwrap(), None);
    assert_eq!(scene.object_components(object).unwrap().len(), 1);

    // Re-attaching brings the branch back into the object
    scene.attach_component(branch, root).unwrap();
    assert_eq!(scene.component_owner(leaf).unwrap(), Some(object));
    assert_eq!(scene.object_components(object).unwrap().len(), 3);
}

#[test]
fn test_root_moved_into_other_object_clears_root() {
    let mut scene = Scene::new();
    let donor = scene.spawn_object_with_root();
    let receiver = scene.spawn_object_with_root();
    let donor_root = scene.root(donor).unwrap().unwrap();
    let receiver_root = scene.root(receiver).unwrap().unwrap();

    scene.attach_component(donor_root, receiver_root).unwrap();

    assert_eq!(scene.root(donor).unwrap(), None);
    assert_eq!(scene.component_owner(donor_root).unwrap(), Some(receiver));
    assert!(scene.object_local_position(donor).is_err());
}
