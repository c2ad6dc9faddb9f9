use kotobako_core::{ContainerId, PlacementError, PlacementStore, TokenId, ZoneId};

fn build_store(token_count: u32, zone_count: usize) -> (PlacementStore, Vec<TokenId>) {
    let ids: Vec<TokenId> = (0..token_count).map(TokenId).collect();
    (PlacementStore::new(&ids, zone_count), ids)
}

fn assert_one_location(store: &PlacementStore, ids: &[TokenId], zone_count: u32) {
    for &id in ids {
        let home = store
            .container_of(id)
            .expect("live token must have a container");
        let mut seen = 0;
        let mut containers = vec![ContainerId::Pool];
        containers.extend((0..zone_count).map(|z| ContainerId::Zone(ZoneId(z))));
        for container in containers {
            let tokens = store.tokens_in(container).unwrap();
            let count = tokens.iter().filter(|&&t| t == id).count();
            if container == home {
                assert_eq!(count, 1, "token {:?} missing from its container", id);
            } else {
                assert_eq!(count, 0, "token {:?} appears in {container}", id);
            }
            seen += count;
        }
        assert_eq!(seen, 1);
    }
}

#[test]
fn tokens_start_in_pool() {
    let (store, ids) = build_store(3, 2);
    for &id in &ids {
        assert_eq!(store.container_of(id), Ok(ContainerId::Pool));
    }
    assert_eq!(store.tokens_in(ContainerId::Pool).unwrap().len(), 3);
    assert_eq!(store.placed_count(), 0);
}

#[test]
fn move_chain_keeps_one_location_invariant() {
    let (mut store, ids) = build_store(4, 3);
    let z0 = ContainerId::Zone(ZoneId(0));
    let z1 = ContainerId::Zone(ZoneId(1));
    let z2 = ContainerId::Zone(ZoneId(2));
    store.move_token(ids[0], z0).unwrap();
    assert_one_location(&store, &ids, 3);
    store.move_token(ids[0], z1).unwrap();
    assert_one_location(&store, &ids, 3);
    store.move_token(ids[1], z1).unwrap();
    store.move_token(ids[0], z2).unwrap();
    store.move_token(ids[0], ContainerId::Pool).unwrap();
    assert_one_location(&store, &ids, 3);
    assert_eq!(store.container_of(ids[0]), Ok(ContainerId::Pool));
    assert_eq!(store.container_of(ids[1]), Ok(z1));
    assert_eq!(store.placed_count(), 1);
}

#[test]
fn cross_zone_move_leaves_source_empty() {
    let (mut store, ids) = build_store(1, 2);
    let z0 = ContainerId::Zone(ZoneId(0));
    let z1 = ContainerId::Zone(ZoneId(1));
    store.move_token(ids[0], z0).unwrap();
    store.move_token(ids[0], z1).unwrap();
    assert!(store.tokens_in(z0).unwrap().is_empty());
    assert_eq!(store.tokens_in(z1).unwrap(), &[ids[0]]);
}

#[test]
fn unknown_token_is_rejected_without_state_change() {
    let (mut store, ids) = build_store(2, 1);
    let before = store.clone();
    let ghost = TokenId(999);
    assert_eq!(
        store.move_token(ghost, ContainerId::Pool),
        Err(PlacementError::UnknownToken { id: ghost })
    );
    assert_eq!(store, before);
    assert_one_location(&store, &ids, 1);
}

#[test]
fn unknown_container_is_rejected_without_state_change() {
    let (mut store, ids) = build_store(2, 1);
    store.move_token(ids[0], ContainerId::Zone(ZoneId(0))).unwrap();
    let before = store.clone();
    let missing = ContainerId::Zone(ZoneId(7));
    assert_eq!(
        store.move_token(ids[0], missing),
        Err(PlacementError::UnknownContainer { id: missing })
    );
    assert_eq!(store, before);
    assert_eq!(
        store.tokens_in(missing),
        Err(PlacementError::UnknownContainer { id: missing })
    );
}

#[test]
fn move_to_current_container_reorders_to_end() {
    let (mut store, ids) = build_store(3, 1);
    let zone = ContainerId::Zone(ZoneId(0));
    store.move_token(ids[0], zone).unwrap();
    store.move_token(ids[1], zone).unwrap();
    store.move_token(ids[0], zone).unwrap();
    assert_eq!(store.tokens_in(zone).unwrap(), &[ids[1], ids[0]]);
    assert_one_location(&store, &ids, 1);
}

#[test]
fn container_of_never_silently_missing() {
    let (store, _ids) = build_store(2, 1);
    assert_eq!(
        store.container_of(TokenId(42)),
        Err(PlacementError::UnknownToken { id: TokenId(42) })
    );
}
