//! End-to-end grant resolution scenarios, pinning the status classes the
//! boundary renders for each outcome.

use std::sync::Arc;

use stacks_core::authz::{
    AuthorizationResolver, AuthzError, Decision, FeatureRegistry, GrantId,
};
use stacks_core::config::EngineConfig;
use stacks_core::fault::FaultClass;
use stacks_core::object::{Actor, ObjectRef};
use stacks_core::store::{ActorStore, ItemStore, MemoryStore, ObjectDirectory};
use uuid::Uuid;

struct Harness {
    resolver: AuthorizationResolver,
    admin: Actor,
    eperson: Actor,
    site: ObjectRef,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    let admin = Actor::admin(Uuid::new_v4());
    let eperson = Actor::new(Uuid::new_v4());
    store.insert_actor(admin.clone()).unwrap();
    store.insert_actor(eperson.clone()).unwrap();

    let site = ObjectRef::site(Uuid::new_v4());
    store.register_object(site);

    let registry = Arc::new(
        FeatureRegistry::from_config(&EngineConfig::default()).expect("default config"),
    );
    let directory: Arc<dyn ObjectDirectory> = Arc::clone(&store) as Arc<dyn ObjectDirectory>;
    let actors: Arc<dyn ActorStore> = Arc::clone(&store) as Arc<dyn ActorStore>;
    let items: Arc<dyn ItemStore> = Arc::clone(&store) as Arc<dyn ItemStore>;
    let resolver = AuthorizationResolver::new(
        registry,
        directory,
        actors,
        items,
    );
    Harness {
        resolver,
        admin,
        eperson,
        site,
    }
}

#[test]
fn admin_feature_grants_for_admin_on_site() {
    let h = harness();
    assert_eq!(
        h.resolver.resolve(Some(&h.admin), "trueforadmins", &h.site),
        Decision::Granted
    );

    let id = GrantId::new(Some(h.admin.id), "trueforadmins", h.site);
    let grant = h.resolver.view_grant(Some(&h.admin), &id).unwrap();
    assert_eq!(grant.canonical(), id.canonical());
}

#[test]
fn admin_feature_is_not_applicable_to_plain_account() {
    let h = harness();
    let decision = h
        .resolver
        .resolve(Some(&h.eperson), "trueforadmins", &h.site);
    assert_eq!(decision, Decision::NotApplicable);
    assert_eq!(decision.fault_class(), Some(FaultClass::NotFound));

    let id = GrantId::new(Some(h.eperson.id), "trueforadmins", h.site);
    let err = h.resolver.view_grant(Some(&h.eperson), &id).unwrap_err();
    assert_eq!(err.class().status_code(), 404);
}

#[test]
fn anonymous_view_of_actor_scoped_grant_requires_auth() {
    let h = harness();
    let id = GrantId::new(Some(h.eperson.id), "alwaystrue", h.site);
    let err = h.resolver.view_grant(None, &id).unwrap_err();
    assert!(matches!(err, AuthzError::NotAuthenticated { .. }));
    assert_eq!(err.class().status_code(), 401);
}

#[test]
fn anonymous_grant_resolves_for_open_features() {
    let h = harness();
    assert_eq!(
        h.resolver.resolve(None, "alwaystrue", &h.site),
        Decision::Granted
    );

    let id = GrantId::new(None, "alwaystrue", h.site);
    assert!(h.resolver.view_grant(None, &id).is_ok());
}

#[test]
fn viewing_another_actors_grant_is_forbidden() {
    let h = harness();
    let id = GrantId::new(Some(h.admin.id), "alwaystrue", h.site);
    let err = h.resolver.view_grant(Some(&h.eperson), &id).unwrap_err();
    assert!(matches!(err, AuthzError::Forbidden { .. }));
    assert_eq!(err.class().status_code(), 403);
}

#[test]
fn admin_views_any_actors_grant() {
    let h = harness();
    let id = GrantId::new(Some(h.eperson.id), "alwaystrue", h.site);
    assert!(h.resolver.view_grant(Some(&h.admin), &id).is_ok());
}

#[test]
fn malformed_identifier_is_distinguished_from_lookup_miss() {
    let h = harness();

    // Unparseable input is a hard error.
    let err = h
        .resolver
        .view_grant_str(Some(&h.admin), "trueforadmins_widget_not-a-uuid")
        .unwrap_err();
    assert!(matches!(err, AuthzError::Malformed(_)));
    assert_eq!(err.class(), FaultClass::MalformedRequest);

    // A well-formed reference to a missing actor is a lookup miss.
    let ghost = GrantId::new(Some(Uuid::new_v4()), "alwaystrue", h.site);
    let err = h
        .resolver
        .view_grant_str(Some(&h.admin), &ghost.canonical())
        .unwrap_err();
    assert!(matches!(err, AuthzError::GrantNotFound { .. }));
    assert_eq!(err.class().status_code(), 404);
}

#[test]
fn evaluator_fault_maps_to_server_error() {
    let h = harness();
    let decision = h.resolver.resolve(Some(&h.admin), "alwaysraise", &h.site);
    assert_eq!(decision, Decision::EvaluationError);
    assert_eq!(
        decision.fault_class().map(FaultClass::status_code),
        Some(500)
    );
}
