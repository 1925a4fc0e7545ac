use std::collections::HashSet;

use crate::draw::DrawError;
use crate::secret::{derive_secret, TOKEN_LEN};
use crate::service::storage::{in_memory::MapStorage, Storage};
use crate::service::{Error, Service};
use crate::tests::{registered_service, SequenceSeed, FRIENDS, GROUP};
use crate::types::GroupState;

#[tokio::test]
async fn draw_of_three_friends_is_a_three_cycle() {
    let service = registered_service([42]).await;

    let grants = service.draw(GROUP).await.unwrap();
    let group = service.group(GROUP).await.unwrap();

    let GroupState::Drawn { seed, assignment } = group.state() else {
        panic!("group should be drawn");
    };
    assert_eq!(seed, 42);
    assert_eq!(assignment, &crate::draw::draw(&FRIENDS, 42).unwrap());

    let first = assignment["Ana"].as_str();
    let second = assignment[first].as_str();
    assert_ne!(first, "Ana");
    assert_ne!(second, "Ana");
    assert_eq!(assignment[second], "Ana");

    let tokens: HashSet<_> = grants.iter().map(|g| g.token.as_str()).collect();
    assert_eq!(tokens.len(), 3);
    for grant in &grants {
        assert_eq!(grant.token.as_str().len(), TOKEN_LEN);
        assert!(grant.token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(grant.token, derive_secret(GROUP, &grant.participant, 42));
    }
}

#[tokio::test]
async fn reveal_with_valid_token_shows_friend() {
    let service = registered_service([42]).await;
    let grants = service.draw(GROUP).await.unwrap();
    let group = service.group(GROUP).await.unwrap();

    for grant in grants {
        let friend = service
            .reveal(GROUP, &grant.participant, grant.token.as_str())
            .await
            .unwrap();
        assert_eq!(friend, group.assignment[&grant.participant]);
    }
}

#[tokio::test]
async fn reveal_with_someone_elses_token_fails() {
    let service = registered_service([42]).await;
    service.draw(GROUP).await.unwrap();

    let bruno = derive_secret(GROUP, "Bruno", 42);
    let err = service.reveal(GROUP, "Ana", bruno.as_str()).await.unwrap_err();

    assert!(matches!(err, Error::InvalidToken));
    assert!(!err.to_string().contains(bruno.as_str()));
}

#[tokio::test]
async fn redraw_invalidates_old_tokens() {
    let service = registered_service([1, 2]).await;

    let old = service.draw(GROUP).await.unwrap();
    let new = service.draw(GROUP).await.unwrap();

    for grant in &old {
        let err = service
            .reveal(GROUP, &grant.participant, grant.token.as_str())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidToken));
    }
    for grant in &new {
        service
            .reveal(GROUP, &grant.participant, grant.token.as_str())
            .await
            .unwrap();
    }
    assert_eq!(service.group(GROUP).await.unwrap().seed, 2);
}

#[tokio::test]
async fn unseeded_group_has_no_links_and_no_reveal() {
    let service = registered_service([42]).await;

    assert!(matches!(
        service.links(GROUP).await,
        Err(Error::NotDrawnYet(group)) if group == GROUP
    ));
    assert!(matches!(
        service
            .reveal(GROUP, "Ana", derive_secret(GROUP, "Ana", 0).as_str())
            .await,
        Err(Error::NotDrawnYet(_))
    ));
}

#[tokio::test]
async fn links_repeat_the_grants_of_the_draw() {
    let service = registered_service([42]).await;

    let drawn = service.draw(GROUP).await.unwrap();

    assert_eq!(service.links(GROUP).await.unwrap(), drawn);
    assert_eq!(service.links(GROUP).await.unwrap(), drawn);
}

#[tokio::test]
async fn unknown_group_is_not_found() {
    let service = Service::new(MapStorage::new(), SequenceSeed::new([1]));

    assert!(matches!(
        service.draw("pascoa").await,
        Err(Error::GroupNotFound(group)) if group == "pascoa"
    ));
    assert!(matches!(
        service.links("pascoa").await,
        Err(Error::GroupNotFound(_))
    ));
}

#[tokio::test]
async fn two_friends_cannot_draw() {
    let service = Service::new(MapStorage::new(), SequenceSeed::new([1]));
    service
        .register("casal", vec!["Ana".into(), "Bruno".into()])
        .await
        .unwrap();

    let err = service.draw("casal").await.unwrap_err();

    assert!(matches!(
        err,
        Error::Draw(DrawError::InsufficientParticipants(2))
    ));
    assert!(!service.group("casal").await.unwrap().is_drawn());
}

#[tokio::test]
async fn register_rejects_duplicates() {
    let service = Service::new(MapStorage::new(), SequenceSeed::new([1]));

    let err = service
        .register(GROUP, vec!["Ana".into(), "Bruno".into(), "Ana".into()])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Draw(DrawError::DuplicateParticipant(name)) if name == "Ana"
    ));
    assert_eq!(service.storage().get_group(GROUP).await.unwrap(), None);
}

#[tokio::test]
async fn register_resets_previous_draw() {
    let service = registered_service([42]).await;
    service.draw(GROUP).await.unwrap();

    service.register(GROUP, FRIENDS.clone()).await.unwrap();

    assert!(!service.group(GROUP).await.unwrap().is_drawn());
}

#[tokio::test]
async fn valid_token_for_outsider_is_unknown_participant() {
    let service = registered_service([42]).await;
    service.draw(GROUP).await.unwrap();

    let err = service
        .reveal(GROUP, "Zeca", derive_secret(GROUP, "Zeca", 42).as_str())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnknownParticipant(name) if name == "Zeca"));
}
