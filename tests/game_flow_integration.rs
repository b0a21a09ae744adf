/// Integration tests for game flow scenarios
///
/// These tests drive the concurrent table surface end to end: construction
/// and dealing, turn rotation, event fan-out to every seat, cue and aware
/// semantics, and full games running to a terminal status.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hanabi::{
    Card, Color, Game, GameError, GameEvent, GameSettings, GameStatus, Hint, Player,
    constants::{DECK_SIZE, MAX_FUSE_TOKENS, MAX_INFO_TOKENS, hand_size},
};

/// A hand is invisible to its owner, so tests read it through a neighbor.
async fn visible_hand(players: &[Player], target: usize) -> Vec<Card> {
    let viewer = (target + 1) % players.len();
    players[viewer].aware(target).await.unwrap()
}

fn seeded(player_count: usize, seed: u64) -> (Game, Vec<Player>) {
    Game::with_settings(&GameSettings::new(player_count).with_seed(seed)).unwrap()
}

#[tokio::test]
async fn test_construction_deals_the_whole_deck() {
    for count in 2..=5 {
        let (game, players) = Game::new(count).unwrap();
        let snapshot = game.capture().await;

        let mut dealt = 0;
        for target in 0..count {
            let hand = visible_hand(&players, target).await;
            assert_eq!(hand.len(), hand_size(count));
            dealt += hand.len();
        }

        assert_eq!(dealt + snapshot.deck_len, DECK_SIZE);
        assert_eq!(snapshot.info_tokens, MAX_INFO_TOKENS);
        assert_eq!(snapshot.fuse_tokens, MAX_FUSE_TOKENS);
        assert_eq!(snapshot.current_player, 0);
        assert_eq!(snapshot.status, GameStatus::InProgress);
    }
}

#[tokio::test]
async fn test_invalid_player_counts_are_rejected() {
    for count in [0, 1, 6] {
        assert_eq!(
            Game::new(count).unwrap_err(),
            GameError::InvalidPlayerCount(count)
        );
    }
}

#[tokio::test]
async fn test_turn_rotation_and_event_fanout() {
    let (game, mut players) = seeded(3, 11);
    let mut observer = game.subscribe();

    let first = visible_hand(&players, 0).await[0];
    players[0].discard(0, 0).await.unwrap();
    let second = visible_hand(&players, 1).await[1];
    players[1].discard(1, 1).await.unwrap();

    assert_eq!(game.capture().await.current_player, 2);

    // Every participant, the actors included, sees both events in commit
    // order.
    let expected = [
        GameEvent::Discard {
            player: 0,
            card: first,
        },
        GameEvent::Discard {
            player: 1,
            card: second,
        },
    ];
    for player in &mut players {
        for event in &expected {
            assert_eq!(player.events().recv().await.unwrap(), *event);
        }
    }
    for event in &expected {
        assert_eq!(observer.recv().await.unwrap(), *event);
    }
}

#[tokio::test]
async fn test_out_of_turn_cue_changes_nothing() {
    let (game, players) = seeded(3, 5);
    let before = game.capture().await;

    let result = players[1].cue(0, Hint::Rank(1)).await;
    assert_eq!(result.unwrap_err(), GameError::NotYourTurn);

    assert_eq!(game.capture().await, before);
}

#[tokio::test]
async fn test_seeded_five_player_play_scenario() {
    let (game, players) = seeded(5, 2024);
    let before = game.capture().await;
    assert_eq!(before.deck_len, DECK_SIZE - 5 * hand_size(5));

    let card = visible_hand(&players, 0).await[3];
    players[0].play(3, 0).await.unwrap();

    let after = game.capture().await;
    let slot = card.color().index();
    if card.rank() == before.played[slot] + 1 {
        assert_eq!(after.played[slot], before.played[slot] + 1);
        assert_eq!(after.fuse_tokens, before.fuse_tokens);
    } else {
        assert_eq!(after.played, before.played);
        assert_eq!(after.fuse_tokens, before.fuse_tokens - 1);
    }
    assert_eq!(after.deck_len, before.deck_len - 1);
    assert_eq!(after.current_player, 1);
}

#[tokio::test]
async fn test_cue_reports_matching_positions() {
    let (game, mut players) = seeded(2, 77);

    let hand = visible_hand(&players, 1).await;
    let color = hand[0].color();
    let expected: Vec<usize> = hand
        .iter()
        .enumerate()
        .filter(|(_, card)| card.color() == color)
        .map(|(i, _)| i)
        .collect();

    players[0].cue(1, Hint::Color(color)).await.unwrap();

    assert_eq!(game.capture().await.info_tokens, MAX_INFO_TOKENS - 1);
    let event = players[1].events().recv().await.unwrap();
    assert_eq!(
        event,
        GameEvent::Cue {
            from: 0,
            to: 1,
            indices: expected,
            hint: Hint::Color(color),
        }
    );
}

#[tokio::test]
async fn test_cue_with_no_matching_cards_is_rejected() {
    // Four-card hands can't cover all five colors, so some color is always
    // absent.
    let (game, players) = seeded(5, 3);
    let hand = visible_hand(&players, 1).await;
    let absent = Color::ALL
        .into_iter()
        .find(|color| hand.iter().all(|card| card.color() != *color))
        .unwrap();
    let before = game.capture().await;

    let result = players[0].cue(1, Hint::Color(absent)).await;
    assert_eq!(result.unwrap_err(), GameError::NoMatchingCards);

    assert_eq!(game.capture().await, before);
}

#[tokio::test]
async fn test_aware_is_fenced_and_detached() {
    let (_game, players) = seeded(3, 8);

    assert_eq!(
        players[1].aware(1).await.unwrap_err(),
        GameError::SelfInspection
    );

    let mut copy = players[0].aware(2).await.unwrap();
    copy.push(Card(1, Color::White));
    copy.swap(0, 1);

    // The real hand is untouched by whatever the viewer does to the copy.
    let again = players[0].aware(2).await.unwrap();
    assert_eq!(again.len(), hand_size(3));
    assert_ne!(again, copy);
}

#[tokio::test]
async fn test_discard_restores_hand_size_and_refunds_token() {
    let (game, players) = seeded(5, 21);

    // Spend a token first so the refund is visible under the cap.
    let color = visible_hand(&players, 1).await[0].color();
    players[0].cue(1, Hint::Color(color)).await.unwrap();
    assert_eq!(game.capture().await.info_tokens, MAX_INFO_TOKENS - 1);

    players[1].discard(2, 3).await.unwrap();

    assert_eq!(game.capture().await.info_tokens, MAX_INFO_TOKENS);
    assert_eq!(visible_hand(&players, 1).await.len(), hand_size(5));
}

#[tokio::test]
async fn test_concurrent_seats_serialize_into_rotation_order() {
    const ROUNDS: usize = 4;
    let (game, players) = seeded(3, 42);
    let mut observer = game.subscribe();
    let player_count = players.len();

    let mut tasks = Vec::new();
    for player in players {
        let game = game.clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..ROUNDS {
                loop {
                    let snapshot = game.capture().await;
                    if snapshot.status.is_terminal() {
                        return;
                    }
                    if snapshot.current_player == player.id() {
                        player.discard(0, 0).await.unwrap();
                        break;
                    }
                    tokio::task::yield_now().await;
                }
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    // Actions raced from three tasks, but the write lock serialized them
    // into strict turn order.
    for round in 0..ROUNDS {
        for seat in 0..player_count {
            match observer.recv().await.unwrap() {
                GameEvent::Discard { player, .. } => {
                    assert_eq!(player, seat, "round {round}");
                }
                other => panic!("unexpected event {other}"),
            }
        }
    }
    assert_eq!(game.capture().await.current_player, 0);
}

#[tokio::test]
async fn test_random_game_always_reaches_a_terminal_status() {
    let (game, players) = seeded(4, 1234);
    let mut rng = ChaCha8Rng::seed_from_u64(1234);

    for _ in 0..250 {
        let snapshot = game.capture().await;
        if snapshot.status.is_terminal() {
            break;
        }
        let actor = &players[snapshot.current_player];
        let hand_len = visible_hand(&players, actor.id()).await.len();
        let out = rng.random_range(0..hand_len);
        let into = rng.random_range(0..hand_len);
        if rng.random_bool(0.5) {
            actor.play(out, into).await.unwrap();
        } else {
            actor.discard(out, into).await.unwrap();
        }
    }

    let end = game.capture().await;
    match end.status {
        GameStatus::Lost => assert_eq!(end.fuse_tokens, 0),
        GameStatus::Ended => assert_eq!(end.deck_len, 0),
        GameStatus::Won => assert!(end.played.iter().all(|&rank| rank == 5)),
        GameStatus::InProgress => panic!("game did not terminate: {end}"),
    }
}
