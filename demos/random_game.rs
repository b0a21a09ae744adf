//! A table of random players that plays one full game to its end.
//!
//! Each seat runs on its own task, draining its event stream and acting on
//! its turn; an extra observer prints every committed event. Run with
//! `RUST_LOG=info` to see the engine's own logging interleaved.
//!
//! ```sh
//! cargo run --example random_game
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::time::{Duration, sleep};

use hanabi::{Game, GameSettings, Hint, Player, Snapshot};

async fn run_seat(game: Game, mut player: Player) {
    let mut rng = StdRng::from_os_rng();
    let mut hand_len = 0;

    loop {
        // Keep the event stream drained; a seat that stops reading would
        // start losing the oldest events.
        loop {
            match player.events().try_recv() {
                Ok(event) => println!("seat {} sees: {event}", player.id()),
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
                Err(TryRecvError::Lagged(missed)) => {
                    println!("seat {} lagged by {missed} events", player.id());
                }
            }
        }

        let snapshot = game.capture().await;
        if snapshot.status.is_terminal() {
            return;
        }
        if snapshot.current_player != player.id() {
            sleep(Duration::from_millis(5)).await;
            continue;
        }

        if hand_len == 0 {
            hand_len = starting_hand_len(&game);
        }
        take_turn(&game, &player, &snapshot, &mut hand_len, &mut rng).await;
    }
}

fn starting_hand_len(game: &Game) -> usize {
    hanabi::constants::hand_size(game.player_count())
}

async fn take_turn(
    game: &Game,
    player: &Player,
    snapshot: &Snapshot,
    hand_len: &mut usize,
    rng: &mut impl Rng,
) {
    // Cue sometimes, with an attribute read off a real card so it always
    // lands; otherwise play or discard at random.
    if snapshot.info_tokens > 0 && rng.random_bool(0.3) {
        let target = (player.id() + 1) % game.player_count();
        if let Ok(hand) = player.aware(target).await
            && let Some(card) = hand.first()
        {
            let hint = if rng.random_bool(0.5) {
                Hint::Color(card.color())
            } else {
                Hint::Rank(card.rank())
            };
            if player.cue(target, hint).await.is_ok() {
                return;
            }
        }
    }

    let out = rng.random_range(0..*hand_len);
    let into = rng.random_range(0..*hand_len);
    let result = if rng.random_bool(0.5) {
        player.play(out, into).await
    } else {
        player.discard(out, into).await
    };
    if result.is_ok() && snapshot.deck_len == 0 {
        // Nothing left to draw, so the hand stays one card short.
        *hand_len -= 1;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let (game, players) = Game::with_settings(&GameSettings::new(4))?;

    let mut observer = game.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = observer.recv().await {
            println!("observer sees: {event}");
        }
    });

    let mut seats = Vec::new();
    for player in players {
        seats.push(tokio::spawn(run_seat(game.clone(), player)));
    }
    for seat in seats {
        seat.await?;
    }

    let end = game.capture().await;
    println!("final: {end}");
    Ok(())
}
