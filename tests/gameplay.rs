//! End-to-end game scenarios driven through the public controller API

use anyhow::Result;
use grid_snake::game::{
    CollisionType, Direction, GameConfig, GameController, GameEvent, GameOverCause, Position,
    Snake, SpeedTier, UpdateOutcome, WallMode,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn controller(config: GameConfig, seed: u64) -> Result<GameController> {
    GameController::with_rng(config, StdRng::seed_from_u64(seed))
}

#[test]
fn test_first_move_and_first_meal() -> Result<()> {
    let mut game = controller(GameConfig::new(20, 20), 1)?;
    game.start();

    assert_eq!(game.state().snake.head(), Position::new(10, 10));
    assert!(game.state().snake.direction.is_idle());

    // Plain move to the right
    assert!(game.handle_key("ArrowRight"));
    game.state_mut().food = Position::new(0, 0);
    assert_eq!(game.update(), UpdateOutcome::Moved);
    assert_eq!(game.state().snake.head(), Position::new(11, 10));
    assert_eq!(game.state().snake.len(), 1);

    // Same again, this time with food on the target cell
    game.start();
    game.drain_events().for_each(drop);
    game.steer(Direction::Right);
    game.state_mut().food = Position::new(11, 10);

    assert_eq!(game.update(), UpdateOutcome::AteFood);
    let state = game.state();
    assert_eq!(state.snake.head(), Position::new(11, 10));
    assert_eq!(state.snake.len(), 1);
    assert_eq!(state.score, 10);
    assert!(!state.snake.occupies(state.food));
    assert_eq!(
        game.drain_events().collect::<Vec<_>>(),
        vec![GameEvent::ScoreChanged(10)]
    );
    Ok(())
}

#[test]
fn test_running_into_the_right_wall() -> Result<()> {
    let mut game = controller(GameConfig::new(20, 20), 2)?;
    game.start();
    game.state_mut().snake = Snake::from_segments([Position::new(19, 10)], Direction::Right);
    game.state_mut().food = Position::new(0, 0);
    game.drain_events().for_each(drop);

    let outcome = game.update();

    assert_eq!(
        outcome,
        UpdateOutcome::GameOver(GameOverCause::Collision(CollisionType::Wall))
    );
    assert!(!game.is_running());
    assert!(!game.ticker().is_running());
    assert_eq!(
        game.drain_events().collect::<Vec<_>>(),
        vec![GameEvent::GameOver {
            final_score: 0,
            cause: GameOverCause::Collision(CollisionType::Wall),
        }]
    );

    // A stopped game ignores further ticks
    assert_eq!(game.update(), UpdateOutcome::Idle);
    Ok(())
}

#[test]
fn test_same_edge_with_wall_pass() -> Result<()> {
    let mut game = controller(GameConfig::new(20, 20), 3)?;
    game.set_mode(WallMode::Pass);
    game.start();
    game.state_mut().snake = Snake::from_segments([Position::new(19, 10)], Direction::Right);
    game.state_mut().food = Position::new(5, 5);

    assert_eq!(game.update(), UpdateOutcome::Moved);
    assert_eq!(game.state().snake.head(), Position::new(0, 10));
    assert!(game.is_running());
    Ok(())
}

#[test]
fn test_growing_snake_over_several_meals() -> Result<()> {
    let mut game = controller(GameConfig::new(20, 20), 4)?;
    game.start();
    game.steer(Direction::Right);

    for step in 1..=5 {
        let head = game.state().snake.head();
        game.state_mut().food = head.moved_in_direction(Direction::Right);
        assert_eq!(game.update(), UpdateOutcome::AteFood, "step {step}");
        assert_eq!(game.state().score, 10 * step);
    }
    // The fifth meal's growth lands on the next move
    game.state_mut().food = Position::new(0, 0);
    game.update();
    assert_eq!(game.state().snake.len(), 6);
    assert_eq!(game.state().snake.head(), Position::new(16, 10));
    Ok(())
}

#[test]
fn test_reversal_is_ignored_between_ticks() -> Result<()> {
    let mut game = controller(GameConfig::new(20, 20), 5)?;
    game.start();
    game.steer(Direction::Right);
    game.state_mut().food = Position::new(0, 0);
    game.update();

    assert!(!game.handle_key("a"));
    assert!(!game.handle_key("ArrowLeft"));
    assert!(!game.handle_key("space"));
    game.update();
    assert_eq!(game.state().snake.head(), Position::new(12, 10));
    Ok(())
}

#[test]
fn test_speed_change_mid_game() -> Result<()> {
    let mut game = controller(GameConfig::new(20, 20), 6)?;
    game.start();
    game.steer(Direction::Down);
    game.state_mut().food = Position::new(0, 0);
    game.update();

    game.set_speed(SpeedTier::Slow);

    assert!(game.is_running());
    assert_eq!(game.ticker().period(), SpeedTier::Slow.tick_interval());
    assert_eq!(game.state().snake.head(), Position::new(10, 11));
    assert_eq!(game.state().steps, 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_ticks_drive_the_snake() -> Result<()> {
    let mut game = controller(GameConfig::new(20, 20), 7)?;
    game.start();
    game.steer(Direction::Up);
    game.state_mut().food = Position::new(0, 0);

    for _ in 0..3 {
        game.next_tick().await;
        game.update();
    }

    assert_eq!(game.state().snake.head(), Position::new(10, 7));
    Ok(())
}
