//! Session tests - behavior shared by both modes through `GameSession`

use rand::rngs::mock::StepRng;
use tui_tilegrid::core::{
    FallingSession, GameSession, Grid, SimpleRng, SlidingConfig, SlidingSession, Transition,
};
use tui_tilegrid::types::{Direction, FallCommand, SlideCommand};

/// Apply every command, checking the high score never drops below the score
fn play<S: GameSession>(session: &mut S, commands: impl IntoIterator<Item = S::Command>) {
    let mut best = session.high_score();
    for command in commands {
        let score_before = session.score();
        let t = session.apply_command(command).unwrap();
        assert!(session.high_score() >= best);
        assert!(session.high_score() >= session.score());
        if !t.changed {
            assert_eq!(session.score(), score_before);
        }
        assert_eq!(t.game_over, session.game_over());
        best = session.high_score();
    }
}

#[test]
fn test_sliding_high_score_never_decreases() {
    let mut session = SlidingSession::with_seed(5).unwrap();
    let commands = (0..300).map(|i| match i {
        150 => SlideCommand::NewGame,
        _ => SlideCommand::Slide(Direction::ALL[(i * 7 + i / 3) % 4]),
    });
    play(&mut session, commands);
}

#[test]
fn test_falling_high_score_never_decreases() {
    let mut session = FallingSession::with_seed(5).unwrap();
    let cycle = [
        FallCommand::Left,
        FallCommand::Left,
        FallCommand::Down,
        FallCommand::Drop,
        FallCommand::Right,
        FallCommand::Right,
        FallCommand::Right,
        FallCommand::Drop,
    ];
    let commands = cycle.iter().copied().cycle().take(400).enumerate().map(|(i, c)| {
        if i == 200 {
            FallCommand::NewGame
        } else {
            c
        }
    });
    play(&mut session, commands);
}

#[test]
fn test_injected_rng_drives_spawns() {
    // A zero generator picks the first empty cell and always spawns a 4.
    let mut session = SlidingSession::new(SlidingConfig::default(), StepRng::new(0, 0)).unwrap();
    assert_eq!(session.grid().rows()[0], vec![4, 4, 0, 0]);

    let t = session
        .apply_command(SlideCommand::Slide(Direction::Left))
        .unwrap();

    assert_eq!(
        t,
        Transition {
            changed: true,
            score_delta: 8,
            game_over: false
        }
    );
    assert_eq!(session.grid().rows()[0], vec![8, 4, 0, 0]);
}

#[test]
fn test_new_game_resets_score_but_not_high_score() {
    let mut session = SlidingSession::new(SlidingConfig::default(), StepRng::new(0, 0)).unwrap();
    session
        .apply_command(SlideCommand::Slide(Direction::Left))
        .unwrap();
    assert_eq!(session.high_score(), 8);

    session.new_game().unwrap();

    assert_eq!(session.score(), 0);
    assert_eq!(session.high_score(), 8);
    assert_eq!(session.grid().sum(), 8);
}

#[test]
fn test_custom_dimensions_and_spawn_count() {
    let config = SlidingConfig {
        height: 3,
        width: 5,
        initial_tiles: 4,
        four_probability: 0.0,
    };
    let session = SlidingSession::new(config, SimpleRng::new(10)).unwrap();

    assert_eq!((session.grid().height(), session.grid().width()), (3, 5));
    assert_eq!(session.grid().empty_cells().len(), 11);
    assert_eq!(session.grid().sum(), 8);
}

#[test]
fn test_sessions_without_tiles_are_not_over() {
    let config = SlidingConfig {
        initial_tiles: 0,
        ..SlidingConfig::default()
    };
    let session = SlidingSession::new(config, SimpleRng::new(3)).unwrap();
    assert_eq!(session.grid().empty_cells().len(), 16);
    assert!(!session.game_over());

    let wrapped = SlidingSession::from_grid(Grid::new(4, 4), SimpleRng::new(3)).unwrap();
    assert!(!wrapped.game_over());
}
