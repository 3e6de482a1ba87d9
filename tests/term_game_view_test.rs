use raindrop::core::{GameConfig, GameSession};
use raindrop::term::{FrameBuffer, GameView, Viewport};
use raindrop::types::Operator;

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_game_view_renders_problems_and_panel() {
    let mut session = GameSession::new(GameConfig::default(), 1);
    session.start(0);
    session.push_problem(Operator::Mul, 6, 7, false);
    session.push_problem(Operator::Add, 2, 2, true);
    session.submit_answer("99");
    session.physics_tick(500);

    let mut snap = session.snapshot(65_000);
    snap.answer_input.push_str("12");

    let fb = GameView::default().render(&snap, Viewport::new(80, 24));
    let text = screen_text(&fb);
    assert_eq!(fb.width(), 80);
    assert_eq!(fb.height(), 24);
    assert!(text.contains("6 × 7"));
    assert!(text.contains("★ 2 + 2"));
    assert!(text.contains("SCORE"));
    assert!(text.contains("0/2"));
    assert!(text.contains("1.05"));
    assert!(text.contains("> 12_"));
    assert!(!text.contains("GAME OVER"));
}

#[test]
fn test_game_view_shows_game_over() {
    let mut session = GameSession::new(GameConfig::default(), 1);
    session.start(0);
    session.push_problem(Operator::Add, 1, 1, false);
    session.push_problem(Operator::Add, 2, 1, false);
    for i in 1..=77 {
        session.physics_tick(i * 500);
    }
    assert!(session.is_over());

    let fb = GameView::default().render(&session.snapshot(40_000), Viewport::new(80, 24));
    let text = screen_text(&fb);
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("2/2"));
    assert!(!text.contains("_"));
}

#[test]
fn test_render_into_reuses_buffer_across_resizes() {
    let session = GameSession::default();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(10, 10);

    view.render_into(&session.snapshot(0), Viewport::new(100, 30), &mut fb);
    assert_eq!((fb.width(), fb.height()), (100, 30));
    assert!(screen_text(&fb).contains("READY"));

    view.render_into(&session.snapshot(0), Viewport::new(60, 20), &mut fb);
    assert_eq!((fb.width(), fb.height()), (60, 20));
}
