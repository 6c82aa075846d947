//! Session lifecycle: dispatch, win mediation, teardown.

use proptest::prelude::*;
use valweek_core::config::Config;
use valweek_core::days::DayKey;
use valweek_core::games::{Choice, GameInput, GameView, JIGSAW_PHOTO_ID};
use valweek_core::session::{GameSession, CARD_FILE_NAME};
use valweek_core::storage::{
    JsonProgressStore, MemoryPhotoStore, MemoryProgressStore, PhotoStore, ProgressStore,
};
use valweek_core::{Event, Phase};

fn open_day(day: DayKey, dir: &std::path::Path) -> GameSession {
    let config = Config::default();
    let progress = Box::new(JsonProgressStore::open(dir.join("progress.json")));
    let photos = MemoryPhotoStore::new();
    let (session, _) = GameSession::open(
        day,
        &config,
        progress,
        &photos,
        dir.to_path_buf(),
        7,
    );
    session
}

fn has_won(events: &[Event]) -> bool {
    events.iter().any(|e| matches!(e, Event::GameWon { .. }))
}

#[test]
fn hug_win_marks_progress_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_day(DayKey::Hug, dir.path());

    session.input(GameInput::Press);
    let events = session.advance(6000);
    assert!(has_won(&events));
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::ProgressMarked { day: DayKey::Hug, .. })));

    // No re-trigger, no matter how long we keep going.
    session.input(GameInput::Press);
    assert!(session.advance(60_000).is_empty());

    let reloaded = JsonProgressStore::open(dir.path().join("progress.json"));
    assert!(reloaded.is_completed(DayKey::Hug));
    assert_eq!(reloaded.load_all().len(), 1);
}

#[test]
fn closing_mid_hold_stops_every_tick() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_day(DayKey::Hug, dir.path());

    session.input(GameInput::Press);
    session.advance(3000);
    session.close();

    // Nothing fires into the torn-down session.
    assert!(session.advance(60_000).is_empty());
    assert!(session.input(GameInput::Release).is_empty());
    assert!(session.is_closed());
    assert_eq!(session.phase(), Phase::InProgress);

    let reloaded = JsonProgressStore::open(dir.path().join("progress.json"));
    assert!(!reloaded.is_completed(DayKey::Hug));
}

#[test]
fn kiss_win_lands_through_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_day(DayKey::Kiss, dir.path());

    session.input(GameInput::Press);
    // Per-tick gain is at most ~1.2%, so the meter cannot jump the band.
    loop {
        session.advance(20);
        let GameView::Kiss(v) = session.view() else {
            panic!("expected kiss view");
        };
        if v.pct >= 45.0 {
            break;
        }
    }
    let events = session.input(GameInput::Release);
    assert!(has_won(&events));
}

#[test]
fn memory_quiz_wins_even_without_photos() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_day(DayKey::Valentine, dir.path());

    for _ in 0..3 {
        session.input(GameInput::Answer(Choice::A));
        let events = session.advance(300);
        if has_won(&events) {
            let reloaded = JsonProgressStore::open(dir.path().join("progress.json"));
            assert!(reloaded.is_completed(DayKey::Valentine));
            return;
        }
    }
    panic!("quiz never finished");
}

#[test]
fn pledge_save_writes_the_card_then_wins() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_day(DayKey::Promise, dir.path());

    session.input(GameInput::SelectPledge(2));
    session.input(GameInput::Stroke(vec![(10.0, 10.0), (300.0, 150.0)]));
    let events = session.input(GameInput::SaveCard);

    assert!(events.iter().any(|e| matches!(e, Event::CardSaved { .. })));
    assert!(has_won(&events));
    assert!(dir.path().join(CARD_FILE_NAME).exists());
}

#[test]
fn jigsaw_without_a_photo_is_inert_but_alive() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_day(DayKey::Propose, dir.path());

    assert_eq!(session.phase(), Phase::Degraded);
    assert!(session
        .input(GameInput::PlaceTile {
            tile: 0,
            x: 0.0,
            y: 0.0
        })
        .is_empty());
    assert!(session.advance(1000).is_empty());
}

#[test]
fn jigsaw_with_a_photo_starts_in_progress() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let mut photos = MemoryPhotoStore::new();
    // A real 1x1 PNG; enough for dimension probing.
    photos.put(JIGSAW_PHOTO_ID, &tiny_png()).unwrap();
    let (session, _) = GameSession::open(
        DayKey::Propose,
        &config,
        Box::new(MemoryProgressStore::new()),
        &photos,
        dir.path().to_path_buf(),
        7,
    );
    assert_eq!(session.phase(), Phase::InProgress);
}

#[test]
fn unknown_keys_get_a_placeholder_panel() {
    let mut session = GameSession::open_unknown("brunch", Box::new(MemoryProgressStore::new()));
    assert!(session.day().is_none());
    assert!(session.input(GameInput::Tap { x: 1.0, y: 1.0 }).is_empty());
    assert!(session.advance(1000).is_empty());
    match session.view() {
        GameView::Placeholder { note } => assert_eq!(note, "Not implemented"),
        _ => panic!("expected placeholder view"),
    }
    session.close();
}

fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([200, 120, 150, 255]));
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    bytes
}

proptest! {
    // Any chunking of enough held time wins exactly once.
    #[test]
    fn held_time_wins_exactly_once_regardless_of_chunking(
        chunks in prop::collection::vec(1u64..400, 30..80)
    ) {
        prop_assume!(chunks.iter().sum::<u64>() >= 6500);
        let dir = tempfile::tempdir().unwrap();
        let mut session = open_day(DayKey::Hug, dir.path());
        session.input(GameInput::Press);
        let mut wins = 0;
        for chunk in chunks {
            wins += session
                .advance(chunk)
                .iter()
                .filter(|e| matches!(e, Event::GameWon { .. }))
                .count();
        }
        prop_assert_eq!(wins, 1);
    }
}
