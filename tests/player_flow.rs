use std::time::Duration;
use synclyrics::app::actions::Action;
use synclyrics::app::state::PanelView;
use synclyrics::app::{follow, App, FollowSettings};
use synclyrics::config::Config;
use synclyrics::playlist::NewTrack;

fn app_with_lyrics(raw: &str, duration_secs: f64) -> App {
    let mut cfg = Config::default();
    cfg.lyrics.demo_lyrics = false;
    let mut app = App::new(&cfg);
    app.apply(Action::AddTracks(vec![
        NewTrack::new("first.mp3", duration_secs),
        NewTrack::new("second.flac", duration_secs),
    ]));
    app.apply(Action::SetLyrics(raw.to_string()));
    app
}

#[test]
fn panel_highlights_one_row() {
    let mut app = app_with_lyrics("[00:00] a\n[00:15] b\n[00:30] c", 60.0);
    app.apply(Action::Seek(20.0));

    let PanelView::Lines { rows } = app.view() else {
        panic!("expected lines");
    };
    let active: Vec<usize> = rows.iter().filter(|r| r.active).map(|r| r.index).collect();
    assert_eq!(active, vec![1]);
}

#[test]
fn lyrics_survive_track_changes() {
    let mut app = app_with_lyrics("[00:05] kept", 60.0);
    app.apply(Action::Next);
    assert_eq!(app.current_track().map(|t| t.title.as_str()), Some("second"));
    assert_eq!(app.panel().lyrics(), "[00:05] kept");
}

#[test]
fn editing_and_hiding_change_the_view() {
    let mut app = app_with_lyrics("", 60.0);
    assert_eq!(app.view(), PanelView::Empty);

    app.apply(Action::ToggleEditing);
    assert_eq!(app.view(), PanelView::Editing { raw: String::new() });

    app.apply(Action::ToggleLyrics);
    assert_eq!(app.view(), PanelView::Hidden);
}

#[tokio::test(start_paused = true)]
async fn follow_from_offset_at_double_speed() {
    let mut app = app_with_lyrics("[00:00] a\n[00:15] b\n[00:30] c", 32.0);
    let settings = FollowSettings {
        from_secs: 14.0,
        speed: 2.0,
        tick: Duration::from_millis(250),
    };

    let mut texts = Vec::new();
    follow(&mut app, &settings, |change| {
        texts.push(change.line.as_ref().map(|l| l.text.clone()));
        Ok(())
    })
    .await
    .expect("follow");

    assert_eq!(
        texts,
        vec![Some("a".to_string()), Some("b".to_string()), Some("c".to_string())]
    );
    assert_eq!(app.position_secs(), 32.0);
}

#[tokio::test(start_paused = true)]
async fn follow_stops_when_sink_fails() {
    let mut app = app_with_lyrics("[00:00] a\n[00:01] b", 10.0);
    let settings = FollowSettings {
        from_secs: 0.0,
        speed: 1.0,
        tick: Duration::from_millis(100),
    };

    let mut calls = 0;
    let result = follow(&mut app, &settings, |_| {
        calls += 1;
        anyhow::bail!("closed")
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls, 1);
}
