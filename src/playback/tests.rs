use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::fake::FakeSurface;
use super::*;
use crate::catalog::{Catalog, Lyrics, Track, TrackId};
use crate::config::PlayerConfig;

type TestTransport = Transport<FakeSurface, FakeSurface>;

const AUDIO: SurfaceKind = SurfaceKind::Audio;
const VIDEO: SurfaceKind = SurfaceKind::Video;

fn track(id: TrackId, with_video: bool) -> Track {
    Track {
        id,
        title: format!("Track {id}"),
        artist: "Tester".to_string(),
        album: String::new(),
        album_art_url: String::new(),
        audio_src: format!("/media/{id}.mp3"),
        video_bg_src: with_video.then(|| format!("/media/{id}.mp4")),
        lyrics: Lyrics::default(),
    }
}

fn transport_over(tracks: Vec<Track>) -> TestTransport {
    let config = PlayerConfig::default();
    let catalog = Catalog::new(tracks).expect("catalog");
    let engine = MediaSyncEngine::new(
        FakeSurface::new(),
        FakeSurface::new(),
        SyncTolerances::from(&config),
    );
    Transport::new(catalog, engine, &config).with_rng(StdRng::seed_from_u64(7))
}

/// Audio-only catalog with ids `1..=len`.
fn transport(len: u32) -> TestTransport {
    transport_over((1..=len).map(|id| track(id, false)).collect())
}

fn deliver(transport: &mut TestTransport, kind: SurfaceKind, event: SurfaceEvent, now_ms: f64) {
    let generation = transport.generation();
    transport.on_surface_event(kind, generation, event, now_ms);
}

fn buffered(transport: &mut TestTransport) {
    deliver(transport, AUDIO, SurfaceEvent::CanPlayThrough, 0.0);
}

fn audio_plays(transport: &TestTransport) -> usize {
    transport.engine().audio().plays()
}

#[test]
fn starts_idle_with_default_intent() {
    let mut transport = transport(3);
    assert_eq!(transport.phase(), TransportPhase::Idle);
    assert_eq!(transport.intent(), &PlaybackIntent::default());

    transport.play_pause();
    assert_eq!(transport.phase(), TransportPhase::Idle);
    assert_eq!(audio_plays(&transport), 0);
}

#[test]
fn selected_track_loads_then_plays_once_buffered() {
    let mut transport = transport(3);
    assert!(transport.select_track(2));
    assert_eq!(transport.phase(), TransportPhase::Loading);
    assert!(transport.intent().playing);
    assert_eq!(audio_plays(&transport), 0);

    buffered(&mut transport);
    assert_eq!(transport.phase(), TransportPhase::Playing);
    assert_eq!(audio_plays(&transport), 1);

    assert!(!transport.select_track(99));
    assert_eq!(transport.current_index(), Some(1));
}

#[test]
fn next_after_playing_the_middle_track_starts_the_last_one() {
    let mut transport = transport(3);
    transport.select_track(2);
    buffered(&mut transport);
    deliver(&mut transport, AUDIO, SurfaceEvent::TimeUpdate { position: 12.0 }, 0.0);
    assert_eq!(transport.intent().current_time, 12.0);

    transport.next();

    assert_eq!(transport.current_index(), Some(2));
    assert_eq!(transport.intent().current_time, 0.0);
    assert!(transport.intent().playing);
}

#[test]
fn next_and_previous_wrap_around() {
    let mut transport = transport(4);
    transport.select_track(1);
    transport.previous();
    assert_eq!(transport.current_index(), Some(3));
    transport.next();
    assert_eq!(transport.current_index(), Some(0));
}

#[test]
fn next_and_previous_without_a_track_pick_the_ends() {
    let mut forward = transport(4);
    forward.next();
    assert_eq!(forward.current_index(), Some(0));

    let mut backward = transport(4);
    backward.previous();
    assert_eq!(backward.current_index(), Some(3));
}

#[test]
fn shuffle_may_pick_the_current_track() {
    let mut transport = transport(1);
    transport.select_track(1);
    transport.set_shuffle(true);
    transport.next();

    assert_eq!(transport.current_index(), Some(0));
    assert_eq!(transport.engine().audio().loads().len(), 2);
}

#[test]
fn shuffle_stays_inside_the_catalog() {
    let mut transport = transport(5);
    transport.set_shuffle(true);
    for _ in 0..50 {
        transport.next();
        assert!(transport.current_index().is_some_and(|index| index < 5));
    }
}

#[test]
fn unmuting_restores_the_previous_volume() {
    let mut transport = transport(2);
    transport.set_volume(0.5);
    transport.set_muted(true);
    assert_eq!(transport.intent().effective_volume(), 0.0);
    assert_eq!(transport.engine().audio().volume, 0.0);

    transport.set_muted(false);
    assert_eq!(transport.intent().effective_volume(), 0.5);
    assert_eq!(transport.engine().audio().volume, 0.5);
}

#[test]
fn zero_volume_mutes_and_raising_does_not_unmute() {
    let mut transport = transport(2);
    transport.set_volume(0.0);
    assert!(transport.intent().muted);

    transport.set_volume(0.3);
    assert!(transport.intent().muted);
    assert_eq!(transport.intent().effective_volume(), 0.0);

    transport.set_volume(7.0);
    assert_eq!(transport.intent().volume, 1.0);
}

#[test]
fn keyboard_volume_steps_are_clamped() {
    let mut transport = transport(2);
    transport.apply_shortcut(ShortcutAction::VolumeUp);
    assert_eq!(transport.intent().volume, 0.8);

    for _ in 0..12 {
        transport.apply_shortcut(ShortcutAction::VolumeDown);
    }
    assert_eq!(transport.intent().volume, 0.0);
    assert!(transport.intent().muted);

    transport.apply_shortcut(ShortcutAction::ToggleMute);
    assert!(!transport.intent().muted);
}

#[test]
fn ended_with_repeat_restarts_the_same_track() {
    let mut transport = transport(3);
    transport.set_repeat(true);
    transport.select_track(1);
    buffered(&mut transport);
    deliver(&mut transport, AUDIO, SurfaceEvent::TimeUpdate { position: 95.0 }, 0.0);

    deliver(&mut transport, AUDIO, SurfaceEvent::Ended, 0.0);

    assert_eq!(transport.current_index(), Some(0));
    assert_eq!(transport.intent().current_time, 0.0);
    assert!(transport.intent().playing);
    assert_eq!(transport.engine().audio().loads().len(), 1);
    assert_eq!(audio_plays(&transport), 2);
}

#[test]
fn ended_with_repeat_after_pause_stays_paused_at_the_start() {
    let mut transport = transport(3);
    transport.set_repeat(true);
    transport.select_track(1);
    buffered(&mut transport);
    deliver(&mut transport, AUDIO, SurfaceEvent::TimeUpdate { position: 95.0 }, 0.0);
    transport.play_pause();
    assert_eq!(transport.phase(), TransportPhase::Paused);

    // An `ended` queued before the pause landed.
    deliver(&mut transport, AUDIO, SurfaceEvent::Ended, 0.0);

    assert_eq!(transport.current_index(), Some(0));
    assert_eq!(transport.intent().current_time, 0.0);
    assert!(!transport.intent().playing);
    assert_eq!(transport.phase(), TransportPhase::Paused);
    assert_eq!(audio_plays(&transport), 1);

    transport.play_pause();
    assert_eq!(audio_plays(&transport), 2);
    assert_eq!(transport.phase(), TransportPhase::Playing);
}

#[test]
fn ended_without_repeat_advances() {
    let mut transport = transport(3);
    transport.select_track(3);
    buffered(&mut transport);

    deliver(&mut transport, AUDIO, SurfaceEvent::Ended, 0.0);

    assert_eq!(transport.current_index(), Some(0));
    assert!(transport.intent().playing);
}

#[test]
fn seek_clamps_into_the_known_duration() {
    let mut transport = transport(1);
    transport.select_track(1);
    transport.seek(50.0, 0.0);
    assert_eq!(transport.intent().current_time, 50.0, "no upper bound before metadata");

    deliver(&mut transport, AUDIO, SurfaceEvent::Metadata { duration: 200.0 }, 0.0);
    transport.seek(500.0, 1_000.0);
    assert_eq!(transport.intent().current_time, 200.0);

    transport.seek(-3.0, 2_000.0);
    assert_eq!(transport.intent().current_time, 0.0);

    transport.seek(f64::NAN, 3_000.0);
    assert_eq!(transport.intent().current_time, 0.0);
}

#[test]
fn pending_seek_is_not_overwritten_by_stale_time_updates() {
    let mut transport = transport(1);
    transport.select_track(1);
    buffered(&mut transport);

    transport.seek(60.0, 1_000.0);
    deliver(&mut transport, AUDIO, SurfaceEvent::TimeUpdate { position: 1.0 }, 1_100.0);
    assert_eq!(transport.intent().current_time, 60.0);

    deliver(&mut transport, AUDIO, SurfaceEvent::TimeUpdate { position: 60.2 }, 1_300.0);
    assert_eq!(transport.intent().current_time, 60.2);
}

#[test]
fn ready_event_from_an_abandoned_track_is_ignored() {
    let mut transport = transport(3);
    transport.select_track(1);
    let first = transport.generation();
    transport.select_track(2);

    transport.on_surface_event(AUDIO, first, SurfaceEvent::CanPlayThrough, 0.0);
    assert_eq!(transport.phase(), TransportPhase::Loading);
    assert_eq!(audio_plays(&transport), 0);

    buffered(&mut transport);
    assert_eq!(transport.phase(), TransportPhase::Playing);
    assert_eq!(transport.current_index(), Some(1));
}

#[test]
fn rejected_play_shows_paused_until_the_user_retries() {
    let mut transport = transport(2);
    transport.select_track(1);
    buffered(&mut transport);
    deliver(
        &mut transport,
        AUDIO,
        SurfaceEvent::PlayRejected {
            reason: "NotAllowedError".to_string(),
        },
        0.0,
    );

    let snapshot = transport.snapshot();
    assert!(!snapshot.is_playing);
    assert!(snapshot.wants_playing);
    assert!(snapshot.notice.is_some());
    assert_eq!(snapshot.phase, TransportPhase::Paused);

    transport.play_pause();
    assert_eq!(audio_plays(&transport), 2);
    deliver(&mut transport, AUDIO, SurfaceEvent::PlayStarted, 0.0);
    assert!(transport.snapshot().is_playing);
}

#[test]
fn audio_load_failure_is_fatal_until_retried() {
    let mut transport = transport(2);
    transport.select_track(1);
    deliver(
        &mut transport,
        AUDIO,
        SurfaceEvent::LoadFailed {
            reason: "MEDIA_ERR_SRC_NOT_SUPPORTED".to_string(),
        },
        0.0,
    );

    let snapshot = transport.snapshot();
    assert_eq!(snapshot.phase, TransportPhase::Failed);
    assert!(!snapshot.wants_playing);
    assert!(snapshot.error.is_some());

    transport.play_pause();
    assert_eq!(transport.phase(), TransportPhase::Loading);
    assert!(transport.intent().playing);
    assert_eq!(transport.engine().audio().loads().len(), 2);
    assert!(transport.snapshot().error.is_none());
}

#[test]
fn video_failure_hides_video_for_that_track_only() {
    let mut transport = transport_over(vec![track(1, true), track(2, true)]);
    transport.select_track(1);
    deliver(
        &mut transport,
        VIDEO,
        SurfaceEvent::LoadFailed {
            reason: "404".to_string(),
        },
        0.0,
    );
    buffered(&mut transport);

    let snapshot = transport.snapshot();
    assert!(snapshot.show_video);
    assert!(!snapshot.video_visible);
    assert!(snapshot.notice.is_some());
    assert_eq!(snapshot.phase, TransportPhase::Playing);

    transport.next();
    assert!(transport.snapshot().video_visible);
    assert!(transport.snapshot().notice.is_none());
}

#[test]
fn rejected_video_shows_a_notice_and_keeps_audio_playing() {
    let mut transport = transport_over(vec![track(1, true)]);
    transport.select_track(1);
    buffered(&mut transport);
    deliver(&mut transport, VIDEO, SurfaceEvent::CanPlayThrough, 0.0);
    deliver(&mut transport, AUDIO, SurfaceEvent::PlayStarted, 0.0);
    assert!(transport.video_presentable());

    deliver(
        &mut transport,
        VIDEO,
        SurfaceEvent::PlayRejected {
            reason: "NotAllowedError".to_string(),
        },
        0.0,
    );

    let snapshot = transport.snapshot();
    assert!(!snapshot.video_presentable);
    assert!(snapshot.notice.is_some());
    assert!(snapshot.is_playing);
    assert_eq!(snapshot.phase, TransportPhase::Playing);

    // Pause and play again retries the video.
    transport.play_pause();
    transport.play_pause();
    assert!(transport.video_presentable());
}

#[test]
fn hiding_video_keeps_the_intent_flag() {
    let mut transport = transport_over(vec![track(1, true)]);
    transport.select_track(1);
    buffered(&mut transport);
    deliver(&mut transport, VIDEO, SurfaceEvent::CanPlayThrough, 0.0);
    assert!(transport.snapshot().video_presentable);

    transport.set_video_visible(false);
    let snapshot = transport.snapshot();
    assert!(!snapshot.show_video);
    assert!(!snapshot.video_presentable);
    assert!(transport.engine().video().paused);
}

#[test]
fn speed_is_clamped_and_invalid_values_ignored() {
    let mut transport = transport(1);
    transport.set_speed(1.5);
    assert_eq!(transport.intent().speed, 1.5);
    assert_eq!(transport.engine().audio().rate, 1.5);

    transport.set_speed(10.0);
    assert_eq!(transport.intent().speed, 4.0);

    transport.set_speed(f64::NAN);
    transport.set_speed(-1.0);
    assert_eq!(transport.intent().speed, 4.0);
}

#[test]
fn pausing_while_loading_keeps_playback_from_starting() {
    let mut transport = transport(2);
    transport.select_track(1);
    transport.play_pause();
    buffered(&mut transport);

    assert_eq!(transport.phase(), TransportPhase::Paused);
    assert_eq!(audio_plays(&transport), 0);

    transport.play_pause();
    assert_eq!(transport.phase(), TransportPhase::Playing);
    assert_eq!(audio_plays(&transport), 1);
}

#[test]
fn snapshot_labels_show_elapsed_and_remaining() {
    let mut transport = transport(1);
    transport.select_track(1);
    buffered(&mut transport);
    deliver(&mut transport, AUDIO, SurfaceEvent::Metadata { duration: 185.0 }, 0.0);
    deliver(&mut transport, AUDIO, SurfaceEvent::TimeUpdate { position: 65.4 }, 0.0);

    let snapshot = transport.snapshot();
    assert_eq!(snapshot.elapsed_label(), "1:05");
    assert_eq!(snapshot.remaining_label(), "-1:59");
    assert_eq!(snapshot.track.map(|track| track.id), Some(1));
}

#[derive(Debug, Clone)]
enum Op {
    Next,
    Previous,
    PlayPause,
    Volume(f64),
    Seek(f64),
    Shuffle(bool),
    Shortcut(usize),
    Ready,
    Ended,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Next),
        Just(Op::Previous),
        Just(Op::PlayPause),
        (-2.0f64..3.0).prop_map(Op::Volume),
        (-50.0f64..500.0).prop_map(Op::Seek),
        any::<bool>().prop_map(Op::Shuffle),
        (0usize..6).prop_map(Op::Shortcut),
        Just(Op::Ready),
        Just(Op::Ended),
    ]
}

const SHORTCUTS: [ShortcutAction; 6] = [
    ShortcutAction::PlayPause,
    ShortcutAction::Next,
    ShortcutAction::Previous,
    ShortcutAction::VolumeUp,
    ShortcutAction::VolumeDown,
    ShortcutAction::ToggleMute,
];

proptest! {
    #[test]
    fn transport_invariants_hold_for_any_operation_sequence(
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let mut transport = transport(4);
        let mut now = 0.0;
        for op in ops {
            now += 50.0;
            match op {
                Op::Next => transport.next(),
                Op::Previous => transport.previous(),
                Op::PlayPause => transport.play_pause(),
                Op::Volume(level) => transport.set_volume(level),
                Op::Seek(time) => transport.seek(time, now),
                Op::Shuffle(on) => transport.set_shuffle(on),
                Op::Shortcut(index) => transport.apply_shortcut(SHORTCUTS[index]),
                Op::Ready => buffered(&mut transport),
                Op::Ended => deliver(&mut transport, AUDIO, SurfaceEvent::Ended, now),
            }

            let intent = transport.intent();
            prop_assert!((0.0..=1.0).contains(&intent.volume));
            prop_assert!(intent.current_time >= 0.0);
            prop_assert!(transport.current_index().map_or(true, |index| index < 4));
            if intent.muted {
                prop_assert_eq!(intent.effective_volume(), 0.0);
            } else {
                prop_assert_eq!(intent.effective_volume(), intent.volume);
            }
        }
    }
}
