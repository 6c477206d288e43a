// Host-side tests for cue dispatch, the deferred-init queue and the ambient bed.

use studio_core::audio::{
    chord_tones, cue_tones, AudioInit, CueDispatcher, Dispatch, AMBIENT_CHORDS,
};
use studio_core::{Cue, AMBIENT_PERIOD_MS};

fn ready() -> CueDispatcher {
    let mut d = CueDispatcher::new();
    assert!(d.begin_init());
    assert!(d.finish_init(true).is_empty());
    d
}

#[test]
fn cues_before_init_are_queued_and_played_once() {
    let mut d = CueDispatcher::new();
    assert_eq!(d.dispatch(Cue::Click), Dispatch::Deferred { start_init: true });
    assert_eq!(d.dispatch(Cue::Hover), Dispatch::Deferred { start_init: false });
    assert_eq!(d.init_state(), AudioInit::Pending);
    assert!(!d.begin_init());

    assert_eq!(d.finish_init(true), vec![Cue::Click, Cue::Hover]);
    assert!(d.finish_init(true).is_empty());
    assert!(d.queued().is_empty());
    assert!(matches!(d.dispatch(Cue::Click), Dispatch::Play(_)));
}

#[test]
fn failed_init_leaves_the_page_silent() {
    let mut d = CueDispatcher::new();
    d.dispatch(Cue::Scroll);
    assert!(d.finish_init(false).is_empty());
    assert_eq!(d.init_state(), AudioInit::Failed);
    assert_eq!(d.dispatch(Cue::Scroll), Dispatch::Unavailable);
    assert!(!d.start_music(0.0));
}

#[test]
fn mute_silences_cues_and_music() {
    let mut d = ready();
    assert!(d.start_music(0.0));
    assert!(d.toggle_mute(10.0));
    assert_eq!(d.dispatch(Cue::Click), Dispatch::Muted);
    assert!(d.poll_music(10.0).is_none());
    assert!(!d.status().background_music_playing);

    assert!(!d.toggle_mute(20.0));
    assert!(d.status().background_music_playing);
    assert!(matches!(d.dispatch(Cue::Click), Dispatch::Play(_)));
}

#[test]
fn init_completed_before_resume_stops_queueing() {
    let mut d = CueDispatcher::new();
    assert!(d.begin_init());
    assert_eq!(d.dispatch(Cue::Scroll), Dispatch::Deferred { start_init: false });
    // the graph exists even though the context may still be suspended
    assert_eq!(d.finish_init(true), vec![Cue::Scroll]);
    for _ in 0..10 {
        assert!(matches!(d.dispatch(Cue::Click), Dispatch::Play(_)));
    }
    assert!(d.queued().is_empty());
    // a gesture starts the deferred bed once init is ready
    assert!(d.start_music(100.0));
}

#[test]
fn unmute_leaves_an_unstarted_bed_silent() {
    let mut d = ready();
    assert!(d.toggle_mute(0.0));
    assert!(!d.toggle_mute(10.0));
    assert!(!d.music_wanted());
    assert!(!d.status().background_music_playing);
    assert!(d.poll_music(10.0).is_none());
}

#[test]
fn music_started_while_muted_begins_on_unmute() {
    let mut d = ready();
    d.toggle_mute(0.0);
    assert!(!d.start_music(5.0));
    assert!(!d.toggle_mute(10.0));
    assert!(d.status().background_music_playing);
}

#[test]
fn ambient_bed_cycles_chords_and_skips_stalls() {
    let mut d = ready();
    assert!(d.start_music(0.0));
    assert!(!d.start_music(5.0));

    let first = d.poll_music(0.0).unwrap();
    assert_eq!(first[0].freq_hz, AMBIENT_CHORDS[0][0]);
    assert!(d.poll_music(AMBIENT_PERIOD_MS - 1.0).is_none());
    let second = d.poll_music(AMBIENT_PERIOD_MS).unwrap();
    assert_eq!(second[0].freq_hz, AMBIENT_CHORDS[1][0]);

    // one chord after a long stall, then the regular period again
    assert!(d.poll_music(20_000.0).is_some());
    assert!(d.poll_music(20_000.0 + AMBIENT_PERIOD_MS - 1.0).is_none());
    assert!(d.poll_music(20_000.0 + AMBIENT_PERIOD_MS).is_some());

    d.stop_all();
    assert!(!d.music_wanted());
    assert!(d.poll_music(60_000.0).is_none());
}

#[test]
fn volumes_are_clamped() {
    let mut d = ready();
    d.set_volume(2.0);
    d.set_music_volume(-1.0);
    let status = d.status();
    assert_eq!(status.volume, 1.0);
    assert_eq!(status.music_volume, 0.0);
    assert!(status.initialized);
}

#[test]
fn every_cue_has_audible_tones() {
    for cue in Cue::ALL {
        let tones = cue_tones(cue, 0.5);
        assert!(!tones.is_empty(), "{cue:?}");
        for t in &tones {
            assert!(t.freq_hz > 20.0 && t.duration_sec > 0.0, "{cue:?}");
            assert!(t.peak > 0.0 && t.peak <= 0.5, "{cue:?}");
        }
    }
    let intro = cue_tones(Cue::Intro, 1.0);
    assert_eq!(intro.len(), 4);
    assert!(intro.windows(2).all(|w| w[1].start_sec > w[0].start_sec));
}

#[test]
fn chords_scale_with_music_volume() {
    let loud = chord_tones(0, 1.0);
    let quiet = chord_tones(0, 0.1);
    assert_eq!(loud.len(), 3);
    assert!(quiet[0].peak < loud[0].peak);
    // index wraps around the progression
    assert_eq!(chord_tones(AMBIENT_CHORDS.len(), 1.0), loud);
}

#[test]
fn status_serializes_camel_case() {
    let v = serde_json::to_value(ready().status()).unwrap();
    assert_eq!(v["initialized"], true);
    assert_eq!(v["backgroundMusicPlaying"], false);
    assert!(v.get("musicVolume").is_some());
}
