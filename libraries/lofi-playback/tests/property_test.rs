//! Property-based tests for the track list and player session
//!
//! Uses proptest to verify invariants across many random inputs.

mod common;

use common::*;
use lofi_core::Track;
use lofi_playback::{PlayState, TrackList};
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Helpers =====

fn arbitrary_track() -> impl Strategy<Value = Track> {
    (
        1u64..1_000_000,   // id
        "[A-Za-z ]{1,30}", // title
        "[A-Za-z ]{1,20}", // artist
        1.0f64..600.0,     // duration
    )
        .prop_map(|(id, title, artist, duration_seconds)| Track {
            id,
            title,
            artist,
            album: "Album".to_string(),
            cover_url: String::new(),
            preview_url: format!("https://cdn.example.com/{}.mp3", id),
            duration_seconds,
        })
}

/// Non-empty list with unique ids
fn arbitrary_tracks() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(arbitrary_track(), 1..30).prop_map(|mut tracks| {
        let mut seen = HashSet::new();
        tracks.retain(|t| seen.insert(t.id));
        tracks
    })
}

fn ids(list: &TrackList) -> Vec<u64> {
    list.tracks().iter().map(|t| t.id).collect()
}

#[derive(Debug, Clone)]
enum Intent {
    PlayPause,
    Next,
    Prev,
    Select(usize),
    Reorder(usize, usize),
    Seek(f64),
    TrackEnded,
    ToggleAmbient,
}

fn arbitrary_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::PlayPause),
        Just(Intent::Next),
        Just(Intent::Prev),
        (0usize..40).prop_map(Intent::Select),
        (0usize..40, 0usize..40).prop_map(|(a, b)| Intent::Reorder(a, b)),
        (-100.0f64..1000.0).prop_map(Intent::Seek),
        Just(Intent::TrackEnded),
        Just(Intent::ToggleAmbient),
    ]
}

// ===== Property Tests =====

proptest! {
    /// Property: N nexts from any selection return to it
    #[test]
    fn next_is_cyclic(tracks in arbitrary_tracks(), start in 0usize..30) {
        let len = tracks.len();
        let start = start % len;
        let mut list = TrackList::new();
        list.replace(tracks);
        list.select(start).unwrap();

        for _ in 0..len {
            list.next();
        }

        prop_assert_eq!(list.selection(), Some(start));
    }

    /// Property: previous undoes next
    #[test]
    fn previous_inverts_next(tracks in arbitrary_tracks(), start in 0usize..30) {
        let start = start % tracks.len();
        let mut list = TrackList::new();
        list.replace(tracks);
        list.select(start).unwrap();

        list.next();
        list.previous();

        prop_assert_eq!(list.selection(), Some(start));
    }

    /// Property: reordering twice with the same indices restores the list
    #[test]
    fn reorder_is_involution(
        tracks in arbitrary_tracks(),
        from in 0usize..30,
        to in 0usize..30,
        selected in 0usize..30,
    ) {
        let len = tracks.len();
        let (from, to, selected) = (from % len, to % len, selected % len);
        let mut list = TrackList::new();
        list.replace(tracks);
        list.select(selected).unwrap();
        let before = ids(&list);

        list.reorder(from, to).unwrap();
        list.reorder(from, to).unwrap();

        prop_assert_eq!(ids(&list), before);
        prop_assert_eq!(list.selection(), Some(selected));
    }

    /// Property: reorder keeps the selected track selected
    #[test]
    fn reorder_selection_follows_track(
        tracks in arbitrary_tracks(),
        from in 0usize..30,
        to in 0usize..30,
        selected in 0usize..30,
    ) {
        let len = tracks.len();
        let (from, to, selected) = (from % len, to % len, selected % len);
        let mut list = TrackList::new();
        list.replace(tracks);
        list.select(selected).unwrap();
        let selected_id = list.current().map(|t| t.id);

        list.reorder(from, to).unwrap();

        prop_assert_eq!(list.current().map(|t| t.id), selected_id);
    }

    /// Property: no intent sequence adds, drops or duplicates tracks,
    /// and the selection always points inside the list
    #[test]
    fn session_preserves_membership(
        tracks in arbitrary_tracks(),
        intents in prop::collection::vec(arbitrary_intent(), 0..60),
    ) {
        let ids_in: Vec<u64> = tracks.iter().map(|t| t.id).collect();
        let mut session = loaded_session(&[]);
        session.tracks_loaded(tracks);

        for intent in intents {
            match intent {
                Intent::PlayPause => session.on_play_pause(),
                Intent::Next => session.on_next(),
                Intent::Prev => session.on_prev(),
                Intent::Select(i) => { let _ = session.on_select(i); }
                Intent::Reorder(a, b) => { let _ = session.on_reorder(a, b); }
                Intent::Seek(s) => session.on_seek(s),
                Intent::TrackEnded => session.on_track_ended(),
                Intent::ToggleAmbient => session.on_toggle_ambient(),
            }

            let selection = session.selection();
            prop_assert!(matches!(selection, Some(i) if i < session.tracks().len()));

            let state = session.playback_state();
            prop_assert!(state.current_time >= 0.0);
            prop_assert!(state.current_time <= state.duration);
        }

        let mut ids_out = track_ids(&session);
        let mut expected = ids_in;
        ids_out.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(ids_out, expected);
    }

    /// Property: every selection change restarts the position at zero
    #[test]
    fn selection_change_resets_position(
        tracks in arbitrary_tracks(),
        elapsed in 0.0f64..30.0,
        index in 0usize..30,
    ) {
        let index = index % tracks.len();
        let mut session = loaded_session(&[]);
        session.tracks_loaded(tracks);
        session.on_time_update(elapsed);

        session.on_select(index).unwrap();

        prop_assert_eq!(session.playback_state().current_time, 0.0);
    }

    /// Property: track end always leaves the controller playing
    #[test]
    fn track_end_always_plays(tracks in arbitrary_tracks(), playing in any::<bool>()) {
        let mut session = loaded_session(&[]);
        session.tracks_loaded(tracks);
        if playing {
            session.on_play_pause();
        }

        session.on_track_ended();

        prop_assert_eq!(session.playback_state().state, PlayState::Playing);
    }
}
