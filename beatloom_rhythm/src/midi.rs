// MIDI output from step patterns.
//
// Converts a Pattern into a Standard MIDI File (SMF) for use in a DAW or any
// MIDI player. Track 0 carries the tempo; each instrument gets its own named
// track on the General MIDI percussion channel, with one 16th-note hit per
// active step.
//
// Uses the `midly` crate for MIDI writing. Output is SMF Format 1 (multi-track).

use crate::error::{Result, RhythmError};
use crate::pattern::{Instrument, Pattern, StepPosition};
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
pub const TICKS_PER_QUARTER: u16 = 480;

/// Ticks per 16th-note step.
pub const TICKS_PER_STEP: u32 = TICKS_PER_QUARTER as u32 / 4;

/// General MIDI percussion channel (channel 10, zero-based).
const DRUM_CHANNEL: u8 = 9;

const HIT_VELOCITY: u8 = 100;

/// Absolute tick of a step, from its bar:beat:sixteenth position.
pub fn step_tick(step: usize) -> u32 {
    let pos = StepPosition::of(step);
    let ticks_per_beat = TICKS_PER_QUARTER as u32;
    pos.bar as u32 * 4 * ticks_per_beat + pos.beat as u32 * ticks_per_beat + pos.sub_beat as u32 * TICKS_PER_STEP
}

/// Convert a Pattern to MIDI and write to a file.
pub fn write_midi(pattern: &Pattern, bpm: u16, path: &Path) -> Result<()> {
    let buf = midi_bytes(pattern, bpm)?;
    std::fs::write(path, &buf).map_err(|source| RhythmError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode a Pattern as SMF bytes.
pub fn midi_bytes(pattern: &Pattern, bpm: u16) -> Result<Vec<u8>> {
    let smf = pattern_to_smf(pattern, bpm);
    let mut buf = Vec::new();
    smf.write_std(&mut buf).map_err(RhythmError::Midi)?;
    Ok(buf)
}

/// Convert a Pattern to an in-memory SMF.
pub fn pattern_to_smf(pattern: &Pattern, bpm: u16) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    // Track 0: tempo track
    let mut tempo_track: Track<'static> = Vec::new();
    let tempo_microseconds = 60_000_000 / u32::from(bpm.max(1));
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_microseconds))),
    });
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    smf.tracks.push(tempo_track);

    let channel = u4::new(DRUM_CHANNEL);
    for instrument in Instrument::ALL {
        smf.tracks.push(instrument_track(pattern, instrument, channel));
    }

    smf
}

fn instrument_track(pattern: &Pattern, instrument: Instrument, channel: u4) -> Track<'static> {
    let mut track: Track<'static> = Vec::new();
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(instrument.name().as_bytes())),
    });

    let key = u7::new(instrument.gm_note());
    let mut last_event_tick: u32 = 0;
    for step in pattern.hit_steps(instrument) {
        let on_tick = step_tick(step);
        track.push(TrackEvent {
            delta: u28::new(on_tick - last_event_tick),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn {
                    key,
                    vel: u7::new(HIT_VELOCITY),
                },
            },
        });
        // Each hit lasts one step, so it always ends before the next begins.
        track.push(TrackEvent {
            delta: u28::new(TICKS_PER_STEP),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff { key, vel: u7::new(0) },
            },
        });
        last_event_tick = on_tick + TICKS_PER_STEP;
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    track
}
