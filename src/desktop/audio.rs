use std::collections::HashMap;

use macroquad::audio::{self, PlaySoundParams, Sound, load_sound_from_bytes};
use tracing::warn;

use tft_snake::sound::{Buzzer, SoundCue, encode_wav};

/// Plays cues through the speaker. Like the piezo pin, a new cue cuts off the previous one.
pub struct SpeakerBuzzer {
    sounds: HashMap<SoundCue, Sound>,
    playing: Option<SoundCue>,
    volume: f32,
}

impl SpeakerBuzzer {
    pub async fn load(volume: f32) -> Self {
        let mut sounds = HashMap::new();
        for cue in SoundCue::ALL {
            let bytes = encode_wav(cue.tones(), 1.0);
            match load_sound_from_bytes(&bytes).await {
                Ok(sound) => {
                    sounds.insert(cue, sound);
                }
                Err(e) => warn!("Could not load {:?} cue: {:?}", cue, e),
            }
        }
        Self {
            sounds,
            playing: None,
            volume: volume.clamp(0.0, 1.0),
        }
    }
}

impl Buzzer for SpeakerBuzzer {
    fn play(&mut self, cue: SoundCue) {
        if let Some(sound) = self.playing.take().and_then(|previous| self.sounds.get(&previous)) {
            audio::stop_sound(sound);
        }
        if let Some(sound) = self.sounds.get(&cue) {
            audio::play_sound(sound, PlaySoundParams { looped: false, volume: self.volume });
            self.playing = Some(cue);
        }
    }
}
