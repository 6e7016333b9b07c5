//! Sound cues, their tone tables, and WAV synthesis for the buzzer

/// A named sound effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    FoodEaten,
    BadFoodWarning,
    GameStart,
    GameOver,
    BadFoodEaten,
    Pause,
    PauseRelease,
    Click,
}

/// One note: a square-wave frequency held for `on_ms`, then `off_ms` of silence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub on_ms: u32,
    pub off_ms: u32,
}

const fn tone(frequency_hz: f32, on_ms: u32, off_ms: u32) -> Tone {
    Tone { frequency_hz, on_ms, off_ms }
}

const FOOD_EATEN: &[Tone] = &[tone(523.0, 50, 0), tone(784.0, 200, 0)];
const BAD_FOOD_WARNING: &[Tone] = &[tone(10.0, 100, 0)];
const GAME_START: &[Tone] = &[
    tone(900.0, 50, 50),
    tone(800.0, 50, 50),
    tone(700.0, 50, 50),
    tone(600.0, 50, 50),
    tone(500.0, 50, 50),
    tone(400.0, 50, 50),
    tone(300.0, 50, 50),
    tone(200.0, 50, 50),
    tone(100.0, 50, 50),
];
const GAME_OVER: &[Tone] = &[
    tone(523.0, 50, 0),
    tone(392.0, 50, 0),
    tone(330.0, 50, 0),
    tone(293.0, 50, 0),
    tone(261.6, 400, 0),
];
const BAD_FOOD_EATEN: &[Tone] = &[tone(6000.0, 400, 0)];
const PAUSE: &[Tone] = &[tone(9000.0, 10, 0)];
const PAUSE_RELEASE: &[Tone] = &[tone(10000.0, 10, 0)];
const CLICK: &[Tone] = &[tone(1000.0, 10, 0)];

impl SoundCue {
    pub const ALL: [SoundCue; 8] = [
        SoundCue::FoodEaten,
        SoundCue::BadFoodWarning,
        SoundCue::GameStart,
        SoundCue::GameOver,
        SoundCue::BadFoodEaten,
        SoundCue::Pause,
        SoundCue::PauseRelease,
        SoundCue::Click,
    ];

    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundCue::FoodEaten => FOOD_EATEN,
            SoundCue::BadFoodWarning => BAD_FOOD_WARNING,
            SoundCue::GameStart => GAME_START,
            SoundCue::GameOver => GAME_OVER,
            SoundCue::BadFoodEaten => BAD_FOOD_EATEN,
            SoundCue::Pause => PAUSE,
            SoundCue::PauseRelease => PAUSE_RELEASE,
            SoundCue::Click => CLICK,
        }
    }

    /// Total playing time of the cue in milliseconds
    pub fn duration_ms(self) -> u32 {
        self.tones().iter().map(|t| t.on_ms + t.off_ms).sum()
    }
}

/// The piezo output
pub trait Buzzer {
    fn play(&mut self, cue: SoundCue);
}

pub const SAMPLE_RATE: u32 = 44100;

/// Render a tone sequence as a PCM16 mono WAV file
pub fn encode_wav(tones: &[Tone], volume: f32) -> Vec<u8> {
    let samples_for = |ms: u32| (u64::from(ms) * u64::from(SAMPLE_RATE) / 1000) as u32;
    let num_samples: u32 = tones.iter().map(|t| samples_for(t.on_ms) + samples_for(t.off_ms)).sum();
    let mut data: Vec<u8> = Vec::with_capacity((num_samples as usize) * 2 + 44);

    let block_align: u16 = 2; // mono 16-bit
    let byte_rate: u32 = SAMPLE_RATE * block_align as u32;
    let data_size: u32 = num_samples * 2;
    let chunk_size: u32 = 36 + data_size;

    // RIFF header
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&chunk_size.to_le_bytes());
    data.extend_from_slice(b"WAVE");
    // fmt chunk
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes()); // PCM chunk size
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    data.extend_from_slice(&1u16.to_le_bytes()); // channels
    data.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    data.extend_from_slice(&byte_rate.to_le_bytes());
    data.extend_from_slice(&block_align.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    // data chunk
    data.extend_from_slice(b"data");
    data.extend_from_slice(&data_size.to_le_bytes());

    // Piezo buzzers are driven with a square wave
    let amplitude = (volume.clamp(0.0, 1.0) * 0.5 * i16::MAX as f32) as i16;
    for t in tones {
        let period = SAMPLE_RATE as f32 / t.frequency_hz.max(1.0);
        for n in 0..samples_for(t.on_ms) {
            let phase = (n as f32 % period) / period;
            let sample = if phase < 0.5 { amplitude } else { -amplitude };
            data.extend_from_slice(&sample.to_le_bytes());
        }
        for _ in 0..samples_for(t.off_ms) {
            data.extend_from_slice(&0i16.to_le_bytes());
        }
    }
    data
}
