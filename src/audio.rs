use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

type Sound = Buffered<Decoder<BufReader<File>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Shoot,
    Pop,
    PowerUp,
}

impl SoundEffect {
    fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot.wav",
            SoundEffect::Pop => "pop.wav",
            SoundEffect::PowerUp => "powerup.wav",
        }
    }

    fn volume(&self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.05,
            SoundEffect::Pop => 0.2,
            SoundEffect::PowerUp => 0.2,
        }
    }
}

/// Audio manager for playing sound effects.
/// Without an output device or sound files it stays silent.
pub struct AudioManager {
    /// Keeps the device open while the handle is in use
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
    shoot: Option<Sound>,
    pop: Option<Sound>,
    powerup: Option<Sound>,
}

impl AudioManager {
    /// Opens the default output device and pre-loads every sound in `sounds_dir`
    pub fn new(sounds_dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let (stream, stream_handle) = OutputStream::try_default()?;

        Ok(Self {
            _stream: Some(stream),
            stream_handle: Some(stream_handle),
            shoot: load_sound(sounds_dir, SoundEffect::Shoot),
            pop: load_sound(sounds_dir, SoundEffect::Pop),
            powerup: load_sound(sounds_dir, SoundEffect::PowerUp),
        })
    }

    /// Manager that never plays anything
    pub fn silent() -> Self {
        Self {
            _stream: None,
            stream_handle: None,
            shoot: None,
            pop: None,
            powerup: None,
        }
    }

    /// Like [`AudioManager::new`] but falls back to silence on failure
    pub fn load_or_silent(sounds_dir: &Path) -> Self {
        Self::new(sounds_dir).unwrap_or_else(|err| {
            warn!(error = %err, "failed to initialize audio, continuing without sound");
            Self::silent()
        })
    }

    pub fn is_silent(&self) -> bool {
        self.stream_handle.is_none()
    }

    pub fn play(&self, effect: SoundEffect) {
        let sound = match effect {
            SoundEffect::Shoot => &self.shoot,
            SoundEffect::Pop => &self.pop,
            SoundEffect::PowerUp => &self.powerup,
        };

        // Playback errors are ignored, a missing sound must not stop the game
        if let (Some(handle), Some(sound)) = (&self.stream_handle, sound)
            && let Ok(sink) = Sink::try_new(handle)
        {
            sink.set_volume(effect.volume());
            // Cloning a buffered source only clones references
            sink.append(sound.clone());
            sink.detach();
        }
    }
}

fn load_sound(dir: &Path, effect: SoundEffect) -> Option<Sound> {
    let path = dir.join(effect.file_name());
    let decoded = File::open(&path)
        .map_err(|err| err.to_string())
        .and_then(|file| Decoder::new(BufReader::new(file)).map_err(|err| err.to_string()));

    match decoded {
        Ok(source) => Some(source.buffered()),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "sound not loaded");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_manager_plays_nothing() {
        let audio = AudioManager::silent();
        assert!(audio.is_silent());
        audio.play(SoundEffect::Shoot);
        audio.play(SoundEffect::Pop);
        audio.play(SoundEffect::PowerUp);
    }

    #[test]
    fn test_missing_sound_file_is_skipped() {
        assert!(load_sound(Path::new("does/not/exist"), SoundEffect::Pop).is_none());
    }
}
