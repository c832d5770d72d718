use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioScheduledSourceNode, OscillatorType};

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Sound {
    Flip,
    Match,
    Mismatch,
    Win,
    Lose,
}

impl Sound {
    /// Frequency in Hz, duration in seconds and waveform.
    const fn tone(self) -> (f32, f64, OscillatorType) {
        use Sound::*;
        match self {
            Flip => (660.0, 0.05, OscillatorType::Triangle),
            Match => (880.0, 0.15, OscillatorType::Sine),
            Mismatch => (220.0, 0.2, OscillatorType::Square),
            Win => (1046.5, 0.5, OscillatorType::Sine),
            Lose => (146.8, 0.6, OscillatorType::Sawtooth),
        }
    }
}

/// Synthesized sound effects, the audio context is created on first use since browsers only allow it after a user
/// gesture.
#[derive(Debug, Default)]
pub(crate) struct SoundBoard {
    context: Option<AudioContext>,
}

impl SoundBoard {
    const VOLUME: f32 = 0.08;

    pub(crate) fn play(&mut self, sound: Sound) {
        log::trace!("play {:?}", sound);
        if let Err(err) = self.try_play(sound) {
            log::error!("failed to play {:?}: {:?}", sound, err);
        }
    }

    fn context(&mut self) -> Result<AudioContext, JsValue> {
        if let Some(context) = &self.context {
            return Ok(context.clone());
        }
        let context = AudioContext::new()?;
        self.context = Some(context.clone());
        Ok(context)
    }

    fn try_play(&mut self, sound: Sound) -> Result<(), JsValue> {
        let (frequency, duration, wave) = sound.tone();
        let context = self.context()?;

        let oscillator = context.create_oscillator()?;
        oscillator.set_type(wave);
        oscillator.frequency().set_value(frequency);

        let gain = context.create_gain()?;
        gain.gain().set_value(Self::VOLUME);

        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&context.destination())?;

        let now = context.current_time();
        AudioScheduledSourceNode::start_with_when(&oscillator, now)?;
        AudioScheduledSourceNode::stop_with_when(&oscillator, now + duration)?;
        Ok(())
    }
}
