mod deepgram_synthesizer;
mod deepgram_transcriber;

pub use deepgram_synthesizer::DeepgramSynthesizer;
pub use deepgram_transcriber::DeepgramTranscriber;
