mod murf_synthesizer;

pub use murf_synthesizer::MurfSynthesizer;
