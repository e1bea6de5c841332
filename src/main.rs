use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use aria_gateway::voice::{self, SynthesisOptions, TtsEngine, create_tts_engine};
use aria_gateway::{Config, api};

/// Aria - Voice tool gateway for AI assistants
#[derive(Parser)]
#[command(name = "aria", version, about)]
struct Cli {
    /// Port to listen on (overrides ARIA_PORT and the config file)
    #[arg(long)]
    port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Test microphone capture via the configured record command
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u32,
    },
    /// Test speaker output with a generated tone
    TestSpeaker,
    /// Test TTS synthesis and playback
    TestTts {
        /// Text to speak
        #[arg(default_value = "Hello! This is a test of the text to speech system.")]
        text: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,aria_gateway=info",
        1 => "info,aria_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load()?;
    tracing::debug!(
        record_cmd = ?config.audio.record_cmd,
        play_cmd = ?config.audio.play_cmd,
        stt_mode = ?config.stt.mode,
        "loaded configuration"
    );

    if let Some(cmd) = cli.command {
        return match cmd {
            Command::TestMic { duration } => test_mic(&config, duration).await,
            Command::TestSpeaker => test_speaker(&config).await,
            Command::TestTts { text } => test_tts(&config, &text).await,
        };
    }

    let port = cli.port.unwrap_or(config.server.port);
    let state = Arc::new(api::ApiState::from_config(&config)?);

    tracing::info!(port, "starting aria gateway");
    api::serve(state, port).await?;

    Ok(())
}

/// Test microphone capture
async fn test_mic(config: &Config, duration: u32) -> anyhow::Result<()> {
    println!(
        "Recording for {duration} seconds via `{}`...",
        config.audio.record_cmd.join(" ")
    );
    println!("Speak into your microphone!\n");

    let audio = voice::record_to_buffer(&config.audio.record_cmd, duration).await?;

    println!("Captured {} bytes", audio.len());
    if audio.len() >= 12 && &audio[0..4] == b"RIFF" && &audio[8..12] == b"WAVE" {
        println!("Output starts with a WAV header - looks good");
    } else {
        println!("Warning: output does not start with a WAV header");
    }

    println!("\n---");
    println!("If the byte count stayed near zero, check:");
    println!("  1. Is your mic plugged in?");
    println!("  2. Run: pactl info | grep 'Default Source'");
    println!("  3. Run: arecord -l (to list devices)");
    println!("  4. Try: pavucontrol (to check levels)");

    Ok(())
}

/// Test speaker output with a sine wave
async fn test_speaker(config: &Config) -> anyhow::Result<()> {
    println!("Testing speaker output...");
    println!("You should hear a 440Hz tone for 2 seconds\n");

    let wav = tone_wav(440.0, 2.0, 24000)?;
    println!(
        "Playing {} bytes via `{}`...",
        wav.len(),
        config.audio.play_cmd.join(" ")
    );

    voice::play_buffer(&config.audio.play_cmd, &wav).await?;

    println!("\n---");
    println!("If you heard the tone, your speakers are working!");
    println!("If you didn't hear anything, check:");
    println!("  1. Run: pactl info | grep 'Default Sink'");
    println!("  2. Run: pactl list sinks short");
    println!("  3. Try: pavucontrol (to check output levels)");

    Ok(())
}

/// Test TTS synthesis and playback
async fn test_tts(config: &Config, text: &str) -> anyhow::Result<()> {
    println!("Testing TTS with text: \"{text}\"\n");

    let tts = create_tts_engine(config)?;

    println!("Synthesizing speech...");
    let audio = tts.synthesize(text, &SynthesisOptions::default()).await?;
    println!("Got {} bytes of audio data", audio.len());

    if audio.len() > 3 {
        println!(
            "First 4 bytes: {:02x} {:02x} {:02x} {:02x}",
            audio[0], audio[1], audio[2], audio[3]
        );
    }

    println!("Playing audio...");
    voice::play_buffer(&config.audio.play_cmd, &audio).await?;

    println!("\n---");
    println!("If you heard the speech, TTS is working!");

    Ok(())
}

/// Encode a mono sine tone as a WAV clip
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn tone_wav(frequency: f32, duration_secs: f32, sample_rate: u32) -> anyhow::Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let num_samples = (sample_rate as f32 * duration_secs) as usize;
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for i in 0..num_samples {
            let t = i as f32 / sample_rate as f32;
            let sample = (2.0 * std::f32::consts::PI * frequency * t).sin() * 0.3; // 30% volume
            writer.write_sample((sample * 32767.0) as i16)?;
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}
