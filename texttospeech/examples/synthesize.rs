//! Speech synthesis example.
//!
//! Run with:
//! ```bash
//! export TEXT_TO_SPEECH_APIKEY="your-api-key"
//! export TEXT_TO_SPEECH_URL="https://api.us-south.text-to-speech.watson.cloud.ibm.com/instances/..."
//! cargo run -p giztoy-texttospeech --example synthesize
//! ```

use futures::StreamExt;
use giztoy_texttospeech::{
    voice_name, AudioFormat, Client, GetPronunciationRequest, PronunciationFormat,
    SynthesizeRequest,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Credentials come from TEXT_TO_SPEECH_* variables
    let client = Client::from_env()?;

    // Example 1: Simple synthesis
    println!("Example 1: Simple synthesis");

    let request = SynthesizeRequest {
        text: "Hello, this is a speech synthesis example.".to_string(),
        accept: Some(AudioFormat::Wav.mime().to_string()),
        voice: Some(voice_name::EN_US_ALLISON_V3.to_string()),
        ..Default::default()
    };

    let response = client.synthesis().synthesize(&request).await?;
    std::fs::write("output_simple.wav", &response.audio)?;
    println!("Audio saved to output_simple.wav ({} bytes)", response.audio.len());

    if let Some(warnings) = &response.warnings {
        println!("Warnings: {}", warnings);
    }

    // Example 2: Streaming synthesis
    println!("\nExample 2: Streaming synthesis");

    let stream_request = SynthesizeRequest {
        text: "This audio is written to disk as it arrives.".to_string(),
        accept: Some(AudioFormat::Mp3.mime().to_string()),
        voice: Some(voice_name::EN_US_MICHAEL_V3.to_string()),
        ..Default::default()
    };

    let mut response = client.synthesis().synthesize_stream(&stream_request).await?;
    if let Some(warnings) = &response.warnings {
        println!("Warnings: {}", warnings);
    }
    let mut audio = Vec::new();
    let mut chunk_count = 0;
    while let Some(chunk) = response.audio.next().await {
        audio.extend_from_slice(&chunk?);
        chunk_count += 1;
        print!(".");
    }
    println!();

    std::fs::write("output_stream.mp3", &audio)?;
    println!("Audio saved to output_stream.mp3 ({} bytes, {} chunks)", audio.len(), chunk_count);

    // Example 3: Pronunciation
    println!("\nExample 3: Pronunciation");

    let pronunciation = client
        .synthesis()
        .pronunciation(&GetPronunciationRequest {
            text: "IEEE".to_string(),
            voice: Some(voice_name::EN_US_ALLISON_V3.to_string()),
            format: Some(PronunciationFormat::Ipa),
            customization_id: None,
        })
        .await?;
    println!("IEEE -> {}", pronunciation.pronunciation);

    println!("\nDone!");
    Ok(())
}
