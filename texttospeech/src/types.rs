//! Common types for the Text to Speech API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::Error;

// ==================== Language ====================

/// Language of a custom model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "ar-MS")]
    ArMs,
    #[serde(rename = "cs-CZ")]
    CsCz,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "en-AU")]
    EnAu,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "es-ES")]
    EsEs,
    #[serde(rename = "es-LA")]
    EsLa,
    #[serde(rename = "es-US")]
    EsUs,
    #[serde(rename = "fr-CA")]
    FrCa,
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "it-IT")]
    ItIt,
    #[serde(rename = "ja-JP")]
    JaJp,
    #[serde(rename = "ko-KR")]
    KoKr,
    #[serde(rename = "nl-BE")]
    NlBe,
    #[serde(rename = "nl-NL")]
    NlNl,
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "sv-SE")]
    SvSe,
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl Language {
    /// Returns the language identifier as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::ArMs => "ar-MS",
            Language::CsCz => "cs-CZ",
            Language::DeDe => "de-DE",
            Language::EnAu => "en-AU",
            Language::EnGb => "en-GB",
            Language::EnUs => "en-US",
            Language::EsEs => "es-ES",
            Language::EsLa => "es-LA",
            Language::EsUs => "es-US",
            Language::FrCa => "fr-CA",
            Language::FrFr => "fr-FR",
            Language::ItIt => "it-IT",
            Language::JaJp => "ja-JP",
            Language::KoKr => "ko-KR",
            Language::NlBe => "nl-BE",
            Language::NlNl => "nl-NL",
            Language::PtBr => "pt-BR",
            Language::SvSe => "sv-SE",
            Language::ZhCn => "zh-CN",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| Error::Validation(format!("unknown language: {}", s)))
    }
}

// ==================== Part of Speech ====================

/// Part of speech of a Japanese custom word.
///
/// The service uses the value to produce the correct intonation for the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Dosi,
    Fuku,
    Gobi,
    Hoka,
    Jodo,
    Josi,
    Kato,
    Kedo,
    Keyo,
    Kigo,
    Koyu,
    Mesi,
    Reta,
    Stbi,
    Stto,
    Stzo,
    Suji,
}

impl FromStr for PartOfSpeech {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| Error::Validation(format!("unknown part of speech: {}", s)))
    }
}

// ==================== Pronunciation Format ====================

/// Phoneme format of a returned pronunciation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PronunciationFormat {
    /// IBM Symbolic Phonetic Representation.
    Ibm,
    /// International Phonetic Alphabet.
    #[default]
    Ipa,
}

impl PronunciationFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PronunciationFormat::Ibm => "ibm",
            PronunciationFormat::Ipa => "ipa",
        }
    }
}

impl FromStr for PronunciationFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ibm" | "spr" => Ok(PronunciationFormat::Ibm),
            "ipa" => Ok(PronunciationFormat::Ipa),
            _ => Err(Error::Validation(format!("unknown pronunciation format: {}", s))),
        }
    }
}

// ==================== Audio Format ====================

/// Audio format of synthesized speech, sent as the `Accept` header.
///
/// When no format is given the service returns `audio/basic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioFormat {
    /// 8 kHz mu-law.
    #[default]
    Basic,
    Flac,
    /// Linear 16-bit PCM. Requires a sampling rate.
    L16,
    Mp3,
    Mpeg,
    /// Requires a sampling rate.
    Mulaw,
    Ogg,
    OggOpus,
    OggVorbis,
    Wav,
    Webm,
    WebmOpus,
    WebmVorbis,
}

impl AudioFormat {
    /// Returns the MIME type of the format.
    pub fn mime(&self) -> &'static str {
        match self {
            AudioFormat::Basic => "audio/basic",
            AudioFormat::Flac => "audio/flac",
            AudioFormat::L16 => "audio/l16",
            AudioFormat::Mp3 => "audio/mp3",
            AudioFormat::Mpeg => "audio/mpeg",
            AudioFormat::Mulaw => "audio/mulaw",
            AudioFormat::Ogg => "audio/ogg",
            AudioFormat::OggOpus => "audio/ogg;codecs=opus",
            AudioFormat::OggVorbis => "audio/ogg;codecs=vorbis",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Webm => "audio/webm",
            AudioFormat::WebmOpus => "audio/webm;codecs=opus",
            AudioFormat::WebmVorbis => "audio/webm;codecs=vorbis",
        }
    }

    /// Returns true if the service rejects the format without a sampling rate.
    pub fn requires_rate(&self) -> bool {
        matches!(self, AudioFormat::L16 | AudioFormat::Mulaw)
    }

    /// Returns the usual file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Basic => "au",
            AudioFormat::Flac => "flac",
            AudioFormat::L16 | AudioFormat::Mulaw => "raw",
            AudioFormat::Mp3 | AudioFormat::Mpeg => "mp3",
            AudioFormat::Ogg | AudioFormat::OggOpus | AudioFormat::OggVorbis => "ogg",
            AudioFormat::Wav => "wav",
            AudioFormat::Webm | AudioFormat::WebmOpus | AudioFormat::WebmVorbis => "webm",
        }
    }

    /// Renders the `Accept` value with an explicit sampling rate.
    pub fn with_rate(&self, rate: u32) -> String {
        format!("{};rate={}", self.mime(), rate)
    }

    /// Renders the `Accept` value for `audio/l16` with rate and byte order.
    pub fn l16(rate: u32, endianness: Endianness) -> String {
        format!(
            "{};rate={};endianness={}",
            AudioFormat::L16.mime(),
            rate,
            endianness.as_str()
        )
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

impl FromStr for AudioFormat {
    type Err = Error;

    /// Accepts either a MIME type or a short name such as `mp3` or `ogg-opus`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let format = match s.as_str() {
            "audio/basic" | "basic" => AudioFormat::Basic,
            "audio/flac" | "flac" => AudioFormat::Flac,
            "audio/l16" | "l16" | "pcm" => AudioFormat::L16,
            "audio/mp3" | "mp3" => AudioFormat::Mp3,
            "audio/mpeg" | "mpeg" => AudioFormat::Mpeg,
            "audio/mulaw" | "mulaw" => AudioFormat::Mulaw,
            "audio/ogg" | "ogg" => AudioFormat::Ogg,
            "audio/ogg;codecs=opus" | "ogg-opus" | "opus" => AudioFormat::OggOpus,
            "audio/ogg;codecs=vorbis" | "ogg-vorbis" => AudioFormat::OggVorbis,
            "audio/wav" | "wav" => AudioFormat::Wav,
            "audio/webm" | "webm" => AudioFormat::Webm,
            "audio/webm;codecs=opus" | "webm-opus" => AudioFormat::WebmOpus,
            "audio/webm;codecs=vorbis" | "webm-vorbis" => AudioFormat::WebmVorbis,
            _ => return Err(Error::Validation(format!("unknown audio format: {}", s))),
        };
        Ok(format)
    }
}

/// Byte order of `audio/l16` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    BigEndian,
    #[default]
    LittleEndian,
}

impl Endianness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endianness::BigEndian => "big-endian",
            Endianness::LittleEndian => "little-endian",
        }
    }
}

// ==================== Prompt Status ====================

/// Processing status of a custom prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStatus {
    /// The service received the request and is processing the prompt.
    Processing,
    /// The prompt is ready to be used in synthesis.
    Available,
    /// Processing failed; the prompt's `error` field explains why.
    Failed,
}

impl PromptStatus {
    /// Parses the status string reported by the service.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "processing" => Some(PromptStatus::Processing),
            "available" => Some(PromptStatus::Available),
            "failed" => Some(PromptStatus::Failed),
            _ => None,
        }
    }
}

// ==================== Voice Names ====================

/// Names of the voices offered by the service.
///
/// Request fields take plain strings so that newly released voices can be
/// used before they appear here.
pub mod voice_name {
    pub const AR_AR_OMAR: &str = "ar-AR_OmarVoice";
    pub const AR_MS_OMAR: &str = "ar-MS_OmarVoice";
    pub const CS_CZ_ALENA: &str = "cs-CZ_AlenaVoice";
    pub const DE_DE_BIRGIT_V3: &str = "de-DE_BirgitV3Voice";
    pub const DE_DE_BIRGIT: &str = "de-DE_BirgitVoice";
    pub const DE_DE_DIETER_V3: &str = "de-DE_DieterV3Voice";
    pub const DE_DE_DIETER: &str = "de-DE_DieterVoice";
    pub const DE_DE_ERIKA_V3: &str = "de-DE_ErikaV3Voice";
    pub const EN_AU_CRAIG: &str = "en-AU_CraigVoice";
    pub const EN_AU_MADISON: &str = "en-AU_MadisonVoice";
    pub const EN_AU_STEVE: &str = "en-AU_SteveVoice";
    pub const EN_GB_CHARLOTTE_V3: &str = "en-GB_CharlotteV3Voice";
    pub const EN_GB_JAMES_V3: &str = "en-GB_JamesV3Voice";
    pub const EN_GB_KATE_V3: &str = "en-GB_KateV3Voice";
    pub const EN_GB_KATE: &str = "en-GB_KateVoice";
    pub const EN_US_ALLISON_V3: &str = "en-US_AllisonV3Voice";
    pub const EN_US_ALLISON: &str = "en-US_AllisonVoice";
    pub const EN_US_EMILY_V3: &str = "en-US_EmilyV3Voice";
    pub const EN_US_HENRY_V3: &str = "en-US_HenryV3Voice";
    pub const EN_US_KEVIN_V3: &str = "en-US_KevinV3Voice";
    pub const EN_US_LISA_V3: &str = "en-US_LisaV3Voice";
    pub const EN_US_LISA: &str = "en-US_LisaVoice";
    pub const EN_US_MICHAEL_V3: &str = "en-US_MichaelV3Voice";
    pub const EN_US_MICHAEL: &str = "en-US_MichaelVoice";
    pub const EN_US_OLIVIA_V3: &str = "en-US_OliviaV3Voice";
    pub const ES_ES_ENRIQUE_V3: &str = "es-ES_EnriqueV3Voice";
    pub const ES_ES_ENRIQUE: &str = "es-ES_EnriqueVoice";
    pub const ES_ES_LAURA_V3: &str = "es-ES_LauraV3Voice";
    pub const ES_ES_LAURA: &str = "es-ES_LauraVoice";
    pub const ES_LA_SOFIA_V3: &str = "es-LA_SofiaV3Voice";
    pub const ES_LA_SOFIA: &str = "es-LA_SofiaVoice";
    pub const ES_US_SOFIA_V3: &str = "es-US_SofiaV3Voice";
    pub const ES_US_SOFIA: &str = "es-US_SofiaVoice";
    pub const FR_CA_LOUISE_V3: &str = "fr-CA_LouiseV3Voice";
    pub const FR_FR_NICOLAS_V3: &str = "fr-FR_NicolasV3Voice";
    pub const FR_FR_RENEE_V3: &str = "fr-FR_ReneeV3Voice";
    pub const FR_FR_RENEE: &str = "fr-FR_ReneeVoice";
    pub const IT_IT_FRANCESCA_V3: &str = "it-IT_FrancescaV3Voice";
    pub const IT_IT_FRANCESCA: &str = "it-IT_FrancescaVoice";
    pub const JA_JP_EMI_V3: &str = "ja-JP_EmiV3Voice";
    pub const JA_JP_EMI: &str = "ja-JP_EmiVoice";
    pub const KO_KR_HYUNJUN: &str = "ko-KR_HyunjunVoice";
    pub const KO_KR_SIWOO: &str = "ko-KR_SiWooVoice";
    pub const KO_KR_YOUNGMI: &str = "ko-KR_YoungmiVoice";
    pub const KO_KR_YUNA: &str = "ko-KR_YunaVoice";
    pub const NL_BE_ADELE: &str = "nl-BE_AdeleVoice";
    pub const NL_BE_BRAM: &str = "nl-BE_BramVoice";
    pub const NL_NL_EMMA: &str = "nl-NL_EmmaVoice";
    pub const NL_NL_LIAM: &str = "nl-NL_LiamVoice";
    pub const PT_BR_ISABELA_V3: &str = "pt-BR_IsabelaV3Voice";
    pub const PT_BR_ISABELA: &str = "pt-BR_IsabelaVoice";
    pub const SV_SE_INGRID: &str = "sv-SE_IngridVoice";
    pub const ZH_CN_LINA: &str = "zh-CN_LiNaVoice";
    pub const ZH_CN_WANGWEI: &str = "zh-CN_WangWeiVoice";
    pub const ZH_CN_ZHANGJING: &str = "zh-CN_ZhangJingVoice";

    /// Voice used by the service when a request names none.
    pub const DEFAULT: &str = EN_US_MICHAEL_V3;
}
