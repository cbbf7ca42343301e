use crate::utils::error::CompassError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// Wheel order, starting at the top of the wheel.
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "♈",
            ZodiacSign::Taurus => "♉",
            ZodiacSign::Gemini => "♊",
            ZodiacSign::Cancer => "♋",
            ZodiacSign::Leo => "♌",
            ZodiacSign::Virgo => "♍",
            ZodiacSign::Libra => "♎",
            ZodiacSign::Scorpio => "♏",
            ZodiacSign::Sagittarius => "♐",
            ZodiacSign::Capricorn => "♑",
            ZodiacSign::Aquarius => "♒",
            ZodiacSign::Pisces => "♓",
        }
    }

    pub fn date_range(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Mar 21 - Apr 19",
            ZodiacSign::Taurus => "Apr 20 - May 20",
            ZodiacSign::Gemini => "May 21 - Jun 20",
            ZodiacSign::Cancer => "Jun 21 - Jul 22",
            ZodiacSign::Leo => "Jul 23 - Aug 22",
            ZodiacSign::Virgo => "Aug 23 - Sep 22",
            ZodiacSign::Libra => "Sep 23 - Oct 22",
            ZodiacSign::Scorpio => "Oct 23 - Nov 21",
            ZodiacSign::Sagittarius => "Nov 22 - Dec 21",
            ZodiacSign::Capricorn => "Dec 22 - Jan 19",
            ZodiacSign::Aquarius => "Jan 20 - Feb 18",
            ZodiacSign::Pisces => "Feb 19 - Mar 20",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZodiacSign {
    type Err = CompassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZodiacSign::ALL
            .into_iter()
            .find(|sign| sign.as_str() == s)
            .ok_or_else(|| CompassError::invalid_input("zodiac sign", format!("unknown sign '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChineseZodiacSign {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

impl ChineseZodiacSign {
    pub const ALL: [ChineseZodiacSign; 12] = [
        ChineseZodiacSign::Rat,
        ChineseZodiacSign::Ox,
        ChineseZodiacSign::Tiger,
        ChineseZodiacSign::Rabbit,
        ChineseZodiacSign::Dragon,
        ChineseZodiacSign::Snake,
        ChineseZodiacSign::Horse,
        ChineseZodiacSign::Goat,
        ChineseZodiacSign::Monkey,
        ChineseZodiacSign::Rooster,
        ChineseZodiacSign::Dog,
        ChineseZodiacSign::Pig,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChineseZodiacSign::Rat => "Rat",
            ChineseZodiacSign::Ox => "Ox",
            ChineseZodiacSign::Tiger => "Tiger",
            ChineseZodiacSign::Rabbit => "Rabbit",
            ChineseZodiacSign::Dragon => "Dragon",
            ChineseZodiacSign::Snake => "Snake",
            ChineseZodiacSign::Horse => "Horse",
            ChineseZodiacSign::Goat => "Goat",
            ChineseZodiacSign::Monkey => "Monkey",
            ChineseZodiacSign::Rooster => "Rooster",
            ChineseZodiacSign::Dog => "Dog",
            ChineseZodiacSign::Pig => "Pig",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ChineseZodiacSign::Rat => "🐀",
            ChineseZodiacSign::Ox => "🐂",
            ChineseZodiacSign::Tiger => "🐅",
            ChineseZodiacSign::Rabbit => "🐇",
            ChineseZodiacSign::Dragon => "🐉",
            ChineseZodiacSign::Snake => "🐍",
            ChineseZodiacSign::Horse => "🐎",
            ChineseZodiacSign::Goat => "🐐",
            ChineseZodiacSign::Monkey => "🐒",
            ChineseZodiacSign::Rooster => "🐓",
            ChineseZodiacSign::Dog => "🐕",
            ChineseZodiacSign::Pig => "🐖",
        }
    }
}

impl fmt::Display for ChineseZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChineseZodiacSign {
    type Err = CompassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChineseZodiacSign::ALL
            .into_iter()
            .find(|sign| sign.as_str() == s)
            .ok_or_else(|| {
                CompassError::invalid_input("chinese zodiac sign", format!("unknown sign '{}'", s))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Daily, Timeframe::Weekly, Timeframe::Monthly];

    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::Daily => "Daily",
            Timeframe::Weekly => "Weekly",
            Timeframe::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = CompassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| CompassError::invalid_input("timeframe", format!("unknown timeframe '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AstrologyMode {
    #[default]
    Western,
    Chinese,
}

impl AstrologyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AstrologyMode::Western => "western",
            AstrologyMode::Chinese => "chinese",
        }
    }
}

impl fmt::Display for AstrologyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AstrologyMode {
    type Err = CompassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "western" => Ok(AstrologyMode::Western),
            "chinese" => Ok(AstrologyMode::Chinese),
            other => Err(CompassError::invalid_input(
                "astrology mode",
                format!("unknown mode '{}'", other),
            )),
        }
    }
}

/// What the user currently has picked in one astrology mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<Sign> {
    pub sign: Option<Sign>,
    pub timeframe: Timeframe,
}

impl<Sign> Default for Selection<Sign> {
    fn default() -> Self {
        Self {
            sign: None,
            timeframe: Timeframe::Daily,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horoscope {
    pub love: String,
    pub career: String,
    pub health: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZodiacInfo {
    pub personality_traits: Vec<String>,
    pub compatibility: String,
    pub ruling_planet: String,
    pub element: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YinYang {
    Yin,
    Yang,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChineseZodiacInfo {
    pub personality_traits: Vec<String>,
    pub compatibility: String,
    pub element: String,
    pub yin_yang: YinYang,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityInfo {
    pub percentage: u8,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetInfo {
    pub name: String,
    pub mass: String,
    pub diameter: String,
    pub distance_from_sun: String,
    pub fun_facts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstrologicalEvent {
    pub emoji: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactTopic {
    WesternAstrology,
    ChineseAstrology,
    Astronomy,
}

impl FactTopic {
    pub fn as_str(self) -> &'static str {
        match self {
            FactTopic::WesternAstrology => "western astrology",
            FactTopic::ChineseAstrology => "chinese astrology",
            FactTopic::Astronomy => "astronomy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactSheet {
    pub western: String,
    pub chinese: String,
    pub astronomy: String,
}

/// Image as a `data:` URL, ready to embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub data_url: String,
}

/// Long-form text shown next to a generated picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllustratedText {
    pub text: String,
    pub image: GeneratedImage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredSigns {
    pub western: ZodiacSign,
    pub chinese: ChineseZodiacSign,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signs_parse_from_literal_strings() {
        for sign in ZodiacSign::ALL {
            assert_eq!(sign.as_str().parse::<ZodiacSign>().unwrap(), sign);
        }
        assert_eq!("Goat".parse::<ChineseZodiacSign>().unwrap(), ChineseZodiacSign::Goat);
        assert!("leo".parse::<ZodiacSign>().is_err());
        assert!("Ophiuchus".parse::<ZodiacSign>().is_err());
    }

    #[test]
    fn test_mode_and_timeframe_literals() {
        assert_eq!("chinese".parse::<AstrologyMode>().unwrap(), AstrologyMode::Chinese);
        assert!("Chinese".parse::<AstrologyMode>().is_err());
        assert_eq!("Monthly".parse::<Timeframe>().unwrap(), Timeframe::Monthly);
        assert_eq!(Timeframe::default(), Timeframe::Daily);
    }

    #[test]
    fn test_chinese_info_deserializes_yin_yang() {
        let info: ChineseZodiacInfo = serde_json::from_value(serde_json::json!({
            "personality_traits": ["Loyal"],
            "compatibility": "Rabbit",
            "element": "Earth",
            "yin_yang": "Yang"
        }))
        .unwrap();
        assert_eq!(info.yin_yang, YinYang::Yang);
    }
}
